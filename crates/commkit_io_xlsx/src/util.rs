//! Stateless helper utilities used by the XLSX reader/formatter/writer kernels.

use crate::conf::{
    C_SHEET_NAME_RESERVED, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
///
/// Excel also rejects names that start or end with `'` and the reserved name `History`.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    let c_name: String = c_name
        .trim()
        .trim_matches('\'')
        .trim()
        .chars()
        .take(N_LEN_EXCEL_SHEET_NAME_MAX)
        .collect();
    let c_name = c_name.trim_end_matches('\'').trim_end();

    if c_name.is_empty() {
        return "Sheet".to_string();
    }
    if c_name.eq_ignore_ascii_case(C_SHEET_NAME_RESERVED) {
        return format!("{c_name}{replace_to}");
    }
    c_name.to_string()
}

/// Create suffixed sheet name (`base__2`, `base__3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx: usize) -> String {
    let c_sheet_name_suffix = format!("__{part_idx}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

/// Validate grid dimensions against Excel worksheet limits.
pub fn validate_sheet_limits(height: usize, width: usize, sheet_name: &str) -> Result<(), String> {
    if height > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Sheet {sheet_name:?} has {height} rows; Excel limit is {N_NROWS_EXCEL_MAX}."
        ));
    }
    if width > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Sheet {sheet_name:?} has {width} columns; Excel limit is {N_NCOLS_EXCEL_MAX}."
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellReferences

/// Convert zero-based column index to Excel letters (`0 -> A`, `26 -> AA`).
pub fn derive_column_name(col_idx: usize) -> String {
    let mut n_col = col_idx + 1;
    let mut c_name = String::new();
    while n_col > 0 {
        let n_rem = (n_col - 1) % 26;
        c_name.insert(0, char::from(b'A' + n_rem as u8));
        n_col = (n_col - 1) / 26;
    }
    c_name
}

/// Build an A1-style range (`I3:I7`) from zero-based, inclusive row bounds.
pub fn derive_column_range_ref(col_idx: usize, row_idx_start: usize, row_idx_end: usize) -> String {
    let c_col = derive_column_name(col_idx);
    format!("{c_col}{}:{c_col}{}", row_idx_start + 1, row_idx_end + 1)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Width

/// Character count of the display text.
pub fn estimate_text_len(text: &str) -> usize {
    text.chars().count()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name_replaces_illegal_and_caps_length() {
        assert_eq!(sanitize_sheet_name("A/B:C", "_"), "A_B_C");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_sanitize_sheet_name_strips_edge_apostrophes() {
        assert_eq!(sanitize_sheet_name("'Smith", "_"), "Smith");
        assert_eq!(sanitize_sheet_name("Smith'", "_"), "Smith");
        assert_eq!(sanitize_sheet_name("O'Neil", "_"), "O'Neil");
        assert_eq!(sanitize_sheet_name("''", "_"), "Sheet");
        let c_long = format!("{}'tail", "x".repeat(30));
        assert_eq!(sanitize_sheet_name(&c_long, "_"), "x".repeat(30));
        assert_eq!(sanitize_sheet_name("history", "_"), "history_");
    }

    #[test]
    fn test_create_sheet_identifier_respects_length_cap() {
        assert_eq!(create_sheet_identifier("Agent", 2), "Agent__2");
        let c_name = create_sheet_identifier(&"y".repeat(31), 12);
        assert_eq!(c_name.chars().count(), 31);
        assert!(c_name.ends_with("__12"));
    }

    #[test]
    fn test_derive_column_name() {
        assert_eq!(derive_column_name(0), "A");
        assert_eq!(derive_column_name(8), "I");
        assert_eq!(derive_column_name(25), "Z");
        assert_eq!(derive_column_name(26), "AA");
        assert_eq!(derive_column_name(701), "ZZ");
        assert_eq!(derive_column_name(702), "AAA");
    }

    #[test]
    fn test_derive_column_range_ref_is_one_based() {
        assert_eq!(derive_column_range_ref(8, 2, 6), "I3:I7");
    }

    #[test]
    fn test_validate_sheet_limits() {
        assert!(validate_sheet_limits(10, 10, "s").is_ok());
        assert!(validate_sheet_limits(N_NROWS_EXCEL_MAX + 1, 1, "s").is_err());
        assert!(validate_sheet_limits(1, N_NCOLS_EXCEL_MAX + 1, "s").is_err());
    }
}
