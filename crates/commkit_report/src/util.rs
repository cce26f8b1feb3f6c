//! Cell coercion helpers shared by the transform stages.

use commkit_io_xlsx::EnumCellValue;

/// Numeric view of a statement cell.
///
/// Text is trimmed and stripped of `$`/`,`; a trailing `%` divides by 100.
/// Anything else (including blanks) counts as `0.0`.
pub fn convert_cell_to_f64(value: &EnumCellValue) -> f64 {
    match value {
        EnumCellValue::Number(n) if n.is_finite() => *n,
        EnumCellValue::Number(_) | EnumCellValue::None => 0.0,
        EnumCellValue::String(s) => parse_numeric_text(s).unwrap_or(0.0),
    }
}

/// Parse currency/percent decorated text.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let c_clean: String = text
        .trim()
        .chars()
        .filter(|chr| *chr != '$' && *chr != ',')
        .collect();
    let (c_number, n_scale) = match c_clean.strip_suffix('%') {
        Some(val) => (val.trim_end(), 100.0),
        None => (c_clean.as_str(), 1.0),
    };
    if c_number.is_empty() {
        return None;
    }
    c_number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n / n_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_to_f64() {
        assert_eq!(convert_cell_to_f64(&EnumCellValue::Number(1000.0)), 1000.0);
        assert_eq!(convert_cell_to_f64(&EnumCellValue::None), 0.0);
        assert_eq!(
            convert_cell_to_f64(&EnumCellValue::String(" $1,250.50 ".to_string())),
            1250.5
        );
        assert_eq!(
            convert_cell_to_f64(&EnumCellValue::String("50%".to_string())),
            0.5
        );
        assert_eq!(
            convert_cell_to_f64(&EnumCellValue::String("n/a".to_string())),
            0.0
        );
        assert_eq!(convert_cell_to_f64(&EnumCellValue::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn test_parse_numeric_text_rejects_bare_symbols() {
        assert_eq!(parse_numeric_text("$"), None);
        assert_eq!(parse_numeric_text("%"), None);
        assert_eq!(parse_numeric_text("-3"), Some(-3.0));
    }
}
