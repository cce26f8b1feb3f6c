//! Column normalizer: raw statement grid -> canonical table.

use std::collections::BTreeSet;

use commkit_io_xlsx::EnumCellValue;
use tracing::{info, warn};

use crate::conf::{C_COL_COMPENSATION_TYPE, C_COMPENSATION_WORD};
use crate::report::ReportRunBuilder;
use crate::spec::{ReportError, SpecReportConfig, SpecReportTable};

/// Trim padding rows, resolve the header, then drop/rename/project/append columns.
pub fn normalize_columns(
    grid: &[Vec<EnumCellValue>],
    config: &SpecReportConfig,
    builder: &mut ReportRunBuilder,
) -> Result<SpecReportTable, ReportError> {
    let layout = &config.sheet_layout;
    let n_rows_total = grid.len();

    let Some(row_header) = grid.get(layout.header_row_index) else {
        return Err(ReportError::EmptyInput {
            rows_total: n_rows_total,
        });
    };
    let n_row_end = n_rows_total.saturating_sub(layout.rows_skip_trailing);
    if layout.rows_skip_leading >= n_row_end {
        return Err(ReportError::EmptyInput {
            rows_total: n_rows_total,
        });
    }
    let l_rows_data = &grid[layout.rows_skip_leading..n_row_end];

    let l_headers: Vec<String> = row_header.iter().map(EnumCellValue::to_text).collect();

    // Drop.
    let set_drop: BTreeSet<&str> = config.columns_to_drop.iter().map(String::as_str).collect();
    for c_drop in &config.columns_to_drop {
        if !l_headers.iter().any(|header| header == c_drop) {
            warn!(column = %c_drop, "drop-list column absent from statement header");
            builder.add_warning(format!(
                "Drop-list column {c_drop:?} is absent from the statement header."
            ));
        }
    }
    let l_cols_idx_kept: Vec<usize> = (0..l_headers.len())
        .filter(|col_idx| !set_drop.contains(l_headers[*col_idx].as_str()))
        .collect();

    // Rename.
    let mut l_missing: Vec<String> = config
        .rename_mapping
        .keys()
        .filter(|c_from| {
            !l_cols_idx_kept
                .iter()
                .any(|col_idx| &l_headers[*col_idx] == *c_from)
        })
        .cloned()
        .collect();
    let l_names_renamed: Vec<String> = l_cols_idx_kept
        .iter()
        .map(|col_idx| {
            let header = &l_headers[*col_idx];
            config
                .rename_mapping
                .get(header)
                .cloned()
                .unwrap_or_else(|| header.clone())
        })
        .collect();

    // Project onto keep-list.
    let mut l_cols_idx_source = Vec::with_capacity(config.columns_to_keep.len());
    for c_keep in &config.columns_to_keep {
        match l_names_renamed.iter().position(|c_name| c_name == c_keep) {
            Some(n_pos) => l_cols_idx_source.push(l_cols_idx_kept[n_pos]),
            None => {
                if !l_missing.contains(c_keep) {
                    l_missing.push(c_keep.clone());
                }
            }
        }
    }
    if !l_missing.is_empty() {
        return Err(ReportError::Schema { missing: l_missing });
    }

    let mut l_columns = config.columns_to_keep.clone();
    l_columns.extend(config.new_columns.iter().cloned());

    let rows = l_rows_data
        .iter()
        .map(|row| {
            let mut l_row: Vec<EnumCellValue> = l_cols_idx_source
                .iter()
                .map(|col_idx| row.get(*col_idx).cloned().unwrap_or_default())
                .collect();
            l_row.extend(
                config
                    .new_columns
                    .iter()
                    .map(|_| EnumCellValue::String(String::new())),
            );
            l_row
        })
        .collect::<Vec<_>>();

    info!(
        rows_total = n_rows_total,
        rows_data = rows.len(),
        columns = l_columns.len(),
        "statement normalized"
    );

    Ok(SpecReportTable {
        columns: l_columns,
        rows,
    })
}

/// Remove the first `Compensation` word from the compensation type column.
///
/// Tables without that column are returned unchanged.
pub fn clean_compensation_type(table: SpecReportTable) -> SpecReportTable {
    let Some(col_idx) = table.column_index(C_COL_COMPENSATION_TYPE) else {
        return table;
    };

    let SpecReportTable { columns, rows } = table;
    let rows = rows
        .into_iter()
        .map(|mut row| {
            if let Some(EnumCellValue::String(val)) = row.get(col_idx) {
                let c_clean = val.replacen(C_COMPENSATION_WORD, "", 1).trim().to_string();
                row[col_idx] = EnumCellValue::String(c_clean);
            }
            row
        })
        .collect();
    SpecReportTable { columns, rows }
}
