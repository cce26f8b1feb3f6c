//! Sheet formatter: banding roles, number formats, subtotal formulas and sizing.

use tracing::debug;

use crate::banding::{EnumRowKind, classify_rows};
use crate::spec::{
    EnumCellValue, EnumNumFormat, SpecFormattedSheet, SpecFormatterOptions, SpecSheetCell,
    SpecSheetData, SpecWorkbookModel,
};
use crate::util::{derive_column_range_ref, estimate_text_len, validate_sheet_limits};

/// Format every sheet, preserving order.
pub fn format_workbook(
    sheets: &[SpecSheetData],
    options: &SpecFormatterOptions,
) -> Result<SpecWorkbookModel, String> {
    let mut l_sheets = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        l_sheets.push(format_sheet(sheet, options)?);
    }
    Ok(SpecWorkbookModel { sheets: l_sheets })
}

/// Format one sheet; column formats follow the first header row.
pub fn format_sheet(
    sheet: &SpecSheetData,
    options: &SpecFormatterOptions,
) -> Result<SpecFormattedSheet, String> {
    let n_width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
    validate_sheet_limits(sheet.rows.len(), n_width, &sheet.sheet_name)?;

    let l_first_cell_flags: Vec<bool> = sheet
        .rows
        .iter()
        .map(|row| row.first().is_some_and(|value| !value.is_empty()))
        .collect();
    let l_bands = classify_rows(&l_first_cell_flags);

    let row_header = l_bands
        .iter()
        .position(|band| band.kind == EnumRowKind::Header)
        .map(|row_idx| &sheet.rows[row_idx]);
    let l_headers: Vec<String> = match row_header {
        Some(row) => (0..n_width)
            .map(|col_idx| row.get(col_idx).map(EnumCellValue::to_text).unwrap_or_default())
            .collect(),
        None => vec![String::new(); n_width],
    };
    let l_num_formats: Vec<EnumNumFormat> = l_headers
        .iter()
        .map(|header| options.derive_num_format(header))
        .collect();
    let col_idx_gap = options
        .col_gap
        .as_ref()
        .and_then(|c_gap| l_headers.iter().position(|header| header == c_gap));

    let mut n_len_text_max = 0usize;
    let mut n_subtotal_rows = 0usize;
    let mut l_rows = Vec::with_capacity(sheet.rows.len());
    for (row_idx, (row, band)) in sheet.rows.iter().zip(&l_bands).enumerate() {
        let row_idx_block = match (band.kind, band.row_idx_header) {
            (EnumRowKind::Subtotal, Some(row_idx_header)) if row_idx_header + 1 < row_idx => {
                n_subtotal_rows += 1;
                Some((row_idx_header + 1, row_idx - 1))
            }
            _ => None,
        };

        let mut l_cells = Vec::with_capacity(n_width);
        for col_idx in 0..n_width {
            let value = row.get(col_idx).cloned().unwrap_or_default();
            n_len_text_max = usize::max(n_len_text_max, estimate_text_len(&value.to_text()));

            let num_format = l_num_formats[col_idx];
            let formula = match row_idx_block {
                Some((row_idx_start, row_idx_end)) if num_format == EnumNumFormat::Money => {
                    Some(format!(
                        "=SUM({})",
                        derive_column_range_ref(col_idx, row_idx_start, row_idx_end)
                    ))
                }
                _ => None,
            };

            l_cells.push(SpecSheetCell {
                value: if formula.is_some() {
                    EnumCellValue::None
                } else {
                    value
                },
                formula,
                num_format,
                role: band.role,
                if_gap: col_idx_gap == Some(col_idx),
            });
        }
        l_rows.push(l_cells);
    }

    debug!(
        sheet = %sheet.sheet_name,
        rows = l_rows.len(),
        subtotals = n_subtotal_rows,
        "formatted sheet"
    );

    Ok(SpecFormattedSheet {
        sheet_name: sheet.sheet_name.clone(),
        rows: l_rows,
        width_column: (n_len_text_max + options.width_cell_padding) as f64,
        col_idx_gap,
        width_gap: options.width_gap,
        row_freeze: options.row_freeze,
        col_freeze: options.col_freeze,
    })
}
