//! Spreadsheet ingest kernel: first worksheet bytes -> positional cell grid.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::spec::EnumCellValue;

/// Decode the first worksheet of `v_bytes` into a rectangular grid.
///
/// Coordinates are absolute: when the used range does not start at `A1`,
/// leading empty rows/columns are materialized so row `n` is worksheet row `n + 1`.
pub fn read_first_sheet_grid(v_bytes: &[u8]) -> Result<Vec<Vec<EnumCellValue>>, String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_bytes.to_vec()))
        .map_err(|err| format!("Failed to open spreadsheet bytes: {err}"))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Spreadsheet contains no worksheet.".to_string())?
        .map_err(|err| format!("Failed to read first worksheet: {err}"))?;

    let l_grid = derive_grid_from_range(&range);
    debug!(
        rows = l_grid.len(),
        cols = l_grid.first().map_or(0, Vec::len),
        "decoded first worksheet"
    );
    Ok(l_grid)
}

fn derive_grid_from_range(range: &Range<Data>) -> Vec<Vec<EnumCellValue>> {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return vec![];
    };
    let n_row_offset = n_row_start as usize;
    let n_col_offset = n_col_start as usize;
    let n_width = n_col_offset + range.width();

    let mut l_grid = Vec::with_capacity(n_row_offset + range.height());
    for _ in 0..n_row_offset {
        l_grid.push(vec![EnumCellValue::None; n_width]);
    }
    for row in range.rows() {
        let mut l_row = vec![EnumCellValue::None; n_col_offset];
        l_row.extend(row.iter().map(derive_cell_value_from_data));
        l_grid.push(l_row);
    }
    l_grid
}

fn derive_cell_value_from_data(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty => EnumCellValue::None,
        Data::String(val) => EnumCellValue::String(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::String(if *val { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(val) => EnumCellValue::Number(val.as_f64()),
        Data::DateTimeIso(val) => EnumCellValue::String(val.clone()),
        Data::DurationIso(val) => EnumCellValue::String(val.clone()),
        Data::Error(err) => EnumCellValue::String(err.to_string()),
    }
}
