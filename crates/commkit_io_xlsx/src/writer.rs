//! XLSX writer kernel that renders formatted sheet models into a workbook buffer.

use std::collections::{BTreeSet, HashMap};

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tracing::{info, warn};

use crate::conf::{C_NUM_FORMAT_MONEY, C_NUM_FORMAT_PERCENT, SpecStylePresets};
use crate::spec::{
    EnumCellValue, EnumNumFormat, EnumRowRole, SpecCellFormat, SpecFormattedSheet, SpecSheetCell,
    SpecWorkbookModel, SpecXlsxReport,
};
use crate::util::{create_sheet_identifier, sanitize_sheet_name};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close_to_buffer`] is called.
pub struct XlsxWriter {
    workbook: Workbook,
    presets: SpecStylePresets,
    dict_formats: HashMap<SpecCellFormat, Format>,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to style presets.
    pub fn new(presets: SpecStylePresets) -> Self {
        Self {
            workbook: Workbook::new(),
            presets,
            dict_formats: HashMap::new(),
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return snapshot of the write report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Write every sheet of `model` in order.
    pub fn write_workbook(&mut self, model: &SpecWorkbookModel) -> Result<(), String> {
        for sheet in &model.sheets {
            self.write_sheet(sheet)?;
        }
        Ok(())
    }

    /// Write one formatted sheet; returns the final (sanitized, unique) sheet name.
    pub fn write_sheet(&mut self, sheet: &SpecFormattedSheet) -> Result<String, String> {
        if self.if_closed {
            return Err("Cannot write after close_to_buffer().".to_string());
        }

        let c_name_sanitized = sanitize_sheet_name(&sheet.sheet_name, "_");
        let sheet_name_unique = self.derive_unique_sheet_name(&c_name_sanitized);
        if sheet_name_unique != sheet.sheet_name {
            warn!(
                requested = %sheet.sheet_name,
                written = %sheet_name_unique,
                "sheet name adjusted"
            );
            self.report.warn(format!(
                "Sheet name {:?} written as {:?}.",
                sheet.sheet_name, sheet_name_unique
            ));
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let format = derive_cell_format(&mut self.dict_formats, &self.presets, cell);
                write_cell_with_format(worksheet, row_idx, col_idx, cell, &format)?;
            }
        }

        for col_idx in 0..sheet.width() {
            let n_width = if sheet.col_idx_gap == Some(col_idx) {
                sheet.width_gap
            } else {
                sheet.width_column
            };
            worksheet
                .set_column_width(cast_col_num(col_idx)?, n_width)
                .map_err(derive_xlsx_error_text)?;
        }

        worksheet
            .set_freeze_panes(
                cast_row_num(sheet.row_freeze)?,
                cast_col_num(sheet.col_freeze)?,
            )
            .map_err(derive_xlsx_error_text)?;

        self.report.sheets.push(sheet_name_unique.clone());
        Ok(sheet_name_unique)
    }

    /// Render workbook to bytes. Further writes are rejected afterwards.
    pub fn close_to_buffer(&mut self) -> Result<Vec<u8>, String> {
        if self.if_closed {
            return Err("Workbook buffer already produced.".to_string());
        }
        let v_buffer = self
            .workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        info!(
            sheets = self.report.sheets.len(),
            bytes = v_buffer.len(),
            "workbook serialized"
        );
        Ok(v_buffer)
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        // Excel compares sheet names case-insensitively.
        if self.set_sheet_names_existing.insert(name.to_lowercase()) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if self.set_sheet_names_existing.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Serialize a formatted workbook model into `.xlsx` bytes.
pub fn serialize_workbook(
    model: &SpecWorkbookModel,
    presets: SpecStylePresets,
) -> Result<(Vec<u8>, SpecXlsxReport), String> {
    let mut writer = XlsxWriter::new(presets);
    writer.write_workbook(model)?;
    let v_buffer = writer.close_to_buffer()?;
    Ok((v_buffer, writer.report()))
}

/// Merge role, number-format and gap presets into the final cell format spec.
pub fn derive_cell_format_spec(presets: &SpecStylePresets, cell: &SpecSheetCell) -> SpecCellFormat {
    let fmt_role = match cell.role {
        EnumRowRole::Header => &presets.fmt_header,
        EnumRowRole::EvenData => &presets.fmt_even,
        EnumRowRole::OddData => &presets.fmt_odd,
        EnumRowRole::Plain => &presets.fmt_base,
    };

    let c_num_format = match cell.num_format {
        EnumNumFormat::Money => Some(C_NUM_FORMAT_MONEY.to_string()),
        EnumNumFormat::Percent => Some(C_NUM_FORMAT_PERCENT.to_string()),
        EnumNumFormat::None => None,
    };

    let mut fmt_cell = fmt_role.with_(SpecCellFormat {
        num_format: c_num_format,
        ..Default::default()
    });
    if cell.if_gap {
        fmt_cell = fmt_cell.merge(&presets.fmt_gap);
    }
    fmt_cell
}

fn derive_cell_format(
    dict_formats: &mut HashMap<SpecCellFormat, Format>,
    presets: &SpecStylePresets,
    cell: &SpecSheetCell,
) -> Format {
    let fmt_spec = derive_cell_format_spec(presets, cell);
    dict_formats
        .entry(fmt_spec)
        .or_insert_with_key(derive_rust_xlsx_format)
        .clone()
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    cell: &SpecSheetCell,
    format: &Format,
) -> Result<(), String> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;

    if let Some(c_formula) = &cell.formula {
        worksheet
            .write_formula_with_format(n_row, n_col, c_formula.as_str(), format)
            .map_err(derive_xlsx_error_text)?;
        return Ok(());
    }

    match &cell.value {
        EnumCellValue::None => {
            worksheet
                .write_blank(n_row, n_col, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(n_row, n_col, val, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(n_row, n_col, *val, format)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    for val in [&spec.align, &spec.valign].into_iter().flatten() {
        if let Some(align) = derive_format_align(val) {
            format = format.set_align(align);
        }
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.as_str());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align {
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "vcenter" => Some(FormatAlign::VerticalCenter),
        "bottom" => Some(FormatAlign::Bottom),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};

    use super::*;
    use crate::conf::{C_COLOR_DARK_BLUE, C_COLOR_NAVY, derive_default_style_presets};

    fn derive_cell(value: EnumCellValue, role: EnumRowRole) -> SpecSheetCell {
        SpecSheetCell {
            value,
            role,
            ..Default::default()
        }
    }

    fn derive_sheet(name: &str) -> SpecFormattedSheet {
        SpecFormattedSheet {
            sheet_name: name.to_string(),
            rows: vec![
                vec![
                    derive_cell(EnumCellValue::String("Premium".to_string()), EnumRowRole::Header),
                    derive_cell(EnumCellValue::String(" ".to_string()), EnumRowRole::Header),
                ],
                vec![
                    derive_cell(EnumCellValue::Number(1000.0), EnumRowRole::EvenData),
                    derive_cell(EnumCellValue::None, EnumRowRole::EvenData),
                ],
                vec![
                    SpecSheetCell {
                        formula: Some("=SUM(A2:A2)".to_string()),
                        num_format: EnumNumFormat::Money,
                        ..Default::default()
                    },
                    derive_cell(EnumCellValue::None, EnumRowRole::Plain),
                ],
            ],
            width_column: 9.0,
            col_idx_gap: Some(1),
            width_gap: 4.0,
            row_freeze: 1,
            col_freeze: 0,
        }
    }

    #[test]
    fn test_derive_cell_format_spec_layers_role_number_format_and_gap() {
        let presets = derive_default_style_presets();

        let fmt_header = derive_cell_format_spec(
            &presets,
            &SpecSheetCell {
                role: EnumRowRole::Header,
                num_format: EnumNumFormat::Percent,
                ..Default::default()
            },
        );
        assert_eq!(fmt_header.bg_color.as_deref(), Some(C_COLOR_NAVY));
        assert_eq!(fmt_header.bold, Some(true));
        assert_eq!(fmt_header.num_format.as_deref(), Some(C_NUM_FORMAT_PERCENT));

        let fmt_gap = derive_cell_format_spec(
            &presets,
            &SpecSheetCell {
                role: EnumRowRole::OddData,
                if_gap: true,
                ..Default::default()
            },
        );
        assert_eq!(fmt_gap.bg_color.as_deref(), Some(C_COLOR_DARK_BLUE));
        assert_eq!(fmt_gap.align.as_deref(), Some("center"));
    }

    #[test]
    fn test_serialize_workbook_preserves_order_and_dedupes_names() {
        let model = SpecWorkbookModel {
            sheets: vec![
                derive_sheet("EarningsReport_01022026"),
                derive_sheet("A/1"),
                derive_sheet("A_1"),
            ],
        };

        let (v_buffer, report) =
            serialize_workbook(&model, derive_default_style_presets()).unwrap();

        assert_eq!(
            report.sheets,
            vec!["EarningsReport_01022026", "A_1", "A_1__2"]
        );
        assert_eq!(report.warnings.len(), 2);

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(v_buffer)).unwrap();
        assert_eq!(workbook.sheet_names(), report.sheets);

        let range = workbook.worksheet_range("A_1").unwrap();
        assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1000.0)));

        let formulas = workbook.worksheet_formula("A_1").unwrap();
        assert_eq!(formulas.get_value((2, 0)).map(String::as_str), Some("SUM(A2:A2)"));
    }

    #[test]
    fn test_sheet_names_differing_only_in_case_are_deduped() {
        let mut writer = XlsxWriter::new(derive_default_style_presets());
        assert_eq!(writer.write_sheet(&derive_sheet("smith")).unwrap(), "smith");
        assert_eq!(writer.write_sheet(&derive_sheet("SMITH")).unwrap(), "SMITH__2");
        assert!(writer.close_to_buffer().is_ok());
    }

    #[test]
    fn test_agent_names_with_edge_apostrophes_are_written() {
        let model = SpecWorkbookModel {
            sheets: vec![derive_sheet("'Smith"), derive_sheet("Smith'")],
        };

        let (v_buffer, report) =
            serialize_workbook(&model, derive_default_style_presets()).unwrap();

        assert_eq!(report.sheets, vec!["Smith", "Smith__2"]);
        assert_eq!(report.warnings.len(), 2);

        let workbook: Xlsx<_> = Xlsx::new(Cursor::new(v_buffer)).unwrap();
        assert_eq!(workbook.sheet_names(), report.sheets);
    }

    #[test]
    fn test_write_after_close_is_rejected() {
        let mut writer = XlsxWriter::new(derive_default_style_presets());
        writer.write_sheet(&derive_sheet("S")).unwrap();
        writer.close_to_buffer().unwrap();

        assert!(writer.write_sheet(&derive_sheet("T")).is_err());
        assert!(writer.close_to_buffer().is_err());
    }
}
