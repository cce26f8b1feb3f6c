//! Shared XLSX specification models.

use crate::conf::{N_WIDTH_CELL_PADDING, N_WIDTH_GAP_COLUMN};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification, merged per cell before conversion to `rust_xlsxwriter::Format`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Normalized cell value during ingest/transform/write pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// `true` for `None` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::String(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Display text as used for grouping keys and width inference.
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetModel

/// Numeric format tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumNumFormat {
    /// No explicit number format.
    #[default]
    None,
    /// Currency pattern.
    Money,
    /// One-decimal percent pattern.
    Percent,
}

/// Style role assigned by the banding state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumRowRole {
    /// Header or header-repeat row.
    Header,
    /// Data row at an even position within its block.
    EvenData,
    /// Data row at an odd position within its block.
    OddData,
    /// Blank separator or subtotal row.
    #[default]
    Plain,
}

/// Unformatted sheet: row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetData {
    /// Requested sheet name (sanitized at write time).
    pub sheet_name: String,
    /// Rows including header.
    pub rows: Vec<Vec<EnumCellValue>>,
}

/// One formatted cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Formula text (with leading `=`); takes precedence over `value`.
    pub formula: Option<String>,
    /// Column number format.
    pub num_format: EnumNumFormat,
    /// Row style role.
    pub role: EnumRowRole,
    /// Cell belongs to the gap column.
    pub if_gap: bool,
}

/// Formatted sheet ready for serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecFormattedSheet {
    /// Sheet name.
    pub sheet_name: String,
    /// Formatted rows, rectangular.
    pub rows: Vec<Vec<SpecSheetCell>>,
    /// Uniform width of every non-gap column.
    pub width_column: f64,
    /// Gap column index, if the sheet has one.
    pub col_idx_gap: Option<usize>,
    /// Width of the gap column.
    pub width_gap: f64,
    /// Frozen row count.
    pub row_freeze: usize,
    /// Frozen column count.
    pub col_freeze: usize,
}

impl SpecFormattedSheet {
    /// Number of columns in the sheet.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Ordered workbook model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecWorkbookModel {
    /// Sheets in output order.
    pub sheets: Vec<SpecFormattedSheet>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatterOptions

/// Options controlling number formats, gap column, sizing and freeze panes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFormatterOptions {
    /// Header names of money columns.
    pub cols_money: Vec<String>,
    /// Header names of percent columns.
    pub cols_percent: Vec<String>,
    /// Header name of the gap column.
    pub col_gap: Option<String>,
    /// Padding added to the sheet-wide content width.
    pub width_cell_padding: usize,
    /// Fixed gap column width.
    pub width_gap: f64,
    /// Frozen row count.
    pub row_freeze: usize,
    /// Frozen column count.
    pub col_freeze: usize,
}

impl Default for SpecFormatterOptions {
    fn default() -> Self {
        Self {
            cols_money: vec![],
            cols_percent: vec![],
            col_gap: None,
            width_cell_padding: N_WIDTH_CELL_PADDING,
            width_gap: N_WIDTH_GAP_COLUMN,
            row_freeze: 1,
            col_freeze: 0,
        }
    }
}

impl SpecFormatterOptions {
    /// Number format tag configured for `header`.
    pub fn derive_num_format(&self, header: &str) -> EnumNumFormat {
        if self.cols_money.iter().any(|c_name| c_name == header) {
            EnumNumFormat::Money
        } else if self.cols_percent.iter().any(|c_name| c_name == header) {
            EnumNumFormat::Percent
        } else {
            EnumNumFormat::None
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-workbook write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Final sheet names in workbook order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
