//! `commkit_io_xlsx` v1:
//! Rust-side XLSX kernel for commission statements.
//!
//! Module layout:
//! - `conf`      : constants and default style presets
//! - `spec`      : cell/sheet/workbook models and options
//! - `util`      : pure helper functions
//! - `reader`    : first-sheet ingest into a positional grid
//! - `banding`   : header/data/subtotal row state machine
//! - `formatter` : banding, number formats, subtotals and sizing per sheet
//! - `writer`    : formatted workbook -> `.xlsx` buffer
pub mod banding;
pub mod conf;
pub mod formatter;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use banding::{EnumBandState, EnumRowKind, SpecRowBand, classify_rows, transition};
pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, SpecStylePresets,
    TUP_EXCEL_ILLEGAL, derive_default_formatter_options, derive_default_style_presets,
};
pub use formatter::{format_sheet, format_workbook};
pub use reader::read_first_sheet_grid;
pub use spec::{
    EnumCellValue, EnumNumFormat, EnumRowRole, SpecCellFormat, SpecFormattedSheet,
    SpecFormatterOptions, SpecSheetCell, SpecSheetData, SpecWorkbookModel, SpecXlsxReport,
};
pub use util::{derive_column_name, derive_column_range_ref, sanitize_sheet_name};
pub use writer::{XlsxWriter, serialize_workbook};
