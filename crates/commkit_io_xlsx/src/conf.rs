//! XLSX constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecFormatterOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Sheet name Excel reserves (case-insensitive).
pub const C_SHEET_NAME_RESERVED: &str = "History";

/// Currency number format code.
pub const C_NUM_FORMAT_MONEY: &str = "$#,##0.00";
/// One-decimal percent number format code.
pub const C_NUM_FORMAT_PERCENT: &str = "0.0%";

/// Header row fill.
pub const C_COLOR_NAVY: &str = "#00004D";
/// Gap column accent fill.
pub const C_COLOR_DARK_BLUE: &str = "#4A90E2";
/// Odd data row fill.
pub const C_COLOR_LIGHTER_BLUE: &str = "#B3E5FC";
/// Even data row fill.
pub const C_COLOR_LIGHTEST_BLUE: &str = "#E0F7FF";
/// Header font color.
pub const C_FONT_COLOR_WHITE: &str = "#FFFFFF";
/// Data font color.
pub const C_FONT_COLOR_BLACK: &str = "#333333";

/// Fixed width of the gap column, in characters.
pub const N_WIDTH_GAP_COLUMN: f64 = 4.0;
/// Padding added to the sheet-wide content width.
pub const N_WIDTH_CELL_PADDING: usize = 2;

/// Named style presets applied by [`crate::writer::XlsxWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStylePresets {
    /// Base format merged under every cell.
    pub fmt_base: SpecCellFormat,
    /// Header and header-repeat rows.
    pub fmt_header: SpecCellFormat,
    /// Even data rows.
    pub fmt_even: SpecCellFormat,
    /// Odd data rows.
    pub fmt_odd: SpecCellFormat,
    /// Gap column overlay.
    pub fmt_gap: SpecCellFormat,
}

/// Build default style presets for banded report sheets.
pub fn derive_default_style_presets() -> SpecStylePresets {
    let cfg_base_fmt_spec = SpecCellFormat {
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        font_color: Some(C_FONT_COLOR_BLACK.to_string()),
        ..Default::default()
    };

    SpecStylePresets {
        fmt_header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_COLOR_NAVY.to_string()),
            font_color: Some(C_FONT_COLOR_WHITE.to_string()),
            ..Default::default()
        }),
        fmt_even: cfg_base_fmt_spec.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_LIGHTEST_BLUE.to_string()),
            ..Default::default()
        }),
        fmt_odd: cfg_base_fmt_spec.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_LIGHTER_BLUE.to_string()),
            ..Default::default()
        }),
        fmt_gap: SpecCellFormat {
            bg_color: Some(C_COLOR_DARK_BLUE.to_string()),
            ..Default::default()
        },
        fmt_base: cfg_base_fmt_spec,
    }
}

/// Build default formatter options.
pub fn derive_default_formatter_options() -> SpecFormatterOptions {
    SpecFormatterOptions::default()
}
