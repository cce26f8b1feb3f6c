//! Report specification models, rate tables and top-level error types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use commkit_io_xlsx::EnumCellValue;
use serde::{Deserialize, Serialize};

use crate::conf::{
    C_EARNINGS_REPORT_DATE_FORMAT, C_EARNINGS_REPORT_PREFIX, C_PRODUCT_NAME_DEFAULT,
    C_PRODUCT_TYPE_ANNUITY, C_PRODUCT_TYPE_LIFE, N_HEADER_ROW_INDEX, N_ROWS_SKIP_LEADING,
    N_ROWS_SKIP_TRAILING, N_SEPARATOR_BLANK_ROWS, TUP_COLUMNS_TO_DROP, TUP_COLUMNS_TO_KEEP,
    TUP_NEW_COLUMNS, TUP_RENAME_MAPPING,
};

////////////////////////////////////////////////////////////////////////////////
// #region Configuration

/// Product type labels as they appear in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecProductTypes {
    /// Label of life products.
    pub life: String,
    /// Label of annuity products.
    pub annuity: String,
    /// Product name used for unmapped non-annuity products.
    pub default: String,
}

impl Default for SpecProductTypes {
    fn default() -> Self {
        Self {
            life: C_PRODUCT_TYPE_LIFE.to_string(),
            annuity: C_PRODUCT_TYPE_ANNUITY.to_string(),
            default: C_PRODUCT_NAME_DEFAULT.to_string(),
        }
    }
}

/// Where the header and data live in the raw grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecSheetLayout {
    /// Zero-based header row.
    pub header_row_index: usize,
    /// Leading rows removed before data.
    pub rows_skip_leading: usize,
    /// Trailing rows removed after data.
    pub rows_skip_trailing: usize,
}

impl Default for SpecSheetLayout {
    fn default() -> Self {
        Self {
            header_row_index: N_HEADER_ROW_INDEX,
            rows_skip_leading: N_ROWS_SKIP_LEADING,
            rows_skip_trailing: N_ROWS_SKIP_TRAILING,
        }
    }
}

/// Earnings report naming and separator layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecEarningsReportOptions {
    /// Sheet name prefix.
    pub prefix: String,
    /// `chrono` strftime pattern of the date suffix.
    pub date_format: String,
    /// Blank rows before each header-repeat row.
    pub separator_blank_rows: usize,
}

impl Default for SpecEarningsReportOptions {
    fn default() -> Self {
        Self {
            prefix: C_EARNINGS_REPORT_PREFIX.to_string(),
            date_format: C_EARNINGS_REPORT_DATE_FORMAT.to_string(),
            separator_blank_rows: N_SEPARATOR_BLANK_ROWS,
        }
    }
}

/// Immutable per-process configuration snapshot.
///
/// Field names serialize in camelCase (`columnsToDrop`, `productAgentCommissionMapping`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecReportConfig {
    /// Statement columns removed first.
    pub columns_to_drop: Vec<String>,
    /// Statement header -> canonical column.
    pub rename_mapping: BTreeMap<String, String>,
    /// Projection after renaming, in output order.
    pub columns_to_keep: Vec<String>,
    /// Output-only columns appended empty.
    pub new_columns: Vec<String>,
    /// Raw product name -> canonical product name.
    pub product_name_mapping: BTreeMap<String, String>,
    /// Product name -> agent -> commission percent.
    pub product_agent_commission_mapping: BTreeMap<String, BTreeMap<String, f64>>,
    /// Agents never paid commission (case-insensitive).
    pub excluded_agents: Vec<String>,
    /// Product type labels.
    pub product_types: SpecProductTypes,
    /// Annuity commission percent, applied to every annuity row.
    pub annuity_commission_percentage: f64,
    /// Raw grid layout.
    pub sheet_layout: SpecSheetLayout,
    /// Earnings report options.
    pub earnings_report: SpecEarningsReportOptions,
}

impl Default for SpecReportConfig {
    fn default() -> Self {
        Self {
            columns_to_drop: TUP_COLUMNS_TO_DROP.iter().map(ToString::to_string).collect(),
            rename_mapping: TUP_RENAME_MAPPING
                .iter()
                .map(|(c_from, c_to)| (c_from.to_string(), c_to.to_string()))
                .collect(),
            columns_to_keep: TUP_COLUMNS_TO_KEEP.iter().map(ToString::to_string).collect(),
            new_columns: TUP_NEW_COLUMNS.iter().map(ToString::to_string).collect(),
            product_name_mapping: BTreeMap::new(),
            product_agent_commission_mapping: BTreeMap::new(),
            excluded_agents: vec![],
            product_types: SpecProductTypes::default(),
            annuity_commission_percentage: 0.0,
            sheet_layout: SpecSheetLayout::default(),
            earnings_report: SpecEarningsReportOptions::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RateTables

/// Product type classification of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumProductType {
    /// Life product; rate comes from the product/agent matrix.
    Life,
    /// Annuity; flat configured rate.
    Annuity,
    /// Anything else; no commission.
    Other,
}

/// Read-only rate tables derived from [`SpecReportConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRateTables {
    /// Raw product name -> canonical product name.
    pub product_name_map: BTreeMap<String, String>,
    /// Product name -> agent -> commission percent.
    pub product_agent_commission_map: BTreeMap<String, BTreeMap<String, f64>>,
    /// Upper-cased excluded agents.
    pub excluded_agents: BTreeSet<String>,
    /// Annuity commission percent.
    pub annuity_commission_percentage: f64,
    /// Product type labels.
    pub product_types: SpecProductTypes,
}

impl SpecRateTables {
    /// Classify a raw product type label.
    pub fn classify_product_type(&self, product_type: &str) -> EnumProductType {
        if product_type == self.product_types.life {
            EnumProductType::Life
        } else if product_type == self.product_types.annuity {
            EnumProductType::Annuity
        } else {
            EnumProductType::Other
        }
    }

    /// Case-insensitive excluded-agent test.
    pub fn is_excluded_agent(&self, agent: &str) -> bool {
        self.excluded_agents.contains(&agent.to_uppercase())
    }
}

/// Commission percentage (fraction) and owed amount of one row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpecCommission {
    /// Fraction in `[0, 1]` for sane rates, e.g. `0.05` for 5%.
    pub percentage: f64,
    /// Currency amount.
    pub amount: f64,
}

impl SpecCommission {
    /// No commission.
    pub const ZERO: SpecCommission = SpecCommission {
        percentage: 0.0,
        amount: 0.0,
    };
}

/// Business rule that produced a [`SpecCommission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCommissionRule {
    /// Agent is excluded.
    ExcludedAgent,
    /// Life product with a matrix rate.
    LifeRate,
    /// Life product without a matrix rate; zero result.
    LifeLookupMiss,
    /// Annuity flat rate.
    Annuity,
    /// Any other product type; zero result.
    OtherProduct,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Table

/// Column-named table moved through the pipeline stages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecReportTable {
    /// Column names in order.
    pub columns: Vec<String>,
    /// Rows, each exactly `columns.len()` wide.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecReportTable {
    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c_name| c_name == name)
    }

    /// Like [`Self::column_index`], failing with [`ReportError::Schema`].
    pub fn require_column(&self, name: &str) -> Result<usize, ReportError> {
        self.column_index(name).ok_or_else(|| ReportError::Schema {
            missing: vec![name.to_string()],
        })
    }

    /// Header row as cell values.
    pub fn header_row(&self) -> Vec<EnumCellValue> {
        self.columns
            .iter()
            .map(|c_name| EnumCellValue::String(c_name.clone()))
            .collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Pipeline failure. Every variant aborts the run; no partial workbook is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Configuration failed validation or could not be parsed.
    InvalidConfig(String),
    /// Input bytes could not be decoded as a spreadsheet.
    Ingest(String),
    /// Expected columns are absent from the statement header.
    Schema {
        /// Missing column names.
        missing: Vec<String>,
    },
    /// No data rows remain after trimming.
    EmptyInput {
        /// Decoded grid height.
        rows_total: usize,
    },
    /// Workbook formatting or serialization failed.
    Workbook(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::Ingest(msg) => write!(f, "{msg}"),
            Self::Schema { missing } => write!(
                f,
                "Statement header does not match the expected format; missing columns: {missing:?}"
            ),
            Self::EmptyInput { rows_total } => write!(
                f,
                "Statement has no data rows after trimming ({rows_total} rows decoded)"
            ),
            Self::Workbook(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
