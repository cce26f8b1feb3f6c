//! `commkit_report` v1:
//! Commission statement -> per-agent earnings workbook.
//!
//! Module layout:
//! - `conf`       : canonical column names and default constants
//! - `spec`       : configuration, rate tables, table model and errors
//! - `config`     : configuration loading and validation
//! - `util`       : cell coercion helpers
//! - `normalize`  : header resolution and column projection
//! - `product`    : product name resolution
//! - `commission` : per-row commission rules
//! - `assemble`   : agent grouping and sheet assembly
//! - `report`     : run counters
//! - `pipeline`   : bytes in, workbook bytes out
pub mod assemble;
pub mod commission;
pub mod conf;
pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod product;
pub mod report;
pub mod spec;
pub mod util;

pub use assemble::{SpecAgentBlock, assemble_sheets, derive_earnings_sheet_name, group_rows_by_agent};
pub use commission::{
    SpecCommissionInput, compute_commission, compute_commission_detailed, fill_commission,
};
pub use config::TUP_CONFIG_ENV_VARS;
pub use normalize::{clean_compensation_type, normalize_columns};
pub use pipeline::{
    SpecReportOutput, derive_output_file_name, run_report_pipeline, run_report_pipeline_today,
};
pub use product::{resolve_product_name, resolve_product_names};
pub use report::{ReportRun, ReportRunBuilder};
pub use spec::{
    EnumCommissionRule, EnumProductType, ReportError, SpecCommission, SpecEarningsReportOptions,
    SpecProductTypes, SpecRateTables, SpecReportConfig, SpecReportTable, SpecSheetLayout,
};
