//! Run report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportRun {
    /// Data rows left after trimming the statement.
    pub cnt_rows_input: u64,
    /// Rows written across all sheets, headers and separators included.
    pub cnt_rows_output: u64,
    /// Distinct agents.
    pub cnt_agents: u64,
    /// Rows zeroed because the agent is excluded.
    pub cnt_excluded: u64,
    /// Life rows without a product/agent rate.
    pub cnt_lookup_miss: u64,
    /// Rows whose product type earns no commission.
    pub cnt_other_product: u64,
    /// Final sheet names in workbook order.
    pub sheet_names: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportRun {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        BTreeMap::from([
            ("cnt_rows_input".to_string(), self.cnt_rows_input),
            ("cnt_rows_output".to_string(), self.cnt_rows_output),
            ("cnt_agents".to_string(), self.cnt_agents),
            ("cnt_excluded".to_string(), self.cnt_excluded),
            ("cnt_lookup_miss".to_string(), self.cnt_lookup_miss),
            ("cnt_other_product".to_string(), self.cnt_other_product),
            ("cnt_sheets".to_string(), self.sheet_names.len() as u64),
            ("cnt_warnings".to_string(), self.warning_count() as u64),
        ])
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} rows_in={} rows_out={} agents={} excluded={} lookup_miss={} other={} sheets={} warnings={}",
            dict_counts["cnt_rows_input"],
            dict_counts["cnt_rows_output"],
            dict_counts["cnt_agents"],
            dict_counts["cnt_excluded"],
            dict_counts["cnt_lookup_miss"],
            dict_counts["cnt_other_product"],
            dict_counts["cnt_sheets"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[REPORT]"))
    }
}

/// Mutable accumulator threaded through the pipeline stages.
#[derive(Debug, Default, Clone)]
pub struct ReportRunBuilder {
    /// See [`ReportRun::cnt_rows_input`].
    pub cnt_rows_input: u64,
    /// See [`ReportRun::cnt_rows_output`].
    pub cnt_rows_output: u64,
    /// See [`ReportRun::cnt_agents`].
    pub cnt_agents: u64,
    /// See [`ReportRun::cnt_excluded`].
    pub cnt_excluded: u64,
    /// See [`ReportRun::cnt_lookup_miss`].
    pub cnt_lookup_miss: u64,
    /// See [`ReportRun::cnt_other_product`].
    pub cnt_other_product: u64,
    /// See [`ReportRun::sheet_names`].
    pub sheet_names: Vec<String>,
    /// See [`ReportRun::warnings`].
    pub warnings: Vec<String>,
}

impl ReportRunBuilder {
    /// Increment excluded-agent count by one.
    pub fn add_excluded(&mut self) {
        self.cnt_excluded += 1;
    }

    /// Increment lookup-miss count by one.
    pub fn add_lookup_miss(&mut self) {
        self.cnt_lookup_miss += 1;
    }

    /// Increment other-product count by one.
    pub fn add_other_product(&mut self) {
        self.cnt_other_product += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportRun {
        ReportRun {
            cnt_rows_input: self.cnt_rows_input,
            cnt_rows_output: self.cnt_rows_output,
            cnt_agents: self.cnt_agents,
            cnt_excluded: self.cnt_excluded,
            cnt_lookup_miss: self.cnt_lookup_miss,
            cnt_other_product: self.cnt_other_product,
            sheet_names: self.sheet_names,
            warnings: self.warnings,
        }
    }
}
