//! Configuration loading, validation and derived snapshots.

use std::fs;
use std::path::Path;

use commkit_io_xlsx::{SpecFormatterOptions, derive_default_formatter_options};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::conf::{C_COL_GAP, TUP_COLUMNS_MONEY, TUP_COLUMNS_PERCENT, TUP_COLUMNS_REQUIRED};
use crate::spec::{ReportError, SpecRateTables, SpecReportConfig};

/// Environment variables read by [`SpecReportConfig::from_env`]; each holds a JSON document.
pub const TUP_CONFIG_ENV_VARS: [&str; 9] = [
    "COLUMNS_TO_DROP",
    "RENAME_MAPPING",
    "COLUMNS_TO_KEEP",
    "NEW_COLUMNS",
    "PRODUCT_NAME_MAPPING",
    "PRODUCT_AGENT_COMMISSION_MAPPING",
    "EXCLUDED_AGENTS",
    "PRODUCT_TYPES",
    "ANNUITY_COMMISSION_PERCENTAGE",
];

impl SpecReportConfig {
    /// Parse a camelCase JSON document; absent fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let cfg: SpecReportConfig = serde_json::from_str(json)
            .map_err(|err| ReportError::InvalidConfig(format!("Malformed JSON: {err}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let json = fs::read_to_string(path).map_err(|err| {
            ReportError::InvalidConfig(format!("Failed to read {}: {err}", path.display()))
        })?;
        let cfg = Self::from_json_str(&json)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Build from process environment once at startup.
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup; unset variables keep their defaults.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = SpecReportConfig::default();
        let [
            c_drop,
            c_rename,
            c_keep,
            c_new,
            c_product_names,
            c_commission,
            c_excluded,
            c_product_types,
            c_annuity,
        ] = TUP_CONFIG_ENV_VARS;

        if let Some(val) = parse_env_json(&lookup, c_drop)? {
            cfg.columns_to_drop = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_rename)? {
            cfg.rename_mapping = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_keep)? {
            cfg.columns_to_keep = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_new)? {
            cfg.new_columns = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_product_names)? {
            cfg.product_name_mapping = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_commission)? {
            cfg.product_agent_commission_mapping = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_excluded)? {
            cfg.excluded_agents = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_product_types)? {
            cfg.product_types = val;
        }
        if let Some(val) = parse_env_json(&lookup, c_annuity)? {
            cfg.annuity_commission_percentage = val;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.columns_to_keep.is_empty() {
            return Err(ReportError::InvalidConfig(
                "columnsToKeep must not be empty.".to_string(),
            ));
        }

        let l_missing: Vec<&str> = TUP_COLUMNS_REQUIRED
            .iter()
            .copied()
            .filter(|c_required| {
                !self
                    .columns_to_keep
                    .iter()
                    .chain(&self.new_columns)
                    .any(|c_name| c_name == c_required)
            })
            .collect();
        if !l_missing.is_empty() {
            return Err(ReportError::InvalidConfig(format!(
                "columnsToKeep/newColumns lack required columns: {l_missing:?}"
            )));
        }

        for (c_product, dict_agents) in &self.product_agent_commission_mapping {
            for (c_agent, n_rate) in dict_agents {
                if !n_rate.is_finite() || *n_rate < 0.0 {
                    return Err(ReportError::InvalidConfig(format!(
                        "Commission rate for {c_product:?}/{c_agent:?} must be a finite value >= 0, got {n_rate}."
                    )));
                }
            }
        }
        if !self.annuity_commission_percentage.is_finite()
            || self.annuity_commission_percentage < 0.0
        {
            return Err(ReportError::InvalidConfig(format!(
                "annuityCommissionPercentage must be a finite value >= 0, got {}.",
                self.annuity_commission_percentage
            )));
        }

        if self.sheet_layout.header_row_index >= self.sheet_layout.rows_skip_leading {
            return Err(ReportError::InvalidConfig(format!(
                "sheetLayout.headerRowIndex ({}) must be < rowsSkipLeading ({}).",
                self.sheet_layout.header_row_index, self.sheet_layout.rows_skip_leading
            )));
        }
        if self.earnings_report.separator_blank_rows < 1 {
            return Err(ReportError::InvalidConfig(
                "earningsReport.separatorBlankRows must be >= 1.".to_string(),
            ));
        }
        if self.earnings_report.date_format.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "earningsReport.dateFormat must not be empty.".to_string(),
            ));
        }

        Ok(())
    }

    /// Immutable rate-table snapshot for one run.
    pub fn rate_tables(&self) -> SpecRateTables {
        SpecRateTables {
            product_name_map: self.product_name_mapping.clone(),
            product_agent_commission_map: self.product_agent_commission_mapping.clone(),
            excluded_agents: self
                .excluded_agents
                .iter()
                .map(|c_agent| c_agent.to_uppercase())
                .collect(),
            annuity_commission_percentage: self.annuity_commission_percentage,
            product_types: self.product_types.clone(),
        }
    }

    /// Formatter options for the canonical money/percent/gap columns.
    pub fn formatter_options(&self) -> SpecFormatterOptions {
        SpecFormatterOptions {
            cols_money: TUP_COLUMNS_MONEY.iter().map(ToString::to_string).collect(),
            cols_percent: TUP_COLUMNS_PERCENT.iter().map(ToString::to_string).collect(),
            col_gap: Some(C_COL_GAP.to_string()),
            ..derive_default_formatter_options()
        }
    }
}

fn parse_env_json<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ReportError>
where
    F: Fn(&str) -> Option<String>,
    T: DeserializeOwned,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| ReportError::InvalidConfig(format!("{key}: {err}")))
}
