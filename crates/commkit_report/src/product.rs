//! Product name resolution.

use commkit_io_xlsx::EnumCellValue;
use tracing::debug;

use crate::conf::{C_COL_PRODUCT_NAME, C_COL_PRODUCT_TYPE};
use crate::spec::{EnumProductType, ReportError, SpecRateTables, SpecReportTable};

/// Canonical product name for one row.
///
/// Mapped names win; unmapped annuities keep their raw name; everything else
/// falls back to the default product label.
pub fn resolve_product_name(raw_name: &str, product_type: &str, rates: &SpecRateTables) -> String {
    if let Some(c_mapped) = rates.product_name_map.get(raw_name) {
        return c_mapped.clone();
    }
    match rates.classify_product_type(product_type) {
        EnumProductType::Annuity => raw_name.to_string(),
        _ => rates.product_types.default.clone(),
    }
}

/// Rewrite the product name column of every row.
pub fn resolve_product_names(
    table: SpecReportTable,
    rates: &SpecRateTables,
) -> Result<SpecReportTable, ReportError> {
    let col_idx_name = table.require_column(C_COL_PRODUCT_NAME)?;
    let col_idx_type = table.require_column(C_COL_PRODUCT_TYPE)?;

    let SpecReportTable { columns, rows } = table;
    let rows = rows
        .into_iter()
        .map(|mut row| {
            let c_raw = row[col_idx_name].to_text();
            let c_resolved =
                resolve_product_name(&c_raw, &row[col_idx_type].to_text(), rates);
            if c_raw != c_resolved {
                debug!(from = %c_raw, to = %c_resolved, "product name resolved");
            }
            row[col_idx_name] = EnumCellValue::String(c_resolved);
            row
        })
        .collect();
    Ok(SpecReportTable { columns, rows })
}
