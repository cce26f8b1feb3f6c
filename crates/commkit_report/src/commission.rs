//! Per-row commission rules.

use commkit_io_xlsx::EnumCellValue;
use tracing::{debug, info};

use crate::conf::{
    C_COL_AGENT, C_COL_COMMISSION_OWED, C_COL_COMMISSION_PERCENTAGE,
    C_COL_PARTICIPATION_PERCENTAGE, C_COL_PREMIUM, C_COL_PRODUCT_NAME, C_COL_PRODUCT_TYPE,
};
use crate::report::ReportRunBuilder;
use crate::spec::{
    EnumCommissionRule, EnumProductType, ReportError, SpecCommission, SpecRateTables,
    SpecReportTable,
};
use crate::util::convert_cell_to_f64;

/// Fields of one row the commission rules read.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCommissionInput {
    /// Raw product type label.
    pub product_type: String,
    /// Resolved product name.
    pub product_name: String,
    /// Writing agent.
    pub agent: String,
    /// Participation share as a fraction.
    pub participation: f64,
    /// Premium amount.
    pub premium: f64,
}

/// Commission and the rule that produced it.
pub fn compute_commission_detailed(
    input: &SpecCommissionInput,
    rates: &SpecRateTables,
) -> (SpecCommission, EnumCommissionRule) {
    if rates.is_excluded_agent(&input.agent) {
        return (SpecCommission::ZERO, EnumCommissionRule::ExcludedAgent);
    }

    let n_base = input.participation * input.premium;
    match rates.classify_product_type(&input.product_type) {
        EnumProductType::Life => {
            let n_rate = rates
                .product_agent_commission_map
                .get(&input.product_name)
                .and_then(|dict_agents| dict_agents.get(&input.agent));
            match n_rate {
                Some(n_rate) => {
                    let percentage = n_rate / 100.0;
                    (
                        SpecCommission {
                            percentage,
                            amount: percentage * n_base,
                        },
                        EnumCommissionRule::LifeRate,
                    )
                }
                None => (SpecCommission::ZERO, EnumCommissionRule::LifeLookupMiss),
            }
        }
        EnumProductType::Annuity => {
            let percentage = rates.annuity_commission_percentage / 100.0;
            (
                SpecCommission {
                    percentage,
                    amount: percentage * n_base,
                },
                EnumCommissionRule::Annuity,
            )
        }
        EnumProductType::Other => (SpecCommission::ZERO, EnumCommissionRule::OtherProduct),
    }
}

/// Commission of one row.
pub fn compute_commission(input: &SpecCommissionInput, rates: &SpecRateTables) -> SpecCommission {
    compute_commission_detailed(input, rates).0
}

/// Overwrite `Commission %` and `Commission Owed` on every row.
pub fn fill_commission(
    table: SpecReportTable,
    rates: &SpecRateTables,
    builder: &mut ReportRunBuilder,
) -> Result<SpecReportTable, ReportError> {
    let col_idx_type = table.require_column(C_COL_PRODUCT_TYPE)?;
    let col_idx_name = table.require_column(C_COL_PRODUCT_NAME)?;
    let col_idx_agent = table.require_column(C_COL_AGENT)?;
    let col_idx_particip = table.require_column(C_COL_PARTICIPATION_PERCENTAGE)?;
    let col_idx_premium = table.require_column(C_COL_PREMIUM)?;
    let col_idx_percentage = table.require_column(C_COL_COMMISSION_PERCENTAGE)?;
    let col_idx_owed = table.require_column(C_COL_COMMISSION_OWED)?;

    let SpecReportTable { columns, rows } = table;
    let mut l_rows = Vec::with_capacity(rows.len());
    for (row_idx, mut row) in rows.into_iter().enumerate() {
        let input = SpecCommissionInput {
            product_type: row[col_idx_type].to_text(),
            product_name: row[col_idx_name].to_text(),
            agent: row[col_idx_agent].to_text(),
            participation: convert_cell_to_f64(&row[col_idx_particip]),
            premium: convert_cell_to_f64(&row[col_idx_premium]),
        };
        let (commission, rule) = compute_commission_detailed(&input, rates);
        match rule {
            EnumCommissionRule::ExcludedAgent => builder.add_excluded(),
            EnumCommissionRule::LifeLookupMiss => {
                debug!(
                    row_idx,
                    product = %input.product_name,
                    agent = %input.agent,
                    "no commission rate; using zero"
                );
                builder.add_lookup_miss();
            }
            EnumCommissionRule::OtherProduct => builder.add_other_product(),
            EnumCommissionRule::LifeRate | EnumCommissionRule::Annuity => {}
        }

        row[col_idx_percentage] = EnumCellValue::Number(commission.percentage);
        row[col_idx_owed] = EnumCellValue::Number(commission.amount);
        l_rows.push(row);
    }

    info!(
        rows = l_rows.len(),
        excluded = builder.cnt_excluded,
        lookup_miss = builder.cnt_lookup_miss,
        "commission computed"
    );
    Ok(SpecReportTable {
        columns,
        rows: l_rows,
    })
}
