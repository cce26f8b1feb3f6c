//! Agent grouping and sheet assembly.

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use commkit_io_xlsx::{EnumCellValue, SpecSheetData};
use tracing::info;

use crate::conf::C_COL_AGENT;
use crate::spec::{ReportError, SpecEarningsReportOptions, SpecReportTable};

/// Rows of one agent, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAgentBlock {
    /// Agent text as it appears in the statement.
    pub agent: String,
    /// The agent's rows.
    pub rows: Vec<Vec<EnumCellValue>>,
}

/// Group rows by agent, agents ordered by first appearance.
pub fn group_rows_by_agent(table: &SpecReportTable) -> Result<Vec<SpecAgentBlock>, ReportError> {
    let col_idx_agent = table.require_column(C_COL_AGENT)?;

    let mut dict_block_idx: HashMap<String, usize> = HashMap::new();
    let mut l_blocks: Vec<SpecAgentBlock> = Vec::new();
    for row in &table.rows {
        let c_agent = row[col_idx_agent].to_text();
        let block_idx = *dict_block_idx.entry(c_agent.clone()).or_insert_with(|| {
            l_blocks.push(SpecAgentBlock {
                agent: c_agent,
                rows: vec![],
            });
            l_blocks.len() - 1
        });
        l_blocks[block_idx].rows.push(row.clone());
    }
    Ok(l_blocks)
}

/// `<prefix>_<date>` with the configured strftime pattern.
pub fn derive_earnings_sheet_name(
    options: &SpecEarningsReportOptions,
    date: NaiveDate,
) -> Result<String, ReportError> {
    let mut c_date = String::new();
    write!(c_date, "{}", date.format(&options.date_format)).map_err(|_| {
        ReportError::InvalidConfig(format!(
            "earningsReport.dateFormat {:?} is not a valid date format.",
            options.date_format
        ))
    })?;
    Ok(format!("{}_{c_date}", options.prefix))
}

/// Build the earnings report followed by one sheet per agent.
///
/// The earnings report holds the full ledger, then for every agent a run of
/// blank rows, a header-repeat row and that agent's rows again.
pub fn assemble_sheets(
    table: &SpecReportTable,
    options: &SpecEarningsReportOptions,
    date: NaiveDate,
) -> Result<Vec<SpecSheetData>, ReportError> {
    let l_blocks = group_rows_by_agent(table)?;
    let row_header = table.header_row();
    let row_blank = vec![EnumCellValue::None; table.columns.len()];

    let mut l_rows_earnings = Vec::with_capacity(
        1 + 2 * table.height() + l_blocks.len() * (options.separator_blank_rows + 1),
    );
    l_rows_earnings.push(row_header.clone());
    l_rows_earnings.extend(table.rows.iter().cloned());
    for block in &l_blocks {
        l_rows_earnings.extend(std::iter::repeat_n(row_blank.clone(), options.separator_blank_rows));
        l_rows_earnings.push(row_header.clone());
        l_rows_earnings.extend(block.rows.iter().cloned());
    }

    let mut l_sheets = Vec::with_capacity(l_blocks.len() + 1);
    l_sheets.push(SpecSheetData {
        sheet_name: derive_earnings_sheet_name(options, date)?,
        rows: l_rows_earnings,
    });
    for block in l_blocks {
        let mut l_rows = Vec::with_capacity(block.rows.len() + 1);
        l_rows.push(row_header.clone());
        l_rows.extend(block.rows);
        l_sheets.push(SpecSheetData {
            sheet_name: block.agent,
            rows: l_rows,
        });
    }

    info!(
        agents = l_sheets.len() - 1,
        earnings_rows = l_sheets[0].rows.len(),
        "sheets assembled"
    );
    Ok(l_sheets)
}
