//! End-to-end statement -> report workbook pipeline.

use chrono::{Local, NaiveDate};
use commkit_io_xlsx::{
    derive_default_style_presets, format_workbook, read_first_sheet_grid, serialize_workbook,
};
use tracing::info;

use crate::assemble::assemble_sheets;
use crate::commission::fill_commission;
use crate::conf::C_OUTPUT_FILE_SUFFIX;
use crate::normalize::{clean_compensation_type, normalize_columns};
use crate::product::resolve_product_names;
use crate::report::{ReportRun, ReportRunBuilder};
use crate::spec::{ReportError, SpecReportConfig};

/// Workbook bytes plus the run report.
#[derive(Debug, Clone)]
pub struct SpecReportOutput {
    /// `.xlsx` buffer.
    pub buffer: Vec<u8>,
    /// Counters and warnings of the run.
    pub report: ReportRun,
}

/// Run the whole pipeline over one uploaded statement.
///
/// Any error aborts the run; no partial workbook is returned.
pub fn run_report_pipeline(
    v_bytes: &[u8],
    config: &SpecReportConfig,
    date: NaiveDate,
) -> Result<SpecReportOutput, ReportError> {
    config.validate()?;
    let mut builder = ReportRunBuilder::default();

    let l_grid = read_first_sheet_grid(v_bytes).map_err(ReportError::Ingest)?;
    let table = normalize_columns(&l_grid, config, &mut builder)?;
    builder.cnt_rows_input = table.height() as u64;

    let rates = config.rate_tables();
    let table = resolve_product_names(table, &rates)?;
    let table = fill_commission(table, &rates, &mut builder)?;
    let table = clean_compensation_type(table);

    let l_sheets = assemble_sheets(&table, &config.earnings_report, date)?;
    builder.cnt_agents = l_sheets.len().saturating_sub(1) as u64;
    builder.cnt_rows_output = l_sheets.iter().map(|sheet| sheet.rows.len() as u64).sum();

    let model =
        format_workbook(&l_sheets, &config.formatter_options()).map_err(ReportError::Workbook)?;
    let (v_buffer, xlsx_report) =
        serialize_workbook(&model, derive_default_style_presets()).map_err(ReportError::Workbook)?;

    builder.sheet_names = xlsx_report.sheets;
    for warning in xlsx_report.warnings {
        builder.add_warning(warning);
    }
    let report = builder.build();
    info!(bytes = v_buffer.len(), "{report}");

    Ok(SpecReportOutput {
        buffer: v_buffer,
        report,
    })
}

/// [`run_report_pipeline`] stamped with today's local date.
pub fn run_report_pipeline_today(
    v_bytes: &[u8],
    config: &SpecReportConfig,
) -> Result<SpecReportOutput, ReportError> {
    run_report_pipeline(v_bytes, config, Local::now().date_naive())
}

/// Download name of the report for an uploaded file name (`statement.xls` -> `statement_sausage.xlsx`).
pub fn derive_output_file_name(file_name: &str) -> String {
    let c_stem = match file_name.rsplit_once('.') {
        Some((c_stem, c_ext)) if !c_ext.is_empty() && !c_ext.contains('/') => c_stem,
        _ => file_name,
    };
    format!("{c_stem}{C_OUTPUT_FILE_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};
    use rust_xlsxwriter::Workbook;

    use super::*;

    const TUP_STATEMENT_HEADER: [&str; 17] = [
        "Agency",
        "Payment Date",
        "Product Co",
        "Product Type",
        "Policy #",
        "Product",
        "Policy Issue Date",
        "Insured Name",
        "Billing Frequency",
        "Premium Amt",
        "Comm Rate %",
        "Gross Comm Earned",
        "% of particip",
        "Compensation Type",
        "Writing Agt",
        "Transaction Type",
        "Payee ID",
    ];

    fn write_statement_row(
        worksheet: &mut rust_xlsxwriter::Worksheet,
        n_row: u32,
        (c_type, c_product, n_premium, n_particip, c_agent): (&str, &str, f64, f64, &str),
    ) {
        worksheet.write_string(n_row, 0, "Main Agency").unwrap();
        worksheet.write_string(n_row, 1, "01/02/2025").unwrap();
        worksheet.write_string(n_row, 2, "ACME Life").unwrap();
        worksheet.write_string(n_row, 3, c_type).unwrap();
        worksheet.write_string(n_row, 4, format!("P{n_row}")).unwrap();
        worksheet.write_string(n_row, 5, c_product).unwrap();
        worksheet.write_string(n_row, 6, "2020-01-01").unwrap();
        worksheet.write_string(n_row, 7, "Jane Roe").unwrap();
        worksheet.write_string(n_row, 8, "Monthly").unwrap();
        worksheet.write_number(n_row, 9, n_premium).unwrap();
        worksheet.write_number(n_row, 10, 0.5).unwrap();
        worksheet.write_number(n_row, 11, n_premium / 2.0).unwrap();
        worksheet.write_number(n_row, 12, n_particip).unwrap();
        worksheet
            .write_string(n_row, 13, "First Year Compensation")
            .unwrap();
        worksheet.write_string(n_row, 14, c_agent).unwrap();
        worksheet.write_string(n_row, 15, "New Business").unwrap();
        worksheet.write_string(n_row, 16, "9001").unwrap();
    }

    fn derive_statement_bytes() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Commission Statement").unwrap();
        for (col_idx, c_header) in TUP_STATEMENT_HEADER.iter().enumerate() {
            worksheet.write_string(4, col_idx as u16, *c_header).unwrap();
        }
        write_statement_row(worksheet, 5, ("Life", "Term 20", 1000.0, 1.0, "A1"));
        write_statement_row(worksheet, 6, ("Annuity", "FlexGrowth", 2000.0, 0.5, "B2"));
        write_statement_row(worksheet, 7, ("Life", "Term 20", 400.0, 0.5, "A1"));
        for n_row in 8..13 {
            worksheet.write_string(n_row, 0, "Statement footer").unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    fn derive_config() -> SpecReportConfig {
        SpecReportConfig {
            product_name_mapping: BTreeMap::from([("Term 20".to_string(), "TermX".to_string())]),
            product_agent_commission_mapping: BTreeMap::from([(
                "TermX".to_string(),
                BTreeMap::from([("A1".to_string(), 5.0)]),
            )]),
            annuity_commission_percentage: 10.0,
            columns_to_drop: vec!["Agency".to_string(), "Payee ID".to_string()],
            ..Default::default()
        }
    }

    fn derive_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_run_report_pipeline_end_to_end() {
        let output =
            run_report_pipeline(&derive_statement_bytes(), &derive_config(), derive_date()).unwrap();

        let report = &output.report;
        assert_eq!(report.cnt_rows_input, 3);
        assert_eq!(report.cnt_agents, 2);
        assert_eq!(report.cnt_rows_output, 15 + 3 + 2);
        assert_eq!(report.cnt_lookup_miss, 0);
        assert_eq!(
            report.sheet_names,
            vec!["EarningsReport_01022025", "A1", "B2"]
        );

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(output.buffer)).unwrap();
        assert_eq!(workbook.sheet_names(), report.sheet_names);

        let range = workbook.worksheet_range("EarningsReport_01022025").unwrap();
        assert_eq!(
            range.get_value((0, 17)),
            Some(&Data::String("Commission Owed".to_string()))
        );
        assert_eq!(range.get_value((1, 4)), Some(&Data::String("TermX".to_string())));
        assert_eq!(range.get_value((1, 12)), Some(&Data::String("First Year".to_string())));
        assert_eq!(range.get_value((1, 16)), Some(&Data::Float(0.05)));
        assert_eq!(range.get_value((1, 17)), Some(&Data::Float(50.0)));
        assert_eq!(range.get_value((2, 4)), Some(&Data::String("FlexGrowth".to_string())));
        assert_eq!(range.get_value((2, 17)), Some(&Data::Float(100.0)));
        assert_eq!(range.get_value((3, 17)), Some(&Data::Float(10.0)));
        assert_eq!(range.get_value((7, 0)), Some(&Data::String("Date".to_string())));
        assert_eq!(range.get_value((13, 13)), Some(&Data::String("Agent".to_string())));
        assert_eq!(range.get_value((14, 13)), Some(&Data::String("B2".to_string())));

        let formulas = workbook.worksheet_formula("EarningsReport_01022025").unwrap();
        let derive_formula =
            |row_idx: u32, col_idx: u32| formulas.get_value((row_idx, col_idx)).cloned();
        assert_eq!(derive_formula(4, 8).as_deref(), Some("SUM(I2:I4)"));
        assert_eq!(derive_formula(4, 17).as_deref(), Some("SUM(R2:R4)"));
        assert_eq!(derive_formula(10, 10).as_deref(), Some("SUM(K9:K10)"));
        assert_eq!(derive_formula(10, 16).filter(|c| !c.is_empty()), None);

        let range = workbook.worksheet_range("A1").unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(range.get_value((2, 17)), Some(&Data::Float(10.0)));
    }

    #[test]
    fn test_run_report_pipeline_counts_lookup_misses_and_exclusions() {
        let mut cfg = derive_config();
        cfg.product_agent_commission_mapping.clear();
        cfg.excluded_agents = vec!["b2".to_string()];

        let output = run_report_pipeline(&derive_statement_bytes(), &cfg, derive_date()).unwrap();

        assert_eq!(output.report.cnt_lookup_miss, 2);
        assert_eq!(output.report.cnt_excluded, 1);
        assert_eq!(
            output.report.to_string(),
            "[REPORT] rows_in=3 rows_out=20 agents=2 excluded=1 lookup_miss=2 other=0 sheets=3 warnings=0"
        );
    }

    #[test]
    fn test_run_report_pipeline_reports_absent_drop_columns_as_warnings() {
        let mut cfg = derive_config();
        cfg.columns_to_drop.push("Process Date".to_string());

        let output = run_report_pipeline(&derive_statement_bytes(), &cfg, derive_date()).unwrap();

        assert_eq!(output.report.warning_count(), 1);
        assert!(output.report.warnings[0].contains("Process Date"));
    }

    #[test]
    fn test_run_report_pipeline_rejects_unreadable_and_mismatched_input() {
        assert!(matches!(
            run_report_pipeline(b"not a spreadsheet", &derive_config(), derive_date()),
            Err(ReportError::Ingest(_))
        ));

        let mut cfg = derive_config();
        cfg.rename_mapping.remove("Writing Agt");
        cfg.rename_mapping
            .insert("Writing Agent".to_string(), "Agent".to_string());
        let err = run_report_pipeline(&derive_statement_bytes(), &cfg, derive_date()).unwrap_err();
        assert_eq!(
            err,
            ReportError::Schema {
                missing: vec!["Writing Agent".to_string(), "Agent".to_string()]
            }
        );
    }

    #[test]
    fn test_derive_output_file_name() {
        assert_eq!(derive_output_file_name("statement.xls"), "statement_sausage.xlsx");
        assert_eq!(derive_output_file_name("jan.2025.xlsx"), "jan.2025_sausage.xlsx");
        assert_eq!(derive_output_file_name("statement"), "statement_sausage.xlsx");
        assert_eq!(derive_output_file_name("statement."), "statement._sausage.xlsx");
        assert_eq!(derive_output_file_name("v1.0/report"), "v1.0/report_sausage.xlsx");
    }
}
