//! Canonical column names and default configuration constants.

/// Canonical output column: payment date of the statement line.
pub const C_COL_DATE: &str = "Date";
/// Canonical output column: carrier.
pub const C_COL_CARRIER: &str = "Carrier";
/// Canonical output column: product type (`Life`, `Annuity`, ...).
pub const C_COL_PRODUCT_TYPE: &str = "Product Type";
/// Canonical output column: policy number.
pub const C_COL_POLICY_NUMBER: &str = "Policy #";
/// Canonical output column: product name.
pub const C_COL_PRODUCT_NAME: &str = "Product";
/// Canonical output column: policy issue date.
pub const C_COL_ISSUE_DATE: &str = "Issue Date";
/// Canonical output column: insured name.
pub const C_COL_INSURED: &str = "Insured";
/// Canonical output column: billing frequency.
pub const C_COL_BILLING_FREQUENCY: &str = "Billing Frequency";
/// Canonical output column: premium amount.
pub const C_COL_PREMIUM: &str = "Premium";
/// Canonical output column: carrier commission rate.
pub const C_COL_COMMISSION_RATE_PERCENTAGE: &str = "Comm Rate %";
/// Canonical output column: gross commission earned.
pub const C_COL_GROSS_COMMISSION_EARNED: &str = "Gross Comm Earned";
/// Canonical output column: participation share.
pub const C_COL_PARTICIPATION_PERCENTAGE: &str = "% of particip";
/// Canonical output column: compensation type.
pub const C_COL_COMPENSATION_TYPE: &str = "Compensation Type";
/// Canonical output column: writing agent.
pub const C_COL_AGENT: &str = "Agent";
/// Canonical output column: transaction type.
pub const C_COL_TRANSACTION_TYPE: &str = "Transaction Type";
/// Appended column: visual gap marker.
pub const C_COL_GAP: &str = " ";
/// Appended column: computed commission fraction.
pub const C_COL_COMMISSION_PERCENTAGE: &str = "Commission %";
/// Appended column: computed commission amount.
pub const C_COL_COMMISSION_OWED: &str = "Commission Owed";
/// Appended column: commission paid (filled in by hand downstream).
pub const C_COL_COMMISSION_PAID: &str = "Commission Paid";
/// Appended column: payment method.
pub const C_COL_PAYMENT_METHOD: &str = "Payment Method";
/// Appended column: payment date.
pub const C_COL_PAYMENT_DATE: &str = "Payment Date";

/// Keep-list, in output order.
pub const TUP_COLUMNS_TO_KEEP: [&str; 15] = [
    C_COL_DATE,
    C_COL_CARRIER,
    C_COL_PRODUCT_TYPE,
    C_COL_POLICY_NUMBER,
    C_COL_PRODUCT_NAME,
    C_COL_ISSUE_DATE,
    C_COL_INSURED,
    C_COL_BILLING_FREQUENCY,
    C_COL_PREMIUM,
    C_COL_COMMISSION_RATE_PERCENTAGE,
    C_COL_GROSS_COMMISSION_EARNED,
    C_COL_PARTICIPATION_PERCENTAGE,
    C_COL_COMPENSATION_TYPE,
    C_COL_AGENT,
    C_COL_TRANSACTION_TYPE,
];

/// Output-only columns appended after the keep-list.
pub const TUP_NEW_COLUMNS: [&str; 6] = [
    C_COL_GAP,
    C_COL_COMMISSION_PERCENTAGE,
    C_COL_COMMISSION_OWED,
    C_COL_COMMISSION_PAID,
    C_COL_PAYMENT_METHOD,
    C_COL_PAYMENT_DATE,
];

/// Columns every configuration must produce.
pub const TUP_COLUMNS_REQUIRED: [&str; 7] = [
    C_COL_AGENT,
    C_COL_PRODUCT_TYPE,
    C_COL_PRODUCT_NAME,
    C_COL_PARTICIPATION_PERCENTAGE,
    C_COL_PREMIUM,
    C_COL_COMMISSION_PERCENTAGE,
    C_COL_COMMISSION_OWED,
];

/// Statement columns dropped before renaming.
pub const TUP_COLUMNS_TO_DROP: [&str; 11] = [
    "Agency",
    "Payee ID",
    "Payee Name",
    "Income Class",
    "Writing Agt #",
    "Writing Agent Level",
    "Premium Transaction",
    "Process Date",
    "Premium Eff Date",
    "Writing Agent Agency",
    "Agency Name",
];

/// Statement header -> canonical column.
pub const TUP_RENAME_MAPPING: [(&str, &str); 6] = [
    ("Payment Date", C_COL_DATE),
    ("Writing Agt", C_COL_AGENT),
    ("Product Co", C_COL_CARRIER),
    ("Policy Issue Date", C_COL_ISSUE_DATE),
    ("Insured Name", C_COL_INSURED),
    ("Premium Amt", C_COL_PREMIUM),
];

/// Money-formatted columns.
pub const TUP_COLUMNS_MONEY: [&str; 4] = [
    C_COL_PREMIUM,
    C_COL_COMMISSION_OWED,
    C_COL_COMMISSION_PAID,
    C_COL_GROSS_COMMISSION_EARNED,
];

/// Percent-formatted columns.
pub const TUP_COLUMNS_PERCENT: [&str; 3] = [
    C_COL_COMMISSION_PERCENTAGE,
    C_COL_PARTICIPATION_PERCENTAGE,
    C_COL_COMMISSION_RATE_PERCENTAGE,
];

/// Zero-based row of the statement header.
pub const N_HEADER_ROW_INDEX: usize = 4;
/// Leading rows removed (title block plus header).
pub const N_ROWS_SKIP_LEADING: usize = 5;
/// Trailing rows removed (statement footer).
pub const N_ROWS_SKIP_TRAILING: usize = 5;

/// Blank rows before every header-repeat row in the earnings report.
pub const N_SEPARATOR_BLANK_ROWS: usize = 3;
/// Earnings report sheet name prefix.
pub const C_EARNINGS_REPORT_PREFIX: &str = "EarningsReport";
/// Earnings report date format (`MMDDYYYY`).
pub const C_EARNINGS_REPORT_DATE_FORMAT: &str = "%m%d%Y";

/// Product type label for life products.
pub const C_PRODUCT_TYPE_LIFE: &str = "Life";
/// Product type label for annuities.
pub const C_PRODUCT_TYPE_ANNUITY: &str = "Annuity";
/// Product name used when no mapping applies.
pub const C_PRODUCT_NAME_DEFAULT: &str = "Other";

/// Word stripped from compensation type values.
pub const C_COMPENSATION_WORD: &str = "Compensation";

/// Suffix of the downloadable report file name.
pub const C_OUTPUT_FILE_SUFFIX: &str = "_sausage.xlsx";
