use remitscan_core::{CustomerVendorAggregate, ReviewReport, VendorAggregate};
use rust_decimal::Decimal;
use thiserror::Error;

pub const APPROVED_FILE_NAME: &str = "approved-vendors-customers.csv";
pub const PROBLEM_FILE_NAME: &str = "problem-vendors-customers.csv";
pub const SUMMARY_FILE_NAME: &str = "vendor-summary.csv";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The three rendered report files, ready to serve or bundle.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub approved: Vec<u8>,
    pub problem: Vec<u8>,
    pub vendor_summary: Vec<u8>,
}

impl RenderedReport {
    pub fn files(&self) -> [(&'static str, &[u8]); 3] {
        [
            (APPROVED_FILE_NAME, self.approved.as_slice()),
            (PROBLEM_FILE_NAME, self.problem.as_slice()),
            (SUMMARY_FILE_NAME, self.vendor_summary.as_slice()),
        ]
    }
}

// Currency and percent strings exist only here; the engine hands off raw
// numerics so formatting stays a presentation concern.
fn currency(value: Decimal) -> String {
    format!("${value:.2}")
}

fn percent(value: Decimal) -> String {
    format!("{value:.3}%")
}

fn render_customer_rows(rows: &[CustomerVendorAggregate]) -> Result<Vec<u8>, RenderError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "Customer ID",
        "Vendor",
        "Total Amount",
        "Total Interchange",
        "Transaction Count",
        "Transactions with Interchange",
        "Interchange Rate %",
    ])?;
    for row in rows {
        wtr.write_record([
            row.customer_id.as_str(),
            row.vendor.as_str(),
            &currency(row.total_amount),
            &currency(row.total_interchange),
            &row.transaction_count.to_string(),
            &row.transactions_with_interchange.to_string(),
            &percent(row.interchange_rate),
        ])?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

fn render_vendor_summary(rows: &[VendorAggregate]) -> Result<Vec<u8>, RenderError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "Vendor Name",
        "Transaction Volume",
        "Transactions with Interchange",
        "Total Amount",
        "Total Interchange",
        "Average Interchange Rate %",
    ])?;
    for row in rows {
        wtr.write_record([
            row.vendor.as_str(),
            &row.transaction_volume.to_string(),
            &row.transactions_with_interchange.to_string(),
            &currency(row.total_amount),
            &currency(row.total_interchange),
            &percent(row.avg_interchange_rate),
        ])?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Renders the three result tables to CSV with the review's spreadsheet
/// column layout.
pub fn render_report(report: &ReviewReport) -> Result<RenderedReport, RenderError> {
    Ok(RenderedReport {
        approved: render_customer_rows(&report.approved)?,
        problem: render_customer_rows(&report.problem)?,
        vendor_summary: render_vendor_summary(&report.vendor_summary)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use remitscan_core::{classify, Direction, ReviewPolicy, TransactionRecord, VendorRules};

    fn debit(customer: &str, summary: &str, amount: &str, interchange: &str) -> TransactionRecord {
        TransactionRecord {
            direction: Direction::Debit,
            customer_id: customer.to_string(),
            summary: summary.to_string(),
            amount: amount.to_string(),
            interchange: interchange.to_string(),
            ..Default::default()
        }
    }

    fn sample_report() -> ReviewReport {
        let records = vec![
            debit("C1", "RIA Financial Services", "$100.00", "$0.50"),
            debit("C2", "Remitly* transfer", "$80.00", "$1.00"),
            debit("C3", "XYZ CORP TRANSFER", "$40.00", ""),
        ];
        classify(&records, &VendorRules::default(), &ReviewPolicy::default()).unwrap()
    }

    #[test]
    fn approved_table_formats_currency_and_rate() {
        let rendered = render_report(&sample_report()).unwrap();
        let text = String::from_utf8(rendered.approved).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Customer ID,Vendor,Total Amount,Total Interchange,Transaction Count,Transactions with Interchange,Interchange Rate %"
        );
        assert_eq!(lines.next().unwrap(), "C1,RIA,$100.00,$0.50,1,1,0.500%");
        assert!(lines.next().is_none());
    }

    #[test]
    fn problem_table_holds_override_vendors() {
        let rendered = render_report(&sample_report()).unwrap();
        let text = String::from_utf8(rendered.problem).unwrap();
        assert!(text.contains("C2,Remitly,$80.00,$1.00,1,1,1.250%"));
    }

    #[test]
    fn summary_includes_vendors_without_rate_evidence() {
        let rendered = render_report(&sample_report()).unwrap();
        let text = String::from_utf8(rendered.vendor_summary).unwrap();
        assert!(text.contains("Unknown Vendor,1,0,$40.00,$0.00,0.000%"));
    }

    #[test]
    fn files_carry_the_fixed_names() {
        let rendered = render_report(&sample_report()).unwrap();
        let names: Vec<&str> = rendered.files().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "approved-vendors-customers.csv",
                "problem-vendors-customers.csv",
                "vendor-summary.csv"
            ]
        );
    }
}
