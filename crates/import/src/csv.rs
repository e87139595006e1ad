use remitscan_core::TransactionRecord;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),
    #[error("No data rows")]
    NoDataRows,
}

/// Decodes a weekly export into transaction records. Columns bind by
/// header name; missing columns decode as blank fields rather than
/// failing, since the engine treats blank and unparseable fields as
/// degraded values anyway. An export with no data rows at all is the one
/// whole-file failure.
pub fn read_transactions<R: Read>(data: R) -> Result<Vec<TransactionRecord>, CsvError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::Headers)
        .from_reader(data);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: TransactionRecord = result?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(CsvError::NoDataRows);
    }

    tracing::debug!(rows = records.len(), "decoded transaction export");
    Ok(records)
}
