pub mod csv;

pub use csv::{read_transactions, CsvError};
