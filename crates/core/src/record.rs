use serde::{Deserialize, Serialize};

/// Transaction direction as exported by the bank. The export writes the
/// literal strings `Debit` and `Credit`; anything else is carried through
/// unchanged and treated as non-debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    Debit,
    Credit,
    Other(String),
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Other(String::new())
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Debit" => Direction::Debit,
            "Credit" => Direction::Credit,
            _ => Direction::Other(s),
        }
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Debit => "Debit".to_string(),
            Direction::Credit => "Credit".to_string(),
            Direction::Other(s) => s,
        }
    }
}

/// One row of the weekly transaction export. Field names mirror the export
/// headers so the CSV decoder binds columns by name. Only `direction`,
/// `amount`, `interchange`, `summary` and `customer_id` drive the review;
/// the rest pass through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionRecord {
    pub created_at: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub direction: Direction,
    pub balance: String,
    pub interchange: String,
    pub summary: String,
    pub customer_id: String,
    pub account_id: String,
    pub counterparty_name: String,
    pub counterparty_customer: String,
    pub counterparty_account: String,
    pub imad: String,
    pub omad: String,
    pub payment_id: String,
    pub recurring_payment_id: String,
    pub gross_interchange: String,
    pub institution_id: String,
}

impl TransactionRecord {
    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// Whether the row carries interchange data at all. Presence is judged
    /// on the raw field: a blank cell means "no fee data" and is distinct
    /// from an interchange of $0.00.
    pub fn has_interchange(&self) -> bool {
        !self.interchange.trim().is_empty()
    }
}
