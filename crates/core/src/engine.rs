use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::parse_amount;
use crate::record::TransactionRecord;
use crate::resolver::{VendorRules, VendorVerdict, UNKNOWN_VENDOR};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no transactions supplied")]
    NoTransactions,
}

/// Running totals for one (customer, vendor) pair. Created lazily on the
/// first matching debit, mutated additively, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVendorAggregate {
    pub customer_id: String,
    pub vendor: String,
    pub total_amount: Decimal,
    pub total_interchange: Decimal,
    pub transaction_count: u64,
    pub interchange_rate: Decimal,
    pub transactions_with_interchange: u64,
    pub amount_with_interchange: Decimal,
}

impl CustomerVendorAggregate {
    fn new(customer_id: &str, vendor: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            vendor: vendor.to_string(),
            total_amount: Decimal::ZERO,
            total_interchange: Decimal::ZERO,
            transaction_count: 0,
            interchange_rate: Decimal::ZERO,
            transactions_with_interchange: 0,
            amount_with_interchange: Decimal::ZERO,
        }
    }
}

/// Running totals for one vendor across all customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorAggregate {
    pub vendor: String,
    pub transaction_volume: u64,
    pub total_amount: Decimal,
    pub total_interchange: Decimal,
    pub avg_interchange_rate: Decimal,
    pub transactions_with_interchange: u64,
    pub amount_with_interchange: Decimal,
}

impl VendorAggregate {
    fn new(vendor: &str) -> Self {
        Self {
            vendor: vendor.to_string(),
            transaction_volume: 0,
            total_amount: Decimal::ZERO,
            total_interchange: Decimal::ZERO,
            avg_interchange_rate: Decimal::ZERO,
            transactions_with_interchange: 0,
            amount_with_interchange: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStanding {
    Approved,
    Problem,
}

/// Classification policy. The threshold is configuration rather than a
/// constant so it can be tuned without re-deriving the logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPolicy {
    /// A vendor is Approved only when its average interchange rate is
    /// strictly greater than this (percent). The boundary value itself is
    /// Problem.
    pub approval_threshold_pct: Decimal,
    /// Vendors classified Problem regardless of computed rate.
    pub always_problem: Vec<String>,
}

// TODO: "Giromex" and "SendWave" never appear as canonical labels in the
// recognition table, so these two overrides can never fire. Kept verbatim
// pending product clarification.
const ALWAYS_PROBLEM_VENDORS: &[&str] = &[
    "Giromex",
    "Pangea",
    "Remitly",
    "SendWave",
    "WorldRemit",
    "Western Union",
    "Xoom",
];

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            // 0.3%
            approval_threshold_pct: Decimal::new(3, 1),
            always_problem: ALWAYS_PROBLEM_VENDORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Run-level counters reported alongside the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Every row of the input, debits and non-debits alike.
    pub total_transactions: u64,
    pub approved_customers: u64,
    pub problem_customers: u64,
    pub total_vendors: u64,
    /// Debits that resolved to an excluded non-remittance service.
    pub filtered_out_non_remittance: u64,
}

/// The three result tables plus stats. A classify run either produces all
/// of this or fails as a whole; it never partially completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub approved: Vec<CustomerVendorAggregate>,
    pub problem: Vec<CustomerVendorAggregate>,
    pub vendor_summary: Vec<VendorAggregate>,
    pub stats: ReviewStats,
}

/// Derived rate: interchange over interchange-bearing amount, in percent.
/// Zero when there is no interchange-bearing amount to divide by.
fn rate_pct(total_interchange: Decimal, amount_with_interchange: Decimal) -> Decimal {
    if amount_with_interchange.is_zero() {
        Decimal::ZERO
    } else {
        total_interchange / amount_with_interchange * Decimal::ONE_HUNDRED
    }
}

fn vendor_standing(vendor: &VendorAggregate, policy: &ReviewPolicy) -> VendorStanding {
    if policy.always_problem.iter().any(|v| v == &vendor.vendor) {
        VendorStanding::Problem
    } else if vendor.avg_interchange_rate > policy.approval_threshold_pct {
        VendorStanding::Approved
    } else {
        VendorStanding::Problem
    }
}

/// Folds the transaction export into per-(customer, vendor) and per-vendor
/// aggregates, classifies every vendor against the policy, and partitions
/// the customer rows accordingly.
///
/// Single pass over the input in order; both maps are insertion-ordered so
/// repeated runs over the same export produce identical tables.
pub fn classify(
    records: &[TransactionRecord],
    rules: &VendorRules,
    policy: &ReviewPolicy,
) -> Result<ReviewReport, EngineError> {
    if records.is_empty() {
        return Err(EngineError::NoTransactions);
    }

    let mut by_customer_vendor: IndexMap<(String, String), CustomerVendorAggregate> =
        IndexMap::new();
    let mut by_vendor: IndexMap<String, VendorAggregate> = IndexMap::new();
    let mut filtered_out_non_remittance = 0u64;

    for rec in records {
        if !rec.is_debit() {
            continue;
        }

        let vendor = match rules.resolve(&rec.summary) {
            VendorVerdict::Excluded => {
                filtered_out_non_remittance += 1;
                continue;
            }
            VendorVerdict::Recognized(vendor) => vendor,
            VendorVerdict::Unknown => UNKNOWN_VENDOR.to_string(),
        };

        let amount = parse_amount(&rec.amount);
        // Presence is judged on the raw field; a blank cell is "no fee
        // data", not a zero fee, and must stay out of both rate legs.
        let has_interchange = rec.has_interchange();
        let interchange = parse_amount(&rec.interchange);

        let cv = by_customer_vendor
            .entry((rec.customer_id.clone(), vendor.clone()))
            .or_insert_with(|| CustomerVendorAggregate::new(&rec.customer_id, &vendor));
        cv.total_amount += amount;
        cv.transaction_count += 1;
        if has_interchange {
            cv.total_interchange += interchange;
            cv.transactions_with_interchange += 1;
            cv.amount_with_interchange += amount;
        }
        cv.interchange_rate = rate_pct(cv.total_interchange, cv.amount_with_interchange);

        let vs = by_vendor
            .entry(vendor.clone())
            .or_insert_with(|| VendorAggregate::new(&vendor));
        vs.transaction_volume += 1;
        vs.total_amount += amount;
        if has_interchange {
            vs.total_interchange += interchange;
            vs.transactions_with_interchange += 1;
            vs.amount_with_interchange += amount;
        }
        vs.avg_interchange_rate = rate_pct(vs.total_interchange, vs.amount_with_interchange);
    }

    let standings: IndexMap<String, VendorStanding> = by_vendor
        .iter()
        .map(|(name, agg)| (name.clone(), vendor_standing(agg, policy)))
        .collect();

    let mut approved = Vec::new();
    let mut problem = Vec::new();
    for ((_, vendor), agg) in by_customer_vendor {
        // No interchange-bearing transactions means no rate evidence; such
        // rows stay out of both buckets but still back the vendor summary.
        if agg.transactions_with_interchange == 0 {
            continue;
        }
        // Every pair's vendor was folded into by_vendor in the same pass,
        // so the standing lookup cannot miss.
        match standings[&vendor] {
            VendorStanding::Approved => approved.push(agg),
            VendorStanding::Problem => problem.push(agg),
        }
    }

    let vendor_summary: Vec<VendorAggregate> = by_vendor.into_values().collect();

    let stats = ReviewStats {
        total_transactions: records.len() as u64,
        approved_customers: approved.len() as u64,
        problem_customers: problem.len() as u64,
        total_vendors: vendor_summary.len() as u64,
        filtered_out_non_remittance,
    };

    tracing::info!(
        total = stats.total_transactions,
        approved = stats.approved_customers,
        problem = stats.problem_customers,
        vendors = stats.total_vendors,
        filtered = stats.filtered_out_non_remittance,
        "classification complete"
    );

    Ok(ReviewReport {
        approved,
        problem,
        vendor_summary,
        stats,
    })
}
