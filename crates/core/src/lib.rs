pub mod engine;
pub mod money;
pub mod record;
pub mod resolver;

pub use engine::{
    classify, CustomerVendorAggregate, EngineError, ReviewPolicy, ReviewReport, ReviewStats,
    VendorAggregate, VendorStanding,
};
pub use record::{Direction, TransactionRecord};
pub use resolver::{Recognizer, VendorRules, VendorVerdict, UNKNOWN_VENDOR};
