//! # Ratecard Core
//!
//! Rate computation, price normalization and rate aggregation for retail
//! product offers.
//!
//! For a retail price this crate derives five purchase offers:
//!
//! - **Retail**: the list price, stored verbatim
//! - **Contract**: retail minus a fixed subsidy, floored at zero
//! - **Subscription**: a flat monthly rate over a fixed term, no interest
//! - **24M / 36M Finance**: amortized monthly payments at a fixed nominal rate
//!
//! A [`PriceNormalizer`] can then move the finance rates onto attractive
//! price points (`.49` / `.99`), and a [`RateLedger`] collects records for
//! many products into a single ordered table.
//!
//! ## Design Philosophy
//!
//! - **Decimal Money**: every figure is a `rust_decimal::Decimal`, never `f64`
//! - **Explicit Policy**: subsidy and interest rate travel with the engine
//! - **Pure Core**: no I/O, no global state, no internal locking
//!
//! ## Example
//!
//! ```rust
//! use ratecard_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let engine = RateEngine::default();
//! let mut ledger = RateLedger::new(engine);
//!
//! ledger.add(dec!(1399), Some("Phone A")).unwrap();
//! ledger.add(dec!(799), Some("Phone B")).unwrap();
//!
//! let table = ledger.to_table();
//! assert_eq!(table.rows[0].contract, "949.00");
//! assert_eq!(table.rows[1].name, "Phone B");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod engine;
pub mod error;
pub mod ledger;
pub mod money;
pub mod normalize;
pub mod policy;
pub mod record;
pub mod table;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{RateEngine, RateFigures};
    pub use crate::error::{RateError, RateResult, Validate, ValidationError};
    pub use crate::ledger::RateLedger;
    pub use crate::normalize::PriceNormalizer;
    pub use crate::policy::{PricingPolicy, RetailInput};
    pub use crate::record::{RateRecord, UNDEFINED_PRODUCT};
    pub use crate::table::{RateRow, RateTable};
}

// Re-export commonly used types at crate root
pub use engine::{RateEngine, RateFigures};
pub use error::{RateError, RateResult};
pub use ledger::RateLedger;
pub use normalize::PriceNormalizer;
pub use policy::{PricingPolicy, RetailInput};
pub use record::RateRecord;
pub use table::{RateRow, RateTable};
