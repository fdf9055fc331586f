//! Tabular projection of rate records.
//!
//! Column order is fixed and every amount carries exactly two decimal
//! places. Currency symbols and locale formatting are left to the caller.

use serde::{Deserialize, Serialize};

use crate::money::format_cents;
use crate::record::RateRecord;

/// Number of columns in a rate table.
pub const COLUMN_COUNT: usize = 6;

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRow {
    /// Product name.
    pub name: String,
    /// Retail price.
    pub retail: String,
    /// Contract price.
    pub contract: String,
    /// Subscription rate.
    pub subscription: String,
    /// 24 month finance rate.
    pub finance_24: String,
    /// 36 month finance rate.
    pub finance_36: String,
}

impl RateRow {
    /// Formats a record.
    pub fn from_record(record: &RateRecord) -> Self {
        Self {
            name: record.product_name().to_string(),
            retail: format_cents(record.retail()),
            contract: format_cents(record.contract()),
            subscription: format_cents(record.subscription()),
            finance_24: format_cents(record.finance_24()),
            finance_36: format_cents(record.finance_36()),
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            self.name.as_str(),
            self.retail.as_str(),
            self.contract.as_str(),
            self.subscription.as_str(),
            self.finance_24.as_str(),
            self.finance_36.as_str(),
        ]
    }
}

impl From<&RateRecord> for RateRow {
    fn from(record: &RateRecord) -> Self {
        Self::from_record(record)
    }
}

/// Headers plus rows, ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Column headers in display order.
    pub headers: [String; COLUMN_COUNT],
    /// Rows in ledger order.
    pub rows: Vec<RateRow>,
}

impl RateTable {
    /// Builds a table; `subscription_label` names the subscription column.
    pub fn from_records<'a, I>(subscription_label: &str, records: I) -> Self
    where
        I: IntoIterator<Item = &'a RateRecord>,
    {
        Self {
            headers: headers(subscription_label),
            rows: records.into_iter().map(RateRow::from_record).collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column headers for a subscription label.
pub fn headers(subscription_label: &str) -> [String; COLUMN_COUNT] {
    [
        "Product".to_string(),
        "Retail".to_string(),
        "Contract".to_string(),
        subscription_label.to_string(),
        "24M Finance".to_string(),
        "36M Finance".to_string(),
    ]
}
