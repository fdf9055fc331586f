//! Rate ledger.
//!
//! An ordered, append-only table of [`RateRecord`]s with a name index.
//! Names may repeat: each `add` is its own row, as in a spreadsheet.
//!
//! The ledger does no locking. Callers sharing one across threads must
//! serialize `add`, `remove`, `rename` and `normalize` themselves.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::engine::RateEngine;
use crate::error::{RateError, RateResult};
use crate::normalize::PriceNormalizer;
use crate::policy::PricingPolicy;
use crate::record::RateRecord;
use crate::table::RateTable;

/// Ordered collection of rate records keyed by product name.
#[derive(Debug, Clone, Default)]
pub struct RateLedger {
    engine: RateEngine,
    records: Vec<RateRecord>,
    /// Product name -> row positions, ascending.
    index: HashMap<String, Vec<usize>>,
}

impl RateLedger {
    /// Creates an empty ledger that prices new products with `engine`.
    pub fn new(engine: RateEngine) -> Self {
        Self {
            engine,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty ledger for a pricing policy.
    pub fn with_policy(policy: PricingPolicy) -> RateResult<Self> {
        Ok(Self::new(RateEngine::new(policy)?))
    }

    /// Creates a ledger seeded from `(retail, name)` pairs, in order.
    ///
    /// Stops at the first invalid price.
    pub fn from_quotes<I, S>(engine: RateEngine, quotes: I) -> RateResult<Self>
    where
        I: IntoIterator<Item = (Decimal, Option<S>)>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new(engine);
        for (retail, name) in quotes {
            ledger.add(retail, name.as_ref().map(AsRef::as_ref))?;
        }
        Ok(ledger)
    }

    /// Returns the engine used for new products.
    pub fn engine(&self) -> &RateEngine {
        &self.engine
    }

    /// Prices a product and appends it.
    pub fn add(&mut self, retail: Decimal, product_name: Option<&str>) -> RateResult<RateRecord> {
        let record = self.engine.record(retail, product_name)?;
        self.push(record.clone());
        Ok(record)
    }

    /// Parses a textual retail price, prices the product and appends it.
    pub fn add_raw(&mut self, retail: &str, product_name: Option<&str>) -> RateResult<RateRecord> {
        let retail = self.engine.parse_retail(retail)?;
        self.add(retail, product_name)
    }

    /// Appends externally supplied records, keeping their order.
    ///
    /// No deduplication is performed.
    pub fn merge<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RateRecord>,
    {
        let before = self.records.len();
        for record in records {
            self.push(record);
        }
        log::debug!("merged {} records", self.records.len() - before);
    }

    /// Appends every record of another ledger.
    pub fn merge_ledger(&mut self, other: RateLedger) {
        self.merge(other.records);
    }

    /// Removes the first record structurally equal to `record`.
    ///
    /// # Errors
    ///
    /// Returns `RateError::NotFound` if no such record exists.
    pub fn remove(&mut self, record: &RateRecord) -> RateResult<RateRecord> {
        let position = self.position_of(record)?;
        let removed = self.records.remove(position);
        self.rebuild_index();
        log::debug!("removed '{}' at row {}", removed.product_name(), position);
        Ok(removed)
    }

    /// Renames the first record structurally equal to `record` and re-keys it.
    ///
    /// Returns the renamed record.
    ///
    /// # Errors
    ///
    /// Returns `RateError::NotFound` if no such record exists.
    pub fn rename(&mut self, record: &RateRecord, new_name: &str) -> RateResult<RateRecord> {
        let position = self.position_of(record)?;
        let previous = self.records[position].rename(new_name);
        self.unindex(&previous, position);
        let current = self.records[position].product_name().to_string();
        self.index_row(current, position);
        log::debug!("renamed row {} from '{}' to '{}'", position, previous, new_name);
        Ok(self.records[position].clone())
    }

    /// Normalizes the finance rates of the first record named `product_name`.
    ///
    /// # Errors
    ///
    /// Returns `RateError::NotFound` if no record has that name, or if the
    /// name is the undefined-product sentinel.
    pub fn normalize(&mut self, product_name: &str) -> RateResult<&RateRecord> {
        let position = self
            .index
            .get(product_name)
            .and_then(|rows| rows.first().copied())
            .filter(|&row| self.records[row].is_named())
            .ok_or_else(|| RateError::not_found(product_name))?;

        let record = &mut self.records[position];
        PriceNormalizer::apply(record);
        Ok(record)
    }

    /// Normalizes the finance rates of every record.
    pub fn normalize_all(&mut self) {
        for record in &mut self.records {
            PriceNormalizer::apply(record);
        }
    }

    /// Returns the first record named `product_name`.
    pub fn get(&self, product_name: &str) -> Option<&RateRecord> {
        self.index
            .get(product_name)
            .and_then(|rows| rows.first())
            .map(|&row| &self.records[row])
    }

    /// Returns every record named `product_name`, in insertion order.
    pub fn find_all<'a>(&'a self, product_name: &str) -> impl Iterator<Item = &'a RateRecord> + 'a {
        self.index
            .get(product_name)
            .into_iter()
            .flatten()
            .map(move |&row| &self.records[row])
    }

    /// Read-only view of all records in insertion order.
    pub fn all(&self) -> &[RateRecord] {
        &self.records
    }

    /// Iterates over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RateRecord> {
        self.records.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the ledger has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Projects the ledger into display rows.
    pub fn to_table(&self) -> RateTable {
        RateTable::from_records(&self.engine.policy().subscription_label, &self.records)
    }

    /// Consumes the ledger, returning its records.
    pub fn into_records(self) -> Vec<RateRecord> {
        self.records
    }

    fn push(&mut self, record: RateRecord) {
        let position = self.records.len();
        self.index_row(record.product_name().to_string(), position);
        log::trace!("row {}: {}", position, record);
        self.records.push(record);
    }

    fn position_of(&self, record: &RateRecord) -> RateResult<usize> {
        self.records
            .iter()
            .position(|candidate| candidate == record)
            .ok_or_else(|| RateError::not_found(record.product_name()))
    }

    fn index_row(&mut self, name: String, position: usize) {
        let rows = self.index.entry(name).or_default();
        if let Err(slot) = rows.binary_search(&position) {
            rows.insert(slot, position);
        }
    }

    fn unindex(&mut self, name: &str, position: usize) {
        if let Some(rows) = self.index.get_mut(name) {
            rows.retain(|&row| row != position);
            if rows.is_empty() {
                self.index.remove(name);
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, record) in self.records.iter().enumerate() {
            self.index
                .entry(record.product_name().to_string())
                .or_default()
                .push(position);
        }
    }
}

impl Extend<RateRecord> for RateLedger {
    fn extend<I: IntoIterator<Item = RateRecord>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl<'a> IntoIterator for &'a RateLedger {
    type Item = &'a RateRecord;
    type IntoIter = std::slice::Iter<'a, RateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
