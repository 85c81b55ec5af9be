//! Pattern mining algorithms for association rule discovery.
//!
//! This module finds frequent itemsets in per-user liked-item sets and turns
//! them into scored association rules.
//!
//! # Algorithms
//!
//! - [`mine`]: level-wise frequent itemset mining (Apriori)
//! - [`generate_rules`]: rule generation with support, confidence and lift
//! - [`Apriori`]: builder combining both steps
//!
//! # Example
//!
//! ```
//! use assocrec::mining::{Apriori, Transactions};
//!
//! // Liked movies per user
//! let mut transactions = Transactions::new();
//! transactions.insert(1, [1, 2, 3].into_iter().collect());
//! transactions.insert(2, [1, 2].into_iter().collect());
//! transactions.insert(3, [1, 3].into_iter().collect());
//! transactions.insert(4, [2, 3].into_iter().collect());
//!
//! // Find frequent itemsets with minimum support 0.5 (50%)
//! let mut apriori = Apriori::new()
//!     .with_min_support(0.5)
//!     .with_min_confidence(0.6);
//!
//! apriori.fit(&transactions).unwrap();
//!
//! for rule in apriori.rules() {
//!     println!("{rule}");
//! }
//! ```

mod apriori;
mod itemset;
mod rules;

pub use apriori::{calculate_support, mine};
pub use itemset::{ItemId, Itemset, SupportTable, Transactions, UserId};
pub use rules::{generate_rules, AssociationRule, RuleSet};

use crate::config::{DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT};
use crate::error::Result;

/// Apriori algorithm for frequent itemset mining and association rule generation.
///
/// # Algorithm
///
/// 1. Find frequent 1-itemsets (support >= `min_support`)
/// 2. Join frequent (k-1)-itemsets into k-item candidates
/// 3. Drop candidates that don't meet minimum support
/// 4. Repeat until no more frequent itemsets can be generated
/// 5. Generate association rules from frequent itemsets
/// 6. Filter rules by minimum confidence
///
/// # Parameters
///
/// - `min_support`: Minimum support threshold, in (0, 1]
/// - `min_confidence`: Minimum confidence threshold, in (0, 1]
#[derive(Debug, Clone)]
pub struct Apriori {
    min_support: f64,
    min_confidence: f64,
    support_table: SupportTable,
    rules: RuleSet,
}

impl Apriori {
    /// Create a new Apriori instance with default parameters.
    ///
    /// # Default Parameters
    ///
    /// - `min_support`: 0.02 (2%)
    /// - `min_confidence`: 0.3 (30%)
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            support_table: SupportTable::default(),
            rules: RuleSet::default(),
        }
    }

    /// Set the minimum support threshold.
    #[must_use]
    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    /// Set the minimum confidence threshold.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    #[must_use]
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Mine `transactions` and generate rules, replacing any earlier result.
    ///
    /// # Errors
    ///
    /// Fails on an empty snapshot or a threshold outside `(0, 1]`. The
    /// previous result is left untouched in that case.
    pub fn fit(&mut self, transactions: &Transactions) -> Result<()> {
        crate::error::check_unit_interval("min_confidence", self.min_confidence)?;
        let support_table = mine(transactions, self.min_support)?;
        let rules = generate_rules(&support_table, self.min_confidence)?;

        self.support_table = support_table;
        self.rules = RuleSet::new(rules);
        Ok(())
    }

    /// Frequent itemsets sorted by support descending.
    #[must_use]
    pub fn frequent_itemsets(&self) -> Vec<(Itemset, f64)> {
        self.support_table.sorted()
    }

    #[must_use]
    pub fn support_table(&self) -> &SupportTable {
        &self.support_table
    }

    /// Generated rules in presentation order.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Take the fitted results, leaving the instance empty.
    #[must_use]
    pub fn into_parts(self) -> (SupportTable, RuleSet) {
        (self.support_table, self.rules)
    }
}

impl Default for Apriori {
    fn default() -> Self {
        Self::new()
    }
}
