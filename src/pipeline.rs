//! Mine once, query many times.

use std::collections::BTreeSet;

use tracing::info;

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::mining::{generate_rules, mine, ItemId, RuleSet, SupportTable, Transactions};
use crate::recommend::{recommend_by_history, recommend_by_last_liked, Recommendation};

/// Support table and rule set built from one transaction snapshot.
///
/// The model is immutable after [`RuleModel::build`]; to pick up new
/// transactions build a new one. Queries only read, so a model can be shared
/// between threads.
///
/// # Examples
///
/// ```
/// use assocrec::config::RecommenderConfig;
/// use assocrec::mining::Transactions;
/// use assocrec::pipeline::RuleModel;
///
/// let mut transactions = Transactions::new();
/// transactions.insert(1, [1, 2].into_iter().collect());
/// transactions.insert(2, [1, 2].into_iter().collect());
/// transactions.insert(3, [1, 3].into_iter().collect());
/// transactions.insert(4, [2, 3].into_iter().collect());
///
/// let config = RecommenderConfig::new().with_min_support(0.5).with_min_confidence(0.5);
/// let model = RuleModel::build(&transactions, config).unwrap();
///
/// let recs = model.recommend_by_history(&[1].into_iter().collect()).unwrap();
/// assert_eq!(recs[0].item, 2);
/// ```
#[derive(Debug, Clone)]
pub struct RuleModel {
    config: RecommenderConfig,
    support_table: SupportTable,
    rules: RuleSet,
}

impl RuleModel {
    /// Run the miner and the rule generator over `transactions`.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid or `transactions` is empty.
    pub fn build(transactions: &Transactions, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let support_table = mine(transactions, config.min_support)?;
        let rules = RuleSet::new(generate_rules(&support_table, config.min_confidence)?);

        info!(
            transactions = transactions.len(),
            frequent_itemsets = support_table.len(),
            rules = rules.len(),
            min_support = config.min_support,
            min_confidence = config.min_confidence,
            "rule model built"
        );

        Ok(Self {
            config,
            support_table,
            rules,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[must_use]
    pub fn support_table(&self) -> &SupportTable {
        &self.support_table
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// [`recommend_by_history`] with the configured `top_n`.
    ///
    /// # Errors
    ///
    /// Never fails for a model built with a valid config.
    pub fn recommend_by_history(&self, liked: &BTreeSet<ItemId>) -> Result<Vec<Recommendation>> {
        recommend_by_history(liked, &self.rules, self.config.top_n)
    }

    /// [`recommend_by_last_liked`] with the configured `top_n`.
    ///
    /// # Errors
    ///
    /// Never fails for a model built with a valid config.
    pub fn recommend_by_last_liked(&self, item: ItemId) -> Result<Vec<Recommendation>> {
        recommend_by_last_liked(item, &self.rules, self.config.top_n)
    }

    /// History query with an explicit result count.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `top_n` is 0.
    pub fn recommend_by_history_top(
        &self,
        liked: &BTreeSet<ItemId>,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        recommend_by_history(liked, &self.rules, top_n)
    }

    /// Anchor-item query with an explicit result count.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `top_n` is 0.
    pub fn recommend_by_last_liked_top(
        &self,
        item: ItemId,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        recommend_by_last_liked(item, &self.rules, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::Itemset;

    fn transactions() -> Transactions {
        let mut t = Transactions::new();
        t.insert(1, [1, 2, 3].into_iter().collect());
        t.insert(2, [1, 2].into_iter().collect());
        t.insert(3, [1, 2, 4].into_iter().collect());
        t.insert(4, [2, 3].into_iter().collect());
        t
    }

    #[test]
    fn test_build_and_query() {
        let config = RecommenderConfig::new()
            .with_min_support(0.5)
            .with_min_confidence(0.5);
        let model = RuleModel::build(&transactions(), config).unwrap();

        assert_eq!(model.support_table().support(&Itemset::new([1, 2])), Some(0.75));
        assert!(!model.rules().is_empty());

        let recs = model.recommend_by_last_liked(1).unwrap();
        assert_eq!(recs[0].item, 2);
        assert!((recs[0].confidence - 1.0).abs() < 1e-12);

        let recs = model.recommend_by_history(&[3].into_iter().collect()).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item, 2);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = RecommenderConfig::new().with_top_n(0);
        assert!(RuleModel::build(&transactions(), config).is_err());
    }

    #[test]
    fn test_build_rejects_empty_transactions() {
        let err = RuleModel::build(&Transactions::new(), RecommenderConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_high_threshold_gives_empty_model() {
        let config = RecommenderConfig::new().with_min_support(1.0);
        let model = RuleModel::build(&transactions(), config).unwrap();
        assert!(model.support_table().len() <= 1);
        assert!(model.rules().is_empty());
        assert!(model.recommend_by_history(&[2].into_iter().collect()).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_top_n() {
        let config = RecommenderConfig::new().with_min_support(0.25).with_min_confidence(0.1);
        let model = RuleModel::build(&transactions(), config).unwrap();
        assert_eq!(model.recommend_by_last_liked_top(2, 1).unwrap().len(), 1);
        assert!(model.recommend_by_history_top(&BTreeSet::new(), 0).is_err());
    }

    #[test]
    fn test_model_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleModel>();
    }
}
