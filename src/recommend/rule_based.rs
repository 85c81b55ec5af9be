//! Ranking unseen items from fired association rules.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{check_top_n, Result};
use crate::mining::{AssociationRule, ItemId, RuleSet};

/// One recommended item with the scores of the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: ItemId,
    pub confidence: f64,
    pub support: f64,
    pub lift: f64,
}

impl Recommendation {
    fn from_rule(item: ItemId, rule: &AssociationRule) -> Self {
        Self {
            item,
            confidence: rule.confidence,
            support: rule.support,
            lift: rule.lift,
        }
    }
}

/// Recommend items using everything the user liked.
///
/// A rule fires when its antecedent is a subset of `liked`. Consequent items
/// already in `liked` are skipped. An item reachable from several rules keeps
/// the scores of the first rule in `rules` order. The survivors are ranked by
/// confidence then lift, both descending, and cut to `top_n`.
///
/// No fired rule, or only liked consequents, gives an empty list.
///
/// # Errors
///
/// Returns [`RulesError::InvalidInput`](crate::error::RulesError::InvalidInput)
/// if `top_n` is 0.
///
/// # Examples
///
/// ```
/// use assocrec::mining::{AssociationRule, Itemset, RuleSet};
/// use assocrec::recommend::recommend_by_history;
///
/// let rules = RuleSet::new(vec![AssociationRule {
///     antecedent: Itemset::singleton(1),
///     consequent: Itemset::singleton(2),
///     support: 0.5,
///     confidence: 0.8,
///     lift: 1.2,
/// }]);
///
/// let recs = recommend_by_history(&[1].into_iter().collect(), &rules, 5).unwrap();
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].item, 2);
///
/// let recs = recommend_by_history(&[1, 2].into_iter().collect(), &rules, 5).unwrap();
/// assert!(recs.is_empty());
/// ```
pub fn recommend_by_history(
    liked: &BTreeSet<ItemId>,
    rules: &RuleSet,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    check_top_n(top_n)?;

    let fired = rules
        .iter()
        .filter(|rule| rule.antecedent.is_subset_of(liked))
        .flat_map(|rule| {
            rule.consequent
                .items()
                .iter()
                .filter(move |item| !liked.contains(*item))
                .map(move |&item| Recommendation::from_rule(item, rule))
        });

    Ok(rank(fired, top_n))
}

/// Recommend items from the single item the user liked last.
///
/// Only rules whose antecedent is exactly `{item}` are used; longer
/// antecedents containing `item` are ignored. Ranking is the same as
/// [`recommend_by_history`]. An item never recommends itself because a
/// rule's antecedent and consequent are disjoint.
///
/// # Errors
///
/// Returns [`RulesError::InvalidInput`](crate::error::RulesError::InvalidInput)
/// if `top_n` is 0.
pub fn recommend_by_last_liked(
    item: ItemId,
    rules: &RuleSet,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    check_top_n(top_n)?;

    let fired = rules
        .iter()
        .filter(|rule| rule.antecedent.len() == 1 && rule.antecedent.contains(item))
        .flat_map(|rule| {
            rule.consequent
                .items()
                .iter()
                .map(move |&target| Recommendation::from_rule(target, rule))
        });

    Ok(rank(fired, top_n))
}

/// Keep the first occurrence of each item, sort, truncate.
fn rank(candidates: impl Iterator<Item = Recommendation>, top_n: usize) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Recommendation> = candidates.filter(|rec| seen.insert(rec.item)).collect();

    // stable: equal scores keep rule order
    unique.sort_by(by_confidence_then_lift);
    unique.truncate(top_n);
    unique
}

fn by_confidence_then_lift(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.lift.total_cmp(&a.lift))
}
