//! Association rule generation from a support table.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::itemset::{Itemset, SupportTable};
use crate::error::{check_unit_interval, Result};

/// Association rule: antecedent => consequent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// Items in the antecedent (left side)
    pub antecedent: Itemset,
    /// Items in the consequent (right side)
    pub consequent: Itemset,
    /// Support: P(antecedent ∪ consequent)
    pub support: f64,
    /// Confidence: P(consequent | antecedent) = support / P(antecedent)
    pub confidence: f64,
    /// Lift: support / (P(antecedent) * P(consequent))
    pub lift: f64,
}

impl AssociationRule {
    /// Presentation order: confidence desc, lift desc, support desc, then
    /// antecedent and consequent ascending.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .confidence
            .total_cmp(&self.confidence)
            .then_with(|| other.lift.total_cmp(&self.lift))
            .then_with(|| other.support.total_cmp(&self.support))
            .then_with(|| self.antecedent.cmp(&other.antecedent))
            .then_with(|| self.consequent.cmp(&other.consequent))
    }
}

impl fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {} (sup={:.3}, conf={:.3}, lift={:.3})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}

/// Generate every rule `A => S - A` with confidence at least `min_confidence`.
///
/// Each frequent itemset `S` with two or more members is split into every
/// non-empty proper subset `A` and its complement. A split is dropped
/// silently when the support of either side is not in `table`. Tables built
/// by [`mine`](super::mine) always hold every subset of a frequent itemset,
/// so only a hand-built table can leave a side unknown.
/// Different splits of the same itemset are all kept. The returned list has
/// no defined order; wrap it in a [`RuleSet`] for presentation.
///
/// # Errors
///
/// Returns [`RulesError::InvalidInput`](crate::error::RulesError::InvalidInput)
/// if `min_confidence` is outside `(0, 1]`.
pub fn generate_rules(table: &SupportTable, min_confidence: f64) -> Result<Vec<AssociationRule>> {
    check_unit_interval("min_confidence", min_confidence)?;

    let mut rules = Vec::new();
    let mut dropped = 0usize;

    for (itemset, support) in table.iter() {
        if itemset.len() < 2 {
            continue;
        }

        for antecedent in proper_subsets(itemset) {
            let consequent = itemset.difference(&antecedent);

            let (Some(antecedent_support), Some(consequent_support)) =
                (table.support(&antecedent), table.support(&consequent))
            else {
                trace!(%antecedent, %consequent, "split dropped, side support unknown");
                dropped += 1;
                continue;
            };

            let confidence = support / antecedent_support;
            if confidence >= min_confidence {
                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support,
                    confidence,
                    lift: support / (antecedent_support * consequent_support),
                });
            }
        }
    }

    debug!(rules = rules.len(), dropped, min_confidence, "rules generated");
    Ok(rules)
}

/// All non-empty proper subsets of `itemset`, smallest first.
fn proper_subsets(itemset: &Itemset) -> Vec<Itemset> {
    let items = itemset.items();
    let n = items.len();
    debug_assert!(n < 64, "itemset too large to enumerate");

    let mut masks: Vec<u64> = (1..(1u64 << n) - 1).collect();
    masks.sort_by_key(|mask| mask.count_ones());

    masks
        .into_iter()
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|&(i, _)| (mask & (1u64 << i)) != 0)
                .map(|(_, &item)| item)
                .collect()
        })
        .collect()
}

/// Rules in presentation order.
///
/// The order is for display and for first-hit deduplication in the
/// recommender; nothing else may rely on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AssociationRule>", into = "Vec<AssociationRule>")]
pub struct RuleSet {
    rules: Vec<AssociationRule>,
}

impl RuleSet {
    /// Sort `rules` by confidence desc, lift desc, support desc.
    #[must_use]
    pub fn new(mut rules: Vec<AssociationRule>) -> Self {
        rules.sort_by(AssociationRule::rank_cmp);
        Self { rules }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssociationRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[AssociationRule] {
        &self.rules
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<AssociationRule> {
        self.rules
    }
}

impl From<Vec<AssociationRule>> for RuleSet {
    fn from(rules: Vec<AssociationRule>) -> Self {
        Self::new(rules)
    }
}

impl From<RuleSet> for Vec<AssociationRule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a AssociationRule;
    type IntoIter = std::slice::Iter<'a, AssociationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
