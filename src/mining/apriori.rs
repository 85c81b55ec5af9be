//! Level-wise frequent itemset mining.

use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::itemset::{ratio, ItemId, Itemset, SupportTable, Transactions};
use crate::error::{check_unit_interval, Result, RulesError};

/// Mine every itemset whose support is at least `min_support`.
///
/// Level 1 counts single items. Level `k` joins every pair of frequent
/// `(k-1)`-itemsets whose union has exactly `k` members and keeps the unions
/// that meet the threshold. Candidates are not pruned by checking that all
/// of their `(k-1)`-subsets are frequent; every join result is counted.
///
/// Mining stops when a level yields no candidates or no frequent itemsets.
/// An empty table is a valid result (the threshold was too high even for
/// single items).
///
/// # Errors
///
/// Returns [`RulesError::EmptyInput`] if `transactions` is empty and
/// [`RulesError::InvalidInput`] if `min_support` is outside `(0, 1]`. Both
/// report `true` from [`RulesError::is_invalid_input`].
///
/// # Examples
///
/// ```
/// use assocrec::mining::{mine, Itemset, Transactions};
///
/// let mut transactions = Transactions::new();
/// transactions.insert(1, [10, 20].into_iter().collect());
/// transactions.insert(2, [10, 20].into_iter().collect());
/// transactions.insert(3, [10, 30].into_iter().collect());
/// transactions.insert(4, [20, 30].into_iter().collect());
///
/// let table = mine(&transactions, 0.5).unwrap();
/// assert_eq!(table.support(&Itemset::singleton(10)), Some(0.75));
/// assert_eq!(table.support(&Itemset::new([10, 20])), Some(0.5));
/// assert_eq!(table.support(&Itemset::new([10, 30])), None);
/// ```
pub fn mine(transactions: &Transactions, min_support: f64) -> Result<SupportTable> {
    check_unit_interval("min_support", min_support)?;
    if transactions.is_empty() {
        return Err(RulesError::empty_input("transactions"));
    }

    let baskets: Vec<Vec<ItemId>> = transactions
        .values()
        .map(|items| items.iter().copied().collect())
        .collect();
    let n_transactions = baskets.len();
    let mut table = SupportTable::new(n_transactions);

    let mut current = frequent_singletons(&baskets, min_support);
    debug!(
        level = 1,
        frequent = current.len(),
        n_transactions,
        "apriori level"
    );

    let mut k = 2;
    loop {
        if current.is_empty() {
            break;
        }
        for (itemset, count) in &current {
            table.insert(itemset.clone(), *count);
        }

        let candidates = generate_candidates(&current, k);
        if candidates.is_empty() {
            debug!(level = k, "no candidates, stopping");
            break;
        }

        current = count_candidates(candidates, &baskets)
            .into_iter()
            .filter(|(_, count)| ratio(*count, n_transactions) >= min_support)
            .collect();
        debug!(level = k, frequent = current.len(), "apriori level");
        k += 1;
    }

    debug!(
        frequent_itemsets = table.len(),
        max_len = table.max_itemset_len(),
        "mining finished"
    );
    Ok(table)
}

/// Frequent 1-itemsets with their counts.
fn frequent_singletons(baskets: &[Vec<ItemId>], min_support: f64) -> Vec<(Itemset, usize)> {
    let mut item_counts: HashMap<ItemId, usize> = HashMap::new();
    for basket in baskets {
        for &item in basket {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut frequent: Vec<(Itemset, usize)> = item_counts
        .into_iter()
        .filter(|&(_, count)| ratio(count, baskets.len()) >= min_support)
        .map(|(item, count)| (Itemset::singleton(item), count))
        .collect();
    frequent.sort_unstable();
    frequent
}

/// Join step: unions of two frequent `(k-1)`-itemsets with exactly `k` items.
fn generate_candidates(prev: &[(Itemset, usize)], k: usize) -> Vec<Itemset> {
    let mut candidates = BTreeSet::new();
    for (i, (left, _)) in prev.iter().enumerate() {
        for (right, _) in &prev[i + 1..] {
            let union = left.union(right);
            if union.len() == k {
                candidates.insert(union);
            }
        }
    }
    candidates.into_iter().collect()
}

/// Count, for each candidate, the transactions that contain it.
#[cfg(feature = "parallel")]
fn count_candidates(candidates: Vec<Itemset>, baskets: &[Vec<ItemId>]) -> Vec<(Itemset, usize)> {
    candidates
        .into_par_iter()
        .map(|candidate| {
            let count = baskets
                .iter()
                .filter(|basket| candidate.is_subset_of_sorted(basket))
                .count();
            (candidate, count)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn count_candidates(candidates: Vec<Itemset>, baskets: &[Vec<ItemId>]) -> Vec<(Itemset, usize)> {
    count_sequential(candidates, baskets)
}

/// Single-threaded counting, one pass over the baskets.
#[cfg(any(test, not(feature = "parallel")))]
fn count_sequential(candidates: Vec<Itemset>, baskets: &[Vec<ItemId>]) -> Vec<(Itemset, usize)> {
    let mut counts = vec![0usize; candidates.len()];
    for basket in baskets {
        for (slot, candidate) in counts.iter_mut().zip(&candidates) {
            if candidate.is_subset_of_sorted(basket) {
                *slot += 1;
            }
        }
    }
    candidates.into_iter().zip(counts).collect()
}

/// Recount the support of a single itemset directly from the transactions.
///
/// Returns 0.0 for an empty snapshot.
#[must_use]
pub fn calculate_support(itemset: &Itemset, transactions: &Transactions) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }
    let count = transactions
        .values()
        .filter(|items| itemset.is_subset_of(items))
        .count();
    ratio(count, transactions.len())
}
