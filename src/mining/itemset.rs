//! Itemsets and the support table produced by the miner.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque item identifier (e.g. a movie id).
pub type ItemId = u64;

/// User identifier owning one transaction.
pub type UserId = u64;

/// One liked-item set per user.
pub type Transactions = BTreeMap<UserId, BTreeSet<ItemId>>;

/// An immutable set of items.
///
/// Items are kept sorted and deduplicated, so two itemsets built from the same
/// members in any order compare and hash equal.
///
/// # Examples
///
/// ```
/// use assocrec::mining::Itemset;
///
/// let a = Itemset::new([3, 1, 2]);
/// let b = Itemset::new([2, 3, 1, 1]);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.items(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<ItemId>", into = "Vec<ItemId>")]
pub struct Itemset(Box<[ItemId]>);

impl Itemset {
    /// Build an itemset from any collection of items.
    pub fn new(items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut items: Vec<ItemId> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items.into_boxed_slice())
    }

    /// Single-item set.
    #[must_use]
    pub fn singleton(item: ItemId) -> Self {
        Self(Box::new([item]))
    }

    /// Members in ascending order.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Union of two itemsets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(self.0[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.0[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(self.0[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.0[i..]);
        merged.extend_from_slice(&other.0[j..]);
        Self(merged.into_boxed_slice())
    }

    /// Items of `self` not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .copied()
                .filter(|item| !other.contains(*item))
                .collect(),
        )
    }

    /// Whether every member of `self` is in the sorted slice `superset`.
    #[must_use]
    pub fn is_subset_of_sorted(&self, superset: &[ItemId]) -> bool {
        let mut rest = superset;
        for item in self.0.iter() {
            match rest.binary_search(item) {
                Ok(pos) => rest = &rest[pos + 1..],
                Err(_) => return false,
            }
        }
        true
    }

    /// Whether every member of `self` is in `set`.
    #[must_use]
    pub fn is_subset_of(&self, set: &BTreeSet<ItemId>) -> bool {
        self.0.iter().all(|item| set.contains(item))
    }

    /// Whether the two itemsets share no member.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0.iter().all(|item| !other.contains(*item))
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<ItemId>> for Itemset {
    fn from(items: Vec<ItemId>) -> Self {
        Self::new(items)
    }
}

impl From<Itemset> for Vec<ItemId> {
    fn from(itemset: Itemset) -> Self {
        itemset.0.into_vec()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

/// Frequent itemsets and their support, built once by the miner.
///
/// Support is kept as an exact transaction count; the ratio is derived on
/// read as `count / n_transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportTable {
    counts: HashMap<Itemset, usize>,
    n_transactions: usize,
}

impl SupportTable {
    pub(crate) fn new(n_transactions: usize) -> Self {
        Self {
            counts: HashMap::new(),
            n_transactions,
        }
    }

    pub(crate) fn insert(&mut self, itemset: Itemset, count: usize) {
        self.counts.insert(itemset, count);
    }

    /// Support of `itemset`, or `None` if it was never recorded as frequent.
    #[must_use]
    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.counts
            .get(itemset)
            .map(|&count| ratio(count, self.n_transactions))
    }

    /// Number of transactions containing `itemset`, if recorded.
    #[must_use]
    pub fn count(&self, itemset: &Itemset) -> Option<usize> {
        self.counts.get(itemset).copied()
    }

    #[must_use]
    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.counts.contains_key(itemset)
    }

    /// Number of frequent itemsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Size of the transaction snapshot the table was mined from.
    #[must_use]
    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    /// Itemsets with their support, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.counts
            .iter()
            .map(move |(itemset, &count)| (itemset, ratio(count, self.n_transactions)))
    }

    /// Frequent itemsets with exactly `k` items.
    pub fn of_size(&self, k: usize) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.iter().filter(move |(itemset, _)| itemset.len() == k)
    }

    /// Size of the largest frequent itemset, 0 when empty.
    #[must_use]
    pub fn max_itemset_len(&self) -> usize {
        self.counts.keys().map(Itemset::len).max().unwrap_or(0)
    }

    /// All entries sorted by support descending, then itemset ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<(Itemset, f64)> {
        let mut entries: Vec<(Itemset, f64)> = self
            .iter()
            .map(|(itemset, support)| (itemset.clone(), support))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}
