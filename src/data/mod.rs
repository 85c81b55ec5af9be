//! Rating data: loading, the "liked" threshold and transaction building.
//!
//! Ratings and the item catalog are read from MovieLens-style CSV files:
//!
//! - `ratings.csv`: `userId,movieId,rating[,timestamp]`
//! - `movies.csv`: `movieId,title[,genres]`
//!
//! A user likes an item when the rating is strictly above [`LIKE_THRESHOLD`].
//! Only liked items reach the miner.

mod catalog;
mod profile;

pub use catalog::{Catalog, Movie};
pub use profile::{parse_rating, UserProfile, MAX_RATING, MIN_RATING};

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RulesError};
use crate::mining::{ItemId, Transactions, UserId};

/// Ratings strictly above this value count as "liked".
pub const LIKE_THRESHOLD: f64 = 3.0;

/// Whether `rating` counts as a like.
#[must_use]
pub fn is_liked(rating: f64) -> bool {
    rating > LIKE_THRESHOLD
}

/// One row of `ratings.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub item_id: ItemId,
    pub rating: f64,
}

impl Rating {
    #[must_use]
    pub fn new(user_id: UserId, item_id: ItemId, rating: f64) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

/// Read every row of a ratings CSV file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened and a parse error
/// naming the line for a malformed row.
pub fn read_ratings(path: &Path) -> Result<Vec<Rating>> {
    let reader = csv::Reader::from_path(path).map_err(|e| RulesError::from_csv(path, e))?;
    collect_ratings(reader, path)
}

/// Read ratings CSV content from any reader; `source` labels errors.
///
/// # Errors
///
/// See [`read_ratings`].
pub fn read_ratings_from<R: Read>(reader: R, source: &Path) -> Result<Vec<Rating>> {
    collect_ratings(csv::Reader::from_reader(reader), source)
}

fn collect_ratings<R: Read>(mut reader: csv::Reader<R>, source: &Path) -> Result<Vec<Rating>> {
    let ratings = reader
        .deserialize()
        .collect::<std::result::Result<Vec<Rating>, _>>()
        .map_err(|e| RulesError::from_csv(source, e))?;
    debug!(source = %source.display(), rows = ratings.len(), "ratings loaded");
    Ok(ratings)
}

/// Group liked ratings into one transaction per user.
///
/// When a user rated the same item more than once only the first row counts.
/// Users without any liked item do not appear in the result.
///
/// # Examples
///
/// ```
/// use assocrec::data::{build_transactions, Rating};
///
/// let ratings = [
///     Rating::new(1, 10, 5.0),
///     Rating::new(1, 20, 2.0),
///     Rating::new(1, 10, 1.0), // duplicate, ignored
///     Rating::new(2, 20, 3.0), // not liked
/// ];
/// let transactions = build_transactions(&ratings);
/// assert_eq!(transactions.len(), 1);
/// assert_eq!(transactions[&1].iter().copied().collect::<Vec<_>>(), vec![10]);
/// ```
pub fn build_transactions<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Transactions {
    let mut seen: HashSet<(UserId, ItemId)> = HashSet::new();
    let mut transactions = Transactions::new();
    let mut duplicates = 0usize;

    for rating in ratings {
        if !seen.insert((rating.user_id, rating.item_id)) {
            duplicates += 1;
            continue;
        }
        if is_liked(rating.rating) {
            transactions
                .entry(rating.user_id)
                .or_default()
                .insert(rating.item_id);
        }
    }

    debug!(users = transactions.len(), duplicates, "transactions built");
    transactions
}

/// Like [`build_transactions`], dropping ratings of items missing from
/// `catalog`.
pub fn build_catalog_transactions(ratings: &[Rating], catalog: &Catalog) -> Transactions {
    build_transactions(ratings.iter().filter(|r| catalog.contains(r.item_id)))
}
