//! Ratings entered by the user being recommended to.

use std::collections::BTreeSet;

use crate::data::is_liked;
use crate::error::{Result, RulesError};
use crate::mining::ItemId;

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

/// Parse a rating typed by a user. A decimal comma is accepted.
///
/// # Errors
///
/// Returns [`RulesError::InvalidInput`] if the text is not a number in
/// `[0, 5]`.
///
/// # Examples
///
/// ```
/// use assocrec::data::parse_rating;
///
/// assert_eq!(parse_rating("4,5").unwrap(), 4.5);
/// assert_eq!(parse_rating(" 3 ").unwrap(), 3.0);
/// assert!(parse_rating("6").is_err());
/// ```
pub fn parse_rating(text: &str) -> Result<f64> {
    let normalized = text.trim().replace(',', ".");
    let rating: f64 = normalized
        .parse()
        .map_err(|_| RulesError::invalid_input("rating", text.trim(), "a number"))?;
    check_rating(rating)?;
    Ok(rating)
}

fn check_rating(rating: f64) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(RulesError::invalid_input("rating", rating, "in [0, 5]"))
    }
}

/// One user's ratings in the order they were given.
///
/// Rating an item again replaces its score but keeps its position. The last
/// liked item is the item of the most recent rating above the like
/// threshold, even if that item was later re-rated lower.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    ratings: Vec<(ItemId, f64)>,
    last_liked: Option<ItemId>,
}

impl UserProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidInput`] if `rating` is outside `[0, 5]`.
    pub fn rate(&mut self, item: ItemId, rating: f64) -> Result<()> {
        check_rating(rating)?;
        match self.ratings.iter_mut().find(|(id, _)| *id == item) {
            Some(entry) => entry.1 = rating,
            None => self.ratings.push((item, rating)),
        }
        if is_liked(rating) {
            self.last_liked = Some(item);
        }
        Ok(())
    }

    /// Number of distinct items rated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    #[must_use]
    pub fn rating(&self, item: ItemId) -> Option<f64> {
        self.ratings
            .iter()
            .find(|(id, _)| *id == item)
            .map(|&(_, rating)| rating)
    }

    pub fn ratings(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.ratings.iter().copied()
    }

    /// Items whose current rating is a like.
    #[must_use]
    pub fn liked(&self) -> BTreeSet<ItemId> {
        self.ratings
            .iter()
            .filter(|(_, rating)| is_liked(*rating))
            .map(|&(item, _)| item)
            .collect()
    }

    #[must_use]
    pub fn last_liked(&self) -> Option<ItemId> {
        self.last_liked
    }
}
