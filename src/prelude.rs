//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use assocrec::prelude::*;
//! ```

pub use crate::config::RecommenderConfig;
pub use crate::data::{build_transactions, Catalog, Movie, Rating, UserProfile};
pub use crate::error::RulesError;
pub use crate::mining::{
    generate_rules, mine, Apriori, AssociationRule, ItemId, Itemset, RuleSet, SupportTable,
    Transactions, UserId,
};
pub use crate::pipeline::RuleModel;
pub use crate::recommend::{recommend_by_history, recommend_by_last_liked, Recommendation};
