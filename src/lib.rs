//! Assocrec: association-rule mining and rule-based recommendation.
//!
//! Per-user "liked item" sets are mined for frequent itemsets (Apriori),
//! turned into association rules scored by support, confidence and lift, and
//! used to rank items a user has not seen yet.
//!
//! # Quick Start
//!
//! ```
//! use assocrec::prelude::*;
//!
//! let ratings = vec![
//!     Rating::new(1, 10, 5.0),
//!     Rating::new(1, 20, 4.0),
//!     Rating::new(2, 10, 4.5),
//!     Rating::new(2, 20, 5.0),
//!     Rating::new(3, 10, 4.0),
//!     Rating::new(3, 30, 4.0),
//!     Rating::new(4, 20, 3.5),
//!     Rating::new(4, 30, 5.0),
//! ];
//! let transactions = build_transactions(&ratings);
//!
//! let config = RecommenderConfig::new()
//!     .with_min_support(0.5)
//!     .with_min_confidence(0.5);
//! let model = RuleModel::build(&transactions, config).unwrap();
//!
//! let mut profile = UserProfile::new();
//! profile.rate(10, 5.0).unwrap();
//!
//! let recs = model.recommend_by_history(&profile.liked()).unwrap();
//! assert_eq!(recs[0].item, 20);
//! ```
//!
//! # Modules
//!
//! - [`mining`]: frequent itemsets and association rules
//! - [`recommend`]: ranking by full history or by the last liked item
//! - [`pipeline`]: a built rule model answering many queries
//! - [`data`]: CSV loading, the "liked" threshold, user profiles
//! - [`config`]: thresholds and their TOML form
//! - [`error`]: error type

pub mod config;
pub mod data;
pub mod error;
pub mod mining;
pub mod pipeline;
pub mod prelude;
pub mod recommend;

pub use error::{Result, RulesError};
pub use mining::{AssociationRule, Itemset, RuleSet, SupportTable};
pub use pipeline::RuleModel;
