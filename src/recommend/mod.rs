//! Recommendation systems.
//!
//! This module turns mined association rules into ranked lists of unseen
//! items. It owns no state: every query is a pure function of the query
//! context and a [`RuleSet`](crate::mining::RuleSet).
//!
//! # Query modes
//!
//! - [`recommend_by_history`]: every rule whose antecedent the user fully
//!   liked fires
//! - [`recommend_by_last_liked`]: only single-item antecedents equal to the
//!   anchor item fire
//!
//! # Quick Start
//!
//! ```
//! use assocrec::mining::{Apriori, Transactions};
//! use assocrec::recommend::recommend_by_last_liked;
//!
//! let mut transactions = Transactions::new();
//! transactions.insert(1, [1, 2].into_iter().collect());
//! transactions.insert(2, [1, 2].into_iter().collect());
//! transactions.insert(3, [1, 3].into_iter().collect());
//!
//! let mut apriori = Apriori::new().with_min_support(0.5).with_min_confidence(0.5);
//! apriori.fit(&transactions).unwrap();
//!
//! let recs = recommend_by_last_liked(1, apriori.rules(), 5).unwrap();
//! assert_eq!(recs[0].item, 2);
//! ```

mod rule_based;

pub use rule_based::{recommend_by_history, recommend_by_last_liked, Recommendation};
