//! Property-based tests using proptest.
//!
//! These tests verify invariants of mining, rule generation and ranking.

use std::collections::{BTreeSet, HashSet};

use assocrec::mining::calculate_support;
use assocrec::prelude::*;
use proptest::prelude::*;

// Small item universe so that itemsets overlap and rules appear
fn transactions_strategy() -> impl Strategy<Value = Transactions> {
    proptest::collection::vec(proptest::collection::btree_set(0u64..8, 0..6), 1..25).prop_map(
        |baskets| {
            baskets
                .into_iter()
                .enumerate()
                .map(|(user, items)| (user as UserId, items))
                .collect()
        },
    )
}

fn liked_strategy() -> impl Strategy<Value = BTreeSet<ItemId>> {
    proptest::collection::btree_set(0u64..8, 0..5)
}

fn is_subset(a: &Itemset, b: &Itemset) -> bool {
    a.items().iter().all(|item| b.contains(*item))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn support_is_monotonic(t in transactions_strategy(), min_support in 0.05f64..0.6) {
        let table = mine(&t, min_support).unwrap();
        for (small, small_support) in table.iter() {
            for (large, large_support) in table.iter() {
                if is_subset(small, large) {
                    prop_assert!(small_support >= large_support);
                }
            }
        }
    }

    #[test]
    fn every_itemset_meets_threshold(t in transactions_strategy(), min_support in 0.05f64..1.0) {
        let table = mine(&t, min_support).unwrap();
        for (itemset, support) in table.iter() {
            prop_assert!(support >= min_support);
            prop_assert!(support > 0.0 && support <= 1.0);
            prop_assert!((support - calculate_support(itemset, &t)).abs() < 1e-12);
        }
    }

    #[test]
    fn frequent_singletons_are_complete(t in transactions_strategy(), min_support in 0.05f64..1.0) {
        let table = mine(&t, min_support).unwrap();
        let items: BTreeSet<ItemId> = t.values().flatten().copied().collect();
        for item in items {
            let single = Itemset::singleton(item);
            let expected = calculate_support(&single, &t) >= min_support;
            prop_assert_eq!(table.contains(&single), expected);
        }
    }

    #[test]
    fn mined_tables_hold_every_subset(t in transactions_strategy(), min_support in 0.05f64..0.6) {
        let table = mine(&t, min_support).unwrap();
        for (itemset, _) in table.iter() {
            for &item in itemset.items() {
                if itemset.len() > 1 {
                    let rest = itemset.difference(&Itemset::singleton(item));
                    prop_assert!(table.contains(&rest));
                }
            }
        }
    }

    #[test]
    fn rules_are_valid(
        t in transactions_strategy(),
        min_support in 0.05f64..0.6,
        min_confidence in 0.05f64..1.0,
    ) {
        let table = mine(&t, min_support).unwrap();
        for rule in generate_rules(&table, min_confidence).unwrap() {
            prop_assert!(!rule.antecedent.is_empty());
            prop_assert!(!rule.consequent.is_empty());
            prop_assert!(rule.antecedent.is_disjoint(&rule.consequent));

            let union = rule.antecedent.union(&rule.consequent);
            prop_assert_eq!(table.support(&union), Some(rule.support));
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.confidence > 0.0 && rule.confidence <= 1.0 + 1e-12);
            prop_assert!(rule.lift > 0.0);
        }
    }

    #[test]
    fn mining_is_idempotent_and_order_independent(
        t in transactions_strategy(),
        min_support in 0.05f64..0.6,
        min_confidence in 0.05f64..1.0,
    ) {
        // same baskets under reversed user ids
        let n = t.len() as UserId;
        let reversed: Transactions = t
            .iter()
            .map(|(user, items)| (n - user, items.clone()))
            .collect();

        let first = mine(&t, min_support).unwrap();
        let second = mine(&reversed, min_support).unwrap();
        prop_assert_eq!(&first, &second);

        let rules_a = RuleSet::new(generate_rules(&first, min_confidence).unwrap());
        let rules_b = RuleSet::new(generate_rules(&second, min_confidence).unwrap());
        prop_assert_eq!(rules_a, rules_b);
    }

    #[test]
    fn history_recommendations_are_unique_and_unseen(
        t in transactions_strategy(),
        liked in liked_strategy(),
        top_n in 1usize..8,
    ) {
        let table = mine(&t, 0.1).unwrap();
        let rules = RuleSet::new(generate_rules(&table, 0.1).unwrap());
        let recs = recommend_by_history(&liked, &rules, top_n).unwrap();

        prop_assert!(recs.len() <= top_n);
        let unique: HashSet<ItemId> = recs.iter().map(|r| r.item).collect();
        prop_assert_eq!(unique.len(), recs.len());
        for rec in &recs {
            prop_assert!(!liked.contains(&rec.item));
        }
        for pair in recs.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn last_liked_recommendations_are_unique(
        t in transactions_strategy(),
        anchor in 0u64..8,
        top_n in 1usize..8,
    ) {
        let table = mine(&t, 0.1).unwrap();
        let rules = RuleSet::new(generate_rules(&table, 0.1).unwrap());
        let recs = recommend_by_last_liked(anchor, &rules, top_n).unwrap();

        prop_assert!(recs.len() <= top_n);
        let unique: HashSet<ItemId> = recs.iter().map(|r| r.item).collect();
        prop_assert_eq!(unique.len(), recs.len());
        prop_assert!(recs.iter().all(|r| r.item != anchor));
    }
}
