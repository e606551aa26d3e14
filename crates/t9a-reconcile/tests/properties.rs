use proptest::prelude::*;
use t9a_reconcile::canonical_names;

proptest! {
    #[test]
    fn canonical_names_are_idempotent(names in prop::collection::vec("[ab]{1,4}", 0..30)) {
        let map = canonical_names(names.iter().map(String::as_str));
        let rewritten: Vec<String> = names
            .iter()
            .map(|n| map.get(n).cloned().unwrap_or_else(|| n.clone()))
            .collect();
        let again = canonical_names(rewritten.iter().map(String::as_str));
        prop_assert!(again.is_empty());
    }

    #[test]
    fn targets_are_never_renamed(names in prop::collection::vec("[abc]{1,3}", 0..30)) {
        let map = canonical_names(names.iter().map(String::as_str));
        for to in map.values() {
            prop_assert!(!map.contains_key(to));
            prop_assert!(names.contains(to));
        }
    }
}
