use proptest::prelude::*;
use t9a_types::{Faction, NUM_FACTIONS, Tables, Turn};

proptest! {
    #[test]
    fn faction_code_lookup_is_case_insensitive(idx in 0usize..NUM_FACTIONS, upper in any::<bool>()) {
        let faction = Faction::ALL[idx];
        let code = if upper {
            faction.code().to_ascii_uppercase()
        } else {
            faction.code().to_ascii_lowercase()
        };
        prop_assert_eq!(Faction::from_code(&code).unwrap(), faction);
    }

    #[test]
    fn faction_json_roundtrip(idx in 0usize..NUM_FACTIONS) {
        let faction = Faction::ALL[idx];
        let json = serde_json::to_string(&faction).unwrap();
        let back: Faction = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, faction);
    }

    #[test]
    fn turn_pairs_are_complementary(indicator in proptest::option::of(-3i64..5)) {
        let (a, b) = Turn::pair_from_indicator(indicator);
        match (a, b) {
            (Turn::First, Turn::Second) | (Turn::Second, Turn::First) => {}
            (Turn::Unknown, Turn::Unknown) => prop_assert!(!matches!(indicator, Some(0) | Some(1))),
            other => prop_assert!(false, "unexpected pair {:?}", other),
        }
    }
}

#[test]
fn empty_tables_select_is_empty() {
    let tables = Tables::default();
    let selected = tables.select(&[1u64, 2, 3].into_iter().collect());
    assert!(selected.is_empty());
    assert_eq!(selected.num_games(), 0);
}
