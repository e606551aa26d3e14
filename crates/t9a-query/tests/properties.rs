use std::collections::BTreeSet;

use proptest::prelude::*;
use t9a_query::{ListQuery, QueryOutcome, UnitConstraint, find_lists};
use t9a_types::{Faction, ListRow, OptionRow, Tables, TournamentType, Turn, UnitRow};
use time::macros::date;

const NAMES: [&str; 3] = ["Goblins", "Trolls", "Wolf Rider"];
const OPTIONS: [&str; 3] = ["Bow", "Shield", "Spear"];

/// Lists of (unit name index, option mask) pairs.
fn arb_tables() -> impl Strategy<Value = Tables> {
    prop::collection::vec(prop::collection::vec((0usize..3, 0u8..8), 0..5), 1..12).prop_map(
        |lists| {
            let mut t = Tables::default();
            let mut unit_id = 0u64;
            for (i, units) in lists.into_iter().enumerate() {
                let list_id = i as u64;
                t.lists.push(ListRow {
                    list_id,
                    game_id: list_id / 2,
                    faction: Faction::OrcsAndGoblins,
                    opponent: Faction::ALL[i % 16],
                    score: (i as u32 * 7) % 21,
                    turn: if i % 2 == 0 { Turn::First } else { Turn::Second },
                    has_list: true,
                    total_points: Some(4500),
                    magicalness: None,
                    tournament_type: TournamentType::Singles,
                    tournament_size: 10,
                    game_size: Some(4500),
                    deployment: "Unknown".into(),
                    primary: "Unknown".into(),
                    start_date: date!(2024 - 01 - 01),
                    end_date: date!(2024 - 01 - 01),
                });
                for (name, mask) in units {
                    t.units.push(UnitRow {
                        unit_id,
                        list_id,
                        name: NAMES[name].into(),
                        category: "Core".into(),
                        cost: 100,
                        models: Some(10),
                        score: 0,
                    });
                    for (bit, opt) in OPTIONS.iter().enumerate() {
                        if mask & (1 << bit) != 0 {
                            t.options.push(OptionRow {
                                list_id,
                                unit_id: Some(unit_id),
                                unit_name: NAMES[name].into(),
                                option_name: (*opt).into(),
                                option_type: "Weapon".into(),
                                score: 0,
                            });
                        }
                    }
                    unit_id += 1;
                }
            }
            t
        },
    )
}

fn matched(tables: &Tables, query: &ListQuery) -> Option<BTreeSet<u64>> {
    match find_lists(tables, query) {
        Ok(QueryOutcome::Matched(r)) => Some(r.list_ids.into_iter().collect()),
        Ok(QueryOutcome::NoMatch { .. }) => Some(BTreeSet::new()),
        Err(_) => None,
    }
}

proptest! {
    #[test]
    fn empty_query_matches_every_faction_list(tables in arb_tables()) {
        let got = matched(&tables, &ListQuery::new(Faction::OrcsAndGoblins)).unwrap();
        prop_assert_eq!(got, tables.list_ids());
    }

    #[test]
    fn adding_a_slot_never_adds_matches(
        tables in arb_tables(),
        name in 0usize..3,
        opt in 0usize..3,
        extra in 0usize..3,
    ) {
        let base = ListQuery::new(Faction::OrcsAndGoblins)
            .unit(UnitConstraint::new(NAMES[name]).require(OPTIONS[opt]));
        let narrower = base.clone().unit(UnitConstraint::new(NAMES[extra]));
        if let (Some(wide), Some(narrow)) = (matched(&tables, &base), matched(&tables, &narrower)) {
            prop_assert!(narrow.is_subset(&wide));
        }
    }

    #[test]
    fn matched_lists_hold_enough_copies(tables in arb_tables(), name in 0usize..3, copies in 1usize..4) {
        let mut query = ListQuery::new(Faction::OrcsAndGoblins);
        for _ in 0..copies {
            query.push_unit(UnitConstraint::new(NAMES[name]));
        }
        if let Some(ids) = matched(&tables, &query) {
            for id in ids {
                let have = tables.units.iter().filter(|u| u.list_id == id && u.name == NAMES[name]).count();
                prop_assert!(have >= copies);
            }
        }
    }
}
