use proptest::prelude::*;
use t9a_analysis::{
    RowLabel, faction_counts, faction_performance, matchup_table, score_distribution,
};
use t9a_types::{Faction, ListRow, NUM_FACTIONS, Tables, TournamentType, Turn};
use time::macros::date;

fn arb_tables() -> impl Strategy<Value = Tables> {
    prop::collection::vec((0usize..16, 0usize..16, 0u32..=20, any::<bool>()), 0..40).prop_map(
        |games| {
            let mut t = Tables::default();
            for (g, (a, b, score, a_first)) in games.into_iter().enumerate() {
                let (ta, tb) = if a_first {
                    (Turn::First, Turn::Second)
                } else {
                    (Turn::Second, Turn::First)
                };
                let sides = [
                    (Faction::ALL[a], Faction::ALL[b], score, ta),
                    (Faction::ALL[b], Faction::ALL[a], 20 - score, tb),
                ];
                for (side, (faction, opponent, score, turn)) in sides.into_iter().enumerate() {
                    t.lists.push(ListRow {
                        list_id: (g * 2 + side) as u64,
                        game_id: g as u64,
                        faction,
                        opponent,
                        score,
                        turn,
                        has_list: true,
                        total_points: None,
                        magicalness: None,
                        tournament_type: TournamentType::Singles,
                        tournament_size: 8,
                        game_size: None,
                        deployment: "Unknown".into(),
                        primary: "Unknown".into(),
                        start_date: date!(2024 - 01 - 01),
                        end_date: date!(2024 - 01 - 01),
                    });
                }
            }
            t
        },
    )
}

proptest! {
    #[test]
    fn counts_cover_every_faction_and_every_list(tables in arb_tables()) {
        let counts = faction_counts(&tables);
        prop_assert_eq!(counts.len(), NUM_FACTIONS);
        prop_assert_eq!(counts.iter().map(|c| c.lists).sum::<usize>(), tables.lists.len());
        for c in &counts {
            prop_assert_eq!(c.lists, c.first + c.second + c.unknown);
            prop_assert_eq!(c.by_opponent.iter().sum::<usize>(), c.lists);
            prop_assert_eq!(c.by_score.iter().sum::<usize>(), c.lists);
            prop_assert_eq!(c.by_month.values().sum::<usize>(), c.lists);
        }
    }

    #[test]
    fn distribution_accounts_for_every_list(tables in arb_tables()) {
        let bins = score_distribution(&tables);
        let total: usize = bins.iter().map(|b| b.first + b.second + b.unknown).sum();
        prop_assert_eq!(total, tables.lists.len());
    }

    #[test]
    fn performance_never_counts_mirrors(tables in arb_tables()) {
        let counts = faction_counts(&tables);
        let perf = faction_performance(&tables, 10.0);
        for (c, p) in counts.iter().zip(&perf) {
            prop_assert!(p.games <= c.lists);
            if let Some(p_value) = p.p_value {
                prop_assert!((0.0..=1.0).contains(&p_value));
            }
        }
    }

    #[test]
    fn matchup_diagonal_is_always_empty(tables in arb_tables()) {
        let table = matchup_table(&tables);
        for f in Faction::ALL {
            prop_assert!(table.cell(RowLabel::Opponent(f), f).is_none());
        }
        let all: usize = Faction::ALL
            .iter()
            .filter_map(|&f| table.cell(RowLabel::All, f))
            .map(|c| c.n)
            .sum();
        prop_assert_eq!(all, tables.lists.len());
    }
}
