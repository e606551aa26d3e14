//! Forward-pass construction of the three tables.

use t9a_types::record::{ArmyList, GameRecord, TournamentMeta};
use t9a_types::{
    Faction, ListRow, OPTION_TYPE_MODEL_COUNT, OptionRow, Tables, TournamentType, Turn,
    UnitRow, UnknownFaction,
};
use time::Date;

const UNKNOWN_LABEL: &str = "Unknown";

/// Tournament-level fields copied onto every list of the tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TournamentInfo {
    pub kind: TournamentType,
    pub size: u32,
    pub start: Date,
    pub end: Date,
}

impl From<&TournamentMeta> for TournamentInfo {
    fn from(meta: &TournamentMeta) -> Self {
        Self {
            kind: TournamentType::from_code(meta.kind),
            size: meta.size,
            start: meta.start,
            end: meta.end,
        }
    }
}

/// Accumulates rows while handing out monotonic ids.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    pub tables: Tables,
    next_game: u64,
    next_list: u64,
    next_unit: u64,
}

impl TableBuilder {
    pub fn games(&self) -> u64 {
        self.next_game
    }

    /// Append both sides of one game.
    ///
    /// Factions are resolved first so a bad code leaves every counter and
    /// table untouched.
    pub fn push_game(
        &mut self,
        info: &TournamentInfo,
        game: &GameRecord,
    ) -> Result<(), UnknownFaction> {
        let [one, two] = game.armies();
        let factions = [Faction::from_code(one)?, Faction::from_code(two)?];
        let (t1, t2) = Turn::pair_from_indicator(game.first_turn);
        let turns = [t1, t2];
        let scores = game.scores();
        let rosters = game.rosters();
        let deployment = label(game.deployment.as_deref());
        let primary = label(game.primary.as_deref());

        let game_id = self.next_game;
        let mut totals = [None, None];
        for side in 0..2 {
            let list_id = self.next_list;
            let score = scores[side];
            let (has_list, total_points, magicalness) = match rosters[side] {
                Some(roster) => (
                    true,
                    Some(self.push_roster(list_id, roster, score)),
                    roster.magicalness,
                ),
                None => (false, None, None),
            };
            totals[side] = total_points;
            self.tables.lists.push(ListRow {
                list_id,
                game_id,
                faction: factions[side],
                opponent: factions[1 - side],
                score,
                turn: turns[side],
                has_list,
                total_points,
                magicalness,
                tournament_type: info.kind,
                tournament_size: info.size,
                game_size: None,
                deployment: deployment.clone(),
                primary: primary.clone(),
                start_date: info.start,
                end_date: info.end,
            });
            self.next_list += 1;
        }

        let size = game_size(totals[0], totals[1]);
        let n = self.tables.lists.len();
        for row in &mut self.tables.lists[n - 2..] {
            row.game_size = size;
        }
        self.next_game += 1;
        Ok(())
    }

    /// Emit unit and option rows for one roster, returning its points total.
    fn push_roster(&mut self, list_id: u64, roster: &ArmyList, score: u32) -> u32 {
        let mut total = 0u32;
        for entry in &roster.units {
            let unit_id = self.next_unit;
            total = total.saturating_add(entry.cost);
            self.tables.units.push(UnitRow {
                unit_id,
                list_id,
                name: entry.name.clone(),
                category: entry.category.clone(),
                cost: entry.cost,
                models: entry.models,
                score,
            });
            for opt in &entry.options {
                self.tables.options.push(OptionRow {
                    list_id,
                    unit_id: Some(unit_id),
                    unit_name: entry.name.clone(),
                    option_name: opt.name.clone(),
                    option_type: opt.kind.clone(),
                    score,
                });
            }
            if let Some(bucket) = entry.models.and_then(model_count_bucket) {
                self.tables.options.push(OptionRow {
                    list_id,
                    unit_id: Some(unit_id),
                    unit_name: entry.name.clone(),
                    option_name: bucket,
                    option_type: OPTION_TYPE_MODEL_COUNT.to_string(),
                    score,
                });
            }
            self.next_unit += 1;
        }
        total
    }
}

fn label(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Five-wide model-count band containing `models`, e.g. `"6-10 Models"`.
///
/// Zero models produce no band; anything above 80 is `"81+ Models"`.
pub fn model_count_bucket(models: u32) -> Option<String> {
    match models {
        0 => None,
        1..=80 => {
            let hi = models.div_ceil(5) * 5;
            Some(format!("{}-{} Models", hi - 4, hi))
        }
        _ => Some("81+ Models".to_string()),
    }
}

/// Points bracket of a game: the larger list rounded up to the next hundred.
///
/// `None` unless both sides submitted a roster, or when the bracket does
/// not fit in a `u32`.
pub fn game_size(one: Option<u32>, two: Option<u32>) -> Option<u32> {
    let max = one?.max(two?);
    max.div_ceil(100).checked_mul(100)
}
