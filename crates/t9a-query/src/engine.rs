//! List matching.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use t9a_types::Tables;
use tracing::debug;

use crate::query::{ListQuery, QueryError, UnitConstraint};
use crate::result::{QueryOutcome, QueryResult};

/// One unit of a candidate list, as the matcher sees it.
#[derive(Debug, Clone)]
struct Instance<'a> {
    models: Option<u32>,
    options: BTreeSet<&'a str>,
}

/// Find every list of the query's faction meeting all of its constraints.
pub fn find_lists(tables: &Tables, query: &ListQuery) -> Result<QueryOutcome, QueryError> {
    query.validate(tables)?;
    Ok(search_lists(tables, query))
}

/// [`find_lists`] without validation, for a query already validated
/// against a wider set of tables than the one searched.
pub fn search_lists(tables: &Tables, query: &ListQuery) -> QueryOutcome {
    let candidates: BTreeSet<u64> = tables
        .lists
        .iter()
        .filter(|l| l.faction == query.faction && l.has_list)
        .filter(|l| query.accepts_game(l))
        .map(|l| l.list_id)
        .collect();
    let examined = candidates.len();

    let mut slots: BTreeMap<&str, Vec<&UnitConstraint>> = BTreeMap::new();
    for slot in &query.units {
        slots.entry(slot.unit_name.as_str()).or_default().push(slot);
    }

    let mut unit_options: BTreeMap<u64, BTreeSet<&str>> = BTreeMap::new();
    for opt in &tables.options {
        if let Some(unit_id) = opt.unit_id
            && candidates.contains(&opt.list_id)
        {
            unit_options
                .entry(unit_id)
                .or_default()
                .insert(opt.option_name.as_str());
        }
    }

    // list -> unit name -> instances, only for names the query mentions
    let mut instances: BTreeMap<u64, BTreeMap<&str, Vec<Instance<'_>>>> = BTreeMap::new();
    for unit in &tables.units {
        if !candidates.contains(&unit.list_id) || !slots.contains_key(unit.name.as_str()) {
            continue;
        }
        instances
            .entry(unit.list_id)
            .or_default()
            .entry(unit.name.as_str())
            .or_default()
            .push(Instance {
                models: unit.models,
                options: unit_options.remove(&unit.unit_id).unwrap_or_default(),
            });
    }

    let empty = BTreeMap::new();
    let matched: BTreeSet<u64> = candidates
        .iter()
        .copied()
        .filter(|id| {
            let by_name = instances.get(id).unwrap_or(&empty);
            slots.iter().all(|(name, wanted)| {
                by_name
                    .get(name)
                    .is_some_and(|have| group_satisfied(have, wanted))
            })
        })
        .collect();

    debug!(
        faction = query.faction.code(),
        examined,
        matched = matched.len(),
        "list query evaluated"
    );

    if matched.is_empty() {
        return QueryOutcome::NoMatch { examined };
    }
    QueryOutcome::Matched(QueryResult {
        faction: query.faction,
        list_ids: matched.iter().copied().collect(),
        tables: tables.select(&matched),
        examined,
    })
}

/// Whether some injective assignment of instances to slots satisfies every slot.
fn group_satisfied(have: &[Instance<'_>], wanted: &[&UnitConstraint]) -> bool {
    // multiplicity pre-filter
    if have.len() < wanted.len() {
        return false;
    }
    have.iter().permutations(wanted.len()).any(|assignment| {
        assignment
            .iter()
            .zip(wanted)
            .all(|(inst, slot)| slot.accepts(inst.models, &inst.options))
    })
}
