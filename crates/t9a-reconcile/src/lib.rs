//! # t9a-reconcile
//!
//! **Tier 1 (Normalization)**
//!
//! Collapses near-identical spellings of unit and option names. Names one
//! edit apart are linked, linked names form clusters, and every member of a
//! cluster is rewritten to the cluster's most common spelling.
//!
//! ## What belongs here
//! * Edit-distance clustering of names within a scope
//! * Rewriting unit names per faction and option names per unit
//! * Reporting what was rewritten
//!
//! ## What does NOT belong here
//! * Parsing records (use t9a-load)
//! * Any other text normalization

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use t9a_types::{Faction, OptionRow, Tables, UnitRow};
use tracing::debug;

/// One applied rename within a scope (a faction code or a unit name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub scope: String,
    pub from: String,
    pub to: String,
}

/// Every rename applied by [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corrections {
    pub units: Vec<Correction>,
    pub options: Vec<Correction>,
}

impl Corrections {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len() + self.options.len()
    }
}

/// Reconcile unit names, carry them onto options, then reconcile options.
pub fn reconcile(tables: &mut Tables) -> Corrections {
    let faction_of: BTreeMap<u64, Faction> = tables
        .lists
        .iter()
        .map(|l| (l.list_id, l.faction))
        .collect();

    let units = reconcile_units(&mut tables.units, &faction_of);

    let unit_names: BTreeMap<u64, &str> = tables
        .units
        .iter()
        .map(|u| (u.unit_id, u.name.as_str()))
        .collect();
    for opt in &mut tables.options {
        if let Some(name) = opt.unit_id.and_then(|id| unit_names.get(&id))
            && opt.unit_name != *name
        {
            opt.unit_name = (*name).to_string();
        }
    }

    let options = reconcile_options(&mut tables.options);
    Corrections { units, options }
}

/// Rewrite unit names within each faction.
pub fn reconcile_units(units: &mut [UnitRow], faction_of: &BTreeMap<u64, Faction>) -> Vec<Correction> {
    let mut by_faction: BTreeMap<Faction, Vec<&str>> = BTreeMap::new();
    for unit in units.iter() {
        if let Some(faction) = faction_of.get(&unit.list_id) {
            by_faction.entry(*faction).or_default().push(&unit.name);
        }
    }

    let renames: BTreeMap<Faction, BTreeMap<String, String>> = by_faction
        .into_iter()
        .map(|(faction, names)| (faction, canonical_names(names)))
        .filter(|(_, map)| !map.is_empty())
        .collect();

    for unit in units.iter_mut() {
        let Some(faction) = faction_of.get(&unit.list_id) else {
            continue;
        };
        if let Some(to) = renames.get(faction).and_then(|m| m.get(&unit.name)) {
            unit.name = to.clone();
        }
    }

    let mut applied = Vec::new();
    for (faction, map) in renames {
        for (from, to) in map {
            debug!(faction = faction.code(), %from, %to, "unit name corrected");
            applied.push(Correction {
                scope: faction.code().to_string(),
                from,
                to,
            });
        }
    }
    applied
}

/// Rewrite option names within each unit name, aligning option types.
///
/// Model-count rows are left alone.
pub fn reconcile_options(options: &mut [OptionRow]) -> Vec<Correction> {
    let mut by_unit: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for opt in options.iter().filter(|o| !o.is_model_count()) {
        by_unit
            .entry(opt.unit_name.as_str())
            .or_default()
            .push(opt.option_name.as_str());
    }

    let renames: BTreeMap<String, BTreeMap<String, String>> = by_unit
        .into_iter()
        .map(|(unit, names)| (unit.to_string(), canonical_names(names)))
        .filter(|(_, map)| !map.is_empty())
        .collect();
    if renames.is_empty() {
        return Vec::new();
    }

    // Type counts observed under each canonical spelling, before rewriting.
    let mut type_counts: BTreeMap<(&str, &str), BTreeMap<&str, usize>> = BTreeMap::new();
    for opt in options.iter().filter(|o| !o.is_model_count()) {
        let Some(map) = renames.get(&opt.unit_name) else {
            continue;
        };
        if map.values().any(|to| *to == opt.option_name) {
            *type_counts
                .entry((opt.unit_name.as_str(), opt.option_name.as_str()))
                .or_default()
                .entry(opt.option_type.as_str())
                .or_insert(0) += 1;
        }
    }
    let canonical_type: BTreeMap<(String, String), String> = type_counts
        .into_iter()
        .filter_map(|((unit, name), counts)| {
            most_common(&counts).map(|t| ((unit.to_string(), name.to_string()), t.to_string()))
        })
        .collect();

    for opt in options.iter_mut().filter(|o| !o.is_model_count()) {
        let Some(to) = renames
            .get(&opt.unit_name)
            .and_then(|m| m.get(&opt.option_name))
        else {
            continue;
        };
        let key = (opt.unit_name.clone(), to.clone());
        opt.option_name = to.clone();
        if let Some(kind) = canonical_type.get(&key) {
            opt.option_type = kind.clone();
        }
    }

    let mut applied = Vec::new();
    for (unit, map) in renames {
        for (from, to) in map {
            debug!(unit = %unit, %from, %to, "option name corrected");
            applied.push(Correction {
                scope: unit.clone(),
                from,
                to,
            });
        }
    }
    applied
}

/// Map each misspelled name to its canonical spelling.
///
/// Names at edit distance exactly one are linked; each connected component
/// resolves to its most frequent member, ties going to the lexicographically
/// smallest. Canonical names are not included as keys.
pub fn canonical_names<'a, I>(names: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    let distinct: Vec<&str> = counts.keys().copied().collect();

    let mut ds = DisjointSets::new(distinct.len());
    for i in 0..distinct.len() {
        for j in (i + 1)..distinct.len() {
            if strsim::levenshtein(distinct[i], distinct[j]) == 1 {
                ds.union(i, j);
            }
        }
    }

    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..distinct.len() {
        let root = ds.find(i);
        components.entry(root).or_default().push(i);
    }

    let mut renames = BTreeMap::new();
    for members in components.values().filter(|m| m.len() > 1) {
        let Some(&canonical) = members.iter().max_by(|&&a, &&b| {
            counts[distinct[a]]
                .cmp(&counts[distinct[b]])
                .then_with(|| distinct[b].cmp(distinct[a]))
        }) else {
            continue;
        };
        for &m in members.iter().filter(|&&m| m != canonical) {
            renames.insert(distinct[m].to_string(), distinct[canonical].to_string());
        }
    }
    renames
}

fn most_common<'a>(counts: &BTreeMap<&'a str, usize>) -> Option<&'a str> {
    // Ties go to the smallest key.
    counts
        .iter()
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(k, _)| *k)
}

struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_one_collapses_to_most_frequent() {
        let map = canonical_names(["Orc Boyz", "Orc Boyz", "Orc Boys"]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Orc Boys"], "Orc Boyz");
    }

    #[test]
    fn distance_two_is_left_alone() {
        let map = canonical_names(["Knights", "Knight"]);
        assert_eq!(map.len(), 1);
        let map = canonical_names(["Knights", "Knigh"]);
        assert!(map.is_empty());
    }

    #[test]
    fn chain_resolves_to_single_canonical() {
        // "Ogre"-"Orge" is two edits but both are one edit from "Orgre".
        let map = canonical_names(["Ogre", "Ogre", "Ogre", "Orge", "Orgre"]);
        assert_eq!(map.get("Orge").map(String::as_str), Some("Ogre"));
        assert_eq!(map.get("Orgre").map(String::as_str), Some("Ogre"));
        assert!(!map.contains_key("Ogre"));
    }

    #[test]
    fn ties_go_to_smallest_name() {
        let map = canonical_names(["Hydra", "Hydre"]);
        assert_eq!(map["Hydre"], "Hydra");
    }

    #[test]
    fn most_common_breaks_ties_lexicographically() {
        let counts: BTreeMap<&str, usize> = [("Weapon", 2), ("Armour", 2), ("Path", 1)]
            .into_iter()
            .collect();
        assert_eq!(most_common(&counts), Some("Armour"));
    }

    #[test]
    fn disjoint_sets_union_find() {
        let mut ds = DisjointSets::new(4);
        ds.union(0, 1);
        ds.union(2, 3);
        assert_eq!(ds.find(0), ds.find(1));
        assert_ne!(ds.find(1), ds.find(2));
        ds.union(1, 3);
        assert_eq!(ds.find(0), ds.find(2));
    }
}
