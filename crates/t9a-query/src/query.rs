//! Query construction and validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use t9a_settings::{QuerySettings, TurnFilter, UnitSlotSettings};
use t9a_types::{Faction, ListRow, Tables};
use thiserror::Error;

/// Rejected before any list is examined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{unit}: options {options:?} are both required and banned")]
    OverlappingOptions { unit: String, options: Vec<String> },

    #[error("no {faction} list contains a unit named '{unit}'")]
    UnknownUnit { faction: Faction, unit: String },

    #[error("{unit}: model range {min}-{max} is inverted")]
    InvalidModelRange { unit: String, min: u32, max: u32 },
}

/// One required unit copy and the conditions that copy must meet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConstraint {
    pub unit_name: String,
    /// Inclusive model-count range. A unit without a model count fails it.
    pub model_range: Option<(u32, u32)>,
    pub required: BTreeSet<String>,
    pub banned: BTreeSet<String>,
}

impl UnitConstraint {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            ..Self::default()
        }
    }

    pub fn require(mut self, option: impl Into<String>) -> Self {
        self.required.insert(option.into());
        self
    }

    pub fn ban(mut self, option: impl Into<String>) -> Self {
        self.banned.insert(option.into());
        self
    }

    pub fn models(mut self, min: u32, max: u32) -> Self {
        self.model_range = Some((min, max));
        self
    }

    /// Whether one unit instance satisfies this slot.
    pub fn accepts(&self, models: Option<u32>, options: &BTreeSet<&str>) -> bool {
        if !self.required.iter().all(|r| options.contains(r.as_str())) {
            return false;
        }
        if self.banned.iter().any(|b| options.contains(b.as_str())) {
            return false;
        }
        match (self.model_range, models) {
            (None, _) => true,
            (Some((min, max)), Some(n)) => min <= n && n <= max,
            (Some(_), None) => false,
        }
    }

    fn check(&self) -> Result<(), QueryError> {
        let overlap: Vec<String> = self.required.intersection(&self.banned).cloned().collect();
        if !overlap.is_empty() {
            return Err(QueryError::OverlappingOptions {
                unit: self.unit_name.clone(),
                options: overlap,
            });
        }
        if let Some((min, max)) = self.model_range
            && min > max
        {
            return Err(QueryError::InvalidModelRange {
                unit: self.unit_name.clone(),
                min,
                max,
            });
        }
        Ok(())
    }
}

impl From<UnitSlotSettings> for UnitConstraint {
    fn from(slot: UnitSlotSettings) -> Self {
        Self {
            unit_name: slot.name,
            model_range: slot.models,
            required: slot.required,
            banned: slot.banned,
        }
    }
}

/// A structural list query, accumulated by the caller and then submitted.
///
/// Repeating a unit name asks for that many distinct copies. `None` for
/// opponents, deployments or primaries keeps every value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub faction: Faction,
    pub units: Vec<UnitConstraint>,
    pub opponents: Option<BTreeSet<Faction>>,
    pub turn: TurnFilter,
    pub deployments: Option<BTreeSet<String>>,
    pub primaries: Option<BTreeSet<String>>,
}

impl ListQuery {
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            units: Vec::new(),
            opponents: None,
            turn: TurnFilter::Any,
            deployments: None,
            primaries: None,
        }
    }

    pub fn unit(mut self, constraint: UnitConstraint) -> Self {
        self.units.push(constraint);
        self
    }

    pub fn push_unit(&mut self, constraint: UnitConstraint) {
        self.units.push(constraint);
    }

    pub fn opponents<I: IntoIterator<Item = Faction>>(mut self, opponents: I) -> Self {
        self.opponents = Some(opponents.into_iter().collect());
        self
    }

    pub fn turn(mut self, turn: TurnFilter) -> Self {
        self.turn = turn;
        self
    }

    pub fn deployments<I, S>(mut self, deployments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deployments = Some(deployments.into_iter().map(Into::into).collect());
        self
    }

    pub fn primaries<I, S>(mut self, primaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primaries = Some(primaries.into_iter().map(Into::into).collect());
        self
    }

    /// Check every slot against itself and against the faction's units.
    pub fn validate(&self, tables: &Tables) -> Result<(), QueryError> {
        let known = crate::available_units(tables, self.faction);
        for slot in &self.units {
            slot.check()?;
            if !known.contains(&slot.unit_name) {
                return Err(QueryError::UnknownUnit {
                    faction: self.faction,
                    unit: slot.unit_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Game-level predicates: opponent, turn, deployment, primary.
    pub fn accepts_game(&self, row: &ListRow) -> bool {
        self.opponents
            .as_ref()
            .is_none_or(|set| set.contains(&row.opponent))
            && self.turn.matches(row.turn)
            && self
                .deployments
                .as_ref()
                .is_none_or(|set| set.contains(&row.deployment))
            && self
                .primaries
                .as_ref()
                .is_none_or(|set| set.contains(&row.primary))
    }
}

impl From<QuerySettings> for ListQuery {
    fn from(settings: QuerySettings) -> Self {
        Self {
            faction: settings.faction,
            units: settings.units.into_iter().map(UnitConstraint::from).collect(),
            opponents: settings.opponents,
            turn: settings.turn,
            deployments: settings.deployments,
            primaries: settings.primaries,
        }
    }
}
