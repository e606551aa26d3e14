//! # t9a-query
//!
//! **Tier 2 (Query Engine)**
//!
//! Finds the lists of one faction that field a given set of units, each
//! copy with its own required/banned options and model-count range, and
//! reports how those lists scored.
//!
//! A query is an accumulator owned by the caller: build a [`ListQuery`],
//! add [`UnitConstraint`]s (repeat a unit name once per copy wanted), set
//! opponent/turn/deployment/primary filters, then submit it with
//! [`find_lists`]. The engine keeps no state between calls.
//!
//! ```
//! use t9a_query::{ListQuery, find_lists};
//! use t9a_types::{Faction, Tables};
//!
//! let query = ListQuery::new(Faction::OrcsAndGoblins);
//! let outcome = find_lists(&Tables::default(), &query).unwrap();
//! assert!(outcome.matched().is_none());
//! ```
//!
//! ## What belongs here
//! * Query construction and validation
//! * Matching copies of a unit to constraint slots
//! * Unit inspection ("Number of Units", option popularity)
//!
//! ## What does NOT belong here
//! * Date/size filtering (use t9a-filter)
//! * Faction-wide reports (use t9a-analysis)

mod engine;
mod inspect;
mod query;
mod result;

pub use engine::{find_lists, search_lists};
pub use inspect::{
    OptionStat, UnitChoices, UnitInspection, available_units, inspect_unit, unit_option_choices,
};
pub use query::{ListQuery, QueryError, UnitConstraint};
pub use result::{
    CategoryEntries, ListDetails, QueryOutcome, QueryResult, QuerySummary, UnitEntryLine,
    describe_list,
};
pub use t9a_settings::TurnFilter;
