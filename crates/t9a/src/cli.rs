//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use t9a_core::settings::{FilterOverrides, TournamentTypeFilter};
use t9a_core::types::{Faction, date_format};
use time::Date;

#[derive(Parser, Debug)]
#[command(name = "t9a", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Data location and filter flags shared by every subcommand.
///
/// Filter flags override the `[filter]` table of the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory of tournament folders [default: `data_root` from the settings file, else `data`].
    #[arg(long, value_name = "DIR", global = true)]
    pub data: Option<PathBuf>,

    /// Settings file [default: `t9a.toml` in the working directory, if present].
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Keep tournaments starting on or after this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", value_parser = parse_date, global = true)]
    pub from: Option<Date>,

    /// Keep tournaments ending on or before this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", value_parser = parse_date, global = true)]
    pub to: Option<Date>,

    /// Smallest game size in points. Games of unknown size are dropped.
    #[arg(long, value_name = "POINTS", global = true)]
    pub min_list_size: Option<u32>,

    /// Largest game size in points. Games of unknown size are dropped.
    #[arg(long, value_name = "POINTS", global = true)]
    pub max_list_size: Option<u32>,

    /// Smallest tournament, in players.
    #[arg(long, value_name = "N", global = true)]
    pub min_players: Option<u32>,

    /// Largest tournament, in players.
    #[arg(long, value_name = "N", global = true)]
    pub max_players: Option<u32>,

    /// Tournament format.
    #[arg(long = "type", value_enum, global = true)]
    pub tournament_type: Option<TournamentKind>,

    /// Verbose logging on stderr (`RUST_LOG` takes precedence).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl From<&GlobalArgs> for FilterOverrides {
    fn from(args: &GlobalArgs) -> Self {
        FilterOverrides {
            start_date: args.from,
            end_date: args.to,
            min_list_size: args.min_list_size,
            max_list_size: args.max_list_size,
            min_tournament_size: args.min_players,
            max_tournament_size: args.max_players,
            tournament_type: args.tournament_type.map(TournamentTypeFilter::from),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentKind {
    Any,
    Singles,
    Teams,
}

impl From<TournamentKind> for TournamentTypeFilter {
    fn from(kind: TournamentKind) -> Self {
        match kind {
            TournamentKind::Any => TournamentTypeFilter::Any,
            TournamentKind::Singles => TournamentTypeFilter::Singles,
            TournamentKind::Teams => TournamentTypeFilter::Teams,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Row counts, data extents and load warnings.
    Summary,
    /// Faction popularity, balance, turn order and score distribution.
    Factions,
    /// Faction-vs-faction score table.
    Matchups,
    /// Magic path and magicalness performance.
    Magic,
    /// Unit popularity and category spend for one faction.
    Units(FactionArgs),
    /// Option choices and option performance for one unit.
    Unit(UnitArgs),
    /// Find the lists matching a query file (TOML, or JSON by extension).
    Find(FindArgs),
    /// Dump one filtered table.
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FactionArgs {
    /// Faction code (e.g. `OnG`) or full name.
    #[arg(long, short = 'f', value_parser = parse_faction)]
    pub faction: Faction,
}

#[derive(Args, Debug, Clone)]
pub struct UnitArgs {
    /// Faction code (e.g. `OnG`) or full name.
    #[arg(long, short = 'f', value_parser = parse_faction)]
    pub faction: Faction,

    /// Unit name, exactly as it appears in the data.
    #[arg(long, short = 'n')]
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    #[arg(long, value_name = "FILE")]
    pub query: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value_t = TableKind::Lists)]
    pub table: TableKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Lists,
    Units,
    Options,
}

fn parse_date(s: &str) -> Result<Date, String> {
    date_format::parse(s).map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}

fn parse_faction(s: &str) -> Result<Faction, String> {
    Faction::from_code_or_name(s).map_err(|e| e.to_string())
}
