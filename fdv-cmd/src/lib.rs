//! Command implementations for the flood data CLI.
//!
//! Headless access to the same pipeline the dashboard uses: filtering the
//! inventory, resolving region names, projecting a row onto the map
//! geometries and browsing the state/district hierarchy.

use clap::Subcommand;
use fdv_core::criteria::Granularity;
use fdv_core::geometry::RegionKind;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub mod filter;
pub mod regions;

#[derive(Subcommand)]
pub enum Command {
    /// Filter the flood inventory and print the matching rows as CSV
    Filter {
        /// Path to the flood inventory CSV
        #[arg(short = 'e', long)]
        events: String,

        /// Keep events starting on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Keep events ending on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Substring required in the affected state (case-sensitive)
        #[arg(long)]
        state: Option<String>,

        /// Substring required in the affected district (case-sensitive)
        #[arg(long)]
        district: Option<String>,

        /// Output CSV path (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Find the geometry name closest to a free-text region name
    Resolve {
        /// GeoJSON FeatureCollection (optionally .gz)
        #[arg(short = 'g', long)]
        geometries: String,

        /// Region level of the geometries
        #[arg(short = 'k', long, default_value = "state")]
        kind: RegionKind,

        /// Minimum score (0-100); below it no match is reported
        #[arg(short = 't', long)]
        threshold: Option<u8>,

        /// Name to resolve
        query: String,
    },

    /// Write the geometries highlighted for one inventory row as GeoJSON
    Highlight {
        /// Path to the flood inventory CSV
        #[arg(short = 'e', long)]
        events: String,

        /// State GeoJSON (optionally .gz)
        #[arg(long)]
        states: String,

        /// District GeoJSON (optionally .gz)
        #[arg(long)]
        districts: String,

        /// Zero-based row in the inventory
        #[arg(short = 'r', long)]
        row: usize,

        #[arg(long, default_value = "state")]
        granularity: Granularity,

        /// Output GeoJSON path (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// List the states, or the districts of one state
    Districts {
        state: Option<String>,
    },
}

/// Open `path` for writing, or stdout when no path is given.
pub(crate) fn output_writer(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(File::create(Path::new(path))?)),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Filter {
            events,
            start_date,
            end_date,
            state,
            district,
            output,
        } => filter::run_filter(
            &events,
            start_date.as_deref(),
            end_date.as_deref(),
            state.as_deref(),
            district.as_deref(),
            output.as_deref(),
        ),
        Command::Resolve {
            geometries,
            kind,
            threshold,
            query,
        } => regions::run_resolve(&geometries, kind, threshold, &query),
        Command::Highlight {
            events,
            states,
            districts,
            row,
            granularity,
            output,
        } => regions::run_highlight(&events, &states, &districts, row, granularity, output.as_deref()),
        Command::Districts { state } => regions::run_districts(state.as_deref()),
    }
}
