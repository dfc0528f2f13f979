//! Command line arguments.

use std::ops::Range;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use swingstats_core::scan::REGION_SURVEY_START_ID;
use swingstats_core::Config;

#[derive(Debug, Parser)]
#[command(name = "swingstats", version, about = "Summarize WSDC dancer placement histories into a table")]
pub struct Cli {
    /// Dance style whose placements are summarized
    #[arg(long, global = true, env = "SWINGSTATS_STYLE")]
    pub style: Option<String>,

    /// Lookup endpoint URL
    #[arg(long, global = true, env = "SWINGSTATS_API_URL")]
    pub api_url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "SWINGSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write a daily-rolling log file into this directory
    #[arg(long, global = true, env = "SWINGSTATS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a range of ids and export dancer summaries
    Scan {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch a range of ids and save the raw payloads to a snapshot
    Dump {
        #[command(flatten)]
        range: RangeArgs,
        /// Snapshot file to write
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Export dancer summaries from a saved snapshot
    Replay {
        /// Snapshot file to read
        #[arg(long)]
        snapshot: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Count events per region over a range of ids
    Regions {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// First WSDC id to fetch
    #[arg(long)]
    pub start: Option<u32>,
    /// Stop before this WSDC id
    #[arg(long)]
    pub end: Option<u32>,
}

impl RangeArgs {
    pub fn resolve(&self, config: &Config) -> Range<u32> {
        self.start.unwrap_or(config.start_id)..self.end.unwrap_or(config.end_id)
    }

    /// The region survey starts later unless told otherwise
    pub fn resolve_survey(&self, config: &Config) -> Range<u32> {
        let start = self
            .start
            .unwrap_or_else(|| config.start_id.max(REGION_SURVEY_START_ID));
        start..self.end.unwrap_or(config.end_id)
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// CSV file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Also write the summaries as a JSON array
    #[arg(long)]
    pub json: Option<PathBuf>,
    /// Keep dancers without any Newcomer or Novice events
    #[arg(long)]
    pub all_dancers: bool,
}
