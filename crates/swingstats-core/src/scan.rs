//! Sequential scan over a range of WSDC ids.
//!
//! Each id is fetched, parsed and summarized before the next request is
//! issued. Any failure for one id (transport, status, payload shape, bad
//! date) skips that id and the scan moves on.

use std::ops::Range;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{DancerSummary, LookupResponse};
use crate::transform::{summarize, RegionCounts, DEFAULT_DANCE_STYLE};

/// First id of the default region survey; ids below it mostly predate 2014
pub const REGION_SURVEY_START_ID: u32 = 8220;

/// Anything that can hand out raw lookup payloads by WSDC id.
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    async fn fetch(&self, wsdc_id: u32) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub dance_style: String,
    /// Keep dancers without any Newcomer or Novice events
    pub keep_all_dancers: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dance_style: DEFAULT_DANCE_STYLE.to_string(),
            keep_all_dancers: false,
        }
    }
}

/// Tally of what happened to each id in a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub scanned: usize,
    /// Unassigned ids (payload too short to be a dancer)
    pub absent: usize,
    /// Ids that failed to fetch or parse
    pub skipped: usize,
    pub accepted: usize,
    /// Dancers dropped by the entry-level filter
    pub filtered: usize,
}

impl std::fmt::Display for ScanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scanned, {} accepted, {} filtered, {} absent, {} skipped",
            self.scanned, self.accepted, self.filtered, self.absent, self.skipped
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Absent,
    Filtered,
    Accepted,
}

impl ScanReport {
    fn record(&mut self, outcome: Result<Outcome>) {
        self.scanned += 1;
        match outcome {
            Ok(Outcome::Absent) => self.absent += 1,
            Ok(Outcome::Filtered) => self.filtered += 1,
            Ok(Outcome::Accepted) => self.accepted += 1,
            Err(_) => self.skipped += 1,
        }
    }
}

/// Parse and summarize one payload, appending accepted dancers to `out`.
fn process_payload(value: Value, options: &ScanOptions, out: &mut Vec<DancerSummary>) -> Result<Outcome> {
    let Some(record) = LookupResponse::from_value(value).context("Malformed dancer payload")? else {
        return Ok(Outcome::Absent);
    };

    let summary = summarize(&record, &options.dance_style)
        .with_context(|| format!("Failed to summarize dancer {}", record.wscid()))?;

    if !options.keep_all_dancers && !summary.has_entry_level_events() {
        return Ok(Outcome::Filtered);
    }

    info!(wsdc_id = summary.id, division = %summary.division, "Summarized dancer");
    out.push(summary);
    Ok(Outcome::Accepted)
}

/// Fetch every id in `ids` from `source`, appending summaries to `out`.
pub async fn scan<S: RecordSource>(
    source: &S,
    ids: Range<u32>,
    options: &ScanOptions,
    out: &mut Vec<DancerSummary>,
) -> ScanReport {
    let mut report = ScanReport::default();

    for wsdc_id in ids {
        let outcome = match source.fetch(wsdc_id).await {
            Ok(value) => process_payload(value, options, out),
            Err(e) => Err(e),
        };
        if let Err(ref e) = outcome {
            debug!(wsdc_id, error = %format!("{:#}", e), "Skipping id");
        }
        report.record(outcome);
    }

    report
}

/// Summarize previously captured payloads without touching the network.
pub fn replay<I>(records: I, options: &ScanOptions, out: &mut Vec<DancerSummary>) -> ScanReport
where
    I: IntoIterator<Item = Value>,
{
    let mut report = ScanReport::default();
    for value in records {
        let outcome = process_payload(value, options, out);
        if let Err(ref e) = outcome {
            debug!(error = %format!("{:#}", e), "Skipping captured record");
        }
        report.record(outcome);
    }
    report
}

/// Fetch raw payloads for every id that carries a `placements` key.
pub async fn dump<S: RecordSource>(source: &S, ids: Range<u32>) -> (Vec<Value>, ScanReport) {
    let mut records = Vec::new();
    let mut report = ScanReport::default();

    for wsdc_id in ids {
        let outcome = match source.fetch(wsdc_id).await {
            Ok(value) if LookupResponse::has_placements_key(&value) => {
                info!(wsdc_id, "Captured dancer");
                records.push(value);
                Ok(Outcome::Accepted)
            }
            Ok(_) => Ok(Outcome::Absent),
            Err(e) => {
                debug!(wsdc_id, error = %format!("{:#}", e), "Skipping id");
                Err(e)
            }
        };
        report.record(outcome);
    }

    (records, report)
}

/// Event counts per region for one dancer: the locations of their last
/// division entry in `dance_style`. `None` when the dancer has no entries.
pub fn dancer_region_counts(record: &LookupResponse, dance_style: &str) -> Option<RegionCounts> {
    let entry = record.style(dance_style)?.last()?;
    Some(RegionCounts::from_locations(entry.locations()))
}

async fn tally_one<S: RecordSource>(
    source: &S,
    wsdc_id: u32,
    dance_style: &str,
    totals: &mut RegionCounts,
) -> Result<Outcome> {
    let value = source.fetch(wsdc_id).await?;
    let Some(record) = LookupResponse::from_value(value).context("Malformed dancer payload")? else {
        return Ok(Outcome::Absent);
    };

    let Some(counts) = dancer_region_counts(&record, dance_style) else {
        return Ok(Outcome::Filtered);
    };
    totals.merge(&counts);
    info!(wsdc_id, events = counts.total(), "Counted dancer");
    Ok(Outcome::Accepted)
}

/// Sum per-dancer region counts over a range of ids.
pub async fn tally_regions<S: RecordSource>(
    source: &S,
    ids: Range<u32>,
    dance_style: &str,
) -> (RegionCounts, ScanReport) {
    let mut totals = RegionCounts::default();
    let mut report = ScanReport::default();

    for wsdc_id in ids {
        let outcome = tally_one(source, wsdc_id, dance_style, &mut totals).await;
        if let Err(ref e) = outcome {
            debug!(wsdc_id, error = %format!("{:#}", e), "Skipping id");
        }
        report.record(outcome);
    }

    (totals, report)
}
