//! Data models for WSDC registry entities.
//!
//! This module contains the data structures used by the scanner:
//!
//! - `LookupResponse`, `DivisionEntry`, `CompetitionResult`: the raw
//!   placement payload returned by the lookup endpoint
//! - `DancerSummary`: the flat per-dancer record written to CSV
//! - `Division`, `Region`: the enumerated columns of a summary

pub mod placement;
pub mod summary;

pub use placement::{CompetitionResult, Dancer, DivisionEntry, DivisionRef, EventRef, LookupResponse, Placements};
pub use summary::{DancerSummary, Division, Region};
