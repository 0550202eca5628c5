//! SisJornada - duty roster loading and prevention-report generation.
//!
//! Two components, wired one direction: the roster loader reads the
//! personnel table into an owned read-only store, and the report assembler
//! turns a selection of those records plus event metadata into a paginated
//! PDF document. Selection itself (which people, with which rank and unit)
//! is the caller's job.

pub mod config;
pub mod models;
pub mod report;
pub mod roster;
pub mod utils;

pub use report::DutyReport;
pub use roster::Roster;
