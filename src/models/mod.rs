//! Data models for duty-assignment entities.
//!
//! This module contains the data structures used to describe a prevention
//! duty and the people working it:
//!
//! - `PersonnelRecord`: one roster entry with derived display fields
//! - `AssignedPerson`: a roster entry attached to a duty with rank and unit
//! - `CommanderInfo`: the designated responsible for the duty
//! - `EventMetadata`: the non-personnel facts about the occasion
//! - `catalog`: the closed unit and rank vocabularies

pub mod catalog;
pub mod event;
pub mod person;

pub use catalog::{DEFAULT_COMMANDER_RANK, DEFAULT_RANK, DEFAULT_UNIT, RANKS, UNITS};
pub use event::EventMetadata;
pub use person::{AssignedPerson, CommanderInfo, PersonnelRecord};
