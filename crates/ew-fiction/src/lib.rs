//! The explorable world of Emberwake.
//!
//! Provides the room graph with its gated paths and sub-areas, the standard
//! world layout, the arrival event dispatcher, puzzles, the store, and the
//! fuzzy command corrector that turns free text into known commands.

/// Error types for the fiction layer.
pub mod error;
/// Arrival events, generic and room-specific.
pub mod event;
/// Sub-areas and boss lairs.
pub mod explore;
/// Command vocabulary and fuzzy correction.
pub mod parser;
/// Puzzle resolution.
pub mod puzzle;
/// The village store.
pub mod store;
/// Rooms, gates, sub-areas, and the standard layout.
pub mod world;

pub use error::{FictionError, FictionResult};
pub use event::{Outcome, UniqueEvent, dispatch};
pub use explore::{challenge_boss, enter_sub_area};
pub use parser::{Command, Correction, Direction, correct, resolve};
pub use world::{
    BossDescriptor, FlavorEffect, Gate, GateCondition, Room, START_ROOM, SubArea, SubAreaKind,
    Travel, WorldGraph, standard_world,
};
