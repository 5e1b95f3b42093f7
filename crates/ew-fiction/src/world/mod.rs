//! Rooms, gated paths, and sub-areas.
//!
//! The graph is built once at setup. Gated edges are absent from a room's
//! directions until their condition is met on a traversal attempt; from then
//! on the edge is an ordinary direction.

mod setup;

pub use setup::{START_ROOM, standard_world};

use std::collections::{BTreeMap, BTreeSet};

use ew_core::{Ability, Player};

use crate::error::{FictionError, FictionResult};
use crate::event::UniqueEvent;
use crate::parser::Direction;

/// A boss guarding a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossDescriptor {
    /// Boss name.
    pub name: String,
    /// Starting health, used without jitter.
    pub health: i32,
    /// Base damage, used without jitter.
    pub damage: i32,
    /// Special ability.
    pub ability: Ability,
    /// Short description shown on encounter.
    pub description: String,
    /// Item awarded on victory.
    pub reward: String,
}

/// One-shot effect of a flavor sub-area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlavorEffect {
    /// Nothing beyond the text.
    Nothing,
    /// Restore health, capped at the maximum.
    Rest(i32),
}

/// What happens inside a sub-area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubAreaKind {
    /// Fixed text with an optional effect.
    Flavor {
        /// Narration.
        text: String,
        /// Effect applied after the text.
        effect: FlavorEffect,
    },
    /// A random enemy lurks here.
    Combat,
    /// A puzzle drawn from the named pool.
    Puzzle(String),
    /// The store.
    Store,
    /// Boat repairs, needing the named tool.
    Boathouse(String),
    /// The room's boss lair.
    Lair,
}

/// A named leaf location inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubArea {
    /// Display name, also what the player types to enter.
    pub name: String,
    /// Behavior.
    pub kind: SubAreaKind,
}

impl SubArea {
    /// Build a sub-area.
    pub fn new(name: impl Into<String>, kind: SubAreaKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A location in the world graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Stable identifier, stored in save files.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Arrival description.
    pub description: String,
    /// Open exits.
    pub directions: BTreeMap<Direction, String>,
    /// Explorable sub-areas.
    pub sub_areas: Vec<SubArea>,
    /// Boss guarding this room, if any.
    pub boss: Option<BossDescriptor>,
    /// Events that only happen here.
    pub unique_events: Vec<UniqueEvent>,
}

impl Room {
    /// Start building a room with no exits.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            directions: BTreeMap::new(),
            sub_areas: Vec::new(),
            boss: None,
            unique_events: Vec::new(),
        }
    }

    /// Add an open exit.
    pub fn exit(mut self, direction: Direction, to: impl Into<String>) -> Self {
        self.directions.insert(direction, to.into());
        self
    }

    /// Add a sub-area.
    pub fn area(mut self, name: impl Into<String>, kind: SubAreaKind) -> Self {
        self.sub_areas.push(SubArea::new(name, kind));
        self
    }

    /// Set the boss.
    pub fn boss(mut self, boss: BossDescriptor) -> Self {
        self.boss = Some(boss);
        self
    }

    /// Add room-specific events.
    pub fn events(mut self, events: &[UniqueEvent]) -> Self {
        self.unique_events.extend_from_slice(events);
        self
    }

    /// Find a sub-area by name, ignoring case.
    pub fn sub_area(&self, name: &str) -> Option<&SubArea> {
        let wanted = ew_core::normalize_name(name);
        self.sub_areas
            .iter()
            .find(|a| ew_core::normalize_name(&a.name) == wanted)
    }
}

/// Condition that opens a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateCondition {
    /// The player carries this item.
    HasItem(String),
    /// The coast boat has been repaired.
    BoatRepaired,
}

impl GateCondition {
    /// Whether the player satisfies this condition.
    pub fn is_met(&self, player: &Player) -> bool {
        match self {
            Self::HasItem(item) => player.has_item(item),
            Self::BoatRepaired => player.boat_repaired,
        }
    }
}

/// A conditional edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// Stable identifier, stored with the player.
    pub id: String,
    /// Room the gate leads out of.
    pub from: String,
    /// Direction from that room.
    pub direction: Direction,
    /// Room the gate leads to.
    pub to: String,
    /// What opens it.
    pub condition: GateCondition,
    /// Shown while it stays shut.
    pub blocked: String,
}

/// Result of trying to leave a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Travel {
    /// The player moved to this room.
    Moved {
        /// Destination room id.
        to: String,
        /// Gate opened on the way, if any.
        unlocked: Option<String>,
    },
    /// A closed gate stands in the way.
    Blocked(String),
    /// There is no exit that way.
    NoExit,
}

/// The world: rooms keyed by id plus their gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGraph {
    rooms: BTreeMap<String, Room>,
    gates: Vec<Gate>,
    start: String,
}

impl WorldGraph {
    /// Create an empty graph whose players begin in `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            rooms: BTreeMap::new(),
            gates: Vec::new(),
            start: start.into(),
        }
    }

    /// Add a room.
    pub fn add_room(&mut self, room: Room) -> FictionResult<()> {
        if self.rooms.contains_key(&room.id) {
            return Err(FictionError::DuplicateRoom(room.id));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    /// Add a gate between two existing rooms.
    pub fn add_gate(&mut self, gate: Gate) -> FictionResult<()> {
        for id in [&gate.from, &gate.to] {
            if !self.rooms.contains_key(id) {
                return Err(FictionError::RoomNotFound(id.clone()));
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Starting room id.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a room.
    pub fn room(&self, id: &str) -> FictionResult<&Room> {
        self.rooms
            .get(id)
            .ok_or_else(|| FictionError::RoomNotFound(id.to_string()))
    }

    /// Whether a room id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    /// All rooms, ordered by id.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// All gates.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    fn gate_at(&self, from: &str, direction: Direction) -> Option<&Gate> {
        self.gates
            .iter()
            .find(|g| g.from == from && g.direction == direction)
    }

    /// Directions worth offering from a room: open exits plus gated ones.
    pub fn directions_from(&self, id: &str) -> BTreeSet<Direction> {
        let mut directions: BTreeSet<Direction> = self
            .rooms
            .get(id)
            .map(|r| r.directions.keys().copied().collect())
            .unwrap_or_default();
        directions.extend(self.gates.iter().filter(|g| g.from == id).map(|g| g.direction));
        directions
    }

    /// Try to move from `from` in `direction`.
    ///
    /// A gate whose condition holds is opened for good and recorded on the
    /// player; a shut gate reports why without moving anyone.
    pub fn travel(
        &mut self,
        from: &str,
        direction: Direction,
        player: &mut Player,
    ) -> FictionResult<Travel> {
        if let Some(to) = self.room(from)?.directions.get(&direction) {
            return Ok(Travel::Moved {
                to: to.clone(),
                unlocked: None,
            });
        }
        let Some(gate) = self.gate_at(from, direction).cloned() else {
            return Ok(Travel::NoExit);
        };
        if !gate.condition.is_met(player) {
            tracing::debug!(gate = %gate.id, "gate shut");
            return Ok(Travel::Blocked(gate.blocked));
        }
        self.unlock(&gate.id)?;
        player.unlocked_gates.insert(gate.id.clone());
        tracing::info!(gate = %gate.id, "gate opened");
        Ok(Travel::Moved {
            to: gate.to,
            unlocked: Some(gate.id),
        })
    }

    /// Open a gate, inserting its edge into the source room.
    pub fn unlock(&mut self, gate_id: &str) -> FictionResult<()> {
        let gate = self
            .gates
            .iter()
            .find(|g| g.id == gate_id)
            .ok_or_else(|| FictionError::GateNotFound(gate_id.to_string()))?;
        let room = self
            .rooms
            .get_mut(&gate.from)
            .ok_or_else(|| FictionError::RoomNotFound(gate.from.clone()))?;
        room.directions.insert(gate.direction, gate.to.clone());
        Ok(())
    }

    /// Re-open every gate a player had already opened.
    ///
    /// Unknown gate ids are logged and skipped.
    pub fn apply_unlocked<'a>(&mut self, gate_ids: impl IntoIterator<Item = &'a String>) {
        for id in gate_ids {
            if let Err(e) = self.unlock(id) {
                tracing::warn!(gate = %id, error = %e, "skipping saved gate");
            }
        }
    }

    /// Exits from a room as display lines.
    pub fn map_lines(&self, id: &str) -> FictionResult<Vec<String>> {
        let room = self.room(id)?;
        let mut lines = vec![format!("You are in the {}.", room.name)];
        for direction in self.directions_from(id) {
            let line = match room.directions.get(&direction) {
                Some(to) => {
                    let name = self.rooms.get(to).map_or(to.as_str(), |r| r.name.as_str());
                    format!("  {direction}: {name}")
                }
                None => format!("  {direction}: (blocked)"),
            };
            lines.push(line);
        }
        if !room.sub_areas.is_empty() {
            let names: Vec<&str> = room.sub_areas.iter().map(|a| a.name.as_str()).collect();
            lines.push(format!("Places to explore: {}", names.join(", ")));
        }
        Ok(lines)
    }
}
