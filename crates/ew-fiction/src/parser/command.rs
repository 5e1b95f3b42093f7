//! The campaign command vocabulary.

use std::fmt;

use ew_core::normalize_name;

/// Direction of travel between rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// Every direction, in display order.
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    /// Parse a direction name or its one-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The way back.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-word commands understood everywhere.
pub const KEYWORDS: &[&str] = &[
    "status",
    "inventory",
    "explore",
    "boss",
    "map",
    "save",
    "quit",
    "help",
];

/// A corrected player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Travel in a direction.
    Move(Direction),
    /// Show the player's status.
    Status,
    /// List the inventory.
    Inventory,
    /// Enter one of the room's sub-areas.
    Explore,
    /// Challenge the room's boss.
    Boss,
    /// Show the exits from here.
    Map,
    /// Write the save file.
    Save,
    /// Leave the game.
    Quit,
    /// List commands and carried items.
    Help,
    /// Use a carried item.
    Use(String),
}

impl Command {
    /// Interpret a token accepted by the corrector.
    ///
    /// Anything that is neither a direction nor a keyword names an item.
    pub fn from_token(token: &str) -> Self {
        if let Some(direction) = Direction::parse(token) {
            return Self::Move(direction);
        }
        match normalize_name(token).as_str() {
            "status" => Self::Status,
            "inventory" => Self::Inventory,
            "explore" => Self::Explore,
            "boss" => Self::Boss,
            "map" => Self::Map,
            "save" => Self::Save,
            "quit" => Self::Quit,
            "help" => Self::Help,
            _ => Self::Use(token.to_string()),
        }
    }
}

/// A verb phrase with its captured argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrase {
    /// `go`/`move`/`walk` followed by a direction.
    Go(String),
    /// `use`/`consume`/`activate` followed by an item.
    Use(String),
}

impl Phrase {
    /// The captured argument.
    pub fn argument(&self) -> &str {
        match self {
            Self::Go(arg) | Self::Use(arg) => arg,
        }
    }
}

const MOVE_VERBS: &[&str] = &["go", "move", "walk"];
const USE_VERBS: &[&str] = &["use", "consume", "activate"];

/// Match a phrasal command form.
pub fn phrasal(input: &str) -> Option<Phrase> {
    let input = normalize_name(input);
    let (verb, rest) = input.split_once(' ')?;
    if MOVE_VERBS.contains(&verb) {
        let direction = Direction::parse(rest)
            .map_or_else(|| rest.to_string(), |d| d.name().to_string());
        Some(Phrase::Go(direction))
    } else if USE_VERBS.contains(&verb) {
        Some(Phrase::Use(rest.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_parse_abbreviations() {
        assert_eq!(Direction::parse("N"), Some(Direction::North));
        assert_eq!(Direction::parse(" west "), Some(Direction::West));
        assert_eq!(Direction::parse("sideways"), None);
        for d in Direction::ALL {
            assert_eq!(Direction::parse(d.name()), Some(d));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn tokens_become_commands() {
        assert_eq!(Command::from_token("north"), Command::Move(Direction::North));
        assert_eq!(Command::from_token("map"), Command::Map);
        assert_eq!(Command::from_token("help"), Command::Help);
        assert_eq!(
            Command::from_token("Healing Potion"),
            Command::Use("Healing Potion".into())
        );
    }

    #[test]
    fn phrasal_forms() {
        assert_eq!(phrasal("Go  North"), Some(Phrase::Go("north".into())));
        assert_eq!(phrasal("walk east"), Some(Phrase::Go("east".into())));
        assert_eq!(phrasal("go n"), Some(Phrase::Go("north".into())));
        assert_eq!(phrasal("move D"), Some(Phrase::Go("down".into())));
        assert_eq!(
            phrasal("consume healing potion"),
            Some(Phrase::Use("healing potion".into()))
        );
        assert_eq!(phrasal("north"), None);
        assert_eq!(phrasal("dance wildly"), None);
    }
}
