// Light-cycle wire types
// Shapes of the payloads exchanged with the host (position, grid, play request)
// and the relative move vocabulary.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// 2D cell on the grid
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Host-side cell key, `"x-y"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.x, self.y)
    }

    /// Parses a host-side `"x-y"` key. Either component may be negative.
    ///
    /// Only the exact form `key()` produces is accepted: `"03-2"` or `"+2-3"`
    /// name no cell.
    pub fn parse_key(key: &str) -> Option<Coord> {
        // Skip the first char so a leading minus sign is not taken as the separator
        let split = key.get(1..)?.find('-')? + 1;
        let x = key[..split].parse().ok()?;
        let y = key[split + 1..].parse().ok()?;
        let cell = Coord { x, y };
        (cell.key() == key).then_some(cell)
    }
}

/// A cell plus the cell it was reached from; the heading is `cell - prev`
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub cell: Coord,
    pub prev: Coord,
}

impl Position {
    pub fn new(cell: Coord, prev: Coord) -> Self {
        Position { cell, prev }
    }

    /// Displacement of the last step, `(dx, dy)`, widened so any pair of cells fits
    pub fn displacement(&self) -> (i64, i64) {
        (
            i64::from(self.cell.x) - i64::from(self.prev.x),
            i64::from(self.cell.y) - i64::from(self.prev.y),
        )
    }
}

/// The three moves available to a light cycle, relative to its heading
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelativeMove {
    Forward,
    Starboard,
    Larboard,
}

impl RelativeMove {
    /// All moves, in generation and tie-break order
    pub fn all() -> [RelativeMove; 3] {
        [
            RelativeMove::Forward,
            RelativeMove::Starboard,
            RelativeMove::Larboard,
        ]
    }

    /// Wire name of the move
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeMove::Forward => "FORWARD",
            RelativeMove::Starboard => "STARBOARD",
            RelativeMove::Larboard => "LARBOARD",
        }
    }

    pub fn parse(s: &str) -> Result<RelativeMove, String> {
        match s.trim().to_uppercase().as_str() {
            "FORWARD" => Ok(RelativeMove::Forward),
            "STARBOARD" => Ok(RelativeMove::Starboard),
            "LARBOARD" => Ok(RelativeMove::Larboard),
            _ => Err(format!("Invalid move: {}", s)),
        }
    }

    /// Slot in per-move tables
    pub fn index(&self) -> usize {
        match self {
            RelativeMove::Forward => 0,
            RelativeMove::Starboard => 1,
            RelativeMove::Larboard => 2,
        }
    }
}

impl fmt::Display for RelativeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized starting position: `{x, y, prev: {x, y}}`
///
/// `prev` may be omitted, in which case it defaults to the position itself
/// (hosts send that on the very first turn, before the cycle has moved).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PositionPayload {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Coord>,
}

impl PositionPayload {
    pub fn to_position(&self) -> Position {
        let cell = Coord::new(self.x, self.y);
        Position::new(cell, self.prev.unwrap_or(cell))
    }
}

/// Serialized grid: `{sizeX, sizeY, filled: {"x-y": marker}}`
///
/// Marker values are opaque (the game engine stores the ids of the players
/// that visited the cell); only the keys matter.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridPayload {
    pub size_x: i32,
    pub size_y: i32,
    pub filled: HashMap<String, Value>,
}

/// A payload that arrives either as JSON text or as an inline JSON value
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Inline(Value),
}

impl Payload {
    /// Decodes the payload into its expected shape
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Payload::Text(text) => serde_json::from_str(text),
            Payload::Inline(value) => T::deserialize(value),
        }
    }
}

/// Inbound play request from the host
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    /// Opaque id echoed with every decision
    pub correlation_id: String,
    pub position: Payload,
    pub grid: Payload,
    /// Falls back to the configured default when absent
    #[serde(default)]
    pub max_depth: Option<u32>,
}
