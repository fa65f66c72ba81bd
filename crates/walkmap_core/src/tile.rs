//! Tile walkability state and its wire tokens

/// Wire token for a walkable tile
pub const WALKABLE_TOKEN: &str = "Walkable";
/// Wire token for a blocked tile
pub const BLOCKED_TOKEN: &str = "NotWalkable";

/// Walkability state of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Walkable,
    Blocked,
}

impl TileState {
    /// The token written into archive metadata for this state
    pub fn token(&self) -> &'static str {
        match self {
            TileState::Walkable => WALKABLE_TOKEN,
            TileState::Blocked => BLOCKED_TOKEN,
        }
    }

    /// Decode a metadata token. Strict allowlist: only the exact token
    /// `"Walkable"` decodes to `Walkable`; every other string is `Blocked`.
    pub fn from_token(token: &str) -> TileState {
        if token == WALKABLE_TOKEN {
            TileState::Walkable
        } else {
            TileState::Blocked
        }
    }

    /// The opposite state (used by the toggle tool)
    pub fn toggled(&self) -> TileState {
        match self {
            TileState::Walkable => TileState::Blocked,
            TileState::Blocked => TileState::Walkable,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        TileState::Blocked
    }
}
