//! Public data models for generated levels and generation failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Position;
use crate::state::Map;

/// Smallest side that still fits a 3x3 room inside its walls.
pub const MIN_MAP_SIDE: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub map: Map,
    pub spawn: Position,
}

impl GeneratedLevel {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.map.canonical_bytes();
        bytes.extend(self.spawn.row.to_le_bytes());
        bytes.extend(self.spawn.col.to_le_bytes());
        bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("map of {width}x{height} is too small; each side needs at least {min} cells")]
    TooSmall { width: usize, height: usize, min: usize },
    #[error("invalid generation config: {0}")]
    InvalidConfig(String),
}
