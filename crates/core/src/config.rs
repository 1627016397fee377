//! Engine configuration
//!
//! Loaded from JSON by the binary; every field is optional and falls back to
//! the defaults in `tetris3d-types`.
//!
//! ```
//! use tetris3d_core::EngineConfig;
//! use tetris3d_types::SpawnMode;
//!
//! let config = EngineConfig::from_json_str(r#"{ "height": 12, "spawn_mode": "cyclic" }"#).unwrap();
//! assert_eq!(config.height, 12);
//! assert_eq!(config.width, 4);
//! assert_eq!(config.spawn_mode, SpawnMode::Cyclic);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grid::GridDims;
use crate::pieces::{standard_pieces, PieceDef};
use crate::types::{
    PieceColor, SpawnMode, DEFAULT_GRAVITY_MS, DEFAULT_GRID_DEPTH, DEFAULT_GRID_HEIGHT,
    DEFAULT_GRID_WIDTH,
};

/// A custom piece definition as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceConfig {
    #[serde(with = "color_name")]
    pub color: PieceColor,
    /// Mask rows of 0/1, lowest row first
    pub rows: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub width: u16,
    pub depth: u16,
    pub height: u16,
    pub gravity_interval_ms: u64,
    #[serde(with = "spawn_mode_name")]
    pub spawn_mode: SpawnMode,
    pub seed: u32,
    /// Replaces the standard set when present
    pub pieces: Option<Vec<PieceConfig>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            depth: DEFAULT_GRID_DEPTH,
            height: DEFAULT_GRID_HEIGHT,
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
            spawn_mode: SpawnMode::default(),
            seed: 1,
            pieces: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dims(&self) -> Result<GridDims, CoreError> {
        GridDims::new(self.width, self.depth, self.height)
    }

    /// Piece definitions, validated against the grid
    pub fn definitions(&self) -> Result<Vec<PieceDef>, CoreError> {
        let dims = self.dims()?;
        let defs = match &self.pieces {
            Some(pieces) => pieces
                .iter()
                .map(|piece| PieceDef::new(piece.color, &piece.rows))
                .collect::<Result<Vec<_>, _>>()?,
            None => standard_pieces(),
        };

        if defs.is_empty() {
            return Err(CoreError::NoPieces);
        }

        for def in &defs {
            let width = def.mask.width() as usize;
            let height = def.mask.height() as usize;
            if width > dims.width as usize || height > dims.height as usize {
                return Err(CoreError::PieceTooLarge {
                    color: def.color.as_str(),
                    width,
                    height,
                    grid_width: dims.width,
                    grid_height: dims.height,
                });
            }
        }

        Ok(defs)
    }

    /// Run every construction check without building an engine
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.gravity_interval_ms == 0 {
            return Err(CoreError::InvalidGravityInterval);
        }
        self.definitions().map(|_| ())
    }
}

mod spawn_mode_name {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::SpawnMode;

    pub fn serialize<S: Serializer>(mode: &SpawnMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpawnMode, D::Error> {
        let name = String::deserialize(deserializer)?;
        SpawnMode::from_str(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown spawn mode {name:?}")))
    }
}

mod color_name {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::PieceColor;

    pub fn serialize<S: Serializer>(color: &PieceColor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(color.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PieceColor, D::Error> {
        let name = String::deserialize(deserializer)?;
        PieceColor::from_str(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown piece color {name:?}")))
    }
}
