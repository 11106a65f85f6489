//! Game tunables, loaded from an optional TOML file.
//!
//! Every table carries `#[serde(default)]`, so a file only needs the keys it
//! overrides.  `validate` is run on every loaded config; after it succeeds the
//! random ranges are guaranteed non-empty, bugs always move right with a
//! real collision box, and the grid fits on a terminal.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("range `{name}` is empty: [{min}, {max})")]
    EmptyRange { name: &'static str, min: i32, max: i32 },
    #[error("invalid grid: {0}")]
    InvalidGrid(&'static str),
    #[error("`{0}` must be positive")]
    NonPositive(&'static str),
    #[error("target_fps must be non-zero")]
    ZeroFrameRate,
}

/// Largest lawn, in cells, along either axis.  Keeps the terminal layout
/// comfortably inside `u16` coordinates.
pub const MAX_GRID_CELLS: u16 = 256;

// ── Tables ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns: u16,
    pub rows: u16,
    /// Vertical offset of sprite artwork inside a cell.
    pub sprite_offset: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 101.0,
            cell_height: 83.0,
            columns: 5,
            rows: 6,
            sprite_offset: 30.0,
        }
    }
}

/// Half-open integer interval `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> Range<i32> {
        self.min..self.max
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::EmptyRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    pub x: Span,
    pub y: Span,
    /// Pixels per second.
    pub speed: Span,
    /// Added to the sampled y so the bug sits inside its lane.
    pub lane_offset: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 3,
            x: Span::new(0, 400),
            y: Span::new(50, 250),
            speed: Span::new(100, 300),
            lane_offset: 6.0,
            width: 101.0,
            height: 171.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub target_fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub enemies: EnemyConfig,
    pub frame: FrameConfig,
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.grid;
        if !(g.cell_width > 0.0 && g.cell_height > 0.0) {
            return Err(ConfigError::InvalidGrid("cell sizes must be positive"));
        }
        if g.columns < 2 || g.rows < 2 {
            return Err(ConfigError::InvalidGrid("need at least 2 columns and 2 rows"));
        }
        if g.columns > MAX_GRID_CELLS || g.rows > MAX_GRID_CELLS {
            return Err(ConfigError::InvalidGrid("at most 256 columns and 256 rows"));
        }
        if g.sprite_offset < 0.0 || g.sprite_offset >= g.cell_height {
            return Err(ConfigError::InvalidGrid(
                "sprite offset must lie inside one cell",
            ));
        }
        self.enemies.x.check("enemies.x")?;
        self.enemies.y.check("enemies.y")?;
        self.enemies.speed.check("enemies.speed")?;
        // Bugs only ever walk right; a zero or negative speed never wraps.
        if self.enemies.speed.min <= 0 {
            return Err(ConfigError::NonPositive("enemies.speed.min"));
        }
        if !(self.enemies.width > 0.0) {
            return Err(ConfigError::NonPositive("enemies.width"));
        }
        if !(self.enemies.height > 0.0) {
            return Err(ConfigError::NonPositive("enemies.height"));
        }
        if self.frame.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}
