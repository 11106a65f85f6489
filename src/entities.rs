//! All game entity types and their constructors.  Behaviour lives in
//! `compute`.

use crate::config::{EnemyConfig, GridConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The player reached the water row.  Only a fresh game leaves this state.
    GameOver,
}

/// Raised by the core, consumed by whoever owns the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    StartNewGame,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// World-space movement limits shared by every sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// The lawn: `columns` x `rows` cells of `cell_width` x `cell_height` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns: u16,
    pub rows: u16,
    pub sprite_offset: f64,
}

impl Grid {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            columns: config.columns,
            rows: config.rows,
            sprite_offset: config.sprite_offset,
        }
    }

    pub fn bounds(&self) -> Bounds {
        let bottom = f64::from(self.rows - 1) * self.cell_height - self.sprite_offset;
        Bounds {
            left: 0.0,
            right: f64::from(self.columns - 1) * self.cell_width,
            top: bottom - f64::from(self.rows - 1) * self.cell_height,
            bottom,
        }
    }

    /// Anything above this y has crossed the lawn.
    pub fn win_line(&self) -> f64 {
        self.cell_height / 2.0
    }

    /// Top-left pixel of the lawn (the water row starts here).
    pub fn origin_y(&self) -> f64 {
        self.bounds().top
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub x_start: f64,
    pub y_start: f64,
    /// Pixels per second.
    pub speed: f64,
    /// Sprite artwork size, used for the collision box.
    pub width: f64,
    pub height: f64,
    pub grid: Grid,
}

impl Enemy {
    pub fn new(grid: Grid, config: &EnemyConfig, x: f64, y: f64, speed: f64) -> Self {
        let y_start = y + config.lane_offset;
        Self {
            x,
            y: y_start,
            x_start: x,
            y_start,
            speed,
            width: config.width,
            height: config.height,
            grid,
        }
    }

    /// Half-extent of the collision box along x.
    pub fn width_margin(&self) -> f64 {
        3.0 * self.width / 8.0
    }

    /// Half-extent of the collision box along y.
    pub fn height_margin(&self) -> f64 {
        3.0 * self.height / 8.0
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub x_start: f64,
    pub y_start: f64,
    pub status: GameStatus,
    pub grid: Grid,
}

impl Player {
    /// Middle column, bottom (grass) row.
    pub fn new(grid: Grid) -> Self {
        let x_start = grid.cell_width * f64::from(grid.columns / 2);
        let y_start = grid.bounds().bottom;
        Self {
            x: x_start,
            y: y_start,
            x_start,
            y_start,
            status: GameStatus::Playing,
            grid,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one game owns.  Cloneable so the pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Ticks since the game started.
    pub frame: u64,
}

impl GameState {
    pub fn grid(&self) -> Grid {
        self.player.grid
    }
}
