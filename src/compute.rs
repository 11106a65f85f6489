//! Game logic.
//!
//! Per-entity behaviour is implemented here as methods on the entity types;
//! the state-level functions at the bottom follow the same shape as the rest
//! of the game loop: they take an immutable `GameState` (plus an injected RNG
//! or event sender where needed) and return a brand-new `GameState`.

use std::sync::mpsc::Sender;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, GameEvent, GameState, GameStatus, Grid, Player};
use crate::input::Action;

/// Enemies keep walking until they are this far past the right border.
pub const WRAP_FACTOR: f64 = 1.2;

/// What a single `Player::update` observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Clear,
    /// Index into the roster of the first enemy that hit the player.
    Collided(usize),
    Won,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

impl Enemy {
    pub fn wrap_threshold(&self) -> f64 {
        self.grid.bounds().right * WRAP_FACTOR
    }

    /// Advance by `speed * dt` pixels, or jump to one cell left of the lawn
    /// once past the wrap threshold.
    pub fn update(&mut self, dt: f64) {
        if self.x < self.wrap_threshold() {
            self.x += self.speed * dt;
        } else {
            self.x = -self.grid.cell_width;
        }
    }

    /// Open-interval box test against a point (the player's position).
    pub fn overlaps(&self, x: f64, y: f64) -> bool {
        (y - self.y).abs() < self.height_margin() && (x - self.x).abs() < self.width_margin()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

impl Player {
    /// Check the roster for a hit, then the win row.
    ///
    /// Scanning stops at the first overlapping enemy; the win test only runs
    /// when nothing hit.
    pub fn update(&mut self, enemies: &[Enemy]) -> UpdateOutcome {
        if let Some(index) = enemies.iter().position(|e| e.overlaps(self.x, self.y)) {
            tracing::info!(enemy = index, x = self.x, y = self.y, "collision");
            self.reset();
            return UpdateOutcome::Collided(index);
        }

        if self.y < self.grid.win_line() {
            if self.status != GameStatus::GameOver {
                tracing::info!("player crossed the lawn");
            }
            self.status = GameStatus::GameOver;
            return UpdateOutcome::Won;
        }

        UpdateOutcome::Clear
    }

    pub fn reset(&mut self) {
        self.x = self.x_start;
        self.y = self.y_start;
    }

    /// Apply one key action.  Moves are whole cells and only start from
    /// inside the border, so the player never leaves the bounds.
    ///
    /// `Enter` never changes state; after a win it asks the loop owner for a
    /// new game.  Movement is still accepted after a win.
    pub fn handle_input(&mut self, action: Action) -> Option<GameEvent> {
        let bounds = self.grid.bounds();
        match action {
            Action::Left => {
                if self.x > bounds.left {
                    self.x -= self.grid.cell_width;
                }
            }
            Action::Right => {
                if self.x < bounds.right {
                    self.x += self.grid.cell_width;
                }
            }
            Action::Up => {
                if self.y > bounds.top {
                    self.y -= self.grid.cell_height;
                }
            }
            Action::Down => {
                if self.y < bounds.bottom {
                    self.y += self.grid.cell_height;
                }
            }
            Action::Enter => {
                if self.is_game_over() {
                    return Some(GameEvent::StartNewGame);
                }
            }
            Action::None => {}
        }
        debug_assert!(
            bounds.contains(self.x, self.y),
            "player left the lawn at ({}, {})",
            self.x,
            self.y
        );
        None
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the roster.  Each enemy's x, y and speed are sampled independently
/// from the configured `[min, max)` ranges; overlapping starts are allowed.
pub fn spawn_enemies(config: &GameConfig, grid: Grid, rng: &mut impl Rng) -> Vec<Enemy> {
    let spec = &config.enemies;
    (0..spec.count)
        .map(|_| {
            let x = rng.gen_range(spec.x.range());
            let y = rng.gen_range(spec.y.range());
            let speed = rng.gen_range(spec.speed.range());
            Enemy::new(grid, spec, f64::from(x), f64::from(y), f64::from(speed))
        })
        .collect()
}

/// Build the initial game state.  `config` is assumed validated.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let grid = Grid::from_config(&config.grid);
    let enemies = spawn_enemies(config, grid, rng);
    tracing::debug!(enemies = enemies.len(), "new game");
    GameState {
        player: Player::new(grid),
        enemies,
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by `dt` seconds: every enemy moves, then the
/// player checks for collisions and the win row.
pub fn tick(state: &GameState, dt: f64) -> GameState {
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let mut e = e.clone();
            e.update(dt);
            e
        })
        .collect();

    let mut player = state.player.clone();
    let outcome = player.update(&enemies);
    if outcome != UpdateOutcome::Clear {
        tracing::trace!(frame = state.frame + 1, ?outcome, "tick");
    }

    GameState {
        player,
        enemies,
        frame: state.frame + 1,
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Apply one action.  A raised event is forwarded on `events`; nobody
/// listening is not an error.
pub fn apply_input(state: &GameState, action: Action, events: &Sender<GameEvent>) -> GameState {
    let mut player = state.player.clone();
    if let Some(event) = player.handle_input(action) {
        tracing::debug!(?event, "raising game event");
        if events.send(event).is_err() {
            tracing::warn!(?event, "no listener for game event");
        }
    }
    GameState {
        player,
        ..state.clone()
    }
}
