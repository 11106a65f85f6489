//! Drawing contract between the game core and whatever puts pixels (or
//! characters) on screen.

use std::collections::HashMap;
use std::io;

use crossterm::style::Color;

use crate::entities::{Enemy, GameState, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Enemy,
    Player,
}

impl Sprite {
    /// Stable lookup key into a `SpriteSheet`.
    pub fn key(&self) -> &'static str {
        match self {
            Sprite::Enemy => "enemy",
            Sprite::Player => "player",
        }
    }
}

/// Loaded artwork for one sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub color: Color,
}

impl Glyph {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Sprite cache keyed by sprite name.
#[derive(Clone, Debug, Default)]
pub struct SpriteSheet {
    glyphs: HashMap<String, Glyph>,
}

impl SpriteSheet {
    pub fn insert(&mut self, key: impl Into<String>, glyph: Glyph) {
        self.glyphs.insert(key.into(), glyph);
    }

    pub fn get(&self, key: &str) -> Option<&Glyph> {
        self.glyphs.get(key)
    }

    /// The bug and the player as terminal art.
    pub fn standard() -> Self {
        let mut sheet = Self::default();
        sheet.insert(Sprite::Enemy.key(), Glyph::new("<@@@>", Color::Red));
        sheet.insert(Sprite::Player.key(), Glyph::new("\\o/", Color::White));
        sheet
    }
}

pub trait Canvas {
    /// Draw `glyph` with its top-left corner at pixel `(x, y)`.
    fn draw_image(&mut self, glyph: &Glyph, x: f64, y: f64) -> io::Result<()>;
}

pub trait Renderable {
    fn sprite(&self) -> Sprite;
    fn position(&self) -> (f64, f64);

    fn render<C: Canvas + ?Sized>(&self, sheet: &SpriteSheet, canvas: &mut C) -> io::Result<()> {
        let sprite = self.sprite();
        match sheet.get(sprite.key()) {
            Some(glyph) => {
                let (x, y) = self.position();
                canvas.draw_image(glyph, x, y)
            }
            None => {
                tracing::warn!(key = sprite.key(), "sprite not loaded, skipping draw");
                Ok(())
            }
        }
    }
}

impl Renderable for Enemy {
    fn sprite(&self) -> Sprite {
        Sprite::Enemy
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Renderable for Player {
    fn sprite(&self) -> Sprite {
        Sprite::Player
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Enemies first so the player is always drawn on top.
pub fn render_entities<C: Canvas + ?Sized>(
    state: &GameState,
    sheet: &SpriteSheet,
    canvas: &mut C,
) -> io::Result<()> {
    for enemy in &state.enemies {
        enemy.render(sheet, canvas)?;
    }
    state.player.render(sheet, canvas)
}
