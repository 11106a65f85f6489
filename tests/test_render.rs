use std::io;

use bug_crossing::display::{self, TerminalCanvas, Viewport};
use bug_crossing::entities::*;
use bug_crossing::render::*;
use crossterm::style::Color;

/// Canvas that remembers every draw call.
#[derive(Default)]
struct RecordingCanvas {
    draws: Vec<(String, f64, f64)>,
}

impl Canvas for RecordingCanvas {
    fn draw_image(&mut self, glyph: &Glyph, x: f64, y: f64) -> io::Result<()> {
        self.draws.push((glyph.text.clone(), x, y));
        Ok(())
    }
}

fn enemy_at(x: f64, y: f64) -> Enemy {
    let mut e = Enemy::new(Grid::default(), &Default::default(), x, y, 100.0);
    e.y = y;
    e
}

fn make_state() -> GameState {
    GameState {
        player: Player::new(Grid::default()),
        enemies: vec![enemy_at(10.0, 56.0), enemy_at(300.0, 139.0)],
        frame: 0,
    }
}

fn frame_text(state: &GameState) -> String {
    let mut out: Vec<u8> = Vec::new();
    display::render(&mut out, state, &SpriteSheet::standard(), &Viewport::default()).unwrap();
    String::from_utf8(out).unwrap()
}

// ── Sprite sheet ──────────────────────────────────────────────────────────────

#[test]
fn sprite_keys_are_stable() {
    assert_eq!(Sprite::Enemy.key(), "enemy");
    assert_eq!(Sprite::Player.key(), "player");
}

#[test]
fn standard_sheet_has_both_sprites() {
    let sheet = SpriteSheet::standard();
    assert!(sheet.get("enemy").is_some());
    assert!(sheet.get("player").is_some());
    assert!(sheet.get("gem").is_none());
}

// ── Renderable ────────────────────────────────────────────────────────────────

#[test]
fn each_entity_drawn_once_at_its_position() {
    let state = make_state();
    let sheet = SpriteSheet::standard();
    let mut canvas = RecordingCanvas::default();
    render_entities(&state, &sheet, &mut canvas).unwrap();

    let enemy = sheet.get("enemy").unwrap().text.clone();
    let player = sheet.get("player").unwrap().text.clone();
    assert_eq!(
        canvas.draws,
        vec![
            (enemy.clone(), 10.0, 56.0),
            (enemy, 300.0, 139.0),
            (player, 202.0, 385.0), // player last, on top
        ]
    );
}

#[test]
fn missing_sprite_is_skipped() {
    let state = make_state();
    let mut sheet = SpriteSheet::default();
    sheet.insert("player", Glyph::new("P", Color::White));
    let mut canvas = RecordingCanvas::default();
    render_entities(&state, &sheet, &mut canvas).unwrap();
    assert_eq!(canvas.draws, vec![("P".to_string(), 202.0, 385.0)]);
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

fn draw_to_string(glyph: &Glyph, x: f64, y: f64) -> String {
    let mut out: Vec<u8> = Vec::new();
    {
        let mut canvas = TerminalCanvas::new(&mut out, Grid::default(), Viewport::default());
        canvas.draw_image(glyph, x, y).unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn viewport_maps_cells() {
    let v = Viewport::default();
    let g = Grid::default();
    // player start: column 2, last lane, glyph centred in its 8 columns
    assert_eq!(v.to_cell(&g, 202.0, 385.0, 3), (18, 11));
    // water row
    assert_eq!(v.to_cell(&g, 0.0, -30.0, 8), (0, 1));
}

#[test]
fn viewport_saturates_on_huge_grid() {
    let v = Viewport::default();
    let g = Grid {
        columns: 9000,
        rows: 40000,
        ..Grid::default()
    };
    assert_eq!(v.lawn_cols(&g), u16::MAX);
    assert_eq!(v.lawn_rows(&g), u16::MAX);
}

#[test]
fn glyph_inside_lawn_is_printed_whole() {
    let text = draw_to_string(&Glyph::new("<@@@>", Color::Red), 101.0, 56.0);
    assert!(text.contains("<@@@>"));
}

#[test]
fn glyph_off_left_edge_is_clipped() {
    let text = draw_to_string(&Glyph::new("<@@@>", Color::Red), -30.0, 56.0);
    assert!(text.contains("@@>"));
    assert!(!text.contains("<@"));
}

#[test]
fn glyph_fully_off_lawn_draws_nothing() {
    assert!(draw_to_string(&Glyph::new("<@@@>", Color::Red), -101.0, 56.0).is_empty());
    assert!(draw_to_string(&Glyph::new("<@@@>", Color::Red), 600.0, 56.0).is_empty());
    assert!(draw_to_string(&Glyph::new("<@@@>", Color::Red), 101.0, 900.0).is_empty());
}

#[test]
fn glyph_off_right_edge_is_clipped() {
    let text = draw_to_string(&Glyph::new("<@@@>", Color::Red), 480.0, 56.0);
    assert!(text.contains('<'));
    assert!(!text.contains("<@"));
}

// ── Full frame ────────────────────────────────────────────────────────────────

#[test]
fn frame_shows_entities_and_lanes() {
    let text = frame_text(&make_state());
    assert!(text.contains("<@@@>"));
    assert!(text.contains("\\o/"));
    assert!(text.contains('~'));
    assert!(!text.contains("YOU MADE IT"));
}

#[test]
fn frame_on_wide_grid_does_not_overflow() {
    let grid = Grid {
        columns: 9000,
        ..Grid::default()
    };
    let state = GameState {
        player: Player::new(grid),
        enemies: Vec::new(),
        frame: 0,
    };
    let text = frame_text(&state);
    assert!(text.contains("\\o/"));
}

#[test]
fn frame_shows_win_overlay_after_crossing() {
    let mut state = make_state();
    state.player.y = -30.0;
    state.player.status = GameStatus::GameOver;
    let text = frame_text(&state);
    assert!(text.contains("YOU MADE IT"));
    assert!(text.contains("SAFE!"));
}
