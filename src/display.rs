//! Terminal front end for the lawn.
//!
//! Functions here take a writer plus a read-only `GameState` and queue
//! crossterm commands; nothing in this module changes the game.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{GameState, Grid};
use crate::render::{render_entities, Canvas, Glyph, SpriteSheet};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Yellow;
const C_WATER: Color = Color::Blue;
const C_STONE: Color = Color::DarkGrey;
const C_GRASS: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_WIN: Color = Color::Cyan;

/// How many bottom rows are grass; the top row is always water.
const GRASS_ROWS: u16 = 2;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the pixel lawn onto terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols_per_cell: u16,
    pub rows_per_cell: u16,
    /// Terminal position of the lawn's top-left corner.
    pub origin_col: u16,
    pub origin_row: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cols_per_cell: 8,
            rows_per_cell: 2,
            origin_col: 1,
            origin_row: 2,
        }
    }
}

impl Viewport {
    pub fn lawn_cols(&self, grid: &Grid) -> u16 {
        grid.columns.saturating_mul(self.cols_per_cell)
    }

    pub fn lawn_rows(&self, grid: &Grid) -> u16 {
        grid.rows.saturating_mul(self.rows_per_cell)
    }

    /// Lawn-relative terminal cell for a glyph of `width` chars whose sprite
    /// sits at pixel `(x, y)`.  Glyphs are centred in their cell.
    pub fn to_cell(&self, grid: &Grid, x: f64, y: f64, width: usize) -> (i32, i32) {
        let cpc = i32::from(self.cols_per_cell);
        let rpc = i32::from(self.rows_per_cell);
        let col = (x / grid.cell_width * f64::from(cpc)).floor() as i32
            + (cpc - width as i32).max(0) / 2;
        let row = ((y - grid.origin_y()) / grid.cell_height * f64::from(rpc)).floor() as i32
            + rpc / 2;
        (col, row)
    }
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

/// `Canvas` over a crossterm writer; characters falling outside the lawn
/// are clipped.
pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    grid: Grid,
    viewport: Viewport,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, grid: Grid, viewport: Viewport) -> Self {
        Self { out, grid, viewport }
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn draw_image(&mut self, glyph: &Glyph, x: f64, y: f64) -> io::Result<()> {
        let chars: Vec<char> = glyph.text.chars().collect();
        let (col, row) = self.viewport.to_cell(&self.grid, x, y, chars.len());

        let rows = i32::from(self.viewport.lawn_rows(&self.grid));
        if row < 0 || row >= rows {
            return Ok(());
        }
        let cols = i32::from(self.viewport.lawn_cols(&self.grid));
        let first = (-col).max(0) as usize;
        let last = ((cols - col).max(0) as usize).min(chars.len());
        if first >= last {
            return Ok(());
        }

        let visible: String = chars[first..last].iter().collect();
        let term_col = self.viewport.origin_col as i32 + col + first as i32;
        let term_row = self.viewport.origin_row as i32 + row;
        self.out.queue(cursor::MoveTo(term_col as u16, term_row as u16))?;
        self.out.queue(style::SetForegroundColor(glyph.color))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sheet: &SpriteSheet,
    viewport: &Viewport,
) -> io::Result<()> {
    let grid = state.grid();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out, state)?;
    draw_border(out, &grid, viewport)?;
    draw_lanes(out, &grid, viewport)?;

    {
        let mut canvas = TerminalCanvas::new(out, grid, *viewport);
        render_entities(state, sheet, &mut canvas)?;
    }

    draw_controls_hint(out, &grid, viewport)?;

    if state.player.is_game_over() {
        draw_win(out, &grid, viewport)?;
    }

    // Park cursor below the lawn and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, bottom_row(&grid, viewport).saturating_add(2)))?;
    out.flush()?;
    Ok(())
}

fn bottom_row(grid: &Grid, viewport: &Viewport) -> u16 {
    viewport.origin_row.saturating_add(viewport.lawn_rows(grid))
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    let status = if state.player.is_game_over() {
        "SAFE!"
    } else {
        "cross the road"
    };
    out.queue(Print(format!("BUG CROSSING: {}", status)))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid, viewport: &Viewport) -> io::Result<()> {
    let w = viewport.lawn_cols(grid) as usize;
    let left = viewport.origin_col.saturating_sub(1);
    let right = viewport.origin_col.saturating_add(viewport.lawn_cols(grid));
    let top = viewport.origin_row.saturating_sub(1);
    let bottom = bottom_row(grid, viewport);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    out.queue(cursor::MoveTo(left, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in viewport.origin_row..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Lanes ─────────────────────────────────────────────────────────────────────

/// Water on top, grass at the bottom, stone road in between.
fn lane_style(lane: u16, rows: u16) -> (char, Color) {
    if lane == 0 {
        ('~', C_WATER)
    } else if lane + GRASS_ROWS >= rows {
        ('"', C_GRASS)
    } else {
        ('.', C_STONE)
    }
}

fn draw_lanes<W: Write>(out: &mut W, grid: &Grid, viewport: &Viewport) -> io::Result<()> {
    let width = viewport.lawn_cols(grid) as usize;
    for lane in 0..grid.rows {
        let (fill, color) = lane_style(lane, grid.rows);
        let line: String = std::iter::repeat(fill).take(width).collect();
        out.queue(style::SetForegroundColor(color))?;
        for sub in 0..viewport.rows_per_cell {
            let row = viewport
                .origin_row
                .saturating_add(lane.saturating_mul(viewport.rows_per_cell))
                .saturating_add(sub);
            out.queue(cursor::MoveTo(viewport.origin_col, row))?;
            out.queue(Print(&line))?;
        }
    }
    Ok(())
}

// ── Controls hint ─────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid, viewport: &Viewport) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, bottom_row(grid, viewport).saturating_add(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ → ↓ / WASD : Move   ENTER : New game   Q : Quit"))?;
    Ok(())
}

// ── Win overlay ───────────────────────────────────────────────────────────────

fn draw_win<W: Write>(out: &mut W, grid: &Grid, viewport: &Viewport) -> io::Result<()> {
    let lines = [
        "╔══════════════════╗",
        "║   YOU MADE IT!   ║",
        "║ ENTER: new game  ║",
        "╚══════════════════╝",
    ];
    let cx = viewport.origin_col.saturating_add(viewport.lawn_cols(grid) / 2);
    let start_row = viewport
        .origin_row
        .saturating_add(viewport.lawn_rows(grid) / 2)
        .saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_WIN))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row.saturating_add(i as u16)))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
