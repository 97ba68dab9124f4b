/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only scales world
/// coordinates onto terminal cells and translates state into commands.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sprite_shooter::constants::ASSIST_BANNER_SECS;
use sprite_shooter::entities::{FallingTarget, GameState, GameStatus, Projectile, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ASSIST: Color = Color::Yellow;
const C_SHOOTER: Color = Color::White;
const C_TARGET: Color = Color::DarkYellow;
const C_TARGET_BONUS: Color = Color::Green;
const C_PROJECTILE: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

/// Smallest terminal the play area can be drawn in.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 16;

// ── World → cell mapping ──────────────────────────────────────────────────────

/// Maps world units onto the cells inside the border.
/// Columns 1..cols-1 and rows 2..rows-2 are playable.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(state: &GameState, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2) as f32;
        let inner_h = rows.saturating_sub(4) as f32;
        Self {
            cols,
            rows,
            sx: inner_w / state.rules.width as f32,
            sy: inner_h / state.rules.height as f32,
        }
    }

    fn col(&self, x: f32) -> i32 {
        1 + (x * self.sx).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y * self.sy).floor() as i32
    }

    fn in_play(&self, col: i32, row: i32) -> bool {
        col >= 1 && col < self.cols as i32 - 1 && row >= 2 && row < self.rows as i32 - 2
    }

    /// Cell span covered by a world box, at least one cell each way.
    fn span(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let c0 = self.col(r.x);
        let r0 = self.row(r.y);
        let c1 = self.col(r.right()).max(c0 + 1);
        let r1 = self.row(r.bottom()).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols × rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    now: Duration,
    (cols, rows): (u16, u16),
) -> std::io::Result<()> {
    let view = Viewport::new(state, cols, rows);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, state, now, &view)?;

    if state.status == GameStatus::Playing {
        for target in state.store.targets() {
            draw_target(out, target, &view)?;
        }
        for projectile in state.store.projectiles() {
            draw_projectile(out, projectile, &view)?;
        }
        draw_shooter(out, state, &view)?;
        draw_assist_banner(out, state, now, &view)?;
    }

    draw_controls_hint(out, &view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    now: Duration,
    view: &Viewport,
) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    // Auto-assist countdown — right
    if let Some(secs) = state.controller.assist_seconds_left(now) {
        let tag = format!("[ AUTO {:>2}s ]", secs);
        let rx = view.cols.saturating_sub(tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_ASSIST))?;
        out.queue(Print(&tag))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_shooter<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols), anchored on the shooter's centre:
    //   ▲
    //  /█\
    let col = view.col(state.shooter.x);
    let row = view.row(state.shooter.y);
    out.queue(style::SetForegroundColor(C_SHOOTER))?;

    if view.in_play(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print("▲"))?;
    }
    let wing_row = row + 1;
    if view.in_play(col - 1, wing_row) && view.in_play(col + 1, wing_row) {
        out.queue(cursor::MoveTo((col - 1) as u16, wing_row as u16))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

/// Targets are solid blocks; bonus targets get a green outline instead.
fn draw_target<W: Write>(
    out: &mut W,
    target: &FallingTarget,
    view: &Viewport,
) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.span(&target.rect());
    let color = if target.bonus { C_TARGET_BONUS } else { C_TARGET };
    out.queue(style::SetForegroundColor(color))?;

    for row in r0..r1 {
        for col in c0..c1 {
            if !view.in_play(col, row) {
                continue;
            }
            let glyph = if !target.bonus {
                "▓"
            } else {
                let top = row == r0;
                let bottom = row == r1 - 1;
                let left = col == c0;
                let right = col == c1 - 1;
                match (top, bottom, left, right) {
                    (true, _, true, _) => "┏",
                    (true, _, _, true) => "┓",
                    (_, true, true, _) => "┗",
                    (_, true, _, true) => "┛",
                    (true, _, _, _) | (_, true, _, _) => "━",
                    (_, _, true, _) | (_, _, _, true) => "┃",
                    _ => "▓",
                }
            };
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    view: &Viewport,
) -> std::io::Result<()> {
    let col = view.col(projectile.x);
    let row = view.row(projectile.y);
    if view.in_play(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Auto-assist banner ────────────────────────────────────────────────────────

fn draw_assist_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    now: Duration,
    view: &Viewport,
) -> std::io::Result<()> {
    let Some(left) = state.controller.assist_remaining(now) else {
        return Ok(());
    };
    let elapsed = state.rules.assist_duration().saturating_sub(left);
    if elapsed.as_secs_f32() >= ASSIST_BANNER_SECS {
        return Ok(());
    }
    let msg = format!("Auto Shoot for {} seconds", state.rules.assist_secs);
    let col = (view.cols / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.rows / 2))?;
    out.queue(style::SetForegroundColor(C_HUD_ASSIST))?;
    out.queue(Print(&msg))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("Press R to Restart", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
