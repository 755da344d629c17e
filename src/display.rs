/// Rendering layer — all terminal drawing lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// arena.  No game logic is performed; this module only translates arena
/// pixels into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use slinger::entities::{ArenaState, Bullet, Enemy, EnemyBullet, Explosion, GameStatus, Rect};

/// Arena pixels covered by one terminal cell.
pub const CELL_W: i32 = 10;
pub const CELL_H: i32 = 20;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_LIVES: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_ENEMY_BULLET: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// One glyph per frame of the explosion strip.
const EXPLOSION_STRIP: [&str; 6] = ["·", "+", "*", "✶", "✸", "░"];

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, state)?;
    draw_player(out, state)?;
    for bullet in &state.bullets {
        draw_bullet(out, state, bullet)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, state, enemy)?;
    }
    for bullet in &state.enemy_bullets {
        draw_enemy_bullet(out, state, bullet)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, state, explosion)?;
    }
    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows(state).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

fn cols(state: &ArenaState) -> u16 {
    (state.config.width / CELL_W).max(0) as u16
}

fn rows(state: &ArenaState) -> u16 {
    (state.config.height / CELL_H).max(0) as u16
}

/// Cell rectangle covered by `r`, at least one cell in each direction.
/// Returns `(col, row, cols, rows)` in signed cells, unclipped.
fn cells(r: &Rect) -> (i32, i32, i32, i32) {
    let col = r.x.div_euclid(CELL_W);
    let row = r.y.div_euclid(CELL_H);
    let w = ((r.right() - 1).div_euclid(CELL_W) - col + 1).max(1);
    let h = ((r.bottom() - 1).div_euclid(CELL_H) - row + 1).max(1);
    (col, row, w, h)
}

/// Print `text` at a signed cell position, clipped to the screen.
fn put<W: Write>(
    out: &mut W,
    state: &ArenaState,
    col: i32,
    row: i32,
    text: &str,
) -> std::io::Result<()> {
    if row < 0 || row >= rows(state) as i32 {
        return Ok(());
    }
    let max_col = cols(state) as i32;
    let visible: String = text
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let c = col + *i as i32;
            c >= 0 && c < max_col
        })
        .map(|(_, ch)| ch)
        .collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
    out.queue(Print(visible))?;
    Ok(())
}

/// `left` + `fill` repeated + `right`, exactly `width` chars wide.
fn span(width: i32, left: char, fill: char, right: char) -> String {
    match width {
        w if w <= 0 => String::new(),
        1 => fill.to_string(),
        w => {
            let mut s = String::with_capacity(w as usize * 3);
            s.push(left);
            s.extend(std::iter::repeat(fill).take((w - 2) as usize));
            s.push(right);
            s
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Sparse star field scrolling down with `background_y`.
fn draw_background<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    let height = state.config.height.max(1);
    out.queue(style::SetForegroundColor(C_STAR))?;
    for row in 0..rows(state) as i32 {
        for col in 0..cols(state) as i32 {
            if (col * 7 + row * 13) % 53 != 0 {
                continue;
            }
            let y = (row * CELL_H + state.background_y).rem_euclid(height);
            put(out, state, col, y / CELL_H, ".")?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    // Sprite, stretched to the player's box:
    //    ▲      ← tip
    //   /█\     ← hull (repeated)
    //   ▀▀▀     ← exhaust
    let (col, row, w, h) = cells(&state.player.bounds());
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    put(out, state, col + w / 2, row, "▲")?;
    for dy in 1..h.saturating_sub(1) {
        put(out, state, col, row + dy, &span(w, '/', '█', '\\'))?;
    }
    if h > 1 {
        put(out, state, col, row + h - 1, &span(w, '▀', '▀', '▀'))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, state: &ArenaState, enemy: &Enemy) -> std::io::Result<()> {
    // Row 0:  <▼▼>
    // Row 1:  [__]
    let (col, row, w, h) = cells(&enemy.bounds());
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    put(out, state, col, row, &span(w, '<', '▼', '>'))?;
    for dy in 1..h {
        put(out, state, col, row + dy, &span(w, '[', '_', ']'))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, state: &ArenaState, bullet: &Bullet) -> std::io::Result<()> {
    let (col, row, _, h) = cells(&bullet.bounds());
    out.queue(style::SetForegroundColor(C_BULLET))?;
    for dy in 0..h {
        put(out, state, col, row + dy, "║")?;
    }
    Ok(())
}

fn draw_enemy_bullet<W: Write>(
    out: &mut W,
    state: &ArenaState,
    bullet: &EnemyBullet,
) -> std::io::Result<()> {
    let (col, row, _, _) = cells(&bullet.bounds());
    out.queue(style::SetForegroundColor(C_ENEMY_BULLET))?;
    put(out, state, col, row, "↓")
}

/// Current strip frame, drawn `explosion_size` square and centred on the
/// anchor.
fn draw_explosion<W: Write>(
    out: &mut W,
    state: &ArenaState,
    explosion: &Explosion,
) -> std::io::Result<()> {
    let Some(glyph) = EXPLOSION_STRIP.get(explosion.frame as usize) else {
        return Ok(());
    };
    let size = state.config.explosion_size;
    let area = Rect::new(explosion.x - size / 2, explosion.y - size / 2, size, size);
    let (col, row, w, h) = cells(&area);
    let line = glyph.repeat(w as usize);
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for dy in 0..h {
        put(out, state, col, row + dy, &line)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    // Score — left
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    put(out, state, 1, 0, &format!("Score: {}", state.score))?;

    // Lives — right, one ship icon per life
    let icons = "▲ ".repeat(state.player.lives as usize);
    let lives_text = format!("Lives: {}", icons.trim_end());
    let lx = cols(state) as i32 - lives_text.chars().count() as i32 - 1;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    put(out, state, lx, 0, &lives_text)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HINT))?;
    put(
        out,
        state,
        1,
        rows(state) as i32 - 1,
        "← → / A D : Move   SPACE : Shoot   Q : Quit",
    )
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &ArenaState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    Game  Over    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("Press Enter to Restart", Color::White),
    ];

    let cx = cols(state) as i32 / 2;
    let start_row = rows(state) as i32 / 2 - lines.len() as i32 / 2;

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx - msg.chars().count() as i32 / 2;
        out.queue(style::SetForegroundColor(*color))?;
        put(out, state, col, start_row + i as i32, msg)?;
    }

    Ok(())
}
