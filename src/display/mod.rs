//! Rendering layer.
//!
//! `render` receives a `Canvas` and an immutable view of the game state.  No
//! game logic is performed; this module only translates state into draw
//! calls in pixel space.  `terminal` provides the crossterm-backed canvas.

pub mod terminal;

use crate::entities::{
    EnemyGrid, GamePhase, GameState, BULLET_H, BULLET_W, ENEMY_H, ENEMY_W, HEIGHT, PLAYER_H,
    PLAYER_W, STAR_SIZE, WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const ORANGE: Rgb = Rgb(255, 200, 0);
}

const C_BACKGROUND: Rgb = Rgb::BLACK;
const C_STAR: Rgb = Rgb::WHITE;
const C_TEXT: Rgb = Rgb::WHITE;
const C_PLAYER: Rgb = Rgb::GREEN;
const C_BULLET: Rgb = Rgb::YELLOW;
const C_ENEMY: Rgb = Rgb::RED;
const C_EXPLOSION: Rgb = Rgb::ORANGE;

// ── Fonts ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Plain,
    Bold,
}

/// A sans-serif face at a pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub style: FontStyle,
    pub size: i32,
}

impl Font {
    pub const TITLE: Font = Font {
        style: FontStyle::Bold,
        size: 40,
    };
    pub const SUBTITLE: Font = Font {
        style: FontStyle::Plain,
        size: 24,
    };
    pub const HUD: Font = Font {
        style: FontStyle::Bold,
        size: 20,
    };
}

// ── Rasterizer contract ───────────────────────────────────────────────────────

/// The drawing surface the renderer needs.  Coordinates are pixels in the
/// `WIDTH × HEIGHT` field.  Text is anchored at its baseline, left edge.
pub trait Canvas {
    fn set_color(&mut self, color: Rgb);
    fn set_font(&mut self, font: Font);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Fill the ellipse inscribed in the given box.
    fn fill_oval(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Advance width of `text` in the current font.
    fn string_width(&self, text: &str) -> i32;
    fn draw_string(&mut self, text: &str, x: i32, y: i32);
}

pub const TITLE_TEXT: &str = "Space Invaders";
pub const START_PROMPT: &str = "Press Enter to start";
pub const WIN_TEXT: &str = "YOU WIN!";
pub const LOSE_TEXT: &str = "GAME OVER";
pub const RESTART_PROMPT: &str = "Press Enter to play again";

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame, back to front.
pub fn render<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_BACKGROUND);
    canvas.fill_rect(0, 0, WIDTH, HEIGHT);

    draw_stars(canvas, state);

    if state.phase == GamePhase::Idle {
        draw_title_screen(canvas);
        return;
    }

    draw_hud(canvas, state);
    draw_player(canvas, state);
    draw_projectile(canvas, state);
    draw_enemies(canvas, state);
    draw_explosions(canvas, state);

    if let GamePhase::Ended { won } = state.phase {
        draw_end_banner(canvas, won);
    }
}

fn draw_centered<C: Canvas>(canvas: &mut C, text: &str, y: i32) {
    let w = canvas.string_width(text);
    canvas.draw_string(text, (WIDTH - w) / 2, y);
}

// ── Background & screens ──────────────────────────────────────────────────────

fn draw_stars<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_STAR);
    for star in state.stars.stars() {
        canvas.fill_rect(star.x, star.y, STAR_SIZE, STAR_SIZE);
    }
}

fn draw_title_screen<C: Canvas>(canvas: &mut C) {
    canvas.set_color(C_TEXT);
    canvas.set_font(Font::TITLE);
    draw_centered(canvas, TITLE_TEXT, HEIGHT / 2 - 40);

    canvas.set_font(Font::SUBTITLE);
    draw_centered(canvas, START_PROMPT, HEIGHT / 2 + 10);
}

fn draw_end_banner<C: Canvas>(canvas: &mut C, won: bool) {
    let msg_y = HEIGHT / 2;
    canvas.set_color(C_TEXT);
    canvas.set_font(Font::TITLE);
    draw_centered(canvas, if won { WIN_TEXT } else { LOSE_TEXT }, msg_y);

    canvas.set_font(Font::SUBTITLE);
    draw_centered(canvas, RESTART_PROMPT, msg_y + 40);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_TEXT);
    canvas.set_font(Font::HUD);

    canvas.draw_string(&format!("Score: {}", state.score), 20, 30);
    canvas.draw_string(&format!("Lives: {}", state.lives), WIDTH - 140, 30);
    draw_centered(canvas, &format!("Level: {}", state.level), 30);
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_PLAYER);
    canvas.fill_rect(state.player.x, state.player.y, PLAYER_W, PLAYER_H);
}

fn draw_projectile<C: Canvas>(canvas: &mut C, state: &GameState) {
    let shot = &state.projectile;
    if shot.active {
        canvas.set_color(C_BULLET);
        canvas.fill_rect(shot.x, shot.y, BULLET_W, BULLET_H);
    }
}

fn draw_enemies<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_ENEMY);
    for (r, c) in state.grid.alive_cells() {
        let rect = EnemyGrid::cell_rect(r, c, state.motion.offset_x);
        canvas.fill_rect(rect.x, rect.y, ENEMY_W, ENEMY_H);
    }
}

fn draw_explosions<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.set_color(C_EXPLOSION);
    for boom in state.explosions.active() {
        let r = boom.radius();
        canvas.fill_oval(boom.x - r, boom.y - r, r * 2, r * 2);
    }
}
