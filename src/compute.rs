//! Pure game-logic functions.
//!
//! Every public entry point takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  The only randomness is the starfield, fed by the injected RNG.

use rand::Rng;

use crate::entities::{
    BoundsRule, EnemyGrid, EnemyMotion, ExplosionPool, GamePhase, GameState, Player, Projectile,
    Starfield, ENEMY_SPACING_X, ENEMY_START_X, ENEMY_W, GRID_COLS, MAX_LEVEL, SCORE_PER_KILL,
    START_LIVES, WALL_MARGIN, WIDTH,
};
use crate::level::{configure_level, is_tutorial};

// ── Constructors ──────────────────────────────────────────────────────────────

/// A fresh process: title screen, tutorial layout already in place.
pub fn init_state(rng: &mut impl Rng, bounds_rule: BoundsRule) -> GameState {
    let mut state = GameState {
        phase: GamePhase::Idle,
        player: Player::new(),
        projectile: Projectile::default(),
        fire_requested: false,
        grid: EnemyGrid::new(),
        motion: EnemyMotion::default(),
        level: 0,
        score: 0,
        lives: START_LIVES,
        stars: Starfield::new(rng),
        explosions: ExplosionPool::new(),
        bounds_rule,
        frame: 0,
    };
    init_level(&mut state, 0);
    state
}

/// Install `level`'s enemy block and motion.  `level` must be `<= MAX_LEVEL`.
pub fn init_level(state: &mut GameState, level: usize) {
    state.level = level;
    configure_level(&mut state.grid, &mut state.motion, level);
}

// ── Phase transitions ─────────────────────────────────────────────────────────

/// `Idle → Playing`.  Any other phase is returned unchanged.
pub fn start_game(state: &GameState) -> GameState {
    if state.phase != GamePhase::Idle {
        return state.clone();
    }
    log::info!("game started");
    GameState {
        phase: GamePhase::Playing,
        ..state.clone()
    }
}

/// `Ended → Playing` with everything but the cosmetics reset to a fresh start.
pub fn reset_game(state: &GameState) -> GameState {
    if !matches!(state.phase, GamePhase::Ended { .. }) {
        return state.clone();
    }
    let mut next = GameState {
        phase: GamePhase::Playing,
        player: Player::new(),
        projectile: Projectile::default(),
        fire_requested: false,
        score: 0,
        lives: START_LIVES,
        ..state.clone()
    };
    init_level(&mut next, 0);
    log::info!("game reset");
    next
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame, in a fixed order.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.frame += 1;

    // ── Cosmetics run in every phase ─────────────────────────────────────────
    next.stars.update(rng);
    next.explosions.update();

    if next.phase != GamePhase::Playing {
        return next;
    }

    // A shot requested since the last tick leaves from where the player was
    // when Space went down.
    if std::mem::take(&mut next.fire_requested) {
        next.projectile.fire(&next.player);
    }

    // ── Player ───────────────────────────────────────────────────────────────
    next.player.update();

    // ── Projectile; a miss costs a life ──────────────────────────────────────
    if next.projectile.advance() {
        apply_missed_shot(&mut next);
    }

    // ── Enemy motion ─────────────────────────────────────────────────────────
    update_enemy_motion(&mut next);

    // ── Collision ────────────────────────────────────────────────────────────
    check_collision(&mut next);

    // ── Level clear, possibly the final one ──────────────────────────────────
    if next.grid.all_dead() {
        advance_level(&mut next);
    }

    next
}

fn apply_missed_shot(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::debug!("missed shot, {} lives left", state.lives);
    if state.lives == 0 {
        state.phase = GamePhase::Ended { won: false };
        log::info!("game over at level {} with score {}", state.level, state.score);
    }
}

fn advance_level(state: &mut GameState) {
    if state.level < MAX_LEVEL {
        init_level(state, state.level + 1);
        log::info!("advanced to level {}", state.level);
    } else {
        state.phase = GamePhase::Ended { won: true };
        log::info!("all levels cleared with score {}", state.score);
    }
}

// ── Enemy motion ──────────────────────────────────────────────────────────────

/// Left and right edge of the box used for wall bounces.
pub fn group_bounds(grid: &EnemyGrid, motion: &EnemyMotion, rule: BoundsRule) -> (i32, i32) {
    let (first, last) = match rule {
        BoundsRule::FullGrid => (0, GRID_COLS - 1),
        BoundsRule::LiveCells => grid.live_column_span().unwrap_or((0, GRID_COLS - 1)),
    };
    let pitch = ENEMY_W + ENEMY_SPACING_X;
    let left = ENEMY_START_X + motion.offset_x + first as i32 * pitch;
    let right = ENEMY_START_X + motion.offset_x + last as i32 * pitch + ENEMY_W;
    (left, right)
}

/// Shift the group and flip direction once it crosses a wall margin.
/// The tutorial level never moves; enemies never descend.
pub fn update_enemy_motion(state: &mut GameState) {
    if is_tutorial(state.level) {
        return;
    }
    let motion = &mut state.motion;
    motion.offset_x += motion.speed * motion.direction.step();

    let (left, right) = group_bounds(&state.grid, motion, state.bounds_rule);
    if left < WALL_MARGIN || right > WIDTH - WALL_MARGIN {
        motion.direction = motion.direction.reversed();
    }
}

// ── Collision & scoring ───────────────────────────────────────────────────────

/// Resolve the projectile against the grid in row-major order.  At most one
/// enemy dies per shot; returns the `(row, col)` that was hit.
pub fn check_collision(state: &mut GameState) -> Option<(usize, usize)> {
    if !state.projectile.active {
        return None;
    }
    let shot = state.projectile.rect();
    let offset_x = state.motion.offset_x;

    let (row, col) = state
        .grid
        .alive_cells()
        .find(|&(r, c)| EnemyGrid::cell_rect(r, c, offset_x).intersects(&shot))?;

    state.grid.kill(row, col);
    state.projectile.active = false;
    state.score += SCORE_PER_KILL;

    let (cx, cy) = EnemyGrid::cell_rect(row, col, offset_x).center();
    if !state.explosions.spawn(cx, cy) {
        log::trace!("explosion pool full, dropping effect at ({cx}, {cy})");
    }
    Some((row, col))
}

pub fn all_enemies_dead(state: &GameState) -> bool {
    state.grid.all_dead()
}
