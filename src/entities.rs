//! All game entity types and the constants that size them.
//!
//! Entities carry only small, local update methods.  Anything that needs
//! more than one entity (tick ordering, collisions, lives accounting) lives
//! in `compute`.

use rand::Rng;

// ── Play field ────────────────────────────────────────────────────────────────

pub const WIDTH: i32 = 800;
pub const HEIGHT: i32 = 600;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_W: i32 = 60;
pub const PLAYER_H: i32 = 20;
pub const PLAYER_SPEED: i32 = 8;
pub const PLAYER_Y: i32 = HEIGHT - 80;
pub const START_LIVES: u32 = 3;

// ── Projectile ────────────────────────────────────────────────────────────────

pub const BULLET_W: i32 = 4;
pub const BULLET_H: i32 = 12;
pub const BULLET_SPEED: i32 = 12;

// ── Enemy grid ────────────────────────────────────────────────────────────────

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 8;
pub const ENEMY_W: i32 = 50;
pub const ENEMY_H: i32 = 20;
pub const ENEMY_SPACING_X: i32 = 20;
pub const ENEMY_SPACING_Y: i32 = 20;
pub const ENEMY_START_X: i32 = 80;
pub const ENEMY_START_Y: i32 = 60;
/// The group reverses once its bounding box crosses this distance from a wall.
pub const WALL_MARGIN: i32 = 20;

pub const SCORE_PER_KILL: u32 = 10;
pub const MAX_LEVEL: usize = 5;

// ── Cosmetics ─────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 80;
pub const STAR_SIZE: i32 = 2;
pub const MAX_EXPLOSIONS: usize = 20;
/// Lifetime of an explosion in ticks (~0.3 s at 60 Hz).
pub const EXPLOSION_TTL: u32 = 20;
pub const EXPLOSION_BASE_RADIUS: i32 = 5;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in screen pixels (origin top-left, +Y down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Half-open overlap test: touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    /// A player centred at the bottom of the field with no movement intent.
    pub fn new() -> Self {
        Player {
            x: WIDTH / 2 - PLAYER_W / 2,
            y: PLAYER_Y,
            moving_left: false,
            moving_right: false,
        }
    }

    pub fn set_intent(&mut self, left: bool, right: bool) {
        self.moving_left = left;
        self.moving_right = right;
    }

    /// Apply the current intents.  Both at once compose and usually cancel.
    pub fn update(&mut self) {
        if self.moving_left {
            self.x = (self.x - PLAYER_SPEED).max(0);
        }
        if self.moving_right {
            self.x = (self.x + PLAYER_SPEED).min(WIDTH - PLAYER_W);
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_W, PLAYER_H)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

/// The single upward shot.  `active == false` means there is none in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projectile {
    pub active: bool,
    pub x: i32,
    pub y: i32,
}

impl Projectile {
    /// Launch from the top centre of `player`.  Ignored while already active;
    /// returns whether a shot was actually launched.
    pub fn fire(&mut self, player: &Player) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.x = player.x + PLAYER_W / 2 - BULLET_W / 2;
        self.y = player.y - BULLET_H;
        true
    }

    /// Move up one step.  Returns `true` when the shot has just left the top
    /// edge (a missed shot); the projectile is deactivated in that case.
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.y -= BULLET_SPEED;
        if self.y + BULLET_H < 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_W, BULLET_H)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Stationary,
    Right,
}

impl Direction {
    /// Signed unit step: −1, 0 or +1.
    pub fn step(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Stationary => 0,
            Direction::Right => 1,
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Stationary => Direction::Stationary,
            Direction::Right => Direction::Left,
        }
    }
}

/// Shared horizontal motion of the whole enemy group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyMotion {
    pub offset_x: i32,
    pub direction: Direction,
    pub speed: i32,
}

impl Default for EnemyMotion {
    fn default() -> Self {
        EnemyMotion {
            offset_x: 0,
            direction: Direction::Stationary,
            speed: 0,
        }
    }
}

/// Which rectangle decides when the group bounces off a wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BoundsRule {
    /// All `GRID_COLS` columns, alive or not.
    #[default]
    FullGrid,
    /// Only the leftmost and rightmost columns that still hold a live enemy.
    LiveCells,
}

/// Fixed-size occupancy matrix.  Cell geometry is derived from the grid
/// constants plus the group's current offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyGrid {
    alive: [[bool; GRID_COLS]; GRID_ROWS],
}

impl EnemyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.alive = [[false; GRID_COLS]; GRID_ROWS];
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.alive[row][col]
    }

    pub fn set_alive(&mut self, row: usize, col: usize) {
        self.alive[row][col] = true;
    }

    pub fn kill(&mut self, row: usize, col: usize) {
        self.alive[row][col] = false;
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().flatten().filter(|&&a| a).count()
    }

    pub fn all_dead(&self) -> bool {
        self.alive.iter().flatten().all(|&a| !a)
    }

    /// Live cells as `(row, col)` in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GRID_ROWS)
            .flat_map(|r| (0..GRID_COLS).map(move |c| (r, c)))
            .filter(|&(r, c)| self.alive[r][c])
    }

    /// First and last column holding a live enemy, if any.
    pub fn live_column_span(&self) -> Option<(usize, usize)> {
        let occupied = |c: usize| (0..GRID_ROWS).any(|r| self.alive[r][c]);
        let first = (0..GRID_COLS).find(|&c| occupied(c))?;
        let last = (0..GRID_COLS).rev().find(|&c| occupied(c))?;
        Some((first, last))
    }

    pub fn cell_rect(row: usize, col: usize, offset_x: i32) -> Rect {
        Rect::new(
            ENEMY_START_X + offset_x + col as i32 * (ENEMY_W + ENEMY_SPACING_X),
            ENEMY_START_Y + row as i32 * (ENEMY_H + ENEMY_SPACING_Y),
            ENEMY_W,
            ENEMY_H,
        )
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// Fall speed, 1..=3 pixels per tick.
    pub vy: i32,
}

impl Star {
    fn random(rng: &mut impl Rng) -> Self {
        Star {
            x: rng.gen_range(0..WIDTH),
            y: rng.gen_range(0..HEIGHT),
            vy: rng.gen_range(1..=3),
        }
    }
}

/// Decorative background.  Always exactly `STAR_COUNT` stars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut stars = Vec::with_capacity(STAR_COUNT);
        stars.extend((0..STAR_COUNT).map(|_| Star::random(rng)));
        Starfield { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Drop every star by its speed; stars past the bottom respawn on the
    /// top row with a fresh column and speed.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.y += star.vy;
            if star.y > HEIGHT {
                star.x = rng.gen_range(0..WIDTH);
                star.y = 0;
                star.vy = rng.gen_range(1..=3);
            }
        }
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    /// Remaining ticks; the slot is free at 0.
    pub ttl: u32,
}

impl Explosion {
    pub fn is_active(&self) -> bool {
        self.ttl > 0
    }

    /// Grows by one pixel per tick of age.
    pub fn radius(&self) -> i32 {
        EXPLOSION_BASE_RADIUS + (EXPLOSION_TTL - self.ttl.min(EXPLOSION_TTL)) as i32
    }
}

/// Fixed-capacity explosion slots.  Never grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplosionPool {
    slots: [Explosion; MAX_EXPLOSIONS],
}

impl ExplosionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the first free slot.  Returns `false` (and draws nothing) when
    /// every slot is busy.
    pub fn spawn(&mut self, x: i32, y: i32) -> bool {
        match self.slots.iter_mut().find(|s| !s.is_active()) {
            Some(slot) => {
                *slot = Explosion {
                    x,
                    y,
                    ttl: EXPLOSION_TTL,
                };
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self) {
        for slot in self.slots.iter_mut().filter(|s| s.is_active()) {
            slot.ttl -= 1;
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Explosion> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn slots(&self) -> &[Explosion] {
        &self.slots
    }
}

// ── Game phase & master state ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for Enter.
    Idle,
    Playing,
    Ended { won: bool },
}

/// The entire game state.  Cloneable so the pure update functions in
/// `compute` and `input` can hand back a new copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub projectile: Projectile,
    /// Set by Space, consumed by the next `Playing` tick.
    pub fire_requested: bool,
    pub grid: EnemyGrid,
    pub motion: EnemyMotion,
    pub level: usize,
    pub score: u32,
    pub lives: u32,
    pub stars: Starfield,
    pub explosions: ExplosionPool,
    pub bounds_rule: BoundsRule,
    pub frame: u64,
}
