//! Per-level enemy layout and motion.

use crate::entities::{Direction, EnemyGrid, EnemyMotion, GRID_COLS, GRID_ROWS, MAX_LEVEL};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub rows_active: usize,
    pub cols_active: usize,
    pub direction: Direction,
    pub speed: i32,
}

const fn level(rows_active: usize, cols_active: usize, speed: i32) -> LevelConfig {
    LevelConfig {
        rows_active,
        cols_active,
        direction: if speed == 0 {
            Direction::Stationary
        } else {
            Direction::Right
        },
        speed,
    }
}

// ── Difficulty table ──────────────────────────────────────────────────────────

/// Level 0 is the stationary tutorial; afterwards speed is `1 + level`.
pub const LEVELS: [LevelConfig; MAX_LEVEL + 1] = [
    level(1, 4, 0),
    level(1, 6, 2),
    level(2, 6, 3),
    level(2, 8, 4),
    level(3, 6, 5),
    level(3, 8, 6),
];

/// Panics when `level > MAX_LEVEL`; callers never ask for one.
pub fn level_config(level: usize) -> LevelConfig {
    LEVELS[level]
}

pub fn is_tutorial(level: usize) -> bool {
    level == 0
}

/// Leftmost column of a horizontally centred block `cols_active` wide.
pub fn start_column(cols_active: usize) -> usize {
    (GRID_COLS - cols_active.min(GRID_COLS)) / 2
}

/// Repopulate `grid` with the level's centred block and reset `motion`.
pub fn configure_level(grid: &mut EnemyGrid, motion: &mut EnemyMotion, level: usize) {
    let config = level_config(level);
    let rows_active = config.rows_active.min(GRID_ROWS);
    let cols_active = config.cols_active.min(GRID_COLS);
    let start_col = start_column(cols_active);

    grid.clear();
    for r in 0..rows_active {
        for c in 0..cols_active {
            grid.set_alive(r, start_col + c);
        }
    }

    *motion = EnemyMotion {
        offset_x: 0,
        direction: config.direction,
        speed: config.speed,
    };
}

/// Score available on a level: one kill per cell of the active block.
pub fn level_score(level: usize) -> u32 {
    let config = level_config(level);
    (config.rows_active.min(GRID_ROWS) * config.cols_active.min(GRID_COLS)) as u32
        * crate::entities::SCORE_PER_KILL
}
