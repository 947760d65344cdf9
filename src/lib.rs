//! Bug Crossing - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Entity state, enemy motion, player control, collisions
//! - `driver`: Frame loop state machine (Idle / Running / Won / Lost)
//! - `renderer`: Render surface abstraction and draw ordering
//! - `assets`: Sprite manifest and load-readiness gate
//! - `platform`: Browser bindings (canvas, DOM HUD, keyboard)
//! - `settings`: Persisted player preferences

pub mod assets;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{GameLoop, LoopPhase};
pub use settings::{CollisionPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Board dimensions in cells
    pub const BOARD_COLUMNS: u32 = 5;
    pub const BOARD_ROWS: u32 = 6;

    /// Cell size in board units
    pub const CELL_WIDTH: f32 = 101.0;
    pub const CELL_HEIGHT: f32 = 83.0;

    /// Vertical offset applied to entity rows so sprites sit on their tile
    pub const ROW_OFFSET: f32 = 55.0;

    /// Canvas size in pixels
    pub const CANVAS_WIDTH: u32 = 505;
    pub const CANVAS_HEIGHT: u32 = 606;

    /// Enemies wrap once x reaches this edge
    pub const ENEMY_WRAP_X: f32 = CELL_WIDTH * BOARD_COLUMNS as f32;
    /// Enemies re-enter one cell left of the board origin
    pub const ENEMY_RESPAWN_X: f32 = -CELL_WIDTH;

    /// Topmost row: reaching it wins the round
    pub const GOAL_ROW_Y: f32 = ROW_OFFSET;

    /// Player start cell (column 2, row 4)
    pub const PLAYER_START_X: f32 = CELL_WIDTH * 2.0;
    pub const PLAYER_START_Y: f32 = CELL_HEIGHT * 4.0 + ROW_OFFSET;

    /// Movement bounds, checked before a step is applied
    pub const PLAYER_MAX_X: f32 = CELL_WIDTH * 4.0;
    pub const PLAYER_UP_LIMIT: f32 = CELL_HEIGHT;
    pub const PLAYER_DOWN_LIMIT: f32 = CELL_HEIGHT * 4.0;

    /// Lives at the start of a round and after replay
    pub const STARTING_LIVES: u8 = 3;

    /// Fixed roster: (start x, lane index, speed in units/second)
    pub const ENEMY_ROSTER: [(f32, u32, f32); 6] = [
        (-CELL_WIDTH, 0, 600.0),
        (-CELL_WIDTH, 1, 400.0),
        (-CELL_WIDTH * 4.0, 1, 400.0),
        (-CELL_WIDTH, 2, 350.0),
        (-CELL_WIDTH * 2.0, 2, 350.0),
        (-CELL_WIDTH, 3, 250.0),
    ];
}

/// Y coordinate of an entity standing in the given lane (0 = goal row)
#[inline]
pub fn lane_y(lane: u32) -> f32 {
    lane as f32 * consts::CELL_HEIGHT + consts::ROW_OFFSET
}

/// Top-left pixel of a background tile
#[inline]
pub fn tile_origin(col: u32, row: u32) -> (f32, f32) {
    (
        col as f32 * consts::CELL_WIDTH,
        row as f32 * consts::CELL_HEIGHT,
    )
}
