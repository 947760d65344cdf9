//! Rendering
//!
//! The game only ever blits whole sprites at board coordinates, so the
//! surface contract is a single `draw_image`. Layering is purely draw
//! order: background tiles, then enemies, then the player.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::assets::Sprite;
use crate::consts::{BOARD_COLUMNS, BOARD_ROWS};
use crate::sim::GameState;
use crate::tile_origin;

/// Something sprites can be drawn onto
pub trait RenderSurface {
    /// Wipe the previous frame
    fn clear(&mut self);
    /// Draw `sprite` with its top-left corner at (x, y)
    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32);
}

/// Tile used for each board row, top to bottom
pub const ROW_SPRITES: [Sprite; BOARD_ROWS as usize] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

/// Draw the static background grid
pub fn render_board(surface: &mut impl RenderSurface) {
    for (row, sprite) in ROW_SPRITES.iter().enumerate() {
        for col in 0..BOARD_COLUMNS {
            let (x, y) = tile_origin(col, row as u32);
            surface.draw_image(*sprite, x, y);
        }
    }
}

/// Draw entities only: every enemy, then the player on top
pub fn render_entities(state: &GameState, surface: &mut impl RenderSurface) {
    for enemy in &state.enemies {
        surface.draw_image(enemy.sprite, enemy.pos.x, enemy.pos.y);
    }
    let player = &state.player;
    surface.draw_image(player.sprite, player.pos.x, player.pos.y);
}

/// Full frame
pub fn render(state: &GameState, surface: &mut impl RenderSurface) {
    surface.clear();
    render_board(surface);
    render_entities(state, surface);
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub sprite: Sprite,
    pub x: f32,
    pub y: f32,
}

/// Surface that keeps the last frame's draw calls instead of drawing.
/// Used by the headless native runner and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub frames: u64,
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32) {
        self.calls.push(DrawCall { sprite, x, y });
    }
}
