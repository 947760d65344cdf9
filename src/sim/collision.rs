//! Player vs. enemy hit testing
//!
//! Both entities move in whole lanes, so lane matching is exact equality on
//! y. Horizontally the hitbox is half a cell wide on each side: the bug's
//! right half-cell edge must pass the player's left edge, and the bug's
//! left edge must be short of the player's right half-cell edge.

use glam::Vec2;

use super::state::{Enemy, Player};
use crate::consts::CELL_WIDTH;

/// Half-cell hitbox width
pub const HITBOX_HALF_WIDTH: f32 = CELL_WIDTH / 2.0;

/// Same lane (exact)
#[inline]
pub fn same_lane(a: Vec2, b: Vec2) -> bool {
    a.y == b.y
}

/// Half-cell horizontal overlap between an enemy at `enemy_x` and the
/// player at `player_x`
#[inline]
pub fn overlaps_x(enemy_x: f32, player_x: f32) -> bool {
    enemy_x + HITBOX_HALF_WIDTH > player_x && enemy_x < player_x + HITBOX_HALF_WIDTH
}

/// Full hit test for one enemy
pub fn enemy_hits_player(enemy: &Enemy, player: &Player) -> bool {
    same_lane(enemy.pos, player.pos) && overlaps_x(enemy.pos.x, player.pos.x)
}

/// Indices of every enemy touching the player, in roster order
pub fn hits(enemies: &[Enemy], player: &Player) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy_hits_player(enemy, player))
        .map(|(i, _)| i)
        .collect()
}
