//! Per-frame simulation step
//!
//! Order inside a tick: queued input, every enemy, then the player's
//! collision and goal checks.

use super::collision::{enemy_hits_player, hits};
use super::state::{GameEvent, GameState, Player};
use crate::settings::CollisionPolicy;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32, policy: CollisionPolicy) {
    state.time_ticks += 1;

    let moves: Vec<_> = state.input.drain().collect();
    for direction in moves {
        state.player.handle_input(direction);
    }

    for enemy in &mut state.enemies {
        enemy.update(dt);
    }

    update_player(state, policy);
}

/// Collision pass followed by the goal-row check
pub fn update_player(state: &mut GameState, policy: CollisionPolicy) {
    let GameState {
        player,
        enemies,
        events,
        ..
    } = state;

    match policy {
        CollisionPolicy::Sequential => {
            for enemy in enemies.iter() {
                if enemy_hits_player(enemy, player) {
                    take_hit(player, events);
                }
            }
        }
        CollisionPolicy::PerEnemy => {
            for _ in hits(enemies, player) {
                if player.is_dead() {
                    break;
                }
                take_hit(player, events);
            }
        }
    }

    // Collisions reset the player to the start row, so this only sees the
    // goal row if the player survived the pass.
    if player.on_goal_row() && !player.has_won {
        player.has_won = true;
        log::info!("Goal reached with {} lives", player.lives);
        events.push(GameEvent::Won {
            lives_remaining: player.lives,
        });
    }
}

fn take_hit(player: &mut Player, events: &mut Vec<GameEvent>) {
    let lives_remaining = player.lose_life();
    log::debug!("Hit! {} lives left", lives_remaining);
    events.push(GameEvent::LifeLost { lives_remaining });
    if lives_remaining == 0 {
        events.push(GameEvent::GameOver);
    }
    player.reset_position();
}
