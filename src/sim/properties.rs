//! Property tests for the simulation invariants

use proptest::prelude::*;

use super::*;
use crate::consts::*;
use crate::lane_y;
use crate::settings::CollisionPolicy;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn on_grid(player: &Player) -> bool {
    let col = player.pos.x / CELL_WIDTH;
    let row = (player.pos.y - ROW_OFFSET) / CELL_HEIGHT;
    col.fract() == 0.0
        && row.fract() == 0.0
        && (0.0..=4.0).contains(&col)
        && (0.0..=4.0).contains(&row)
}

proptest! {
    #[test]
    fn player_never_leaves_board(moves in prop::collection::vec(direction(), 0..64)) {
        let mut player = Player::default();
        for direction in moves {
            player.handle_input(direction);
            prop_assert!(player.pos.x >= 0.0 && player.pos.x <= PLAYER_MAX_X);
            prop_assert!(player.pos.y >= GOAL_ROW_Y && player.pos.y <= PLAYER_START_Y);
            prop_assert!(on_grid(&player));
        }
    }

    #[test]
    fn enemy_wrap_never_goes_below_respawn(
        dts in prop::collection::vec(0.0f32..2.0, 1..200),
        start in -404.0f32..600.0,
        speed in 1.0f32..800.0,
    ) {
        let mut enemy = Enemy::new(start, 1, speed);
        for dt in dts {
            let before = enemy.pos.x;
            enemy.update(dt);
            prop_assert!(enemy.pos.x >= before.min(ENEMY_RESPAWN_X));
            prop_assert_eq!(enemy.pos.y, lane_y(1));
        }
    }

    #[test]
    fn each_overlapping_enemy_costs_one_life(
        col in 0u32..5,
        offsets in prop::collection::vec(-150.0f32..150.0, 1..3),
    ) {
        let mut state = GameState::new();
        for enemy in &mut state.enemies {
            enemy.pos.x = -10_000.0;
        }
        let player_x = col as f32 * CELL_WIDTH;
        state.player.pos = glam::Vec2::new(player_x, lane_y(2));
        // Lane 2 holds roster entries 3 and 4
        for (slot, offset) in [3usize, 4].into_iter().zip(&offsets) {
            state.enemies[slot].pos.x = player_x + offset;
        }

        let expected = hits(&state.enemies, &state.player).len() as u8;
        update_player(&mut state, CollisionPolicy::PerEnemy);

        prop_assert_eq!(state.player.lives, STARTING_LIVES - expected);
        if expected > 0 {
            prop_assert_eq!(state.player.pos, Player::start_pos());
        }
        let lost = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count();
        prop_assert_eq!(lost, expected as usize);
    }

    #[test]
    fn won_iff_on_goal_row_after_update(
        moves in prop::collection::vec(direction(), 0..16),
    ) {
        let mut state = GameState::new();
        for enemy in &mut state.enemies {
            enemy.pos.x = -10_000.0;
            enemy.speed = 0.0;
        }
        for direction in moves {
            state.queue_input(direction);
            tick(&mut state, 1.0 / 60.0, CollisionPolicy::Sequential);
            if state.player.has_won {
                break;
            }
            prop_assert!(!state.player.on_goal_row());
        }
        prop_assert_eq!(state.player.has_won, state.player.on_goal_row());
    }
}
