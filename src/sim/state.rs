//! Game state and entity records
//!
//! Everything the loop mutates lives in [`GameState`]: the player, the
//! fixed enemy roster, queued input and the events emitted for the HUD.

use glam::Vec2;

use super::input::{Direction, InputQueue};
use crate::assets::Sprite;
use crate::consts::*;
use crate::lane_y;

/// Signals for the UI layer (hearts, modals)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player was hit
    LifeLost { lives_remaining: u8 },
    /// Last life lost
    GameOver,
    /// Player reached the goal row
    Won { lives_remaining: u8 },
}

/// A bug running along one lane
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Horizontal speed in units/second
    pub speed: f32,
    pub sprite: Sprite,
}

impl Enemy {
    pub fn new(x: f32, lane: u32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, lane_y(lane)),
            speed,
            sprite: Sprite::EnemyBug,
        }
    }

    /// Advance along the lane, or wrap back off-screen left once past the
    /// right edge. `dt` is not clamped.
    pub fn update(&mut self, dt: f32) {
        if self.pos.x < ENEMY_WRAP_X {
            self.pos.x += self.speed * dt;
        } else {
            self.pos.x = ENEMY_RESPAWN_X;
        }
    }
}

/// The six bugs of the level, in draw/collision order
pub fn default_roster() -> Vec<Enemy> {
    ENEMY_ROSTER
        .iter()
        .map(|&(x, lane, speed)| Enemy::new(x, lane, speed))
        .collect()
}

/// The player token
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u8,
    pub has_won: bool,
    pub sprite: Sprite,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::start_pos(),
            lives: STARTING_LIVES,
            has_won: false,
            sprite: Sprite::CharBoy,
        }
    }
}

impl Player {
    pub fn start_pos() -> Vec2 {
        Vec2::new(PLAYER_START_X, PLAYER_START_Y)
    }

    /// Step one cell if the target stays on the board; otherwise ignored
    pub fn handle_input(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.pos.x > 0.0 {
                    self.pos.x -= CELL_WIDTH;
                }
            }
            Direction::Up => {
                if self.pos.y > PLAYER_UP_LIMIT {
                    self.pos.y -= CELL_HEIGHT;
                }
            }
            Direction::Right => {
                if self.pos.x < PLAYER_MAX_X {
                    self.pos.x += CELL_WIDTH;
                }
            }
            Direction::Down => {
                if self.pos.y < PLAYER_DOWN_LIMIT {
                    self.pos.y += CELL_HEIGHT;
                }
            }
        }
    }

    /// Back to the start cell. Lives are untouched.
    pub fn reset_position(&mut self) {
        self.pos = Self::start_pos();
    }

    /// Lose one life (floor 0); returns lives left
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn on_goal_row(&self) -> bool {
        self.pos.y == GOAL_ROW_Y
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    /// Fixed roster, never resized at runtime
    pub enemies: Vec<Enemy>,
    /// Directions waiting for the next tick
    pub input: InputQueue,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    /// Running tick counter
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            enemies: default_roster(),
            input: InputQueue::default(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Queue a move for the next tick
    pub fn queue_input(&mut self, direction: Direction) {
        self.input.push(direction);
    }

    /// Start a new round: player to the start cell, win flag cleared,
    /// pending input dropped. Lives and enemies are kept.
    pub fn reset(&mut self) {
        self.player.has_won = false;
        self.player.reset_position();
        self.input.clear();
    }

    /// Replay after a win or loss: full lives, then a regular reset
    pub fn replay(&mut self) {
        self.player.lives = STARTING_LIVES;
        self.reset();
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_layout() {
        let roster = default_roster();
        assert_eq!(roster.len(), 6);
        let lanes: Vec<f32> = roster.iter().map(|e| e.pos.y).collect();
        assert_eq!(lanes, vec![55.0, 138.0, 138.0, 221.0, 221.0, 304.0]);
        assert_eq!(roster[2].pos.x, -404.0);
        assert_eq!(roster[0].speed, 600.0);
    }

    #[test]
    fn test_enemy_wraps_on_following_update() {
        let mut enemy = Enemy::new(400.0, 0, 600.0);
        enemy.update(0.2);
        assert!((enemy.pos.x - 520.0).abs() < 1e-3);
        enemy.update(0.2);
        assert_eq!(enemy.pos.x, -101.0);
    }

    #[test]
    fn test_enemy_resets_at_exact_edge() {
        let mut enemy = Enemy::new(505.0, 1, 400.0);
        enemy.update(0.016);
        assert_eq!(enemy.pos.x, ENEMY_RESPAWN_X);
    }

    #[test]
    fn test_enemy_lane_never_changes() {
        let mut enemy = Enemy::new(-101.0, 2, 350.0);
        for _ in 0..500 {
            enemy.update(0.05);
            assert_eq!(enemy.pos.y, 221.0);
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut enemy = Enemy::new(10.0, 3, 250.0);
        enemy.update(0.0);
        assert_eq!(enemy.pos.x, 10.0);
    }

    #[test]
    fn test_four_ups_reach_goal_row() {
        let mut player = Player::default();
        assert_eq!(player.pos, Vec2::new(202.0, 387.0));
        for _ in 0..4 {
            player.handle_input(Direction::Up);
        }
        assert_eq!(player.pos.y, 55.0);
        assert!(player.on_goal_row());

        // Already at the top
        player.handle_input(Direction::Up);
        assert_eq!(player.pos.y, 55.0);
    }

    #[test]
    fn test_edges_ignore_moves() {
        let mut player = Player::default();
        player.handle_input(Direction::Down);
        assert_eq!(player.pos.y, 387.0);

        for _ in 0..5 {
            player.handle_input(Direction::Left);
        }
        assert_eq!(player.pos.x, 0.0);

        for _ in 0..5 {
            player.handle_input(Direction::Right);
        }
        assert_eq!(player.pos.x, 404.0);
    }

    #[test]
    fn test_lose_life_floors_at_zero() {
        let mut player = Player::default();
        assert_eq!(player.lose_life(), 2);
        assert_eq!(player.lose_life(), 1);
        assert_eq!(player.lose_life(), 0);
        assert_eq!(player.lose_life(), 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new();
        state.player.pos = Vec2::new(0.0, 55.0);
        state.player.has_won = true;
        state.player.lives = 2;
        state.queue_input(Direction::Left);

        state.reset();
        let once = (state.player.pos, state.player.has_won, state.player.lives);
        state.reset();
        let twice = (state.player.pos, state.player.has_won, state.player.lives);

        assert_eq!(once, twice);
        assert_eq!(once, (Player::start_pos(), false, 2));
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_replay_restores_lives() {
        let mut state = GameState::new();
        state.player.lives = 0;
        state.player.pos.x = 0.0;
        state.replay();
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert_eq!(state.player.pos, Player::start_pos());
    }

    #[test]
    fn test_huge_dt_is_not_clamped() {
        // A long tab stall still moves the bug by speed * dt in one step
        let mut enemy = Enemy::new(-101.0, 0, 600.0);
        enemy.update(30.0);
        assert_eq!(enemy.pos.x, 17_899.0);
        enemy.update(30.0);
        assert_eq!(enemy.pos.x, ENEMY_RESPAWN_X);
    }
}
