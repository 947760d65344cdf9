//! Frame loop driver
//!
//! The host calls [`GameLoop::frame`] from its animation-frame callback and
//! schedules another frame only while it returns [`LoopControl::Continue`].
//! Phases:
//!
//! ```text
//! Idle --start--> Running --lives == 0--> Lost
//!                    |                      |
//!                    +--goal reached--> Won |
//!                    ^                  |   |
//!                    +------replay------+---+
//! ```

use crate::consts::STARTING_LIVES;
use crate::renderer::{self, RenderSurface};
use crate::settings::{CollisionPolicy, Settings};
use crate::sim::{Direction, GameEvent, GameState, tick};

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting for assets / the first start
    Idle,
    /// Ticking every frame
    Running,
    /// Goal reached; halted until replay
    Won,
    /// Out of lives; halted until replay
    Lost,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Request another animation frame
    Continue,
    /// Stop scheduling
    Halt,
}

/// Receiver for HUD signals. The core never formats anything itself.
pub trait UiSink {
    fn emit(&mut self, event: GameEvent);

    /// A new round started with `lives` lives
    fn lives_reset(&mut self, _lives: u8) {}
}

/// Sink that discards everything
impl UiSink for () {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Frames kept by the FPS estimate
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second estimate
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest sample; the window spans
        // FPS_WINDOW - 1 frame intervals
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Owns the game session and its update/render cadence
pub struct GameLoop {
    state: GameState,
    settings: Settings,
    phase: LoopPhase,
    /// Timestamp (ms) of the previous frame; `None` right after start/replay
    last_time: Option<f64>,
    fps: FpsCounter,
}

impl GameLoop {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(),
            settings,
            phase: LoopPhase::Idle,
            last_time: None,
            fps: FpsCounter::default(),
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    /// Flip the multi-hit rule for the rest of the session; returns the new one
    pub fn toggle_collision_policy(&mut self) -> CollisionPolicy {
        let policy = self.settings.collision_policy.toggled();
        self.settings.collision_policy = policy;
        log::info!("Collision policy: {}", policy.as_str());
        policy
    }

    /// Queue a host key name. Returns true if it was a direction and got queued.
    pub fn queue_key(&mut self, key: &str) -> bool {
        if !self.is_running() {
            log::trace!("Dropping key {:?} while {:?}", key, self.phase);
            return false;
        }
        self.state.input.push_key(key)
    }

    /// Queue a player move. Ignored unless running.
    pub fn queue_input(&mut self, direction: Direction) {
        if self.is_running() {
            self.state.queue_input(direction);
        } else {
            log::trace!("Dropping {:?} while {:?}", direction, self.phase);
        }
    }

    /// Leave Idle. Returns true if the host should start scheduling frames.
    pub fn start(&mut self, ui: &mut impl UiSink) -> bool {
        if self.phase != LoopPhase::Idle {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return false;
        }
        self.state.reset();
        self.last_time = None;
        self.phase = LoopPhase::Running;
        ui.lives_reset(self.state.player.lives);
        log::info!("Game started");
        true
    }

    /// Restart after a win or loss with full lives.
    /// Returns true if the host should start scheduling frames.
    pub fn replay(&mut self, ui: &mut impl UiSink) -> bool {
        match self.phase {
            LoopPhase::Won | LoopPhase::Lost => {
                self.state.replay();
                self.last_time = None;
                self.phase = LoopPhase::Running;
                ui.lives_reset(STARTING_LIVES);
                log::info!("Replay started");
                true
            }
            phase => {
                log::warn!("replay() ignored in phase {:?}", phase);
                false
            }
        }
    }

    /// One animation frame at host time `now` (milliseconds)
    pub fn frame(
        &mut self,
        now: f64,
        surface: &mut impl RenderSurface,
        ui: &mut impl UiSink,
    ) -> LoopControl {
        if self.phase != LoopPhase::Running {
            return LoopControl::Halt;
        }

        let dt = match self.last_time {
            Some(last) => ((now - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);
        self.fps.record(now);

        tick(&mut self.state, dt, self.settings.collision_policy);
        renderer::render(&self.state, surface);

        for event in self.state.drain_events() {
            ui.emit(event);
        }

        if self.state.player.is_dead() {
            self.phase = LoopPhase::Lost;
            log::info!("Game over after {} ticks", self.state.time_ticks);
            LoopControl::Halt
        } else if self.state.player.has_won {
            self.phase = LoopPhase::Won;
            log::info!("Won with {} lives left", self.state.player.lives);
            LoopControl::Halt
        } else {
            LoopControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::lane_y;
    use crate::renderer::RecordingSurface;

    #[derive(Default)]
    struct EventLog {
        events: Vec<GameEvent>,
        resets: Vec<u8>,
    }

    impl UiSink for EventLog {
        fn emit(&mut self, event: GameEvent) {
            self.events.push(event);
        }

        fn lives_reset(&mut self, lives: u8) {
            self.resets.push(lives);
        }
    }

    fn running_loop() -> GameLoop {
        let mut game = GameLoop::new(Settings::default());
        assert!(game.start(&mut ()));
        game
    }

    /// Park a bug on top of the player's lane so the next frame is a hit
    fn plant_hit(game: &mut GameLoop) {
        game.state.player.pos.y = lane_y(3);
        game.state.enemies[5].pos.x = game.state.player.pos.x;
        game.state.enemies[5].speed = 0.0;
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = GameLoop::new(Settings::default());
        let mut surface = RecordingSurface::default();
        assert_eq!(game.phase(), LoopPhase::Idle);
        assert_eq!(game.frame(0.0, &mut surface, &mut ()), LoopControl::Halt);
        assert_eq!(surface.frames, 0);

        assert!(game.start(&mut ()));
        assert!(!game.start(&mut ()));
        assert_eq!(game.phase(), LoopPhase::Running);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut game = running_loop();
        let mut surface = RecordingSurface::default();
        let x0 = game.state().enemies[0].pos.x;

        game.frame(5_000.0, &mut surface, &mut ());
        assert_eq!(game.state().enemies[0].pos.x, x0);

        // 100ms later: 600 units/s * 0.1s
        game.frame(5_100.0, &mut surface, &mut ());
        assert!((game.state().enemies[0].pos.x - (x0 + 60.0)).abs() < 1e-2);
    }

    #[test]
    fn test_three_hits_lose() {
        let mut game = running_loop();
        let mut surface = RecordingSurface::default();
        let mut ui = EventLog::default();

        let mut now = 0.0;
        for expected in [2u8, 1] {
            plant_hit(&mut game);
            assert_eq!(game.frame(now, &mut surface, &mut ui), LoopControl::Continue);
            assert_eq!(game.state().player.lives, expected);
            now += 16.0;
        }

        plant_hit(&mut game);
        assert_eq!(game.frame(now, &mut surface, &mut ui), LoopControl::Halt);
        assert_eq!(game.phase(), LoopPhase::Lost);
        assert_eq!(game.state().player.lives, 0);
        assert_eq!(
            ui.events,
            vec![
                GameEvent::LifeLost { lives_remaining: 2 },
                GameEvent::LifeLost { lives_remaining: 1 },
                GameEvent::LifeLost { lives_remaining: 0 },
                GameEvent::GameOver,
            ]
        );

        // Halted: further frames do nothing
        let frames = surface.frames;
        assert_eq!(game.frame(now + 16.0, &mut surface, &mut ui), LoopControl::Halt);
        assert_eq!(surface.frames, frames);
    }

    #[test]
    fn test_reaching_goal_wins() {
        let mut game = running_loop();
        let mut surface = RecordingSurface::default();
        let mut ui = EventLog::default();

        // Park the roster so nothing crosses the player's path
        for enemy in &mut game.state.enemies {
            enemy.pos.x = -10_000.0;
            enemy.speed = 0.0;
        }
        for _ in 0..4 {
            game.queue_input(Direction::Up);
        }

        assert_eq!(game.frame(0.0, &mut surface, &mut ui), LoopControl::Halt);
        assert_eq!(game.phase(), LoopPhase::Won);
        assert_eq!(ui.events, vec![GameEvent::Won { lives_remaining: 3 }]);

        // Input while halted is dropped
        game.queue_input(Direction::Down);
        assert!(game.state().input.is_empty());
    }

    #[test]
    fn test_replay_after_loss() {
        let mut game = running_loop();
        let mut surface = RecordingSurface::default();
        let mut ui = EventLog::default();

        game.state.player.lives = 1;
        plant_hit(&mut game);
        game.frame(0.0, &mut surface, &mut ui);
        assert_eq!(game.phase(), LoopPhase::Lost);

        assert!(game.replay(&mut ui));
        assert_eq!(game.phase(), LoopPhase::Running);
        assert_eq!(game.state().player.lives, STARTING_LIVES);
        assert_eq!(game.state().player.pos.y, PLAYER_START_Y);
        assert!(!game.state().player.has_won);
        assert_eq!(ui.resets, vec![STARTING_LIVES]);

        // Replay only applies to finished rounds
        assert!(!game.replay(&mut ui));
    }

    #[test]
    fn test_per_enemy_policy_from_settings() {
        let settings = Settings {
            collision_policy: CollisionPolicy::PerEnemy,
            ..Default::default()
        };
        let mut game = GameLoop::new(settings);
        game.start(&mut ());
        let mut surface = RecordingSurface::default();

        game.state.player.pos.y = lane_y(1);
        game.state.player.pos.x = 101.0;
        for i in [1, 2] {
            game.state.enemies[i].pos.x = 101.0;
            game.state.enemies[i].speed = 0.0;
        }
        game.frame(0.0, &mut surface, &mut ());
        assert_eq!(game.state().player.lives, 1);
    }

    #[test]
    fn test_queue_key_only_while_running() {
        let mut game = GameLoop::new(Settings::default());
        assert!(!game.queue_key("ArrowUp"));

        game.start(&mut ());
        assert!(game.queue_key("ArrowUp"));
        assert!(!game.queue_key("Enter"));

        let mut surface = RecordingSurface::default();
        for enemy in &mut game.state.enemies {
            enemy.pos.x = -10_000.0;
            enemy.speed = 0.0;
        }
        game.frame(0.0, &mut surface, &mut ());
        assert_eq!(game.state().player.pos.y, PLAYER_START_Y - CELL_HEIGHT);
    }

    #[test]
    fn test_toggled_policy_applies_next_frame() {
        let mut game = running_loop();
        assert_eq!(game.toggle_collision_policy(), CollisionPolicy::PerEnemy);
        assert_eq!(game.settings().collision_policy, CollisionPolicy::PerEnemy);

        let mut surface = RecordingSurface::default();
        game.state.player.pos = glam::Vec2::new(101.0, lane_y(1));
        for i in [1, 2] {
            game.state.enemies[i].pos.x = 101.0;
            game.state.enemies[i].speed = 0.0;
        }
        game.frame(0.0, &mut surface, &mut ());
        assert_eq!(game.state().player.lives, 1);

        assert_eq!(game.toggle_collision_policy(), CollisionPolicy::Sequential);
    }

    #[test]
    fn test_long_stall_moves_enemies_unclamped() {
        let mut game = running_loop();
        let mut surface = RecordingSurface::default();
        let mut ui = EventLog::default();

        game.frame(0.0, &mut surface, &mut ui);
        let x0 = game.state().enemies[3].pos.x;
        let speed = game.state().enemies[3].speed;

        // Tab hidden for 30 seconds; player stays on the safe start row
        assert_eq!(game.frame(30_000.0, &mut surface, &mut ui), LoopControl::Continue);
        assert!((game.state().enemies[3].pos.x - (x0 + speed * 30.0)).abs() < 1e-1);
        assert!(game.state().enemies.iter().all(|e| e.pos.x >= ENEMY_RESPAWN_X));
        assert_eq!(game.state().player.lives, STARTING_LIVES);
        assert!(ui.events.is_empty());

        // Next frame wraps every bug that ran off the board
        game.frame(30_016.0, &mut surface, &mut ui);
        assert_eq!(game.state().enemies[3].pos.x, ENEMY_RESPAWN_X);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
