//! Game phase state machine
//!
//! Owns the simulation state, the best score and the tick scheduler, and
//! turns key presses into intents and phase transitions:
//!
//! ```text
//! Idle --Action--> Playing --ball lost--> GameOver --Action--> Playing
//!                          --cleared----> Won ------Action--> Playing
//! ```
//!
//! The scheduler runs exactly while the phase is `Playing`.

use crate::config::GameConfig;
use crate::highscores::{HighScoreKeeper, KeyValueStore};
use crate::scheduler::{FixedRateScheduler, TickScheduler};
use crate::sim::{GameEvent, GamePhase, GameState, Intent, tick};

/// Logical input keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Start from idle, restart after a finished round
    Action,
}

/// A breakout session
pub struct Game<S: TickScheduler = FixedRateScheduler> {
    state: GameState,
    intent: Intent,
    scheduler: S,
    high_scores: HighScoreKeeper,
}

impl Game<FixedRateScheduler> {
    /// Session driven by a wall-clock scheduler at the configured tick rate
    pub fn with_fixed_rate(config: GameConfig, seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let scheduler = FixedRateScheduler::new(config.tick_rate);
        Game::new(config, seed, scheduler, store)
    }
}

impl<S: TickScheduler> Game<S> {
    /// Create a session in `Idle` with the persisted best score loaded
    pub fn new(config: GameConfig, seed: u64, mut scheduler: S, store: Box<dyn KeyValueStore>) -> Self {
        scheduler.stop();
        let game = Self {
            state: GameState::new(config, seed),
            intent: Intent::default(),
            scheduler,
            high_scores: HighScoreKeeper::new(store),
        };
        log::info!("Game initialized with seed: {}", seed);
        game
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    #[inline]
    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    #[inline]
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// True while the tick scheduler is active
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => self.intent.left = true,
            Key::Right => self.intent.right = true,
            Key::Action => match self.state.phase {
                GamePhase::Idle => self.start(),
                GamePhase::GameOver | GamePhase::Won => self.restart(),
                GamePhase::Playing => {}
            },
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.intent.left = false,
            Key::Right => self.intent.right = false,
            Key::Action => {}
        }
    }

    /// Run every tick the scheduler says is due after `elapsed` seconds.
    /// Stops early if a tick ends the round.
    pub fn advance(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let due = self.scheduler.due_ticks(elapsed);
        let mut events = Vec::new();
        for _ in 0..due {
            if self.state.phase != GamePhase::Playing {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    /// Run a single tick. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let sim_events = tick(&mut self.state, &self.intent);
        let mut events = Vec::with_capacity(sim_events.len());

        for event in sim_events {
            events.push(event);
            match event {
                GameEvent::BrickDestroyed { row, col, score } => {
                    log::debug!("Brick ({}, {}) destroyed, score {}", row, col, score);
                    if self.high_scores.record(score) {
                        events.push(GameEvent::NewHighScore { score });
                    }
                }
                GameEvent::BallLost => {
                    log::info!("Game over with score {}", self.state.score);
                }
                GameEvent::Cleared => {
                    log::info!("All bricks cleared, score {}", self.state.score);
                }
                _ => {}
            }
        }

        self.sync_scheduler();
        events
    }

    /// Idle → Playing
    fn start(&mut self) {
        self.state.phase = GamePhase::Playing;
        log::info!("Round started");
        self.sync_scheduler();
    }

    /// GameOver | Won → Playing, skipping the idle screen
    fn restart(&mut self) {
        self.state.reset_round();
        self.high_scores.reload();
        self.state.reset_ball(false);
        log::info!("Round restarted (best {})", self.high_scores.best());
        self.sync_scheduler();
    }

    fn sync_scheduler(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.scheduler.start();
        } else {
            self.scheduler.stop();
        }
    }
}
