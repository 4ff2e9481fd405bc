//! Background driving of a [`Game`]
//!
//! The runner shares one game behind a mutex between two periodic
//! executors (simulation tick and spawning) and any number of
//! [`GameHandle`]s used by input and render code. Events produced by ticks
//! are forwarded over a channel.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use snake_engine::scheduler::{ExecutorStats, PeriodicExecutor};

use crate::chain::TurnDirection;
use crate::error::GameError;
use crate::events::{GameEvent, GameState};
use crate::game::{Game, Snapshot};

type SharedGame = Arc<Mutex<Game>>;

fn lock(game: &SharedGame) -> Result<MutexGuard<'_, Game>, GameError> {
    game.lock().map_err(|_| GameError::LockPoisoned)
}

fn forward(events: Vec<GameEvent>, sender: &Sender<GameEvent>) {
    for event in events {
        // Nobody listening is not an error for the simulation
        let _ = sender.send(event);
    }
}

/// Cloneable access to a running game for input and rendering
#[derive(Clone)]
pub struct GameHandle {
    game: SharedGame,
    events: Sender<GameEvent>,
}

impl GameHandle {
    /// Steer the head
    pub fn turn(&self, direction: TurnDirection) -> Result<bool, GameError> {
        Ok(lock(&self.game)?.turn(direction))
    }

    /// Append a segment and return the new length; `None` unless playing
    pub fn grow(&self) -> Result<Option<usize>, GameError> {
        let mut game = lock(&self.game)?;
        let length = game.grow();
        forward(game.drain_events(), &self.events);
        Ok(length)
    }

    /// Pause or resume; returns the resulting state
    pub fn toggle_pause(&self) -> Result<GameState, GameError> {
        let mut game = lock(&self.game)?;
        if !game.pause() {
            game.resume();
        }
        forward(game.drain_events(), &self.events);
        Ok(game.state())
    }

    /// Copy of the current render state
    pub fn snapshot(&self) -> Result<Snapshot, GameError> {
        Ok(lock(&self.game)?.snapshot())
    }

    /// Run `f` with the game locked
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> Result<R, GameError> {
        let game = lock(&self.game)?;
        Ok(f(&game))
    }
}

/// Owns the shared game and the executors driving it
pub struct GameRunner {
    game: SharedGame,
    tick_executor: PeriodicExecutor,
    spawn_executor: PeriodicExecutor,
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl GameRunner {
    /// Wrap a game; nothing runs until [`Self::start`]
    pub fn new(game: Game) -> Self {
        let timing = game.config().timing.clone();
        let spawn_interval = Duration::from_millis(game.config().spawn.interval_ms);
        let (sender, receiver) = unbounded();

        Self {
            game: Arc::new(Mutex::new(game)),
            tick_executor: PeriodicExecutor::new(
                "snake-tick",
                Duration::from_millis(timing.tick_interval_ms),
            )
            .with_failure_policy(timing.failure_policy),
            spawn_executor: PeriodicExecutor::new("snake-spawn", spawn_interval),
            sender,
            receiver,
        }
    }

    /// Start the run and both executors
    pub fn start(&mut self) -> Result<(), GameError> {
        {
            let mut game = lock(&self.game)?;
            game.start();
            forward(game.drain_events(), &self.sender);
        }

        let game = Arc::clone(&self.game);
        let sender = self.sender.clone();
        self.tick_executor.start(move || -> Result<(), GameError> {
            let events = lock(&game)?.tick()?;
            forward(events, &sender);
            Ok(())
        })?;

        let game = Arc::clone(&self.game);
        let sender = self.sender.clone();
        self.spawn_executor.start(move || -> Result<(), GameError> {
            let mut game = lock(&game)?;
            game.spawn_random();
            forward(game.drain_events(), &sender);
            Ok(())
        })?;

        log::info!("Game runner started");
        Ok(())
    }

    /// Handle for input and render threads
    pub fn handle(&self) -> GameHandle {
        GameHandle {
            game: Arc::clone(&self.game),
            events: self.sender.clone(),
        }
    }

    /// Events emitted by ticks, spawns and handle calls
    pub const fn events(&self) -> &Receiver<GameEvent> {
        &self.receiver
    }

    /// Counters of the simulation tick executor
    pub fn tick_stats(&self) -> Arc<ExecutorStats> {
        self.tick_executor.stats()
    }

    /// Whether the simulation tick executor is running
    pub fn is_running(&self) -> bool {
        self.tick_executor.is_running()
    }

    /// Stop both executors and wait for them
    pub fn shutdown(&mut self) {
        self.spawn_executor.stop();
        self.tick_executor.stop();
        self.spawn_executor.stop_and_join();
        self.tick_executor.stop_and_join();
        log::info!("Game runner stopped");
    }
}

impl Drop for GameRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
