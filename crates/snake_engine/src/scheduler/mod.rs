//! Background scheduling
//!
//! Periodic executors drive game logic on their own threads, independent
//! of whatever loop reads the game state for drawing.

pub mod periodic;

pub use periodic::{ExecutorStats, FailurePolicy, PeriodicExecutor, SchedulerError};
