//! Periodic background executor
//!
//! Runs a callback on a fixed wall-clock interval from a dedicated thread.
//! Stopping is cooperative: the stop signal is checked between invocations,
//! so an invocation that has started always runs to completion.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender, TryRecvError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::time::Stopwatch;

/// What the executor does when a callback invocation fails or panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Log the failure and keep the schedule running
    #[default]
    LogAndContinue,
    /// Log the failure and end the schedule
    StopOnError,
}

/// Scheduler errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// `start` was called on an executor that is still running
    #[error("Executor '{0}' is already running")]
    AlreadyRunning(String),

    /// The background thread could not be created
    #[error("Failed to spawn executor thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Counters shared between an executor and its thread
#[derive(Debug, Default)]
pub struct ExecutorStats {
    invocations: AtomicU64,
    failures: AtomicU64,
    running: AtomicBool,
}

impl ExecutorStats {
    /// Completed callback invocations, failed ones included
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Acquire)
    }

    /// Invocations that returned an error or panicked
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Acquire)
    }

    /// Whether the background thread is still looping
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Invokes a callback every `interval` on a background thread until stopped
///
/// Dropping the executor stops it and waits for the thread, so state the
/// callback closes over is never released while an invocation can still
/// run.
pub struct PeriodicExecutor {
    name: String,
    interval: Duration,
    policy: FailurePolicy,
    stats: Arc<ExecutorStats>,
    worker: Option<Worker>,
}

impl PeriodicExecutor {
    /// Create a stopped executor
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
            policy: FailurePolicy::default(),
            stats: Arc::new(ExecutorStats::default()),
            worker: None,
        }
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executor name, also used as the thread name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared counters for this executor
    pub fn stats(&self) -> Arc<ExecutorStats> {
        Arc::clone(&self.stats)
    }

    /// Whether the background thread is still looping
    pub fn is_running(&self) -> bool {
        self.stats.is_running()
    }

    /// Begin invoking `task` every interval
    ///
    /// The first invocation happens immediately. Restarting after the
    /// thread has exited is allowed.
    pub fn start<F, E>(&mut self, mut task: F) -> Result<(), SchedulerError>
    where
        F: FnMut() -> Result<(), E> + Send + 'static,
        E: Display + 'static,
    {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning(self.name.clone()));
        }
        self.join();

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let name = self.name.clone();
        let interval = self.interval;
        let policy = self.policy;
        let stats = Arc::clone(&self.stats);

        stats.running.store(true, Ordering::Release);
        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            log::debug!("Executor '{}' started with interval {:?}", name, interval);
            loop {
                match stop_rx.try_recv() {
                    Ok(()) | Err(TryRecvError::Disconnected) => break,
                    Err(TryRecvError::Empty) => {}
                }

                let stopwatch = Stopwatch::start_new();
                let outcome = panic::catch_unwind(AssertUnwindSafe(&mut task));
                stats.invocations.fetch_add(1, Ordering::AcqRel);

                let failure = match outcome {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(err.to_string()),
                    Err(_) => Some("callback panicked".to_string()),
                };
                if let Some(reason) = failure {
                    stats.failures.fetch_add(1, Ordering::AcqRel);
                    log::error!("Executor '{}' callback failed: {}", name, reason);
                    if policy == FailurePolicy::StopOnError {
                        log::error!("Executor '{}' stopping after failure", name);
                        break;
                    }
                }

                let elapsed = stopwatch.elapsed();
                if elapsed > interval {
                    log::warn!(
                        "Executor '{}' overran its interval: {:?} > {:?}",
                        name, elapsed, interval
                    );
                }

                match stop_rx.recv_timeout(interval.saturating_sub(elapsed)) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }
            stats.running.store(false, Ordering::Release);
            log::debug!("Executor '{}' stopped", name);
        });

        match spawned {
            Ok(handle) => {
                self.worker = Some(Worker { stop_tx, handle });
                Ok(())
            }
            Err(err) => {
                self.stats.running.store(false, Ordering::Release);
                Err(SchedulerError::Spawn(err))
            }
        }
    }

    /// Request termination without waiting
    pub fn stop(&self) {
        if let Some(worker) = &self.worker {
            // A full channel already carries a pending stop request
            let _ = worker.stop_tx.try_send(());
        }
    }

    /// Request termination and wait for the thread to exit
    pub fn stop_and_join(&mut self) {
        self.stop();
        self.join();
    }

    fn join(&mut self) {
        if let Some(Worker { stop_tx, handle }) = self.worker.take() {
            drop(stop_tx);
            if handle.join().is_err() {
                log::error!("Executor '{}' thread terminated abnormally", self.name);
            }
        }
    }
}

impl Drop for PeriodicExecutor {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

impl std::fmt::Debug for PeriodicExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicExecutor")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("policy", &self.policy)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        condition()
    }

    #[test]
    fn test_invokes_repeatedly_until_stopped() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut executor = PeriodicExecutor::new("counter", Duration::from_millis(2));

        let seen = Arc::clone(&counter);
        executor
            .start(move || -> Result<(), String> {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        assert!(wait_until(Duration::from_secs(2), || counter.load(Ordering::SeqCst) >= 3));
        executor.stop_and_join();
        assert!(!executor.is_running());

        let after_stop = counter.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
        assert_eq!(executor.stats().invocations(), after_stop as u64);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut executor = PeriodicExecutor::new("twice", Duration::from_millis(50));
        executor.start(|| -> Result<(), String> { Ok(()) }).unwrap();

        let second = executor.start(|| -> Result<(), String> { Ok(()) });
        assert!(matches!(second, Err(SchedulerError::AlreadyRunning(_))));
    }

    #[test]
    fn test_stop_on_error_ends_schedule() {
        let mut executor = PeriodicExecutor::new("fragile", Duration::from_millis(1))
            .with_failure_policy(FailurePolicy::StopOnError);
        executor.start(|| -> Result<(), String> { Err("boom".to_string()) }).unwrap();

        let stats = executor.stats();
        assert!(wait_until(Duration::from_secs(2), || !stats.is_running()));
        assert_eq!(stats.invocations(), 1);
        assert_eq!(stats.failures(), 1);
    }

    #[test]
    fn test_log_and_continue_survives_errors_and_panics() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut executor = PeriodicExecutor::new("resilient", Duration::from_millis(1));

        let seen = Arc::clone(&calls);
        executor
            .start(move || -> Result<(), String> {
                match seen.fetch_add(1, Ordering::SeqCst) {
                    0 => Err("first call fails".to_string()),
                    1 => panic!("second call panics"),
                    _ => Ok(()),
                }
            })
            .unwrap();

        let stats = executor.stats();
        assert!(wait_until(Duration::from_secs(2), || stats.invocations() >= 4));
        assert!(executor.is_running());
        executor.stop_and_join();
        assert_eq!(stats.failures(), 2);
    }

    #[test]
    fn test_drop_joins_thread() {
        let stats = {
            let mut executor = PeriodicExecutor::new("scoped", Duration::from_millis(1));
            executor.start(|| -> Result<(), String> { Ok(()) }).unwrap();
            executor.stats()
        };
        assert!(!stats.is_running());
    }
}
