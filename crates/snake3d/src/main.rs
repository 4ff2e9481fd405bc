//! Headless snake3d demo
//!
//! Runs the simulation on its background executors, steers the head from
//! a scripted input sequence and logs game events.
//!
//! Usage: `snake3d [config.toml|config.ron]`

use std::time::{Duration, Instant};

use snake3d::prelude::*;
use snake_engine::config::Config;
use snake_engine::foundation::logging;

const RUN_TIME: Duration = Duration::from_secs(10);

fn main() -> Result<(), GameError> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::default(),
    };
    logging::init_with_level(&config.logging.level);
    log::info!("Starting snake3d demo");

    let mut runner = GameRunner::new(Game::new(config)?);
    runner.start()?;
    let handle = runner.handle();

    let script = [
        TurnDirection::Right,
        TurnDirection::Right,
        TurnDirection::Up,
        TurnDirection::Left,
        TurnDirection::Left,
        TurnDirection::Down,
    ];
    let started = Instant::now();
    let mut step = 0;

    while started.elapsed() < RUN_TIME {
        if let Ok(event) = runner.events().recv_timeout(Duration::from_millis(250)) {
            log::info!("{:?}", event);
            if matches!(event, GameEvent::Died { .. } | GameEvent::Won { .. }) {
                break;
            }
        }
        handle.turn(script[step % script.len()])?;
        step += 1;
        if step % 12 == 0 {
            handle.grow()?;
        }
    }

    runner.shutdown();
    let snapshot = handle.snapshot()?;
    log::info!(
        "Finished in state {:?}: score {}, health {}, {} segments after {} ticks",
        snapshot.state,
        snapshot.score,
        snapshot.health,
        snapshot.segments.len(),
        snapshot.tick
    );
    Ok(())
}
