//! End-to-end game scenarios

use snake_engine::foundation::math::Vec3;

use crate::chain::TurnDirection;
use crate::config::GameConfig;
use crate::entities::{EntityKind, Motion, SpawnPlan};
use crate::events::{GameEvent, GameState, HitCause};
use crate::game::Game;

fn origin_config(initial_length: usize) -> GameConfig {
    let mut config = GameConfig::default();
    config.chain.start_position = Vec3::zeros();
    config.chain.initial_length = initial_length;
    config
}

fn hits(events: &[GameEvent]) -> Vec<HitCause> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Hit { cause, .. } => Some(*cause),
            _ => None,
        })
        .collect()
}

fn scene_is_in_sync(game: &Game) -> bool {
    game.scene().node_count() == game.chain().len() + game.entities().len() + 1
}

#[test]
fn test_grow_then_bomb_hit() {
    let mut game = Game::new(origin_config(1)).unwrap();
    game.start();
    for _ in 0..5 {
        game.grow();
    }
    assert_eq!(game.chain().len(), 6);

    let bomb = game.spawn(SpawnPlan {
        kind: EntityKind::Bomb,
        position: Vec3::new(0.3, 0.0, 0.0),
        motion: Motion::straight(Vec3::zeros(), 0.0),
    });
    let events = game.tick().unwrap();

    assert_eq!(game.chain().len(), 5);
    assert!(game.entities().iter().all(|e| e.node() != bomb));
    assert_eq!(hits(&events), vec![HitCause::Bomb]);
    assert_eq!(game.health(), game.config().rules.starting_health - 1);
    assert_eq!(game.state(), GameState::Playing);
    assert!(scene_is_in_sync(&game));
}

#[test]
fn test_overlapping_neighbour_is_not_a_self_collision() {
    let mut config = origin_config(4);
    config.chain.segment_length = 0.5;
    let mut game = Game::new(config).unwrap();
    game.start();

    let head_box = game.chain().head().bounding_box().unwrap();
    let neighbour_box = game.chain().segments()[1].bounding_box().unwrap();
    assert!(head_box.intersects(&neighbour_box));

    let mut events = Vec::new();
    for _ in 0..20 {
        events.extend(game.tick().unwrap());
    }
    assert!(hits(&events).is_empty());
    assert_eq!(game.chain().len(), 4);
}

#[test]
fn test_coiling_onto_body_is_a_hit() {
    let mut config = origin_config(8);
    config.chain.speed = 1.5;
    config.chain.delta_time_factor = 1.0;
    config.chain.turn_angle = std::f32::consts::FRAC_PI_2;
    let mut game = Game::new(config).unwrap();
    game.start();

    let mut events = Vec::new();
    for tick in 0..12 {
        if tick < 3 {
            assert!(game.turn(TurnDirection::Right));
        }
        events.extend(game.tick().unwrap());
    }

    let self_hits: Vec<_> = hits(&events)
        .into_iter()
        .filter(|cause| matches!(cause, HitCause::SelfCollision { segment } if *segment >= 2))
        .collect();
    assert!(!self_hits.is_empty());
    assert!(game.chain().len() < 8);
    assert!(scene_is_in_sync(&game));
}

#[test]
fn test_queue_bound_on_head() {
    let mut game = Game::new(origin_config(2)).unwrap();
    game.start();
    let bound = game.config().chain.max_queue_size;

    let accepted = (0..=bound)
        .filter(|_| game.turn(TurnDirection::Up))
        .count();

    assert_eq!(accepted, bound);
    assert_eq!(game.chain().head().pending(), bound);
    assert_eq!(game.chain().dropped_commands(), 1);

    game.tick().unwrap();
    assert_eq!(game.chain().head().pending(), 0);
    assert_eq!(game.chain().segments()[1].pending(), bound);
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let mut config = GameConfig::default();
        config.spawn.seed = 99;
        let mut game = Game::new(config).unwrap();
        game.start();
        for tick in 0..300 {
            if tick % 25 == 0 {
                game.spawn_random();
            }
            if tick % 40 == 10 {
                game.turn(TurnDirection::Left);
            }
            game.tick().unwrap();
        }
        game.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_expired_entities_leave_scene() {
    let mut game = Game::new(origin_config(1)).unwrap();
    game.start();
    let prize = game.spawn(SpawnPlan {
        kind: EntityKind::Prize,
        position: Vec3::new(0.0, 8.9, 0.0),
        motion: Motion::straight(Vec3::y(), 10.0),
    });

    let events = game.tick().unwrap();
    assert!(events.contains(&GameEvent::EntityExpired { entity: prize }));
    assert!(game.scene().node(prize).is_none());
    assert!(scene_is_in_sync(&game));
}
