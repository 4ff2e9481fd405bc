//! Game orchestrator
//!
//! [`Game`] owns the chain, the moving entities, the level volume and the
//! scene registration. One [`Game::tick`] runs locomotion, entity motion,
//! collision detection and collision response, in that order.

use snake_engine::foundation::math::{Transform, Vec3};
use snake_engine::physics::{BoundableModel, BoundingVolume, GeometryError};
use snake_engine::scene::{NodeId, SceneGraph, SimpleSceneGraph};

use crate::chain::{Chain, TurnDirection};
use crate::collision::{self, CollisionReport};
use crate::config::{BoundaryPolicy, ChainConfig, GameConfig};
use crate::entities::{EntityKind, MotionStatus, MovingEntity, SpawnPlan, Spawner};
use crate::error::GameError;
use crate::events::{DeathReason, GameEvent, GameState, HitCause};

/// Read-only copy of what a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Run state
    pub state: GameState,
    /// Current score
    pub score: u32,
    /// Remaining health
    pub health: u32,
    /// Ticks simulated since the last reset
    pub tick: u64,
    /// Segment transforms, head first
    pub segments: Vec<Transform>,
    /// Shadow skeleton joints, head first
    pub joints: Vec<Vec3>,
    /// Entity kinds and transforms
    pub entities: Vec<(EntityKind, Transform)>,
}

/// Chain, entities, rules and scene registration for one session
pub struct Game {
    config: GameConfig,
    chain: Chain,
    entities: Vec<MovingEntity>,
    level: BoundableModel,
    scene: Box<dyn SceneGraph>,
    spawner: Spawner,
    state: GameState,
    score: u32,
    health: u32,
    tick_count: u64,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game with an in-memory scene graph
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_scene(config, Box::new(SimpleSceneGraph::new()))
    }

    /// Create a game that registers its renderables with `scene`
    pub fn with_scene(config: GameConfig, mut scene: Box<dyn SceneGraph>) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let level = Self::build_level(config.arena.level_half_extent)?;
        scene.add_child("level", level.transform.clone());
        let chain = Self::build_chain(&config.chain, scene.as_mut());
        let spawner = Spawner::new(&config.spawn, &config.arena, config.chain.start_position.z);

        log::info!(
            "Game created: {} segments, tick {} ms",
            chain.len(),
            config.timing.tick_interval_ms
        );
        Ok(Self {
            health: config.rules.starting_health,
            config,
            chain,
            entities: Vec::new(),
            level,
            scene,
            spawner,
            state: GameState::Menu,
            score: 0,
            tick_count: 0,
            events: Vec::new(),
        })
    }

    fn build_level(half_extent: f32) -> Result<BoundableModel, GeometryError> {
        let corners: Vec<Vec3> = (0..8_u8)
            .map(|i| {
                let sign = |bit: u8| if i & bit == 0 { -1.0 } else { 1.0 };
                Vec3::new(sign(1), sign(2), sign(4))
            })
            .collect();
        let mut level = BoundableModel::new(
            Transform::identity().with_scale(Vec3::repeat(half_extent)),
            BoundingVolume::constant(BoundingVolume::mesh(corners)),
        );
        level.calculate_bb()?;
        Ok(level)
    }

    fn build_chain(config: &ChainConfig, scene: &mut dyn SceneGraph) -> Chain {
        Chain::new(config, |transform| scene.add_child("segment", transform.clone()))
    }

    /// Active configuration
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The chain
    pub const fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Live entities
    pub fn entities(&self) -> &[MovingEntity] {
        &self.entities
    }

    /// Static level volume
    pub const fn level(&self) -> &BoundableModel {
        &self.level
    }

    /// Scene registration
    pub fn scene(&self) -> &dyn SceneGraph {
        self.scene.as_ref()
    }

    /// Run state
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Current score
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining health
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Ticks simulated since the last reset
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Begin a run, resetting first if the previous one ended
    pub fn start(&mut self) -> bool {
        if matches!(self.state, GameState::Dead | GameState::Won) {
            self.reset();
        }
        if self.state != GameState::Menu {
            return false;
        }
        self.transition(GameState::Playing);
        true
    }

    /// Suspend ticking
    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.transition(GameState::Paused);
        true
    }

    /// Resume after a pause
    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.transition(GameState::Playing);
        true
    }

    /// Rebuild the chain, clear entities and counters and return to the menu
    pub fn reset(&mut self) {
        self.scene.clear();
        self.scene.add_child("level", self.level.transform.clone());
        self.chain = Self::build_chain(&self.config.chain, self.scene.as_mut());
        self.entities.clear();
        self.spawner.reseed(self.config.spawn.seed);
        self.score = 0;
        self.health = self.config.rules.starting_health;
        self.tick_count = 0;
        log::info!("Game reset");
        self.transition(GameState::Menu);
    }

    /// Steer the head; ignored unless playing
    pub fn turn(&mut self, direction: TurnDirection) -> bool {
        self.state == GameState::Playing && self.chain.turn(direction)
    }

    /// Append a segment and return the new length; ignored unless playing
    pub fn grow(&mut self) -> Option<usize> {
        if self.state != GameState::Playing {
            return None;
        }
        let scene = &mut self.scene;
        self.chain
            .add_to_tail(|transform| scene.add_child("segment", transform.clone()));
        let length = self.chain.len();
        self.events.push(GameEvent::Grew { length });
        Some(length)
    }

    fn shrink(&mut self) -> Option<usize> {
        let removed = self.chain.shorten()?;
        self.scene.remove_child(removed.node());
        let length = self.chain.len();
        self.events.push(GameEvent::Shrunk { length });
        Some(length)
    }

    /// Place an entity
    pub fn spawn(&mut self, plan: SpawnPlan) -> NodeId {
        let name = match plan.kind {
            EntityKind::Prize => "prize",
            EntityKind::Bomb => "bomb",
        };
        let node = self.scene.add_child(name, Transform::from_position(plan.position));
        self.entities.push(MovingEntity::new(
            plan.kind,
            plan.position,
            self.config.spawn.entity_radius,
            plan.motion,
            node,
        ));
        self.events.push(GameEvent::Spawned { entity: node, kind: plan.kind });
        node
    }

    /// Spawn a random entity while playing and below the entity cap
    pub fn spawn_random(&mut self) -> Option<NodeId> {
        if self.state != GameState::Playing || self.entities.len() >= self.config.spawn.max_entities {
            return None;
        }
        let plan = self.spawner.next_plan();
        Some(self.spawn(plan))
    }

    /// Run one simulation tick and return everything that happened since
    /// the previous call
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.state == GameState::Playing {
            self.tick_count += 1;
            self.chain.step();
            self.advance_entities();
            let report = collision::detect(&self.chain, &self.entities, &self.level)?;
            self.respond(report);
            self.sync_scene();
        }
        Ok(self.drain_events())
    }

    /// Take events recorded outside of [`Self::tick`]
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_entities(&mut self) {
        let dt = self.config.timing.tick_seconds();
        let arena = &self.config.arena;
        let scene = &mut self.scene;
        let events = &mut self.events;
        self.entities.retain_mut(|entity| {
            if entity.advance(dt, arena) == MotionStatus::Active {
                return true;
            }
            scene.remove_child(entity.node());
            events.push(GameEvent::EntityExpired { entity: entity.node() });
            false
        });
    }

    fn respond(&mut self, report: CollisionReport) {
        let mut hits = report.entity_hits;
        hits.sort_unstable();
        for index in hits.into_iter().rev() {
            if self.state != GameState::Playing {
                return;
            }
            let entity = self.entities.remove(index);
            self.scene.remove_child(entity.node());
            match entity.kind() {
                EntityKind::Prize => self.collect_prize(entity.node()),
                EntityKind::Bomb => self.hit(HitCause::Bomb),
            }
        }

        if let Some(segment) = report.self_collision {
            if self.state == GameState::Playing {
                self.hit(HitCause::SelfCollision { segment });
            }
        }

        if report.out_of_bounds && self.state == GameState::Playing {
            let head = self.chain.head().position();
            self.events.push(GameEvent::OutOfBounds { head });
            match self.config.arena.boundary_policy {
                BoundaryPolicy::EndRun => {
                    log::info!("Head left the level at {:?}; ending run", head);
                    self.die(DeathReason::OutOfBounds);
                }
                BoundaryPolicy::Warn => log::warn!("Head is outside the level at {:?}", head),
            }
        }
    }

    fn collect_prize(&mut self, entity: NodeId) {
        self.score += self.config.rules.points_per_prize;
        self.events.push(GameEvent::PrizeCollected { entity, score: self.score });
        if self.config.rules.grow_on_prize {
            self.grow();
        }
        if self.config.rules.win_score.is_some_and(|target| self.score >= target) {
            self.events.push(GameEvent::Won { score: self.score });
            self.transition(GameState::Won);
        }
    }

    fn hit(&mut self, cause: HitCause) {
        self.health = self.health.saturating_sub(1);
        self.events.push(GameEvent::Hit { cause, health: self.health });
        log::info!("Hit by {:?}, health {}", cause, self.health);

        if self.shrink().is_none() {
            self.die(DeathReason::ChainExhausted);
        } else if self.health == 0 {
            self.die(DeathReason::HealthDepleted);
        }
    }

    fn die(&mut self, reason: DeathReason) {
        self.events.push(GameEvent::Died { reason });
        self.transition(GameState::Dead);
    }

    fn transition(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        log::info!("Game state {:?} -> {:?}", from, to);
        self.events.push(GameEvent::StateChanged { from, to });
    }

    fn sync_scene(&mut self) {
        for segment in self.chain.segments() {
            self.scene.set_transform(segment.node(), segment.transform());
        }
        for entity in &self.entities {
            self.scene.set_transform(entity.node(), entity.transform());
        }
    }

    /// Copy out what a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            score: self.score,
            health: self.health,
            tick: self.tick_count,
            segments: self.chain.segments().iter().map(|s| s.transform().clone()).collect(),
            joints: self.chain.joint_positions(),
            entities: self
                .entities
                .iter()
                .map(|e| (e.kind(), e.transform().clone()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("health", &self.health)
            .field("segments", &self.chain.len())
            .field("entities", &self.entities.len())
            .field("tick_count", &self.tick_count)
            .finish_non_exhaustive()
    }
}
