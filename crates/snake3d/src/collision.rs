//! Collision detection between the chain head, the chain, entities and the level

use snake_engine::physics::{models_collide, BoundableModel, GeometryError};

use crate::chain::Chain;
use crate::entities::MovingEntity;

/// Lowest segment index tested against the head; index 1 always touches it
pub const FIRST_SELF_COLLIDING_SEGMENT: usize = 2;

/// Collisions found in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// First segment (index ≥ 2) the head overlaps
    pub self_collision: Option<usize>,
    /// Indices into the entity list the head overlaps
    pub entity_hits: Vec<usize>,
    /// Whether the head's box left the level volume
    pub out_of_bounds: bool,
}

impl CollisionReport {
    /// Whether anything was detected
    pub fn is_empty(&self) -> bool {
        self.self_collision.is_none() && self.entity_hits.is_empty() && !self.out_of_bounds
    }
}

/// Run every head test for the current positions
pub fn detect(
    chain: &Chain,
    entities: &[MovingEntity],
    level: &BoundableModel,
) -> Result<CollisionReport, GeometryError> {
    Ok(CollisionReport {
        self_collision: first_self_collision(chain)?,
        entity_hits: entity_hits(chain, entities)?,
        out_of_bounds: !head_in_level(chain, level)?,
    })
}

/// First segment from index 2 on whose box overlaps the head's
pub fn first_self_collision(chain: &Chain) -> Result<Option<usize>, GeometryError> {
    let head = chain.head().model();
    for (index, segment) in chain.segments().iter().enumerate().skip(FIRST_SELF_COLLIDING_SEGMENT) {
        if models_collide(head, segment.model())? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Indices of entities whose boxes overlap the head's
pub fn entity_hits(chain: &Chain, entities: &[MovingEntity]) -> Result<Vec<usize>, GeometryError> {
    let head = chain.head().model();
    let mut hits = Vec::new();
    for (index, entity) in entities.iter().enumerate() {
        if models_collide(head, entity.model())? {
            hits.push(index);
        }
    }
    Ok(hits)
}

/// Whether the head's box lies fully inside the level's box
pub fn head_in_level(chain: &Chain, level: &BoundableModel) -> Result<bool, GeometryError> {
    Ok(level.bounding_box()?.contains(&chain.head().bounding_box()?))
}
