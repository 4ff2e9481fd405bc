//! A single rigid body segment of the chain

use std::collections::VecDeque;

use snake_engine::foundation::math::{Transform, Vec3};
use snake_engine::physics::{Aabb, BoundableModel, BoundingVolume, GeometryError};
use snake_engine::scene::NodeId;

use super::command::{FutureRotation, RotationAxis, RotationCommand};

/// Position of a segment in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Front segment, steered by the player
    Head,
    /// Follower segment
    Tail,
}

/// One segment, its pending turns and its links into the chain arena
#[derive(Debug, Clone)]
pub struct Segment {
    kind: SegmentKind,
    heading: f32,
    model: BoundableModel,
    shadow: Transform,
    queue: VecDeque<FutureRotation>,
    odometer: f64,
    parent: Option<usize>,
    child: Option<usize>,
    node: NodeId,
}

impl Segment {
    pub(crate) fn new(
        kind: SegmentKind,
        transform: Transform,
        shadow: Transform,
        extents: Vec3,
        heading: f32,
        parent: Option<usize>,
        node: NodeId,
    ) -> Self {
        Self {
            kind,
            heading,
            model: BoundableModel::new(transform, BoundingVolume::Segment { extents }),
            shadow,
            queue: VecDeque::new(),
            odometer: 0.0,
            parent,
            child: None,
            node,
        }
    }

    /// Head or tail
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Accumulated yaw of the turns this segment has executed
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// World-space forward direction
    pub fn direction(&self) -> Vec3 {
        self.model.transform.forward()
    }

    /// Renderable transform
    pub const fn transform(&self) -> &Transform {
        &self.model.transform
    }

    /// Skinning twin, moved in lockstep with the renderable transform
    pub const fn shadow(&self) -> &Transform {
        &self.shadow
    }

    /// Segment center
    pub const fn position(&self) -> Vec3 {
        self.model.transform.position
    }

    /// Total distance travelled
    pub const fn odometer(&self) -> f64 {
        self.odometer
    }

    /// Index of the segment closer to the head
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Index of the segment further from the head
    pub const fn child(&self) -> Option<usize> {
        self.child
    }

    /// Scene node mirroring this segment
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Bounded model used for collision tests
    pub const fn model(&self) -> &BoundableModel {
        &self.model
    }

    /// World-space box for the current transform
    pub fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        self.model.bounding_box()
    }

    /// Number of turns waiting to execute
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Oldest waiting turn
    pub fn front(&self) -> Option<&FutureRotation> {
        self.queue.front()
    }

    pub(crate) fn set_child(&mut self, child: Option<usize>) {
        self.child = child;
    }

    /// Queue a turn to run after `settle_distance` more travel
    ///
    /// Returns `false` and drops the turn when `bound` is reached.
    pub(crate) fn enqueue(
        &mut self,
        command: RotationCommand,
        settle_distance: f32,
        bound: usize,
    ) -> bool {
        if self.queue.len() >= bound {
            return false;
        }
        self.queue.push_back(FutureRotation {
            command,
            remaining: settle_distance,
        });
        true
    }

    pub(crate) fn pop(&mut self) -> Option<RotationCommand> {
        self.queue.pop_front().map(|pending| pending.command)
    }

    /// Turn the segment and its twin about a local axis
    pub(crate) fn apply(&mut self, command: &RotationCommand) {
        let axis = command.axis.local_axis();
        self.model.transform.rotate_local(axis, command.angle);
        self.shadow.rotate_local(axis, command.angle);
        if command.axis == RotationAxis::Yaw {
            self.heading += command.angle;
        }
    }

    /// Move both transforms `distance` along the current forward axis
    pub(crate) fn advance(&mut self, distance: f32) {
        let offset = self.direction() * distance;
        self.model.transform.translate(offset);
        self.shadow.translate(offset);
        self.odometer += f64::from(distance);
        for pending in &mut self.queue {
            pending.remaining -= distance;
        }
    }
}
