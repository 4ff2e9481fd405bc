//! Articulated chain locomotion
//!
//! The chain is an arena of [`Segment`]s: index 0 is the head, every other
//! segment's parent is the previous index. Turns are issued on the head and
//! handed down one link at a time; every segment moves forward every tick.
//!
//! A tail segment holds a received turn until it has travelled the settle
//! distance along its path since receiving it. With the default settle
//! distance of one segment length, that is the point where its parent
//! executed the same turn, so all segments trace the head's path.
//!
//! Each queued turn counts down its own remaining distance, so readiness
//! does not depend on how far the segment has travelled overall.

mod command;
mod segment;

pub use command::{FutureRotation, RotationAxis, RotationCommand, TurnDirection};
pub use segment::{Segment, SegmentKind};

use serde::{Deserialize, Serialize};
use snake_engine::foundation::math::{constants::HALF_PI, Axis, Quat, Transform, Vec3};
use snake_engine::physics::bounds::distance;
use snake_engine::scene::NodeId;

use crate::config::ChainConfig;

/// Where the forward step falls relative to turn execution within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepOrder {
    /// Execute turns, then move
    #[default]
    RotateThenTranslate,
    /// Move, then execute turns
    TranslateThenRotate,
}

/// When a tail segment may execute the turn at the front of its queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlingRule {
    /// Path length to travel after receiving a turn
    pub settle_distance: f32,
    /// Slack for accumulated float error; must stay below `settle_distance`
    pub arrival_epsilon: f32,
}

impl SettlingRule {
    /// Whether the segment holding `pending` has travelled far enough
    pub fn is_ready(&self, pending: &FutureRotation) -> bool {
        pending.remaining <= self.arrival_epsilon
    }
}

/// Counts from one locomotion tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Turns executed across all segments
    pub turns_executed: usize,
    /// Largest gap between a tail and its parent's execution point at the
    /// moment the tail turned
    pub max_arrival_error: f32,
}

/// Ordered segment arena with head-driven turn propagation
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<Segment>,
    settling: SettlingRule,
    step_order: StepOrder,
    step: f32,
    turn_angle: f32,
    segment_length: f32,
    extents: Vec3,
    max_queue_size: usize,
    issued_heading: f32,
    dropped_commands: u64,
}

impl Chain {
    /// Build a chain of `config.initial_length` segments facing +X
    ///
    /// `register` is called with each new segment's transform and returns
    /// the scene node that mirrors it.
    pub fn new(config: &ChainConfig, mut register: impl FnMut(&Transform) -> NodeId) -> Self {
        let rotation = Quat::from_axis_angle(&Axis::Y.unit(), HALF_PI);
        let transform = Transform::from_position_rotation(config.start_position, rotation);
        let node = register(&transform);
        let head = Segment::new(
            SegmentKind::Head,
            transform.clone(),
            transform,
            config.segment_extents,
            0.0,
            None,
            node,
        );

        let mut chain = Self {
            segments: vec![head],
            settling: SettlingRule {
                settle_distance: config.settle_distance(),
                arrival_epsilon: config.arrival_epsilon,
            },
            step_order: config.step_order,
            step: config.step_distance(),
            turn_angle: config.turn_angle,
            segment_length: config.segment_length,
            extents: config.segment_extents,
            max_queue_size: config.max_queue_size,
            issued_heading: 0.0,
            dropped_commands: 0,
        };
        for _ in 1..config.initial_length {
            chain.add_to_tail(&mut register);
        }
        chain
    }

    /// Number of segments, head included
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a chain keeps its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Front segment
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Segment by index
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Running heading of every yaw issued on the head
    pub const fn issued_heading(&self) -> f32 {
        self.issued_heading
    }

    /// Turns dropped because a queue was full
    pub const fn dropped_commands(&self) -> u64 {
        self.dropped_commands
    }

    /// Distance each segment moves per tick
    pub const fn step_distance(&self) -> f32 {
        self.step
    }

    /// Ticks a turn needs to travel one link
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ticks_per_link(&self) -> usize {
        let travel = self.settling.settle_distance - self.settling.arrival_epsilon;
        ((travel / self.step).ceil() as usize).max(1)
    }

    /// Shadow skeleton joint positions, head first
    pub fn joint_positions(&self) -> Vec<Vec3> {
        self.segments.iter().map(|s| s.shadow().position).collect()
    }

    /// Translate a steering input into a head turn
    pub fn turn(&mut self, direction: TurnDirection) -> bool {
        let (axis, angle) = direction.to_rotation(self.turn_angle);
        let accepted = self.push_to_head(RotationCommand {
            axis,
            angle,
            destination: self.head().position(),
        });
        if accepted && axis == RotationAxis::Yaw {
            self.issued_heading += angle;
        }
        accepted
    }

    /// Queue a raw command on the head
    pub fn push_to_head(&mut self, command: RotationCommand) -> bool {
        self.deliver(0, command)
    }

    /// Advance the chain by one tick
    pub fn step(&mut self) -> StepReport {
        match self.step_order {
            StepOrder::RotateThenTranslate => {
                let report = self.rotate_pass();
                self.translate_pass();
                report
            }
            StepOrder::TranslateThenRotate => {
                self.translate_pass();
                self.rotate_pass()
            }
        }
    }

    fn rotate_pass(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let mut cursor = Some(0);
        while let Some(index) = cursor {
            while let Some(command) = self.next_executable(index) {
                let segment = &mut self.segments[index];
                if segment.kind() == SegmentKind::Tail {
                    let error = distance(&segment.position(), &command.destination);
                    report.max_arrival_error = report.max_arrival_error.max(error);
                }
                segment.apply(&command);
                report.turns_executed += 1;

                let destination = segment.position();
                if let Some(child) = segment.child() {
                    self.deliver(child, RotationCommand { destination, ..command });
                }
            }
            cursor = self.segments[index].child();
        }
        report
    }

    fn next_executable(&mut self, index: usize) -> Option<RotationCommand> {
        let settling = self.settling;
        let segment = &mut self.segments[index];
        let pending = segment.front()?;
        if segment.kind() == SegmentKind::Tail && !settling.is_ready(pending) {
            return None;
        }
        segment.pop()
    }

    fn translate_pass(&mut self) {
        for segment in &mut self.segments {
            segment.advance(self.step);
        }
    }

    fn deliver(&mut self, index: usize, command: RotationCommand) -> bool {
        let accepted = self.segments[index].enqueue(
            command,
            self.settling.settle_distance,
            self.max_queue_size,
        );
        if !accepted {
            self.dropped_commands += 1;
            if self.dropped_commands == 1 || self.dropped_commands % 100 == 0 {
                log::warn!(
                    "Rotation queue of segment {} is full ({} commands); {} turns dropped so far",
                    index, self.max_queue_size, self.dropped_commands
                );
            }
        }
        accepted
    }

    /// Append a segment one segment length behind the current tail
    ///
    /// The new segment copies the tail's orientation and sits along the
    /// tail's backward vector, which for planar motion is
    /// `(-cos(heading), sin(heading), 0)`. Returns its index.
    pub fn add_to_tail(&mut self, register: impl FnOnce(&Transform) -> NodeId) -> usize {
        let parent_index = self.segments.len() - 1;
        let parent = &self.segments[parent_index];
        let offset = -parent.direction() * self.segment_length;

        let mut transform = parent.transform().clone();
        transform.translate(offset);
        let mut shadow = parent.shadow().clone();
        shadow.translate(offset);

        let node = register(&transform);
        let segment = Segment::new(
            SegmentKind::Tail,
            transform,
            shadow,
            self.extents,
            parent.heading(),
            Some(parent_index),
            node,
        );

        let index = self.segments.len();
        self.segments.push(segment);
        self.segments[parent_index].set_child(Some(index));
        log::debug!("Chain grew to {} segments", self.segments.len());
        index
    }

    /// Remove the last segment; the head is never removed
    pub fn shorten(&mut self) -> Option<Segment> {
        if self.segments.len() <= 1 {
            return None;
        }
        let removed = self.segments.pop()?;
        if let Some(parent) = removed.parent() {
            self.segments[parent].set_child(None);
        }
        log::debug!("Chain shrank to {} segments", self.segments.len());
        Some(removed)
    }
}
