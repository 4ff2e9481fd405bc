//! Turn commands and their queue entries

use serde::{Deserialize, Serialize};
use snake_engine::foundation::math::{Axis, Vec3};

/// Axis a segment turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Turn within the play plane
    Yaw,
    /// Turn out of the play plane
    Pitch,
}

impl RotationAxis {
    /// Local segment axis this turn rotates about
    pub const fn local_axis(self) -> Axis {
        match self {
            Self::Yaw => Axis::X,
            Self::Pitch => Axis::Y,
        }
    }
}

/// Player steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Pitch up
    Up,
    /// Pitch down
    Down,
    /// Yaw left
    Left,
    /// Yaw right
    Right,
}

impl TurnDirection {
    /// Axis and signed angle for a turn of `magnitude` radians
    pub fn to_rotation(self, magnitude: f32) -> (RotationAxis, f32) {
        match self {
            Self::Up => (RotationAxis::Pitch, magnitude),
            Self::Down => (RotationAxis::Pitch, -magnitude),
            Self::Left => (RotationAxis::Yaw, -magnitude),
            Self::Right => (RotationAxis::Yaw, magnitude),
        }
    }
}

/// One discrete turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCommand {
    /// Axis of the turn
    pub axis: RotationAxis,
    /// Signed angle in radians
    pub angle: f32,
    /// Where the command was issued, or where the parent executed it.
    /// A tail executing the turn should be standing on this point.
    pub destination: Vec3,
}

/// A queued command and how far the receiving segment must still travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FutureRotation {
    /// The turn itself
    pub command: RotationCommand,
    /// Path length left before the turn may execute
    pub remaining: f32,
}
