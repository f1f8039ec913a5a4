use core::fmt::Display;

use crate::config::{LEG_RAISED, LEG_REST};

/// The two front legs the skill articulates. The discriminant is the
/// driver's leg index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    FrontRight = 0,
    FrontLeft = 1,
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::FrontLeft => f.write_str("Front left"),
            Leg::FrontRight => f.write_str("Front right"),
        }
    }
}

/// Tip coordinate of a leg, in millimeters in the leg frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LegPosition {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Forward-extended, lifted pose used by the point gesture.
    pub const fn raised() -> Self {
        Self::new(LEG_RAISED[0], LEG_RAISED[1], LEG_RAISED[2])
    }

    pub const fn rest() -> Self {
        Self::new(LEG_REST[0], LEG_REST[1], LEG_REST[2])
    }
}

impl Display for LegPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
