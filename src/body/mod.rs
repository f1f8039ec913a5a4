//! Actuator interface of the hexapod body.
//!
//! The sequencer only ever talks to the robot through [`HexaBody`]. Each call
//! resolves once the physical motion is done (or accepted, for the
//! continuous walk), so routines can treat them as blocking primitives.
//!
//! - [`sim`]: a logging stand-in used by the host binary.
pub mod sim;

use core::fmt::Display;
use embassy_time::Duration;

use crate::robot::{
    direction::Direction,
    leg::{Leg, LegPosition},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    /// The actuator link is not established or was lost.
    LinkDown,
    /// The leg target has no joint solution.
    Unreachable(Leg),
    /// The driver refused the call.
    Rejected(&'static str),
}

impl Display for BodyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BodyError::LinkDown => f.write_str("actuator link is down"),
            BodyError::Unreachable(leg) => write!(f, "{leg} leg target is out of reach"),
            BodyError::Rejected(reason) => write!(f, "actuator rejected the call: {reason}"),
        }
    }
}

/// Capabilities of the hexapod driver.
#[allow(async_fn_in_trait)]
pub trait HexaBody {
    /// Establish the actuator link.
    async fn start(&self) -> Result<(), BodyError>;
    /// Release the actuator link.
    async fn close(&self) -> Result<(), BodyError>;
    async fn stand_with_height(&self, height: f32) -> Result<(), BodyError>;
    async fn move_head(&self, heading: Direction, duration: Duration) -> Result<(), BodyError>;
    /// Start walking until [`HexaBody::stop_walking_continuously`] is called.
    async fn walk_continuously(&self, direction: Direction, speed: f32)
        -> Result<(), BodyError>;
    async fn stop_walking_continuously(&self) -> Result<(), BodyError>;
    async fn move_leg(
        &self,
        leg: Leg,
        position: LegPosition,
        duration: Duration,
    ) -> Result<(), BodyError>;
    async fn pitch(&self, angle: f32, duration: Duration) -> Result<(), BodyError>;
    /// Release all motors.
    async fn relax(&self) -> Result<(), BodyError>;
}
