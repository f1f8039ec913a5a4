//! Command types received from the remote controller.
//!
//! Tokens are matched exactly (case-sensitive). Anything outside the
//! vocabulary fails with [`ParseCommandError`] and is ignored upstream.
use core::fmt::Display;

use super::{direction::Direction, leg::Leg};

/// Which rectangle walk to perform. All three trace the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectangleKind {
    /// Constant heading, the walk direction changes per side.
    Translation,
    /// The head turns before each side, the robot always walks forward.
    Reorientation,
    /// Like `Reorientation`, resting after every side.
    ReorientationWithPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartMode1,
    StartMode2,
    StartMode3,
    Stop,
    Walk(Direction),
    StandUp,
    StandDown,
    GoCircle,
    /// Rectangle walk, with the signed step applied to the scale counter first.
    GoRectangle(RectangleKind, i8),
    Point(Leg),
}

impl Command {
    /// Scale counter change requested by this command, if any.
    pub fn scale_step(&self) -> Option<i8> {
        match self {
            Command::GoRectangle(_, step) => Some(*step),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCommandError;

impl Display for ParseCommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unrecognised command token")
    }
}

impl TryFrom<&str> for Command {
    type Error = ParseCommandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        use RectangleKind::*;

        match value {
            "start_mode1" => Ok(Command::StartMode1),
            "start_mode2" => Ok(Command::StartMode2),
            "start_mode3" => Ok(Command::StartMode3),
            "stop" => Ok(Command::Stop),
            "left" => Ok(Command::Walk(Direction::Left)),
            "right" => Ok(Command::Walk(Direction::Right)),
            "forward" => Ok(Command::Walk(Direction::Forward)),
            "backward" => Ok(Command::Walk(Direction::Backward)),
            "stand-up" => Ok(Command::StandUp),
            "stand-down" => Ok(Command::StandDown),
            "gocircle" => Ok(Command::GoCircle),
            "gorect_p" => Ok(Command::GoRectangle(Translation, 1)),
            "gorect_n" => Ok(Command::GoRectangle(Translation, -1)),
            "gorect2_p" => Ok(Command::GoRectangle(Reorientation, 1)),
            "gorect2_n" => Ok(Command::GoRectangle(Reorientation, -1)),
            "gorectp_p" => Ok(Command::GoRectangle(ReorientationWithPause, 1)),
            "gorectp_n" => Ok(Command::GoRectangle(ReorientationWithPause, -1)),
            "point-left" => Ok(Command::Point(Leg::FrontLeft)),
            "point-right" => Ok(Command::Point(Leg::FrontRight)),
            _ => Err(ParseCommandError),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Command::StartMode1 => f.write_str("start_mode1"),
            Command::StartMode2 => f.write_str("start_mode2"),
            Command::StartMode3 => f.write_str("start_mode3"),
            Command::Stop => f.write_str("stop"),
            Command::Walk(direction) => write!(f, "walk {direction}"),
            Command::StandUp => f.write_str("stand-up"),
            Command::StandDown => f.write_str("stand-down"),
            Command::GoCircle => f.write_str("gocircle"),
            Command::GoRectangle(kind, step) => write!(f, "rectangle {kind:?} ({step:+})"),
            Command::Point(leg) => write!(f, "point {leg}"),
        }
    }
}
