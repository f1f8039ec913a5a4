use core::fmt::Display;

/// Heading used both for continuous walks and head orientation.
///
/// Angles are counted clockwise from the robot's front, which gives the
/// slightly surprising `Right = 270`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Left,
    Backward,
    Right,
}

impl Direction {
    pub const fn degrees(self) -> f32 {
        match self {
            Direction::Forward => 0.0,
            Direction::Left => 90.0,
            Direction::Backward => 180.0,
            Direction::Right => 270.0,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Left => f.write_str("left"),
            Direction::Backward => f.write_str("backward"),
            Direction::Right => f.write_str("right"),
        }
    }
}
