//! Routine library.
//!
//! A routine is an ordered list of [`Step`]s built from a [`Command`]. The
//! parametric rectangle walks take the scale counter value at planning time,
//! so a running routine never sees later counter changes.
extern crate alloc;

use alloc::vec::Vec;
use core::fmt::Display;
use embassy_time::Duration;

use crate::config::{
    MotionTimings, BOW_PITCH_DOWN, BOW_PITCH_UP, HEIGHT_STAND_DOWN, HEIGHT_STAND_UP, WALK_SPEED,
};
use crate::robot::{
    commands::{Command, RectangleKind},
    direction::Direction,
    leg::{Leg, LegPosition},
};

/// One actuator call or a timed wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    StandWithHeight(f32),
    MoveHead { heading: Direction, duration: Duration },
    Walk { direction: Direction, speed: f32 },
    StopWalking,
    MoveLeg { leg: Leg, position: LegPosition, duration: Duration },
    Pitch { angle: f32, duration: Duration },
    Relax,
    Sleep(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutineSpec {
    pub name: &'static str,
    pub steps: Vec<Step>,
}

impl RoutineSpec {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Walks started by this routine, in order.
    pub fn walk_segments(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Walk { direction, .. } => Some(*direction),
            _ => None,
        })
    }

    /// Sum of every wait and timed actuator call.
    pub fn nominal_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::MoveHead { duration, .. }
                | Step::MoveLeg { duration, .. }
                | Step::Pitch { duration, .. }
                | Step::Sleep(duration) => *duration,
                _ => Duration::from_ticks(0),
            })
            .fold(Duration::from_ticks(0), |acc, d| acc + d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// The command has no routine (circle path).
    Unsupported(Command),
    /// `stop` is handled by the sequencer itself.
    NotARoutine(Command),
}

impl Display for PlanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlanError::Unsupported(cmd) => write!(f, "{cmd} is not supported"),
            PlanError::NotARoutine(cmd) => write!(f, "{cmd} does not start a routine"),
        }
    }
}

/// Build the routine for `command`. `scale` is the already updated counter.
pub fn plan(command: Command, scale: u8, timings: &MotionTimings) -> Result<RoutineSpec, PlanError> {
    match command {
        Command::StartMode1 => Ok(greeting_bow(timings)),
        Command::StartMode2 => Ok(greeting_point(timings)),
        Command::StartMode3 => Ok(greeting_look(timings)),
        Command::Walk(direction) => Ok(walk(direction, timings)),
        Command::StandUp => {
            Ok(RoutineSpec::new("stand-up").then(Step::StandWithHeight(HEIGHT_STAND_UP)))
        }
        Command::StandDown => {
            Ok(RoutineSpec::new("stand-down").then(Step::StandWithHeight(HEIGHT_STAND_DOWN)))
        }
        Command::GoRectangle(kind, _) => {
            Ok(rectangle(kind, timings.full_duration(scale), timings))
        }
        Command::Point(leg) => Ok(point(RoutineSpec::new("point"), leg, timings)),
        Command::GoCircle => Err(PlanError::Unsupported(command)),
        Command::Stop => Err(PlanError::NotARoutine(command)),
    }
}

/// Head neutral, stop walking, release motors.
pub fn safe_state(timings: &MotionTimings) -> RoutineSpec {
    RoutineSpec::new("safe-state")
        .then(head(Direction::Forward, timings))
        .then(Step::StopWalking)
        .then(Step::Relax)
}

fn head(heading: Direction, timings: &MotionTimings) -> Step {
    Step::MoveHead {
        heading,
        duration: timings.head_duration,
    }
}

fn walk_for(spec: RoutineSpec, direction: Direction, duration: Duration) -> RoutineSpec {
    spec.then(Step::Walk {
        direction,
        speed: WALK_SPEED,
    })
    .then(Step::Sleep(duration))
    .then(Step::StopWalking)
}

fn walk(direction: Direction, timings: &MotionTimings) -> RoutineSpec {
    let spec = RoutineSpec::new("walk").then(head(Direction::Forward, timings));
    walk_for(spec, direction, timings.move_duration)
}

/// Raise the leg forward, hold, put it back.
fn point(spec: RoutineSpec, leg: Leg, timings: &MotionTimings) -> RoutineSpec {
    spec.then(Step::MoveLeg {
        leg,
        position: LegPosition::raised(),
        duration: timings.leg_duration,
    })
    .then(Step::Sleep(timings.leg_duration))
    .then(Step::MoveLeg {
        leg,
        position: LegPosition::rest(),
        duration: timings.leg_duration,
    })
}

fn greeting_bow(timings: &MotionTimings) -> RoutineSpec {
    RoutineSpec::new("greeting-bow")
        .then(head(Direction::Forward, timings))
        .then(Step::Pitch {
            angle: BOW_PITCH_DOWN.0,
            duration: timings.bow_down_duration,
        })
        .then(Step::Pitch {
            angle: BOW_PITCH_UP.0,
            duration: timings.bow_up_duration,
        })
        .then(Step::StandWithHeight(HEIGHT_STAND_DOWN))
        .then(Step::StandWithHeight(HEIGHT_STAND_UP))
}

fn greeting_point(timings: &MotionTimings) -> RoutineSpec {
    let spec = point(RoutineSpec::new("greeting-point"), Leg::FrontLeft, timings);
    point(spec, Leg::FrontRight, timings)
}

fn greeting_look(timings: &MotionTimings) -> RoutineSpec {
    RoutineSpec::new("greeting-look")
        .then(head(Direction::Left, timings))
        .then(head(Direction::Right, timings))
        .then(head(Direction::Forward, timings))
}

// Sides of the rectangle, clockwise.
const SIDES: [Direction; 4] = [
    Direction::Forward,
    Direction::Right,
    Direction::Backward,
    Direction::Left,
];

fn rectangle(kind: RectangleKind, side: Duration, timings: &MotionTimings) -> RoutineSpec {
    let name = match kind {
        RectangleKind::Translation => "rectangle",
        RectangleKind::Reorientation => "rectangle-heading",
        RectangleKind::ReorientationWithPause => "rectangle-pause",
    };
    let mut spec = RoutineSpec::new(name);

    for (i, heading) in SIDES.into_iter().enumerate() {
        let direction = match kind {
            RectangleKind::Translation => heading,
            RectangleKind::Reorientation | RectangleKind::ReorientationWithPause => {
                if i > 0 {
                    spec = spec.then(head(heading, timings));
                }
                Direction::Forward
            }
        };
        spec = walk_for(spec, direction, side);
        if kind == RectangleKind::ReorientationWithPause {
            spec = spec.then(Step::Sleep(timings.pause_middle));
        }
    }

    if kind != RectangleKind::Translation {
        spec = spec.then(head(Direction::Forward, timings));
    }
    spec
}
