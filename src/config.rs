//! Motion constants and timing configuration for the hexapod.
//!
//! Durations are kept in [`MotionTimings`] so that the same routines can be
//! replayed on a shortened clock (tests, dry runs). Everything else is a
//! plain constant matching the robot's calibration.
use embassy_time::Duration;

// TIMINGS (milliseconds)
pub const TIME_MOVE_DURATION: u64 = 2000;
pub const TIME_MOVE_DURATION_LONG: u64 = 5000;
pub const TIME_PAUSE_MIDDLE: u64 = 5000;
pub const MOVE_HEAD_DURATION: u64 = 500;
pub const MOVE_LEG_DURATION: u64 = 1000;
pub const STAND_DURATION: u64 = 1000;

/// Continuous walk speed in cm per second.
pub const WALK_SPEED: f32 = 1.5;

// POSTURE
pub const HEIGHT_STAND_UP: f32 = 50.0;
pub const HEIGHT_STAND_DOWN: f32 = -10.0;

// BOW GESTURE: (angle in degrees, duration in ms)
pub const BOW_PITCH_DOWN: (f32, u64) = (-20.0, 750);
pub const BOW_PITCH_UP: (f32, u64) = (20.0, 1500);

// LEG COORDINATES (mm, leg frame)
pub const LEG_RAISED: [f32; 3] = [75.0, 161.0, -89.0];
pub const LEG_REST: [f32; 3] = [90.0, 122.0, 70.0];

// LEG SIZE (mm)
pub const LENGTH_COXA: f32 = 45.0;
pub const LENGTH_FEMUR: f32 = 100.0;
pub const LENGTH_TIBIA: f32 = 140.0;

/// Upper bound of the rectangle distance multiplier.
pub const MAX_SCALE: u8 = 3;

// CHANNELS
pub const LAUNCH_CHANNEL_SIZE: usize = 2;
pub const EVENT_CHANNEL_SIZE: usize = 8;

// REMOTE
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const TOKEN_CAPACITY: usize = 32;
pub const JSON_CAPACITY: usize = 256;

/// Every duration a routine sleeps or hands to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTimings {
    /// Length of a manual-drive walk.
    pub move_duration: Duration,
    /// Length of one rectangle side at scale 1.
    pub long_move_duration: Duration,
    /// Rest between two rectangle sides.
    pub pause_middle: Duration,
    pub head_duration: Duration,
    pub leg_duration: Duration,
    pub bow_down_duration: Duration,
    pub bow_up_duration: Duration,
}

impl MotionTimings {
    pub const fn new() -> Self {
        Self {
            move_duration: Duration::from_millis(TIME_MOVE_DURATION),
            long_move_duration: Duration::from_millis(TIME_MOVE_DURATION_LONG),
            pause_middle: Duration::from_millis(TIME_PAUSE_MIDDLE),
            head_duration: Duration::from_millis(MOVE_HEAD_DURATION),
            leg_duration: Duration::from_millis(MOVE_LEG_DURATION),
            bow_down_duration: Duration::from_millis(BOW_PITCH_DOWN.1),
            bow_up_duration: Duration::from_millis(BOW_PITCH_UP.1),
        }
    }

    /// Same proportions, every duration divided by `divisor`.
    pub fn scaled_down(divisor: u32) -> Self {
        let base = Self::new();
        let divisor = divisor.max(1);
        Self {
            move_duration: base.move_duration / divisor,
            long_move_duration: base.long_move_duration / divisor,
            pause_middle: base.pause_middle / divisor,
            head_duration: base.head_duration / divisor,
            leg_duration: base.leg_duration / divisor,
            bow_down_duration: base.bow_down_duration / divisor,
            bow_up_duration: base.bow_up_duration / divisor,
        }
    }

    /// Duration of one rectangle side for the given scale.
    pub fn full_duration(&self, scale: u8) -> Duration {
        self.long_move_duration * u32::from(scale)
    }
}

impl Default for MotionTimings {
    fn default() -> Self {
        Self::new()
    }
}
