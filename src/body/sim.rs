//! Simulated hexapod body.
//!
//! Keeps a pose record, logs every call and holds the caller for the nominal
//! duration of each timed motion. Leg targets go through the inverse
//! kinematics so that unreachable poses fail like they would on the robot.
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use log::{debug, info};

use super::{BodyError, HexaBody};
use crate::config::STAND_DURATION;
use crate::kinematics::conversion::cartesian_to_polar;
use crate::robot::{
    direction::Direction,
    leg::{Leg, LegPosition},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub connected: bool,
    pub height: f32,
    pub heading: Direction,
    pub walking: Option<Direction>,
    pub relaxed: bool,
}

pub struct SimulatedBody {
    pose: Mutex<CriticalSectionRawMutex, RefCell<BodyPose>>,
}

impl SimulatedBody {
    pub const fn new() -> Self {
        Self {
            pose: Mutex::new(RefCell::new(BodyPose {
                connected: false,
                height: 0.0,
                heading: Direction::Forward,
                walking: None,
                relaxed: true,
            })),
        }
    }

    pub fn pose(&self) -> BodyPose {
        self.pose.lock(|pose| *pose.borrow())
    }

    /// Apply `f` to the pose if the link is up.
    fn update(&self, f: impl FnOnce(&mut BodyPose)) -> Result<(), BodyError> {
        self.pose.lock(|pose| {
            let mut pose = pose.borrow_mut();
            if !pose.connected {
                return Err(BodyError::LinkDown);
            }
            f(&mut *pose);
            Ok(())
        })
    }
}

impl Default for SimulatedBody {
    fn default() -> Self {
        Self::new()
    }
}

impl HexaBody for SimulatedBody {
    async fn start(&self) -> Result<(), BodyError> {
        self.pose.lock(|pose| pose.borrow_mut().connected = true);
        info!("[BODY] link started");
        Ok(())
    }

    async fn close(&self) -> Result<(), BodyError> {
        self.pose.lock(|pose| {
            let mut pose = pose.borrow_mut();
            pose.connected = false;
            pose.walking = None;
            pose.relaxed = true;
        });
        info!("[BODY] link closed");
        Ok(())
    }

    async fn stand_with_height(&self, height: f32) -> Result<(), BodyError> {
        self.update(|pose| {
            pose.height = height;
            pose.relaxed = false;
        })?;
        info!("[BODY] stand with height {height}");
        Timer::after(Duration::from_millis(STAND_DURATION)).await;
        Ok(())
    }

    async fn move_head(&self, heading: Direction, duration: Duration) -> Result<(), BodyError> {
        self.update(|pose| {
            pose.heading = heading;
            pose.relaxed = false;
        })?;
        info!("[BODY] head to {}°", heading.degrees());
        Timer::after(duration).await;
        Ok(())
    }

    async fn walk_continuously(&self, direction: Direction, speed: f32) -> Result<(), BodyError> {
        if speed <= 0.0 {
            return Err(BodyError::Rejected("walk speed must be positive"));
        }
        self.update(|pose| {
            pose.walking = Some(direction);
            pose.relaxed = false;
        })?;
        info!("[BODY] walking {direction} at {speed} cm/s");
        Ok(())
    }

    async fn stop_walking_continuously(&self) -> Result<(), BodyError> {
        self.update(|pose| pose.walking = None)?;
        info!("[BODY] walking stopped");
        Ok(())
    }

    async fn move_leg(
        &self,
        leg: Leg,
        position: LegPosition,
        duration: Duration,
    ) -> Result<(), BodyError> {
        let angles = cartesian_to_polar(position).ok_or(BodyError::Unreachable(leg))?;
        self.update(|pose| pose.relaxed = false)?;
        info!("[BODY] {leg} leg to {position}");
        debug!(
            "[BODY] {leg} joints femur {} tibia {} coxa {}",
            angles.femur, angles.tibia, angles.coxa
        );
        Timer::after(duration).await;
        Ok(())
    }

    async fn pitch(&self, angle: f32, duration: Duration) -> Result<(), BodyError> {
        self.update(|pose| pose.relaxed = false)?;
        info!("[BODY] pitch {angle}°");
        Timer::after(duration).await;
        Ok(())
    }

    async fn relax(&self) -> Result<(), BodyError> {
        self.update(|pose| {
            pose.walking = None;
            pose.relaxed = true;
        })?;
        info!("[BODY] motors released");
        Ok(())
    }
}
