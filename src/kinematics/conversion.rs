//! Inverse kinematics for a three-joint leg.
//!
//! Converts a tip coordinate into (femur, tibia, coxa) angles in degrees.
//! A coordinate outside of the leg's reach has no solution.
use core::f32::consts::PI;
#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::{LENGTH_COXA, LENGTH_FEMUR, LENGTH_TIBIA};
use crate::robot::leg::LegPosition;

/// Joint angles of one leg, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    pub femur: f32,
    pub tibia: f32,
    pub coxa: f32,
}

/// Solve the joint angles for `pos`, or `None` when it is out of reach.
pub fn cartesian_to_polar(pos: LegPosition) -> Option<JointAngles> {
    let LegPosition { x, y, z } = pos;

    // Calculate w-z degree
    let w_sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let w = w_sign * (x.powi(2) + y.powi(2)).sqrt();
    let v = w - LENGTH_COXA;

    let d_squared = v.powi(2) + z.powi(2);
    let d = d_squared.sqrt();

    if d == 0.0 || d > LENGTH_FEMUR + LENGTH_TIBIA || d < (LENGTH_TIBIA - LENGTH_FEMUR).abs() {
        return None;
    }

    let femur = z.atan2(v)
        + ((LENGTH_FEMUR.powi(2) - LENGTH_TIBIA.powi(2) + d_squared) / (2.0 * LENGTH_FEMUR * d))
            .acos();

    let tibia = ((LENGTH_FEMUR.powi(2) + LENGTH_TIBIA.powi(2) - d_squared)
        / (2.0 * LENGTH_FEMUR * LENGTH_TIBIA))
        .acos();

    // Calculate x-y-z degree
    let coxa = if w >= 0.0 { y.atan2(x) } else { (-y).atan2(-x) };

    let angles = JointAngles {
        femur: femur * 180.0 / PI,
        tibia: tibia * 180.0 / PI,
        coxa: coxa * 180.0 / PI,
    };

    if angles.femur.is_nan() || angles.tibia.is_nan() || angles.coxa.is_nan() {
        return None;
    }
    Some(angles)
}
