//! Leg kinematics for the simulated body.
//!
//! - [`conversion`] solves the joint angles of a leg for a tip coordinate,
//!   which tells the body whether a requested leg pose is reachable.
pub mod conversion;
