//! Library root for the hexapod motion sequencer.
//!
//! Turns remote command tokens into timed motion routines for a six-legged
//! robot, one routine at a time, with `stop` able to interrupt any of them.
//! Used by the host binary and by the integration tests.
#![cfg_attr(not(test), no_std)]

pub mod body;
pub mod config;
pub mod kinematics;
pub mod remote;
pub mod robot;
pub mod routines;
pub mod sequencer;
pub mod tasks;
