//! Asynchronous tasks for the hexapod runtime.
//!
//! - [`motion_task`]: Runs the sequencer's routines against the body.
//! - [`remote_task`]: Feeds remote controller events to the skill.
//!
//! Tasks are spawned from `main.rs` and communicate via Embassy channels.
pub mod motion_task;
pub mod remote_task;
