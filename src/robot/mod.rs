//! Core robot types.
//!
//! This module defines the vocabulary shared by the sequencer and the body:
//! - [`commands`]: Remote command tokens and their parsing.
//! - [`direction`]: Walk and head headings, in degrees clockwise from forward.
//! - [`leg`]: The articulated front legs and their coordinates.
//! - [`state`]: Session state owned by the sequencer (busy gate, scale counter).
pub mod commands;
pub mod direction;
pub mod leg;
pub mod state;
