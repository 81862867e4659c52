//! Shared math and timing utilities.
//!
//! Helpers for easing curves, tween clocks, trajectory geometry and
//! adaptive frame pacing.

pub mod easing;
pub mod frame_timing;
pub mod geometry;
pub mod tween;
