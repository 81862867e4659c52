//! Camera view modes for frames no transition is driving.
//!
//! Provides an automatic orbit with drag control, first- and third-person
//! gameplay views with snap-on-entry smoothing, onboard drone views, and
//! the projection/uniform hand-off to the renderer.

/// View-mode controller deriving the camera transform each frame.
pub mod controller;
/// Lens and GPU uniform types.
pub mod core;
/// Pointer-event drag accumulation for the orbit camera.
pub mod input;
/// View modes and their smoothing memory.
pub mod view;
