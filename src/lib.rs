// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Autonomous camera and drone choreography for a 3D grid arcade game.
//!
//! The crate selects and flies procedural behaviors for roaming camera
//! drones, derives the observer transform from the active view mode, and
//! plays one-shot cinematics on game lifecycle changes (round start, crash,
//! game over). Everything runs inside a single frame-driven tick.
//!
//! # Key entry points
//!
//! - [`engine::FrameScheduler`] - per-frame orchestration and throttling
//! - [`drone::DroneChoreographer`] - the roaming drone fleet
//! - [`camera::controller::CameraModeController`] - orbit, first-person,
//!   third-person and onboard drone views
//! - [`transition::TransitionAnimator`] - lifecycle cinematics
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! The host owns the refresh loop and calls
//! [`FrameScheduler::tick`](engine::FrameScheduler::tick) with a
//! [`host::FrameInput`] snapshot. The scheduler skips frames that arrive
//! ahead of its adaptive target rate; a processed frame advances the
//! lighting clock, every drone's schedule, the lifecycle triggers, and then
//! either the running transition or the camera view mode. Completion of a
//! transition is reported back as [`host::TransitionEvent`] values.
//!
//! All state is passed explicitly; there are no globals and no threads.

pub mod camera;
pub mod drone;
pub mod engine;
pub mod error;
pub mod host;
pub mod options;
pub mod transform;
pub mod transition;
pub mod util;
