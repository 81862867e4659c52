//! Centralized choreography options with TOML preset support.
//!
//! All tweakable settings (bounds, drone behaviors, failsafe, camera modes,
//! transitions, frame pacing, environment) are consolidated here. Options
//! serialize to/from TOML so a host can ship tuned presets.

mod bounds;
mod camera;
mod drone;
mod transition;

use std::path::Path;

pub use bounds::PlayableBounds;
pub use camera::CameraOptions;
pub use drone::{ActionWeights, DroneOptions, FailsafeOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::{EnvironmentOptions, FrameOptions, TransitionOptions};

use crate::error::ChoreoError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[drone]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Region drones and the camera may travel through.
    pub bounds: PlayableBounds,
    /// Drone fleet and action geometry.
    pub drone: DroneOptions,
    /// Stuck detection.
    pub failsafe: FailsafeOptions,
    /// Camera projection and view modes.
    pub camera: CameraOptions,
    /// Lifecycle cinematics.
    pub transition: TransitionOptions,
    /// Adaptive frame pacing.
    pub frame: FrameOptions,
    /// Ambient lighting clock.
    pub environment: EnvironmentOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChoreoError> {
        let content = std::fs::read_to_string(path).map_err(ChoreoError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| ChoreoError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChoreoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChoreoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChoreoError::Io)?;
        }
        std::fs::write(path, content).map_err(ChoreoError::Io)
    }

    /// Reject configurations the choreography cannot run with.
    pub fn validate(&self) -> Result<(), ChoreoError> {
        if !self.bounds.is_valid() {
            return Err(ChoreoError::InvalidOptions(
                "playable bounds must have positive extent on every axis"
                    .to_owned(),
            ));
        }
        if self.drone.approach_speed <= 0.0 {
            return Err(ChoreoError::InvalidOptions(format!(
                "drone.approach_speed must be positive, got {}",
                self.drone.approach_speed
            )));
        }
        if self.drone.idle_min_ms > self.drone.idle_max_ms {
            return Err(ChoreoError::InvalidOptions(
                "drone.idle_min_ms exceeds drone.idle_max_ms".to_owned(),
            ));
        }
        if self.failsafe.check_interval_ms == 0 {
            return Err(ChoreoError::InvalidOptions(
                "failsafe.check_interval_ms must be non-zero".to_owned(),
            ));
        }
        if self.frame.active_fps == 0 || self.frame.idle_fps == 0 {
            return Err(ChoreoError::InvalidOptions(
                "frame rates must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }
}
