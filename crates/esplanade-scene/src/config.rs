//! Configuration loading and validation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use esplanade_core::{AxisBounds, PropClass};
use esplanade_motion::SchedulerConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub bounds: BoundsConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsConfig {
    /// Minimum x position
    #[serde(default = "default_min_x")]
    pub min_x: f32,
    /// Maximum x position
    #[serde(default = "default_max_x")]
    pub max_x: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min_x: default_min_x(),
            max_x: default_max_x(),
        }
    }
}

fn default_min_x() -> f32 {
    -35.0
}

fn default_max_x() -> f32 {
    35.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Tick cadence in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Axis speed of road traffic
    #[serde(default = "default_vehicle_speed")]
    pub vehicle_speed: f32,
    /// Axis speed of water traffic
    #[serde(default = "default_vessel_speed")]
    pub vessel_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            vehicle_speed: default_vehicle_speed(),
            vessel_speed: default_vessel_speed(),
        }
    }
}

fn default_tick_ms() -> u64 {
    16
}

fn default_vehicle_speed() -> f32 {
    0.4
}

fn default_vessel_speed() -> f32 {
    0.1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Upper bound (inclusive) of the random initial axis coordinate
    #[serde(default = "default_max_offset")]
    pub max_offset: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_offset: default_max_offset(),
        }
    }
}

fn default_max_offset() -> u32 {
    30
}

impl SceneConfig {
    /// Validated axis bounds
    pub fn axis_bounds(&self) -> Result<AxisBounds> {
        Ok(AxisBounds::new(self.bounds.min_x, self.bounds.max_x)?)
    }

    /// Convert to scheduler configuration
    pub fn to_scheduler_config(&self) -> Result<SchedulerConfig> {
        Ok(SchedulerConfig {
            bounds: self.axis_bounds()?,
            tick: Duration::from_millis(self.motion.tick_ms),
        })
    }

    /// Motion speed for a prop class
    pub fn speed_for(&self, class: PropClass) -> f32 {
        match class {
            PropClass::Vehicle => self.motion.vehicle_speed,
            PropClass::Vessel => self.motion.vessel_speed,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<SceneConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: SceneConfig = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(SceneConfig::default())
    }
}
