//! Lifecycle constants and driver configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Hunger at which a fish starves
pub const HUNGER_TO_STARVE: i32 = 15;
/// Hunger removed by one feeding
pub const FISH_FOOD_AMOUNT: i32 = 5;
pub const FISH_MIN_HUNGER: i32 = 0;
/// Hunger of a freshly added fish
pub const FISH_INITIAL_HUNGER: i32 = 2;

/// Ticks between growth events
pub const GROWTH_TIMER_START: i32 = 50;
pub const GROWTH_TIMER_END: i32 = 0;

pub const FISH_MIN_SIZE: i32 = 1;
pub const FISH_MAX_SIZE: i32 = 20;

pub const MIN_CLEANLINESS: i32 = 0;
pub const MAX_CLEANLINESS: i32 = 30;

/// Swim speed bounds, in normalized tank widths per motion update
pub const MIN_SPEED: f64 = 0.001;
pub const MAX_SPEED: f64 = 0.010;

/// Lowest point a dead fish sinks to
pub const SINK_FLOOR: f64 = 0.9;
/// Fish never spawn below this height
pub const SPAWN_MAX_Y: f64 = 0.95;

/// Headless driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Where the aquarium is saved and loaded from
    pub save_path: String,
    /// Random seed; entropy when absent
    pub seed: Option<u64>,
    /// Lifecycle tick interval (milliseconds)
    pub tick_interval_ms: u64,
    /// Motion update interval (milliseconds)
    pub motion_interval_ms: u64,
    /// Autosave interval (seconds)
    pub autosave_interval_secs: u64,
    /// Log a tank snapshot every N lifecycle ticks
    pub metrics_every_ticks: u64,
    /// Default fish added when the loaded tank is empty
    pub initial_fish: usize,
    /// Stop after this many lifecycle ticks
    pub max_ticks: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            save_path: "./save/aquarium.json".to_string(),
            seed: None,
            tick_interval_ms: 50_000,
            motion_interval_ms: 100,
            autosave_interval_secs: 300, // 5 minutes
            metrics_every_ticks: 10,
            initial_fish: 0,
            max_ticks: None,
        }
    }
}

impl DriverConfig {
    /// Read a JSON config file, falling back to defaults if it is missing or malformed
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Config {:?} not readable ({}), using defaults", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str::<DriverConfig>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Config {:?} is invalid ({}), using defaults", path, e);
                Self::default()
            }
        }
    }
}
