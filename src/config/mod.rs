//! Traversal tuning: wall-running, hook and collision parameters.
//!
//! Tuning is built once (from defaults or a data file) and handed to each
//! machine by value; nothing mutates it afterwards.

mod loader;
mod validation;


pub use loader::{TuningLoadError, load_tuning, parse_json, parse_ron};
pub use validation::{TuningValidationError, validate_tuning};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// All traversal tuning, installed as a resource by the plugin.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TraversalTuning {
    pub wall_running: WallRunningConfig,
    pub hook: HookConfig,
    pub collision: CollisionConfig,
}

/// Wall-running parameters. Times are milliseconds, rates are per second.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WallRunningConfig {
    pub max_speed_boost: f32,
    pub max_horizontal_speed_boost: f32,
    pub initial_speed_boost: f32,
    pub initial_horizontal_speed_boost: f32,
    pub speed_boost_increase_per_second: f32,
    pub horizontal_speed_boost_increase_per_second: f32,
    /// Longest time boosts survive after leaving a wall.
    pub speed_boost_timeout: f32,
    pub jump_force: f32,
    /// Surfaces rotated less than this (degrees, modulo 180) are not runnable.
    pub minimum_wall_running_angle: f32,
    pub enabled: bool,
    /// Length of each side probe in pixels.
    pub ray_length: f32,
    /// Probes per side.
    pub ray_count: u32,
    /// Distance kept between the outermost probes and the player's top/bottom edge.
    pub ray_inset: f32,
    /// How long the probes may miss before the wall is let go.
    pub detach_delay: f32,
    /// Ticks a contact normal stays usable for a jump after the probes lose it.
    pub contact_grace_ticks: u64,
}

impl Default for WallRunningConfig {
    fn default() -> Self {
        Self {
            max_speed_boost: 1.5,
            max_horizontal_speed_boost: 1.5,
            initial_speed_boost: 0.1,
            initial_horizontal_speed_boost: 0.3,
            speed_boost_increase_per_second: 0.1,
            horizontal_speed_boost_increase_per_second: 0.1,
            speed_boost_timeout: 1000.0,
            jump_force: 8.0,
            minimum_wall_running_angle: 0.0,
            enabled: true,
            ray_length: 5.0,
            ray_count: 2,
            ray_inset: 2.0,
            detach_delay: 100.0,
            contact_grace_ticks: 6,
        }
    }
}

/// Grappling hook parameters. Distances are pixels, times milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HookConfig {
    pub hook_range: f32,
    pub cooldown: f32,
    /// Rope growth; the rope gains `hook_extend_speed * delta / 100` per tick.
    pub hook_extend_speed: f32,
    pub minimum_distance_to_target: f32,
    /// Pull magnitude used by the ECS adapter when composing hook velocity.
    pub hook_speed: f32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            hook_range: 150.0,
            cooldown: 1000.0,
            hook_extend_speed: 50.0,
            minimum_distance_to_target: 0.0,
            hook_speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Velocity handed back when touching a damaging obstacle.
    pub knockback_strength: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            knockback_strength: 10.0,
        }
    }
}
