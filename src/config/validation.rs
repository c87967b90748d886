//! Sanity checks for loaded tuning values.

use super::TraversalTuning;

/// A tuning value that cannot drive the machines sensibly.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tuning '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for TuningValidationError {}

/// Push an error when a value is negative (or NaN).
macro_rules! check_non_negative {
    ($errors:expr, $value:expr, $field:expr) => {
        if !($value >= 0.0) {
            $errors.push(TuningValidationError {
                field: $field,
                message: format!("must be >= 0, got {}", $value),
            });
        }
    };
}

/// Push an error unless a value is strictly positive.
macro_rules! check_positive {
    ($errors:expr, $value:expr, $field:expr) => {
        if !($value > 0.0) {
            $errors.push(TuningValidationError {
                field: $field,
                message: format!("must be > 0, got {}", $value),
            });
        }
    };
}

/// Push an error when an initial value exceeds its cap.
macro_rules! check_not_above {
    ($errors:expr, $value:expr, $max:expr, $field:expr) => {
        if $value > $max {
            $errors.push(TuningValidationError {
                field: $field,
                message: format!("{} exceeds its maximum {}", $value, $max),
            });
        }
    };
}

/// Validate every tuning value.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &TraversalTuning) -> Vec<TuningValidationError> {
    let mut errors = Vec::new();

    let wall = &tuning.wall_running;
    check_non_negative!(errors, wall.max_speed_boost, "wall_running.max_speed_boost");
    check_non_negative!(
        errors,
        wall.max_horizontal_speed_boost,
        "wall_running.max_horizontal_speed_boost"
    );
    check_non_negative!(errors, wall.initial_speed_boost, "wall_running.initial_speed_boost");
    check_non_negative!(
        errors,
        wall.initial_horizontal_speed_boost,
        "wall_running.initial_horizontal_speed_boost"
    );
    check_non_negative!(
        errors,
        wall.speed_boost_increase_per_second,
        "wall_running.speed_boost_increase_per_second"
    );
    check_non_negative!(
        errors,
        wall.horizontal_speed_boost_increase_per_second,
        "wall_running.horizontal_speed_boost_increase_per_second"
    );
    check_non_negative!(errors, wall.speed_boost_timeout, "wall_running.speed_boost_timeout");
    check_non_negative!(errors, wall.jump_force, "wall_running.jump_force");
    check_non_negative!(errors, wall.ray_length, "wall_running.ray_length");
    check_non_negative!(errors, wall.ray_inset, "wall_running.ray_inset");
    check_non_negative!(errors, wall.detach_delay, "wall_running.detach_delay");
    check_not_above!(
        errors,
        wall.initial_speed_boost,
        wall.max_speed_boost,
        "wall_running.initial_speed_boost"
    );
    check_not_above!(
        errors,
        wall.initial_horizontal_speed_boost,
        wall.max_horizontal_speed_boost,
        "wall_running.initial_horizontal_speed_boost"
    );
    check_non_negative!(
        errors,
        wall.minimum_wall_running_angle,
        "wall_running.minimum_wall_running_angle"
    );
    if wall.ray_count == 0 {
        errors.push(TuningValidationError {
            field: "wall_running.ray_count",
            message: "at least one probe per side is required".to_string(),
        });
    }

    let hook = &tuning.hook;
    check_non_negative!(errors, hook.hook_range, "hook.hook_range");
    check_non_negative!(errors, hook.cooldown, "hook.cooldown");
    // A rope that never grows would leave the hook extending forever.
    check_positive!(errors, hook.hook_extend_speed, "hook.hook_extend_speed");
    check_non_negative!(
        errors,
        hook.minimum_distance_to_target,
        "hook.minimum_distance_to_target"
    );
    check_non_negative!(errors, hook.hook_speed, "hook.hook_speed");
    check_not_above!(
        errors,
        hook.minimum_distance_to_target,
        hook.hook_range,
        "hook.minimum_distance_to_target"
    );

    check_non_negative!(
        errors,
        tuning.collision.knockback_strength,
        "collision.knockback_strength"
    );

    errors
}
