//! Player-side components: the read-only kinematic snapshot and the per-tick output.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hook::{HookIndicator, RopeSegment};

/// Half extents used when the player's collider is not a cuboid.
const FALLBACK_HALF_EXTENTS: Vec2 = Vec2::new(8.0, 8.0);

/// Marker for the entity driven by the traversal machines.
#[derive(Component, Debug, Default)]
pub struct Traverser;

/// Player position, bounding box and velocity for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
}

impl PlayerSnapshot {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            half_extents: size / 2.0,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn from_components(
        transform: &Transform,
        collider: Option<&Collider>,
        velocity: Option<&LinearVelocity>,
    ) -> Self {
        let half_extents = match collider.and_then(|c| c.shape_scaled().as_cuboid()) {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => FALLBACK_HALF_EXTENTS,
        };

        Self {
            position: transform.translation.truncate(),
            half_extents,
            velocity: velocity.map(|v| v.0).unwrap_or(Vec2::ZERO),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, self.half_extents)
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.half_extents.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.half_extents.x
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y - self.half_extents.y
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }
}

/// Everything the traversal machines hand back to the host for one tick.
///
/// The host composes these into the player's velocity; nothing here is
/// integrated by the crate.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct TraversalOutput {
    /// Wall-jump impulse, present only on the tick the jump fired.
    pub jump_impulse: Option<Vec2>,
    pub speed_boost: f32,
    pub horizontal_boost: f32,
    pub is_wall_running: bool,
    /// `(angle in degrees, mirrored)` for orienting the wall-running pose.
    pub attachment_pose: Option<(f32, bool)>,
    /// Pull toward the anchor while the hook is attached.
    pub hook_velocity: Option<Vec2>,
    pub hook_indicator: Option<HookIndicator>,
    pub rope: Option<RopeSegment>,
    /// `0.0` right after a throw, `1.0` once the hook can be thrown again.
    pub cooldown_progress: f32,
    pub hook_enabled: bool,
    /// Knockback from a damaging obstacle touched this tick.
    pub knockback: Option<Vec2>,
}
