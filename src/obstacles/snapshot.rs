//! Obstacles domain: immutable per-frame view of level geometry.

use std::fmt;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Obstacle, ObstacleKind};

/// The physical body behind an obstacle, used for ray and rotated-rectangle queries.
#[derive(Clone)]
pub struct ObstacleBody {
    pub position: Vec2,
    /// Radians, counter-clockwise.
    pub angle: f32,
    pub velocity: Vec2,
    pub collider: Collider,
}

impl fmt::Debug for ObstacleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObstacleBody")
            .field("position", &self.position)
            .field("angle", &self.angle)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

/// One obstacle as seen during a single tick.
#[derive(Debug, Clone)]
pub struct ObstacleSnapshot {
    pub entity: Entity,
    pub kind: ObstacleKind,
    /// Center of the rectangle.
    pub position: Vec2,
    /// Unrotated width and height.
    pub size: Vec2,
    /// Degrees, counter-clockwise; `0.0` means axis-aligned.
    pub angle: f32,
    pub body: Option<ObstacleBody>,
}

impl ObstacleSnapshot {
    /// An axis-aligned obstacle with no physical body.
    pub fn new(entity: Entity, kind: ObstacleKind, position: Vec2, size: Vec2) -> Self {
        Self {
            entity,
            kind,
            position,
            size,
            angle: 0.0,
            body: None,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.angle = degrees;
        if let Some(body) = &mut self.body {
            body.angle = degrees.to_radians();
        }
        self
    }

    /// Give the obstacle a rectangular body matching its current placement.
    pub fn with_body(mut self) -> Self {
        self.body = Some(ObstacleBody {
            position: self.position,
            angle: self.angle.to_radians(),
            velocity: Vec2::ZERO,
            collider: Collider::rectangle(self.size.x, self.size.y),
        });
        self
    }

    /// Set the body's velocity. No effect without a body.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if let Some(body) = &mut self.body {
            body.velocity = velocity;
        }
        self
    }

    pub fn from_components(
        entity: Entity,
        obstacle: &Obstacle,
        transform: &Transform,
        collider: Option<&Collider>,
        velocity: Option<&LinearVelocity>,
    ) -> Self {
        let position = transform.translation.truncate();
        let radians = transform.rotation.to_euler(EulerRot::ZYX).0;

        Self {
            entity,
            kind: obstacle.kind,
            position,
            size: obstacle.size,
            angle: radians.to_degrees(),
            body: collider.map(|collider| ObstacleBody {
                position,
                angle: radians,
                velocity: velocity.map(|v| v.0).unwrap_or(Vec2::ZERO),
                collider: collider.clone(),
            }),
        }
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.angle == 0.0
    }

    /// Rotation modulo 180 degrees, in `0..180`; 180° reads as upright.
    pub fn tilt_degrees(&self) -> f32 {
        self.angle.rem_euclid(180.0)
    }
}

/// The obstacle snapshot captured once per tick and shared by both machines.
#[derive(Resource, Debug, Default)]
pub struct ObstacleFrame {
    pub obstacles: Vec<ObstacleSnapshot>,
}
