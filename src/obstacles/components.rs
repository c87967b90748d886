//! Obstacles domain: level-side components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// What an obstacle is for. Classification matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ObstacleKind {
    /// Runnable surface, also a valid hook anchor.
    #[default]
    Wall,
    /// Hurts on contact.
    Damaging,
    Poll,
}

impl ObstacleKind {
    pub fn is_runnable(self) -> bool {
        match self {
            ObstacleKind::Wall => true,
            ObstacleKind::Damaging | ObstacleKind::Poll => false,
        }
    }

    /// A wall can be run along and grappled to alike.
    pub fn is_hookable(self) -> bool {
        match self {
            ObstacleKind::Wall => true,
            ObstacleKind::Damaging | ObstacleKind::Poll => false,
        }
    }

    pub fn is_dangerous(self) -> bool {
        match self {
            ObstacleKind::Damaging => true,
            ObstacleKind::Wall | ObstacleKind::Poll => false,
        }
    }
}

/// Marks a level entity the traversal machines may query.
///
/// The physical body, when present, is the entity's `Collider` placed by its
/// `Transform`; an optional `LinearVelocity` is read for moving anchors.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Unrotated width and height.
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, size: Vec2) -> Self {
        Self { kind, size }
    }

    pub fn wall(size: Vec2) -> Self {
        Self::new(ObstacleKind::Wall, size)
    }
}
