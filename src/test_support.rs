//! Shared helpers for unit tests.

use bevy::prelude::*;

use crate::obstacles::{ObstacleKind, ObstacleSnapshot};
use crate::player::PlayerSnapshot;

/// Mint `N` distinct entity ids.
pub(crate) fn entities<const N: usize>() -> [Entity; N] {
    let mut world = World::new();
    std::array::from_fn(|_| world.spawn_empty().id())
}

/// A wall with a rectangular body centered at `(x, y)`.
pub(crate) fn wall(entity: Entity, x: f32, y: f32, width: f32, height: f32) -> ObstacleSnapshot {
    ObstacleSnapshot::new(
        entity,
        ObstacleKind::Wall,
        Vec2::new(x, y),
        Vec2::new(width, height),
    )
    .with_body()
}

/// A 16x16 player centered at `(x, y)`.
pub(crate) fn player_at(x: f32, y: f32) -> PlayerSnapshot {
    PlayerSnapshot::new(Vec2::new(x, y), Vec2::splat(16.0))
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

pub(crate) fn assert_vec_close(actual: Vec2, expected: Vec2) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected:?}, got {actual:?}"
    );
}
