//! Obstacles domain: tag filters over a frame's obstacle list.

use super::ObstacleSnapshot;

/// Surfaces the player can attach to and run along.
pub fn running_surfaces(
    obstacles: &[ObstacleSnapshot],
) -> impl Iterator<Item = &ObstacleSnapshot> {
    obstacles.iter().filter(|o| o.kind.is_runnable())
}

/// Surfaces the grappling hook may target.
pub fn hookable_surfaces(
    obstacles: &[ObstacleSnapshot],
) -> impl Iterator<Item = &ObstacleSnapshot> {
    obstacles.iter().filter(|o| o.kind.is_hookable())
}

/// Surfaces that hurt on contact; consumed by collision resolution.
pub fn dangerous_surfaces(
    obstacles: &[ObstacleSnapshot],
) -> impl Iterator<Item = &ObstacleSnapshot> {
    obstacles.iter().filter(|o| o.kind.is_dangerous())
}
