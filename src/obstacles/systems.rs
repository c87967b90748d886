//! Obstacles domain: snapshot capture.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Obstacle, ObstacleFrame, ObstacleSnapshot};

/// Rebuild the tick's obstacle snapshot, ordered by entity so list order is stable.
pub(crate) fn collect_obstacles(
    mut frame: ResMut<ObstacleFrame>,
    query: Query<(
        Entity,
        &Obstacle,
        &Transform,
        Option<&Collider>,
        Option<&LinearVelocity>,
    )>,
) {
    frame.obstacles.clear();
    frame
        .obstacles
        .extend(query.iter().map(|(entity, obstacle, transform, collider, velocity)| {
            ObstacleSnapshot::from_components(entity, obstacle, transform, collider, velocity)
        }));
    frame.obstacles.sort_by_key(|o| o.entity);
}
