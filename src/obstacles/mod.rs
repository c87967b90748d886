//! Obstacles domain: per-frame obstacle snapshots and their classification.

mod classify;
mod components;
mod snapshot;
mod systems;


pub use classify::{dangerous_surfaces, hookable_surfaces, running_surfaces};
pub use components::{Obstacle, ObstacleKind};
pub use snapshot::{ObstacleBody, ObstacleFrame, ObstacleSnapshot};

pub(crate) use systems::collect_obstacles;
