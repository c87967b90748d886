//! Hook domain: candidate acquisition and target selection.

use bevy::prelude::*;

use crate::config::HookConfig;
use crate::geometry::{closest_point, obstacle_bounds};
use crate::obstacles::{ObstacleSnapshot, hookable_surfaces};
use crate::player::PlayerSnapshot;

use super::HookCommandError;

/// Direction of a manual re-target request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A hookable obstacle within range this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookCandidate {
    pub entity: Entity,
    /// Nearest point on the obstacle to the player.
    pub closest_point: Vec2,
    pub distance: f32,
    pub bounds: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct HookTargeting {
    range: f32,
    minimum_distance: f32,
    candidates: Vec<HookCandidate>,
    current: Option<Entity>,
}

impl HookTargeting {
    pub fn new(config: &HookConfig) -> Self {
        Self {
            range: config.hook_range,
            minimum_distance: config.minimum_distance_to_target,
            ..default()
        }
    }

    /// Rebuild the candidate list and settle the current target.
    ///
    /// `frozen` keeps an existing target even when it leaves the candidate
    /// list; an empty obstacle list always clears everything.
    pub fn refresh(
        &mut self,
        player: &PlayerSnapshot,
        obstacles: &[ObstacleSnapshot],
        frozen: bool,
    ) {
        if obstacles.is_empty() {
            self.clear();
            return;
        }

        self.candidates = hookable_surfaces(obstacles)
            .filter(|o| o.body.is_some())
            .filter_map(|o| {
                let point = closest_point(player.position, o)?;
                let distance = player.position.distance(point);
                (self.minimum_distance..=self.range)
                    .contains(&distance)
                    .then(|| HookCandidate {
                        entity: o.entity,
                        closest_point: point,
                        distance,
                        bounds: obstacle_bounds(o),
                    })
            })
            .collect();
        self.candidates
            .sort_by(|a, b| a.distance.total_cmp(&b.distance));

        if frozen && self.current.is_some() {
            return;
        }
        let still_valid = self
            .current
            .is_some_and(|entity| self.candidate(entity).is_some());
        if !still_valid {
            self.current = self.candidates.first().map(|c| c.entity);
        }
    }

    /// Pick the nearest other candidate in `direction`.
    pub fn switch(
        &mut self,
        direction: TargetDirection,
        player: &PlayerSnapshot,
    ) -> Result<Entity, HookCommandError> {
        let origin = player.position;
        let next = self
            .candidates
            .iter()
            .filter(|c| Some(c.entity) != self.current)
            .find(|c| match direction {
                TargetDirection::Left => {
                    c.bounds.min.y <= origin.y && c.bounds.center().x <= origin.x
                }
                TargetDirection::Right => {
                    c.bounds.min.y <= origin.y && c.bounds.center().x > origin.x
                }
                TargetDirection::Up => c.bounds.min.y > origin.y,
                TargetDirection::Down => c.bounds.max.y < origin.y,
            })
            .map(|c| c.entity)
            .ok_or(HookCommandError::NoCandidate)?;

        self.current = Some(next);
        Ok(next)
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.current = None;
    }

    pub fn candidates(&self) -> &[HookCandidate] {
        &self.candidates
    }

    pub fn candidate(&self, entity: Entity) -> Option<&HookCandidate> {
        self.candidates.iter().find(|c| c.entity == entity)
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn current_candidate(&self) -> Option<&HookCandidate> {
        self.current.and_then(|entity| self.candidate(entity))
    }
}
