//! Wall running domain: short horizontal probes from the player's sides.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::WallRunningConfig;
use crate::obstacles::{ObstacleSnapshot, running_surfaces};
use crate::player::PlayerSnapshot;

/// Which side of the player a surface was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// Sign of a push away from a wall on this side.
    pub fn away_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
            WallSide::None => 0.0,
        }
    }
}

/// One horizontal probe segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub origin: Vec2,
    /// Unit vector, `-X` or `+X`.
    pub direction: Vec2,
    pub length: f32,
    pub side: WallSide,
}

impl Probe {
    pub fn end(&self) -> Vec2 {
        self.origin + self.direction * self.length
    }
}

/// Outcome of one probe pass. Recomputed every tick.
#[derive(Debug, Clone, Copy)]
pub struct RaycastResult<'a> {
    pub can_attach: bool,
    pub side: WallSide,
    pub obstacle: Option<&'a ObstacleSnapshot>,
    /// Contact normal pointing from the probe into the surface.
    pub normal: Option<Vec2>,
}

impl RaycastResult<'_> {
    pub fn miss() -> Self {
        Self {
            can_attach: false,
            side: WallSide::None,
            obstacle: None,
            normal: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallRaycaster {
    ray_length: f32,
    ray_count: u32,
    ray_inset: f32,
    minimum_angle: f32,
}

impl WallRaycaster {
    pub fn new(config: &WallRunningConfig) -> Self {
        Self {
            ray_length: config.ray_length,
            ray_count: config.ray_count,
            ray_inset: config.ray_inset,
            minimum_angle: config.minimum_wall_running_angle,
        }
    }

    /// Probes for both sides, left then right at each height, top first.
    pub fn probes(&self, player: &PlayerSnapshot) -> Vec<Probe> {
        let inset = self.ray_inset.min(player.height() / 2.0);
        let top = player.top() - inset;
        let span = player.height() - 2.0 * inset;

        let heights: Vec<f32> = match self.ray_count {
            0 => Vec::new(),
            1 => vec![player.position.y],
            n => {
                let gap = span / (n - 1) as f32;
                (0..n).map(|i| top - gap * i as f32).collect()
            }
        };

        heights
            .into_iter()
            .flat_map(|y| {
                [
                    Probe {
                        origin: Vec2::new(player.left(), y),
                        direction: Vec2::NEG_X,
                        length: self.ray_length,
                        side: WallSide::Left,
                    },
                    Probe {
                        origin: Vec2::new(player.right(), y),
                        direction: Vec2::X,
                        length: self.ray_length,
                        side: WallSide::Right,
                    },
                ]
            })
            .collect()
    }

    /// Whether a running surface is rotated at least the minimum angle.
    pub fn surface_qualifies(&self, obstacle: &ObstacleSnapshot) -> bool {
        obstacle.tilt_degrees() >= self.minimum_angle
    }

    /// First running surface hit by any probe, in obstacle list order.
    pub fn cast<'a>(
        &self,
        player: &PlayerSnapshot,
        obstacles: &'a [ObstacleSnapshot],
    ) -> RaycastResult<'a> {
        let probes = self.probes(player);

        running_surfaces(obstacles)
            .filter(|o| self.surface_qualifies(o))
            .find_map(|o| Self::cast_against(o, &probes))
            .unwrap_or_else(RaycastResult::miss)
    }

    /// First probe that hits `obstacle`'s body. Bodiless obstacles never hit.
    pub fn cast_against<'a>(
        obstacle: &'a ObstacleSnapshot,
        probes: &[Probe],
    ) -> Option<RaycastResult<'a>> {
        let body = obstacle.body.as_ref()?;

        probes.iter().find_map(|probe| {
            let (_, surface_normal) = body.collider.cast_ray(
                Position(body.position),
                Rotation::radians(body.angle),
                probe.origin,
                probe.direction,
                probe.length,
                true,
            )?;

            Some(RaycastResult {
                can_attach: true,
                side: probe.side,
                obstacle: Some(obstacle),
                normal: Some(-surface_normal),
            })
        })
    }
}
