//! Wall running domain: attachment, boost accumulation, coasting and the wall jump.

use bevy::prelude::*;

use crate::config::WallRunningConfig;
use crate::fsm::{Phase, transition};
use crate::obstacles::ObstacleSnapshot;
use crate::player::PlayerSnapshot;

use super::raycast::{WallRaycaster, WallSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallRunPhase {
    #[default]
    Idle,
    /// Attached to a surface (including the short window after the probes lose it).
    Running,
    /// Detached; boosts persist until the timeout elapses.
    Coasting,
}

impl Phase for WallRunPhase {
    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (WallRunPhase::Idle, WallRunPhase::Running)
                | (WallRunPhase::Running, WallRunPhase::Coasting)
                | (WallRunPhase::Running, WallRunPhase::Idle)
                | (WallRunPhase::Coasting, WallRunPhase::Running)
                | (WallRunPhase::Coasting, WallRunPhase::Idle)
        )
    }
}

/// The surface currently run along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachedSurface {
    pub entity: Entity,
    pub side: WallSide,
    /// Degrees.
    pub angle: f32,
}

impl AttachedSurface {
    pub fn is_diagonal(&self) -> bool {
        self.angle != 0.0
    }
}

/// Last usable contact normal and the tick after which it may no longer drive a jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactGrace {
    pub normal: Vec2,
    pub expires_at_tick: u64,
}

/// Presentation cue produced by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRunCue {
    ContactStarted(WallSide),
    ContactStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallJumpError {
    Disabled,
    NotAttached,
    AlreadyJumping,
    NoContactNormal,
}

impl std::fmt::Display for WallJumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WallJumpError::Disabled => write!(f, "wall running is disabled"),
            WallJumpError::NotAttached => write!(f, "not attached to a wall"),
            WallJumpError::AlreadyJumping => write!(f, "already jumping off this wall"),
            WallJumpError::NoContactNormal => write!(f, "no contact normal to jump from"),
        }
    }
}

impl std::error::Error for WallJumpError {}

/// Wall-running state for one player.
#[derive(Component, Debug, Clone)]
pub struct WallRunner {
    config: WallRunningConfig,
    raycaster: WallRaycaster,
    phase: WallRunPhase,
    attached: Option<AttachedSurface>,
    speed_boost: f32,
    horizontal_boost: f32,
    /// How long coasting may last; grows while running, capped at the configured timeout.
    boost_timeout: f32,
    coast_timer: f32,
    miss_timer: f32,
    jumping: bool,
    grace: Option<ContactGrace>,
    tick: u64,
}

impl WallRunner {
    pub fn new(config: &WallRunningConfig) -> Self {
        Self {
            config: config.clone(),
            raycaster: WallRaycaster::new(config),
            phase: WallRunPhase::Idle,
            attached: None,
            speed_boost: 0.0,
            horizontal_boost: 0.0,
            boost_timeout: config.speed_boost_timeout,
            coast_timer: 0.0,
            miss_timer: 0.0,
            jumping: false,
            grace: None,
            tick: 0,
        }
    }

    /// Advance one tick of `delta` milliseconds against this tick's obstacles.
    pub fn update(
        &mut self,
        delta: f32,
        player: &PlayerSnapshot,
        obstacles: &[ObstacleSnapshot],
    ) -> Option<WallRunCue> {
        if !self.config.enabled {
            return None;
        }
        self.tick += 1;

        let hit = self.raycaster.cast(player, obstacles);
        match hit.obstacle {
            Some(obstacle) if hit.can_attach => {
                self.on_contact(delta, obstacle, hit.side, hit.normal)
            }
            _ => self.on_miss(delta),
        }
    }

    fn on_contact(
        &mut self,
        delta: f32,
        obstacle: &ObstacleSnapshot,
        side: WallSide,
        normal: Option<Vec2>,
    ) -> Option<WallRunCue> {
        if let Some(normal) = normal.filter(|n| *n != Vec2::ZERO) {
            self.grace = Some(ContactGrace {
                normal,
                expires_at_tick: self.tick + self.config.contact_grace_ticks,
            });
        }
        self.miss_timer = 0.0;

        let surface = AttachedSurface {
            entity: obstacle.entity,
            side,
            angle: obstacle.angle,
        };

        match self.attached.replace(surface) {
            None => self.attach(surface),
            Some(previous) => {
                if previous.entity != surface.entity {
                    debug!("Wall run handed off {:?} -> {:?}", previous.entity, surface.entity);
                    self.horizontal_boost = self.initial_horizontal_boost(&surface);
                }
                self.grow_boosts(delta, &surface);
                (previous.side != side).then_some(WallRunCue::ContactStarted(side))
            }
        }
    }

    fn attach(&mut self, surface: AttachedSurface) -> Option<WallRunCue> {
        if let Err(err) = transition(&mut self.phase, WallRunPhase::Running) {
            warn!("Wall attach skipped: {}", err);
            self.attached = None;
            return None;
        }

        let initial = if surface.is_diagonal() {
            self.config.initial_speed_boost * surface.angle.abs().to_radians()
        } else {
            self.config.initial_speed_boost
        };
        self.speed_boost = (self.speed_boost + initial).min(self.config.max_speed_boost);
        self.horizontal_boost = self.initial_horizontal_boost(&surface);
        self.boost_timeout = self.config.speed_boost_timeout / 10.0;
        self.coast_timer = 0.0;
        self.jumping = false;

        info!(
            "Wall run started: side={:?}, angle={}, speed_boost={}, horizontal_boost={}",
            surface.side, surface.angle, self.speed_boost, self.horizontal_boost
        );
        Some(WallRunCue::ContactStarted(surface.side))
    }

    /// Sideways push a surface starts with, signed away from the wall.
    fn initial_horizontal_boost(&self, surface: &AttachedSurface) -> f32 {
        if !surface.is_diagonal() {
            return 0.0;
        }
        let max = self.config.max_horizontal_speed_boost;
        (self.config.initial_horizontal_speed_boost * surface.side.away_sign()).clamp(-max, max)
    }

    fn grow_boosts(&mut self, delta: f32, surface: &AttachedSurface) {
        let seconds = delta / 1000.0;

        self.speed_boost = (self.speed_boost
            + self.config.speed_boost_increase_per_second * seconds)
            .min(self.config.max_speed_boost);
        self.coast_timer = 0.0;
        self.boost_timeout = (self.boost_timeout + delta).min(self.config.speed_boost_timeout);

        // Upright walls never grow a sideways push.
        if surface.is_diagonal() {
            let max = self.config.max_horizontal_speed_boost;
            self.horizontal_boost = (self.horizontal_boost
                + self.config.horizontal_speed_boost_increase_per_second
                    * seconds
                    * surface.side.away_sign())
            .clamp(-max, max);
        }
    }

    fn on_miss(&mut self, delta: f32) -> Option<WallRunCue> {
        match self.phase {
            WallRunPhase::Running => {
                self.miss_timer += delta;
                if self.miss_timer >= self.config.detach_delay {
                    self.detach()
                } else {
                    None
                }
            }
            WallRunPhase::Coasting => {
                self.coast_timer += delta;
                if self.coast_timer >= self.boost_timeout {
                    self.expire_boosts();
                }
                None
            }
            WallRunPhase::Idle => None,
        }
    }

    fn detach(&mut self) -> Option<WallRunCue> {
        let has_boost = self.speed_boost > 0.0 || self.horizontal_boost != 0.0;
        let next = if has_boost {
            WallRunPhase::Coasting
        } else {
            WallRunPhase::Idle
        };
        if let Err(err) = transition(&mut self.phase, next) {
            warn!("Wall detach skipped: {}", err);
            return None;
        }

        self.attached = None;
        self.miss_timer = 0.0;
        self.coast_timer = 0.0;

        info!(
            "Wall run ended: speed_boost={}, horizontal_boost={}, coasting for up to {}ms",
            self.speed_boost, self.horizontal_boost, self.boost_timeout
        );
        Some(WallRunCue::ContactStopped)
    }

    fn expire_boosts(&mut self) {
        if let Err(err) = transition(&mut self.phase, WallRunPhase::Idle) {
            warn!("Boost expiry skipped: {}", err);
            return;
        }
        self.speed_boost = 0.0;
        self.horizontal_boost = 0.0;
        self.coast_timer = 0.0;
        info!("Wall run boosts expired");
    }

    /// Jump off the attached wall, returning the impulse to add to the player's velocity.
    ///
    /// Uses the live contact normal, or the last one while it is still within
    /// its grace window. Blocks further jumps until the next attach.
    pub fn jump(
        &mut self,
        player: &PlayerSnapshot,
        obstacles: &[ObstacleSnapshot],
    ) -> Result<Vec2, WallJumpError> {
        if !self.config.enabled {
            return Err(WallJumpError::Disabled);
        }
        let surface = self.attached.ok_or(WallJumpError::NotAttached)?;
        if self.jumping {
            return Err(WallJumpError::AlreadyJumping);
        }

        let probes = self.raycaster.probes(player);
        let live = obstacles
            .iter()
            .find(|o| o.entity == surface.entity)
            .and_then(|o| WallRaycaster::cast_against(o, &probes))
            .and_then(|hit| hit.normal)
            .filter(|n| *n != Vec2::ZERO);
        let normal = live
            .or_else(|| {
                self.grace
                    .filter(|g| self.tick <= g.expires_at_tick)
                    .map(|g| g.normal)
            })
            .ok_or(WallJumpError::NoContactNormal)?;

        let impulse = -normal * self.config.jump_force;
        self.jumping = true;
        debug!("Wall jump: side={:?}, impulse={:?}", surface.side, impulse);
        Ok(impulse)
    }

    pub fn phase(&self) -> WallRunPhase {
        self.phase
    }

    pub fn speed_boost(&self) -> f32 {
        self.speed_boost
    }

    pub fn horizontal_boost(&self) -> f32 {
        self.horizontal_boost
    }

    pub fn is_wall_running(&self) -> bool {
        self.attached.is_some()
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn attached(&self) -> Option<AttachedSurface> {
        self.attached
    }

    pub fn attached_side(&self) -> WallSide {
        self.attached.map_or(WallSide::None, |s| s.side)
    }

    /// `(angle in degrees, mirrored)`; mirrored when the wall is on the left.
    pub fn attachment_pose(&self) -> Option<(f32, bool)> {
        self.attached
            .map(|s| (s.angle, s.side == WallSide::Left))
    }

    pub fn boost_timeout(&self) -> f32 {
        self.boost_timeout
    }

    pub fn coast_timer(&self) -> f32 {
        self.coast_timer
    }

    pub fn grace(&self) -> Option<ContactGrace> {
        self.grace
    }

    pub fn raycaster(&self) -> &WallRaycaster {
        &self.raycaster
    }
}
