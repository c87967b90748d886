//! Hook domain: the ready/extending/attached lifecycle, cooldown and pull.

use bevy::prelude::*;

use crate::config::HookConfig;
use crate::fsm::{Phase, transition};
use crate::geometry::closest_point;
use crate::obstacles::ObstacleSnapshot;
use crate::player::PlayerSnapshot;

use super::HookCommandError;
use super::targeting::{HookTargeting, TargetDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPhase {
    #[default]
    Ready,
    Extending,
    Attached,
}

impl Phase for HookPhase {
    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (HookPhase::Ready, HookPhase::Extending)
                | (HookPhase::Extending, HookPhase::Attached)
                | (HookPhase::Extending, HookPhase::Ready)
                | (HookPhase::Attached, HookPhase::Ready)
        )
    }
}

/// Target and anchor frozen at throw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookLock {
    pub target: Entity,
    pub anchor: Vec2,
    /// Straight-line distance from the player to `anchor` when thrown.
    pub distance: f32,
    /// The target body's velocity as of the latest tick.
    pub target_velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCue {
    Attached(Entity),
    Released(Entity),
}

/// Where to draw the target marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookIndicator {
    pub point: Vec2,
    /// The point is a frozen anchor rather than a live target.
    pub locked: bool,
    /// Cooldown has elapsed; styled as available.
    pub ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RopeSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Grappling hook state for one player.
#[derive(Component, Debug, Clone)]
pub struct HookMachine {
    config: HookConfig,
    targeting: HookTargeting,
    phase: HookPhase,
    lock: Option<HookLock>,
    rope_length: f32,
    cooldown_timer: f32,
    ready: bool,
    enabled: bool,
}

impl HookMachine {
    pub fn new(config: &HookConfig) -> Self {
        Self {
            config: config.clone(),
            targeting: HookTargeting::new(config),
            phase: HookPhase::Ready,
            lock: None,
            rope_length: 0.0,
            cooldown_timer: 0.0,
            ready: true,
            enabled: true,
        }
    }

    /// Advance one tick of `delta` milliseconds.
    pub fn update(
        &mut self,
        delta: f32,
        player: &PlayerSnapshot,
        obstacles: &[ObstacleSnapshot],
    ) -> Option<HookCue> {
        // The cooldown runs even while disabled.
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
            if self.cooldown_timer == 0.0 {
                self.ready = true;
            }
        }

        if !self.enabled {
            return None;
        }

        let frozen = self.phase != HookPhase::Ready;
        self.targeting.refresh(player, obstacles, frozen);

        if let Some(lock) = self.lock.as_mut() {
            match obstacles.iter().find(|o| o.entity == lock.target) {
                Some(target) => {
                    lock.target_velocity = target.body.as_ref().map_or(Vec2::ZERO, |b| b.velocity);
                }
                None => {
                    debug!("Hook target {:?} left the level", lock.target);
                    return self.release();
                }
            }
        }

        if self.phase == HookPhase::Extending {
            return self.extend(delta);
        }
        None
    }

    fn extend(&mut self, delta: f32) -> Option<HookCue> {
        let lock = self.lock?;

        self.rope_length =
            (self.rope_length + self.config.hook_extend_speed * delta / 100.0).min(lock.distance);
        if self.rope_length < lock.distance {
            return None;
        }

        if let Err(err) = transition(&mut self.phase, HookPhase::Attached) {
            warn!("Hook attach skipped: {}", err);
            return None;
        }
        info!("Hook attached to {:?} at {:?}", lock.target, lock.anchor);
        Some(HookCue::Attached(lock.target))
    }

    /// Freeze the current target and its anchor and start extending the rope.
    pub fn throw_hook(
        &mut self,
        player: &PlayerSnapshot,
        obstacles: &[ObstacleSnapshot],
    ) -> Result<HookLock, HookCommandError> {
        if !self.enabled {
            return Err(HookCommandError::Disabled);
        }
        if self.phase != HookPhase::Ready {
            return Err(HookCommandError::WrongPhase(self.phase));
        }
        if !self.ready {
            return Err(HookCommandError::CoolingDown);
        }

        let target = self.targeting.current().ok_or(HookCommandError::NoTarget)?;
        let obstacle = obstacles
            .iter()
            .find(|o| o.entity == target)
            .ok_or(HookCommandError::NoTarget)?;
        let anchor =
            closest_point(player.position, obstacle).ok_or(HookCommandError::NoAnchor)?;

        transition(&mut self.phase, HookPhase::Extending)
            .map_err(|err| HookCommandError::WrongPhase(err.from))?;

        let lock = HookLock {
            target,
            anchor,
            distance: player.position.distance(anchor),
            target_velocity: obstacle.body.as_ref().map_or(Vec2::ZERO, |b| b.velocity),
        };
        self.lock = Some(lock);
        self.rope_length = 0.0;
        self.cooldown_timer = self.config.cooldown.max(0.0);
        self.ready = self.cooldown_timer == 0.0;

        info!(
            "Hook thrown at {:?}: anchor={:?}, distance={}",
            target, anchor, lock.distance
        );
        Ok(lock)
    }

    /// Let go of an attached hook.
    pub fn finish_hooking(&mut self) -> Result<Entity, HookCommandError> {
        if self.phase != HookPhase::Attached {
            return Err(HookCommandError::WrongPhase(self.phase));
        }
        match self.release() {
            Some(HookCue::Released(target)) => Ok(target),
            _ => Err(HookCommandError::NoTarget),
        }
    }

    /// Release the hook if it is locked onto `target`, whatever the phase.
    pub fn detach_from(&mut self, target: Entity) -> Option<HookCue> {
        if self.lock?.target != target {
            return None;
        }
        self.release()
    }

    pub fn switch_target(
        &mut self,
        direction: TargetDirection,
        player: &PlayerSnapshot,
    ) -> Result<Entity, HookCommandError> {
        if !self.enabled {
            return Err(HookCommandError::Disabled);
        }
        if self.phase != HookPhase::Ready {
            return Err(HookCommandError::WrongPhase(self.phase));
        }
        self.targeting.switch(direction, player)
    }

    /// Pull toward the anchor while attached.
    ///
    /// When the target is moving down at least as fast as the pull, the
    /// target's vertical velocity is added so the player rides along with it.
    pub fn calculate_hook_velocity(
        &self,
        player: &PlayerSnapshot,
        hook_speed: f32,
    ) -> Option<Vec2> {
        if self.phase != HookPhase::Attached {
            return None;
        }
        let lock = self.lock?;

        // Zero once the player reaches the anchor.
        let pull = (lock.anchor - player.position).normalize_or_zero() * hook_speed;

        // Only a downward-moving target is compared; the upward case is ignored.
        if -lock.target_velocity.y >= -pull.y {
            return Some(Vec2::new(pull.x, lock.target_velocity.y + pull.y));
        }
        Some(pull)
    }

    /// Switch the machine on or off. Turning it off drops every target and
    /// releases a thrown hook; the cooldown keeps running.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<HookCue> {
        if self.enabled == enabled {
            return None;
        }
        self.enabled = enabled;
        debug!("Hook {}", if enabled { "enabled" } else { "disabled" });

        if enabled {
            return None;
        }
        self.targeting.clear();
        self.release()
    }

    fn release(&mut self) -> Option<HookCue> {
        let lock = self.lock.take()?;
        if let Err(err) = transition(&mut self.phase, HookPhase::Ready) {
            warn!("Hook release skipped: {}", err);
            self.lock = Some(lock);
            return None;
        }
        self.rope_length = 0.0;
        info!("Hook released from {:?}", lock.target);
        Some(HookCue::Released(lock.target))
    }

    /// `0.0` right after a throw, `1.0` once the cooldown has elapsed.
    pub fn cooldown_progress(&self) -> f32 {
        if self.config.cooldown <= 0.0 {
            return 1.0;
        }
        (1.0 - self.cooldown_timer / self.config.cooldown).clamp(0.0, 1.0)
    }

    pub fn indicator(&self) -> Option<HookIndicator> {
        if !self.enabled {
            return None;
        }
        let (point, locked) = match self.lock {
            Some(lock) => (lock.anchor, true),
            None => (self.targeting.current_candidate()?.closest_point, false),
        };
        Some(HookIndicator {
            point,
            locked,
            ready: self.ready,
        })
    }

    /// The rope from the player toward the anchor, as long as it has grown.
    pub fn rope(&self, player: &PlayerSnapshot) -> Option<RopeSegment> {
        if !self.enabled {
            return None;
        }
        let lock = self.lock?;
        let from = player.position;
        let to = match self.phase {
            HookPhase::Attached => lock.anchor,
            _ => from + (lock.anchor - from).normalize_or_zero() * self.rope_length,
        };
        Some(RopeSegment { from, to })
    }

    pub fn phase(&self) -> HookPhase {
        self.phase
    }

    pub fn lock(&self) -> Option<HookLock> {
        self.lock
    }

    pub fn current_target(&self) -> Option<Entity> {
        self.targeting.current()
    }

    pub fn targeting(&self) -> &HookTargeting {
        &self.targeting
    }

    pub fn rope_length(&self) -> f32 {
        self.rope_length
    }

    pub fn cooldown_timer(&self) -> f32 {
        self.cooldown_timer
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
