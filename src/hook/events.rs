//! Hook domain: lifecycle messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct HookThrown {
    pub entity: Entity,
    pub target: Entity,
    pub anchor: Vec2,
}

impl Message for HookThrown {}

/// The rope reached its anchor; the pull starts next tick.
#[derive(Debug)]
pub struct HookAttached {
    pub entity: Entity,
    pub target: Entity,
}

impl Message for HookAttached {}

/// The hook let go, by command, collision, disable or a vanished target.
#[derive(Debug)]
pub struct HookReleased {
    pub entity: Entity,
    pub target: Entity,
}

impl Message for HookReleased {}
