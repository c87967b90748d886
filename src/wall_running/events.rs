//! Wall running domain: messages for presentation collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::WallSide;

/// The player touched a running surface; start the contact effect on `side`.
#[derive(Debug)]
pub struct WallContactStarted {
    pub entity: Entity,
    pub side: WallSide,
}

impl Message for WallContactStarted {}

/// The player let go of its running surface.
#[derive(Debug)]
pub struct WallContactStopped {
    pub entity: Entity,
}

impl Message for WallContactStopped {}

#[derive(Debug)]
pub struct WallJumped {
    pub entity: Entity,
    pub impulse: Vec2,
}

impl Message for WallJumped {}
