//! Discrete traversal commands for the current tick.
//!
//! Hosts may fill [`TraversalInput`] themselves before the traversal systems
//! run; the keyboard reader only adds to what is already there. The input is
//! cleared once the tick has been processed.

use bevy::prelude::*;

use crate::hook::TargetDirection;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TraversalInput {
    /// Jump off a wall, or throw the hook.
    pub action_pressed: bool,
    pub switch_target: Option<TargetDirection>,
}

impl TraversalInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Arrow keys pressed this frame, in priority order.
fn switch_direction(keyboard: &ButtonInput<KeyCode>) -> Option<TargetDirection> {
    [
        (KeyCode::ArrowLeft, TargetDirection::Left),
        (KeyCode::ArrowRight, TargetDirection::Right),
        (KeyCode::ArrowUp, TargetDirection::Up),
        (KeyCode::ArrowDown, TargetDirection::Down),
    ]
    .into_iter()
    .find(|(key, _)| keyboard.just_pressed(*key))
    .map(|(_, direction)| direction)
}

pub(crate) fn read_traversal_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<TraversalInput>,
) {
    input.action_pressed |= keyboard.just_pressed(KeyCode::Space);
    if let Some(direction) = switch_direction(&keyboard) {
        input.switch_target = Some(direction);
    }
}

pub(crate) fn clear_traversal_input(mut input: ResMut<TraversalInput>) {
    input.clear();
}
