//! Hook domain: per-tick system driving every traverser's hook.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::config::TraversalTuning;
use crate::input::TraversalInput;
use crate::obstacles::ObstacleFrame;
use crate::player::{PlayerSnapshot, TraversalOutput, Traverser};
use crate::wall_running::WallRunner;

use super::events::{HookAttached, HookReleased, HookThrown};
use super::state::{HookCue, HookMachine};

fn forward_cue(
    entity: Entity,
    cue: Option<HookCue>,
    attached_events: &mut MessageWriter<HookAttached>,
    released_events: &mut MessageWriter<HookReleased>,
) {
    match cue {
        Some(HookCue::Attached(target)) => {
            attached_events.write(HookAttached { entity, target });
        }
        Some(HookCue::Released(target)) => {
            released_events.write(HookReleased { entity, target });
        }
        None => {}
    }
}

/// Runs after wall running so an attach disables the hook on the same tick.
pub(crate) fn update_hook(
    time: Res<Time>,
    tuning: Res<TraversalTuning>,
    frame: Res<ObstacleFrame>,
    input: Res<TraversalInput>,
    mut thrown_events: MessageWriter<HookThrown>,
    mut attached_events: MessageWriter<HookAttached>,
    mut released_events: MessageWriter<HookReleased>,
    mut query: Query<
        (
            Entity,
            &Transform,
            Option<&Collider>,
            Option<&LinearVelocity>,
            Option<&WallRunner>,
            &mut HookMachine,
            &mut TraversalOutput,
        ),
        With<Traverser>,
    >,
) {
    let delta = time.delta_secs() * 1000.0;

    for (entity, transform, collider, velocity, runner, mut hook, mut output) in &mut query {
        let player = PlayerSnapshot::from_components(transform, collider, velocity);

        let enabled = runner.is_none_or(|r| !r.is_wall_running());
        let cue = hook.set_enabled(enabled);
        forward_cue(entity, cue, &mut attached_events, &mut released_events);

        let cue = hook.update(delta, &player, &frame.obstacles);
        forward_cue(entity, cue, &mut attached_events, &mut released_events);

        if let Some(direction) = input.switch_target {
            match hook.switch_target(direction, &player) {
                Ok(target) => debug!("Hook target switched {:?} to {:?}", direction, target),
                Err(err) => debug!("Hook target switch ignored: {}", err),
            }
        }

        if input.action_pressed {
            match hook.throw_hook(&player, &frame.obstacles) {
                Ok(lock) => {
                    thrown_events.write(HookThrown {
                        entity,
                        target: lock.target,
                        anchor: lock.anchor,
                    });
                }
                Err(err) => debug!("Hook throw ignored: {}", err),
            }
        }

        output.hook_velocity = hook.calculate_hook_velocity(&player, tuning.hook.hook_speed);
        output.hook_indicator = hook.indicator();
        output.rope = hook.rope(&player);
        output.cooldown_progress = hook.cooldown_progress();
        output.hook_enabled = hook.is_enabled();
    }
}
