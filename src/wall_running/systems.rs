//! Wall running domain: per-tick system driving every traverser's machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::input::TraversalInput;
use crate::obstacles::ObstacleFrame;
use crate::player::{PlayerSnapshot, TraversalOutput, Traverser};

use super::events::{WallContactStarted, WallContactStopped, WallJumped};
use super::state::{WallRunCue, WallRunner};

pub(crate) fn update_wall_running(
    time: Res<Time>,
    frame: Res<ObstacleFrame>,
    input: Res<TraversalInput>,
    mut started_events: MessageWriter<WallContactStarted>,
    mut stopped_events: MessageWriter<WallContactStopped>,
    mut jump_events: MessageWriter<WallJumped>,
    mut query: Query<
        (
            Entity,
            &Transform,
            Option<&Collider>,
            Option<&LinearVelocity>,
            &mut WallRunner,
            &mut TraversalOutput,
        ),
        With<Traverser>,
    >,
) {
    let delta = time.delta_secs() * 1000.0;

    for (entity, transform, collider, velocity, mut runner, mut output) in &mut query {
        let player = PlayerSnapshot::from_components(transform, collider, velocity);

        output.jump_impulse = None;
        if input.action_pressed {
            match runner.jump(&player, &frame.obstacles) {
                Ok(impulse) => {
                    output.jump_impulse = Some(impulse);
                    jump_events.write(WallJumped { entity, impulse });
                }
                Err(err) => debug!("Wall jump ignored: {}", err),
            }
        }

        match runner.update(delta, &player, &frame.obstacles) {
            Some(WallRunCue::ContactStarted(side)) => {
                started_events.write(WallContactStarted { entity, side });
            }
            Some(WallRunCue::ContactStopped) => {
                stopped_events.write(WallContactStopped { entity });
            }
            None => {}
        }

        output.speed_boost = runner.speed_boost();
        output.horizontal_boost = runner.horizontal_boost();
        output.is_wall_running = runner.is_wall_running();
        output.attachment_pose = runner.attachment_pose();
    }
}
