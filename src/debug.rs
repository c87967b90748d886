//! Debug overlay for traversal tuning (`dev-tools` feature).
//!
//! Toggle with F3: draws the wall probes, the hook rope and the target
//! indicator with gizmos. Needs Bevy's gizmo and input plugins.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::{PlayerSnapshot, TraversalOutput, Traverser};
use crate::wall_running::WallRunner;

const PROBE_IDLE: Color = Color::srgb(0.5, 0.5, 0.5);
const PROBE_ATTACHED: Color = Color::srgb(0.2, 0.9, 0.3);
const ROPE: Color = Color::srgb(0.9, 0.2, 0.2);
const TARGET_READY: Color = Color::srgb(1.0, 0.85, 0.2);
const TARGET_COOLING: Color = Color::srgb(0.4, 0.4, 0.6);

#[derive(Resource, Debug, Default)]
pub struct TraversalDebugState {
    pub visible: bool,
}

pub struct TraversalDebugPlugin;

impl Plugin for TraversalDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TraversalDebugState>().add_systems(
            Update,
            (
                toggle_traversal_debug.run_if(resource_exists::<ButtonInput<KeyCode>>),
                draw_traversal_debug.run_if(|state: Res<TraversalDebugState>| state.visible),
            )
                .chain(),
        );
    }
}

fn toggle_traversal_debug(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<TraversalDebugState>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        state.visible = !state.visible;
        info!("Traversal debug overlay: {}", state.visible);
    }
}

fn draw_traversal_debug(
    mut gizmos: Gizmos,
    query: Query<
        (
            &Transform,
            Option<&Collider>,
            Option<&LinearVelocity>,
            &WallRunner,
            &TraversalOutput,
        ),
        With<Traverser>,
    >,
) {
    for (transform, collider, velocity, runner, output) in &query {
        let player = PlayerSnapshot::from_components(transform, collider, velocity);

        let probe_color = if runner.is_wall_running() {
            PROBE_ATTACHED
        } else {
            PROBE_IDLE
        };
        for probe in runner.raycaster().probes(&player) {
            gizmos.line_2d(probe.origin, probe.end(), probe_color);
        }

        if let Some(rope) = output.rope {
            gizmos.line_2d(rope.from, rope.to, ROPE);
        }

        if let Some(indicator) = output.hook_indicator {
            let color = if indicator.ready {
                TARGET_READY
            } else {
                TARGET_COOLING
            };
            let radius = if indicator.locked { 3.0 } else { 5.0 };
            gizmos.circle_2d(indicator.point, radius, color);
        }
    }
}
