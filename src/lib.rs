//! Traversal core for a 2D side-scrolling platformer: wall running and the
//! grappling hook.
//!
//! Each tick the plugin snapshots every [`Obstacle`](obstacles::Obstacle),
//! advances the wall-running machine and then the hook machine of every
//! [`Traverser`](player::Traverser), resolves avian collisions against both,
//! and writes the result to the player's [`TraversalOutput`](player::TraversalOutput).
//! The host applies those velocities; nothing here moves bodies.

pub mod collision;
pub mod config;
pub mod fsm;
pub mod geometry;
pub mod hook;
pub mod input;
pub mod obstacles;
pub mod player;
pub mod wall_running;

#[cfg(feature = "dev-tools")]
pub mod debug;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::collision::{DamagingContact, resolve_traversal_collisions};
use crate::config::{TraversalTuning, load_tuning, validate_tuning};
use crate::hook::{HookAttached, HookMachine, HookReleased, HookThrown, update_hook};
use crate::input::{TraversalInput, clear_traversal_input, read_traversal_input};
use crate::obstacles::{ObstacleFrame, collect_obstacles};
use crate::player::{TraversalOutput, Traverser};
use crate::wall_running::{
    WallContactStarted, WallContactStopped, WallJumped, WallRunner, update_wall_running,
};

pub mod prelude {
    pub use crate::TraversalPlugin;
    pub use crate::collision::{CollisionResponse, CollisionSide, DamagingContact};
    pub use crate::config::{CollisionConfig, HookConfig, TraversalTuning, WallRunningConfig};
    #[cfg(feature = "dev-tools")]
    pub use crate::debug::TraversalDebugPlugin;
    pub use crate::hook::{
        HookAttached, HookCommandError, HookIndicator, HookMachine, HookPhase, HookReleased,
        HookThrown, RopeSegment, TargetDirection,
    };
    pub use crate::input::TraversalInput;
    pub use crate::obstacles::{Obstacle, ObstacleKind};
    pub use crate::player::{TraversalOutput, Traverser};
    pub use crate::wall_running::{
        WallContactStarted, WallContactStopped, WallJumpError, WallJumped, WallRunPhase,
        WallRunner, WallSide,
    };
}

const DEFAULT_TUNING_PATH: &str = "assets/data/traversal.ron";

/// Installs the traversal resources, messages and per-tick systems.
///
/// A `TraversalTuning` resource inserted before this plugin wins over the
/// tuning file.
pub struct TraversalPlugin {
    /// RON or JSON tuning file; `None` uses built-in defaults.
    pub tuning_path: Option<PathBuf>,
}

impl Default for TraversalPlugin {
    fn default() -> Self {
        Self {
            tuning_path: Some(PathBuf::from(DEFAULT_TUNING_PATH)),
        }
    }
}

impl Plugin for TraversalPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<TraversalTuning>() {
            app.insert_resource(resolve_tuning(self.tuning_path.as_deref()));
        }

        app.init_resource::<TraversalInput>()
            .init_resource::<ObstacleFrame>()
            .add_message::<CollisionStart>()
            .add_message::<WallContactStarted>()
            .add_message::<WallContactStopped>()
            .add_message::<WallJumped>()
            .add_message::<HookThrown>()
            .add_message::<HookAttached>()
            .add_message::<HookReleased>()
            .add_message::<DamagingContact>()
            .add_systems(
                Update,
                (
                    read_traversal_input.run_if(resource_exists::<ButtonInput<KeyCode>>),
                    attach_traversal_state,
                    collect_obstacles,
                    update_wall_running,
                    update_hook,
                    resolve_traversal_collisions,
                    clear_traversal_input,
                )
                    .chain(),
            );
    }
}

/// Load and validate tuning, falling back to defaults on any problem.
fn resolve_tuning(path: Option<&Path>) -> TraversalTuning {
    let Some(path) = path else {
        return TraversalTuning::default();
    };

    let tuning = match load_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default traversal tuning", e);
            return TraversalTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            warn!("{}", error);
        }
        warn!(
            "{} invalid value(s) in {}; using default traversal tuning",
            errors.len(),
            path.display()
        );
        return TraversalTuning::default();
    }

    info!("Loaded traversal tuning from {}", path.display());
    tuning
}

/// Give every new traverser its machines and output.
fn attach_traversal_state(
    mut commands: Commands,
    tuning: Res<TraversalTuning>,
    added: Query<Entity, Added<Traverser>>,
) {
    for entity in &added {
        commands.entity(entity).insert((
            WallRunner::new(&tuning.wall_running),
            HookMachine::new(&tuning.hook),
            TraversalOutput::default(),
        ));
        debug!("Traversal state attached to {:?}", entity);
    }
}
