//! Wall running domain: probes, the wall-running machine and its ECS wiring.

mod events;
mod raycast;
mod state;
mod systems;


pub use events::{WallContactStarted, WallContactStopped, WallJumped};
pub use raycast::{Probe, RaycastResult, WallRaycaster, WallSide};
pub use state::{
    AttachedSurface, ContactGrace, WallJumpError, WallRunCue, WallRunPhase, WallRunner,
};

pub(crate) use systems::update_wall_running;
