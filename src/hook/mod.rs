//! Hook domain: target acquisition, the hook machine and its ECS wiring.

mod error;
mod events;
mod state;
mod systems;
mod targeting;

#[cfg(test)]
mod tests;

pub use error::HookCommandError;
pub use events::{HookAttached, HookReleased, HookThrown};
pub use state::{HookCue, HookIndicator, HookLock, HookMachine, HookPhase, RopeSegment};
pub use targeting::{HookCandidate, HookTargeting, TargetDirection};

pub(crate) use systems::update_hook;
