//! Hook domain: why a hook command was refused.

use std::fmt;

use super::HookPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCommandError {
    /// The hook is switched off (typically while wall running).
    Disabled,
    /// The command is not legal in the current phase.
    WrongPhase(HookPhase),
    CoolingDown,
    NoTarget,
    /// The target has no point the rope can reach.
    NoAnchor,
    /// No candidate lies in the requested direction.
    NoCandidate,
}

impl fmt::Display for HookCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookCommandError::Disabled => write!(f, "hook is disabled"),
            HookCommandError::WrongPhase(phase) => {
                write!(f, "not allowed while the hook is {:?}", phase)
            }
            HookCommandError::CoolingDown => write!(f, "hook is cooling down"),
            HookCommandError::NoTarget => write!(f, "no hook target"),
            HookCommandError::NoAnchor => write!(f, "target has no anchor point"),
            HookCommandError::NoCandidate => write!(f, "no candidate in that direction"),
        }
    }
}

impl std::error::Error for HookCommandError {}
