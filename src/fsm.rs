//! Phase bookkeeping shared by the wall-running and hook machines.
//!
//! Each machine stores its phase as a plain enum and moves it only through
//! [`transition`], which checks the pair against [`Phase::allows`].

use std::fmt;

/// A finite set of phases with a table of legal moves.
pub trait Phase: Copy + Eq + fmt::Debug {
    /// Whether moving from `self` to `next` is legal.
    fn allows(self, next: Self) -> bool;
}

/// An illegal phase pair was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError<P: Phase> {
    pub from: P,
    pub to: P,
}

impl<P: Phase> fmt::Display for TransitionError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal phase transition {:?} -> {:?}", self.from, self.to)
    }
}

impl<P: Phase> std::error::Error for TransitionError<P> {}

/// Move `current` to `next` if the pair is legal, leaving it untouched otherwise.
pub fn transition<P: Phase>(current: &mut P, next: P) -> Result<(), TransitionError<P>> {
    if !current.allows(next) {
        return Err(TransitionError {
            from: *current,
            to: next,
        });
    }
    *current = next;
    Ok(())
}
