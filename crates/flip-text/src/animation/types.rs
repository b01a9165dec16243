//! Core animation types.
//!
//! - `AnimationId`: Identifier for one unit transition
//! - `IdAllocator`: Per-owner source of `AnimationId`s
//! - `AnimationState`: Lifecycle of a transition
//! - `UnitPhase`: Whether a unit is arriving, leaving or settled

use serde::{Deserialize, Serialize};

/// Identifier for a transition instance, unique within its animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

/// Hands out increasing ids starting at 1.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> AnimationId {
        self.last += 1;
        AnimationId(self.last)
    }
}

/// Current state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Waiting out its delay.
    #[default]
    Pending,
    /// Advancing.
    Running,
    /// Reached its end state.
    Finished,
}

/// Where a unit is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPhase {
    /// Running its insertion transition.
    Inserting,
    /// Running its removal transition; drawn at its old slot.
    Removing,
    /// No transition in flight.
    Settled,
}

impl UnitPhase {
    pub fn is_insertion(&self) -> bool {
        !matches!(self, Self::Removing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        assert_eq!(a.next_id(), AnimationId(1));
        assert_eq!(a.next_id(), AnimationId(2));
        assert_eq!(b.next_id(), AnimationId(1));
    }
}
