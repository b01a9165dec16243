//! Lifecycle events for unit transitions.
//!
//! The animator queues an event whenever a unit starts, reverses or finishes a
//! transition. Poll them with [`super::FlipAnimator::drain_events`] after each
//! update.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{AnimationId, UnitPhase};
use crate::key::UnitKey;

/// Event emitted when a unit transition changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlipEvent {
    /// A unit began arriving or leaving.
    Started {
        transition_id: AnimationId,
        key: UnitKey,
        phase: UnitPhase,
    },
    /// A unit in flight was sent back the other way; `phase` is the new direction.
    Reversed {
        transition_id: AnimationId,
        key: UnitKey,
        phase: UnitPhase,
    },
    /// A unit finished arriving (now settled) or leaving (now gone).
    Ended {
        transition_id: AnimationId,
        key: UnitKey,
        phase: UnitPhase,
    },
}

impl FlipEvent {
    pub fn key(&self) -> &UnitKey {
        match self {
            Self::Started { key, .. } | Self::Reversed { key, .. } | Self::Ended { key, .. } => {
                key
            }
        }
    }

    pub fn phase(&self) -> UnitPhase {
        match self {
            Self::Started { phase, .. }
            | Self::Reversed { phase, .. }
            | Self::Ended { phase, .. } => *phase,
        }
    }

    pub fn transition_id(&self) -> AnimationId {
        match self {
            Self::Started { transition_id, .. }
            | Self::Reversed { transition_id, .. }
            | Self::Ended { transition_id, .. } => *transition_id,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }
}

/// FIFO queue of events collected between polls.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<FlipEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FlipEvent) {
        self.events.push_back(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<FlipEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        let id = AnimationId(1);
        queue.push(FlipEvent::Started {
            transition_id: id,
            key: UnitKey::new("a", 0),
            phase: UnitPhase::Inserting,
        });
        queue.push(FlipEvent::Ended {
            transition_id: id,
            key: UnitKey::new("a", 0),
            phase: UnitPhase::Inserting,
        });
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert!(queue.is_empty());
        assert!(!events[0].is_ended());
        assert!(events[1].is_ended());
        assert_eq!(events[1].key(), &UnitKey::new("a", 0));
        assert_eq!(events[1].transition_id(), id);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let event = FlipEvent::Reversed {
            transition_id: AnimationId(7),
            key: UnitKey::new("o", 0),
            phase: UnitPhase::Inserting,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "reversed");
        assert_eq!(json["phase"], "inserting");
        assert_eq!(json["key"]["text"], "o");
    }
}
