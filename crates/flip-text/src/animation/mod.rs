//! Animation of character units between renders.
//!
//! This module provides:
//! - **Easing**: CSS timing functions plus custom cubic beziers
//! - **Transitions**: per-unit insertion and removal timing, reversible mid-flight
//! - **Animator**: keyed diffing of successive renders into running transitions
//! - **Events**: lifecycle notifications for started, reversed and ended units
//!
//! # Architecture
//!
//! ```text
//! FlipAnimator
//!   ├── RenderTree (current units)
//!   ├── arriving: UnitKey → UnitTransition (insertion)
//!   ├── leaving:  UnitKey → UnitTransition (removal, drawn at old slots)
//!   └── EventQueue
//! ```

pub mod animator;
pub mod easing;
pub mod events;
pub mod transition;
pub mod types;

pub use animator::{FlipAnimator, UnitFrame};
pub use easing::EasingFunction;
pub use events::{EventQueue, FlipEvent};
pub use transition::{TransitionSpec, UnitTransition};
pub use types::{AnimationId, AnimationState, IdAllocator, UnitPhase};
