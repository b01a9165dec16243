//! Per-character flip transitions for a bound string.
//!
//! `FlipText` splits its text into grapheme units, each keyed by its content
//! rather than its position. When the text changes, units whose key vanished
//! flip out and units with a new key flip in, while shared units stay put.
//!
//! ```
//! use flip_text::animation::{FlipAnimator, TransitionSpec};
//! use flip_text::{FlipText, FlipTransition, TextBinding};
//!
//! let text = TextBinding::new("Hello");
//! let component = FlipText::new(text.clone()).transition(FlipTransition::RotateScale);
//! let mut animator = FlipAnimator::for_component(&component, TransitionSpec::default());
//!
//! text.set("World");
//! animator.sync(&component);
//! assert!(animator.is_animating());
//! ```

pub mod animation;
pub mod effect;
pub mod error;
pub mod key;
pub mod reconcile;
pub mod render;
pub mod split;
pub mod style;
pub mod types;

pub use animation::{FlipAnimator, FlipEvent, TransitionSpec, UnitFrame};
pub use effect::projection::Transform3D;
pub use effect::{
    EffectFrame, FlipEffect, FlipTransition, MIN_SCALE, RotateEffect, RotateScaleEffect,
};
pub use error::{FlipError, Result};
pub use key::{KeyPolicy, UnitKey, assign_keys};
pub use reconcile::{KeyedDiff, diff_keys};
pub use render::{FlipText, RenderTree, RenderedUnit, TextBinding, render_units};
pub use split::{SplitMode, split_units};
pub use style::{BODY_FONT_SIZE, Background, FlipStyle, Font};
pub use types::{Size, Visibility};
