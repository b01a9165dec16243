//! Keyed rendering of a bound string into character units.
//!
//! The renderer is a pure function of the current text and the style: it
//! lays units out in one row with no spacing, sized to their content, and
//! tags each with its key and transition. Diffing successive trees and
//! animating the difference is left to the caller (see
//! [`crate::animation::FlipAnimator`]).

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::effect::FlipTransition;
use crate::key::{KeyPolicy, UnitKey, assign_keys};
use crate::split::{SplitMode, split_units};
use crate::style::{Background, FlipStyle, Font};

/// Shared, mutable handle to the displayed string.
///
/// Clones point at the same string, so the owner can change the text and the
/// component sees it on its next render.
#[derive(Debug, Clone, Default)]
pub struct TextBinding {
    inner: Rc<RefCell<String>>,
}

impl TextBinding {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(text.into())),
        }
    }

    /// Borrow the current text.
    pub fn get(&self) -> Ref<'_, String> {
        self.inner.borrow()
    }

    /// Replace the text.
    pub fn set(&self, text: impl Into<String>) {
        *self.inner.borrow_mut() = text.into();
    }

    /// Edit the text in place.
    pub fn update(&self, f: impl FnOnce(&mut String)) {
        f(&mut self.inner.borrow_mut());
    }
}

impl From<&str> for TextBinding {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One character unit in a render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedUnit {
    pub key: UnitKey,
    pub text: String,
    /// Position in the row, left to right.
    pub slot: usize,
    pub transition: FlipTransition,
    pub background: Option<Background>,
}

/// Output of one render: a row of units with shared styling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderTree {
    pub units: Vec<RenderedUnit>,
    pub font: Font,
    /// Gap between neighbouring units, always 0.
    pub spacing: f64,
    /// The row takes its content's size: no wrapping, no truncation.
    pub fixed_size: bool,
}

impl RenderTree {
    pub fn keys(&self) -> Vec<UnitKey> {
        self.units.iter().map(|u| u.key.clone()).collect()
    }

    /// Concatenated text of all units.
    pub fn text(&self) -> String {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Render `text` with `style`.
pub fn render_units(text: &str, style: &FlipStyle) -> RenderTree {
    let pieces = split_units(text, style.split_mode);
    let keys = assign_keys(&pieces, style.key_policy);

    let units = pieces
        .iter()
        .zip(keys)
        .enumerate()
        .map(|(slot, (piece, key))| RenderedUnit {
            key,
            text: (*piece).to_string(),
            slot,
            transition: style.transition,
            background: style.background,
        })
        .collect();

    RenderTree {
        units,
        font: style.font.clone(),
        spacing: 0.0,
        fixed_size: true,
    }
}

/// The flip text component: a bound string plus its style.
#[derive(Debug, Clone)]
pub struct FlipText {
    text: TextBinding,
    style: FlipStyle,
}

impl FlipText {
    /// Component with the default style: body font, rotate transition, no background.
    pub fn new(text: TextBinding) -> Self {
        Self::with_style(text, FlipStyle::default())
    }

    pub fn with_style(text: TextBinding, style: FlipStyle) -> Self {
        Self { text, style }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.style.font = font;
        self
    }

    pub fn transition(mut self, transition: FlipTransition) -> Self {
        self.style.transition = transition;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.style.background = Some(background);
        self
    }

    pub fn split_mode(mut self, split_mode: SplitMode) -> Self {
        self.style.split_mode = split_mode;
        self
    }

    pub fn key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.style.key_policy = key_policy;
        self
    }

    pub fn binding(&self) -> &TextBinding {
        &self.text
    }

    pub fn style(&self) -> &FlipStyle {
        &self.style
    }

    /// Render the current value of the binding.
    pub fn render(&self) -> RenderTree {
        render_units(&self.text.get(), &self.style)
    }
}
