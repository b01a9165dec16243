//! Static styling applied to every character unit.

use flip_config::FlipConfig;
use serde::{Deserialize, Serialize};

use crate::effect::FlipTransition;
use crate::error::Result;
use crate::key::KeyPolicy;
use crate::split::SplitMode;

/// Default body text size in points.
pub const BODY_FONT_SIZE: f32 = 17.0;

/// Font descriptor handed to the host's text renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name; `None` selects the host's body font.
    pub family: Option<String>,
    /// Size in points.
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self::body()
    }
}

impl Font {
    pub fn body() -> Self {
        Self {
            family: None,
            size: BODY_FONT_SIZE,
        }
    }

    pub fn custom(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
        }
    }
}

/// Decoration drawn behind each unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// Solid fill, linear RGBA.
    Color { rgba: [f32; 4] },
}

impl Background {
    pub fn color(rgba: [f32; 4]) -> Self {
        Self::Color { rgba }
    }
}

/// Everything the renderer needs besides the text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipStyle {
    pub font: Font,
    pub background: Option<Background>,
    pub transition: FlipTransition,
    pub split_mode: SplitMode,
    pub key_policy: KeyPolicy,
}

impl FlipStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_transition(mut self, transition: FlipTransition) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_split_mode(mut self, split_mode: SplitMode) -> Self {
        self.split_mode = split_mode;
        self
    }

    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    /// Build a style from loaded configuration.
    ///
    /// Fails if a named option is not recognised.
    pub fn from_config(config: &FlipConfig) -> Result<Self> {
        let text = &config.text;
        Ok(Self {
            font: Font {
                family: text.font_family.clone(),
                size: text.font_size,
            },
            background: config.background.rgba.map(Background::color),
            transition: text.transition.parse()?,
            split_mode: text.split_mode.parse()?,
            key_policy: text.key_policy.parse()?,
        })
    }
}
