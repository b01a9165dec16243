//! Drives unit transitions between successive renders.
//!
//! `FlipAnimator` keeps the last render tree. When a new tree arrives it diffs
//! the keys, starts an insertion for every new key and a removal for every key
//! that vanished, and keeps departing units around at their old slots until
//! their removal finishes. Each frame the caller advances time with
//! [`FlipAnimator::update`] and samples [`FlipAnimator::frames`].
//!
//! # Usage
//!
//! ```
//! use flip_text::animation::{FlipAnimator, TransitionSpec};
//! use flip_text::{FlipStyle, Size};
//!
//! let spec = TransitionSpec::new(300.0);
//! let mut animator = FlipAnimator::new(FlipStyle::default(), spec, "Hello");
//! animator.set_text("World");
//! while animator.update(16.0) {
//!     for unit in animator.frames(|_| Size::new(20.0, 32.0)) {
//!         let _ = (unit.slot, unit.frame.projection);
//!     }
//! }
//! assert_eq!(animator.tree().text(), "World");
//! ```

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::events::{EventQueue, FlipEvent};
use super::transition::{TransitionSpec, UnitTransition};
use super::types::{IdAllocator, UnitPhase};
use crate::effect::EffectFrame;
use crate::key::UnitKey;
use crate::reconcile::diff_keys;
use crate::render::{FlipText, RenderTree, RenderedUnit, render_units};
use crate::style::FlipStyle;
use crate::types::Size;

/// One unit as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFrame {
    pub key: UnitKey,
    pub text: String,
    pub slot: usize,
    pub phase: UnitPhase,
    /// Effect progress, 1.0 for settled units.
    pub progress: f64,
    pub frame: EffectFrame,
}

/// Keyed transition driver for one flip text row.
#[derive(Debug)]
pub struct FlipAnimator {
    style: FlipStyle,
    spec: TransitionSpec,
    tree: RenderTree,
    /// Insertions in flight, for keys present in `tree`.
    arriving: BTreeMap<UnitKey, UnitTransition>,
    /// Removals in flight, for keys no longer in `tree`.
    leaving: BTreeMap<UnitKey, UnitTransition>,
    /// Units of `leaving` keys, as they were last rendered.
    departing: Vec<RenderedUnit>,
    ids: IdAllocator,
    events: EventQueue,
}

impl FlipAnimator {
    /// Start with `initial` already settled on screen.
    pub fn new(style: FlipStyle, spec: TransitionSpec, initial: &str) -> Self {
        let tree = render_units(initial, &style);
        Self {
            style,
            spec,
            tree,
            arriving: BTreeMap::new(),
            leaving: BTreeMap::new(),
            departing: Vec::new(),
            ids: IdAllocator::new(),
            events: EventQueue::new(),
        }
    }

    /// Start from a component's current render.
    pub fn for_component(component: &FlipText, spec: TransitionSpec) -> Self {
        Self::new(component.style().clone(), spec, &component.binding().get())
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    /// Timing for transitions started from now on.
    pub fn set_spec(&mut self, spec: TransitionSpec) {
        self.spec = spec;
    }

    /// Re-render with new text using the animator's style.
    pub fn set_text(&mut self, text: &str) {
        let tree = render_units(text, &self.style);
        self.apply(tree);
    }

    /// Re-render a component and animate the difference.
    pub fn sync(&mut self, component: &FlipText) {
        self.style = component.style().clone();
        self.apply(component.render());
    }

    /// Replace the current tree, starting transitions for changed keys.
    pub fn apply(&mut self, tree: RenderTree) {
        let diff = diff_keys(&self.tree.keys(), &tree.keys());
        if diff.is_empty() {
            self.tree = tree;
            return;
        }

        for key in &diff.removed {
            let old_units: Vec<RenderedUnit> = self
                .tree
                .units
                .iter()
                .filter(|u| &u.key == key)
                .cloned()
                .collect();
            let animated = old_units.iter().any(|u| u.transition.is_animated());

            let pending = self.arriving.remove(key);
            if !animated {
                continue;
            }
            let transition = match pending {
                Some(mut transition) => {
                    transition.reverse(self.ids.next_id());
                    debug!(%key, progress = transition.progress(), "unit insertion reversed");
                    self.events.push(FlipEvent::Reversed {
                        transition_id: transition.id,
                        key: key.clone(),
                        phase: UnitPhase::Removing,
                    });
                    transition
                }
                None => {
                    let transition = UnitTransition::remove(self.ids.next_id(), self.spec);
                    debug!(%key, "unit removal started");
                    self.events.push(FlipEvent::Started {
                        transition_id: transition.id,
                        key: key.clone(),
                        phase: UnitPhase::Removing,
                    });
                    transition
                }
            };
            self.leaving.insert(key.clone(), transition);
            self.departing.extend(old_units);
        }

        for key in &diff.inserted {
            let animated = tree
                .units
                .iter()
                .any(|u| &u.key == key && u.transition.is_animated());

            if let Some(mut transition) = self.leaving.remove(key) {
                self.departing.retain(|u| &u.key != key);
                if !animated {
                    continue;
                }
                transition.reverse(self.ids.next_id());
                debug!(%key, progress = transition.progress(), "unit removal reversed");
                self.events.push(FlipEvent::Reversed {
                    transition_id: transition.id,
                    key: key.clone(),
                    phase: UnitPhase::Inserting,
                });
                self.arriving.insert(key.clone(), transition);
                continue;
            }

            if animated {
                let transition = UnitTransition::insert(self.ids.next_id(), self.spec);
                debug!(%key, "unit insertion started");
                self.events.push(FlipEvent::Started {
                    transition_id: transition.id,
                    key: key.clone(),
                    phase: UnitPhase::Inserting,
                });
                self.arriving.insert(key.clone(), transition);
            }
        }

        self.tree = tree;
    }

    /// Advance all transitions by `delta_ms`.
    ///
    /// Returns `true` while any unit is still animating.
    pub fn update(&mut self, delta_ms: f32) -> bool {
        let settled = advance(&mut self.arriving, delta_ms);
        for (key, transition) in settled {
            debug!(%key, "unit insertion finished");
            self.events.push(FlipEvent::Ended {
                transition_id: transition.id,
                key,
                phase: UnitPhase::Inserting,
            });
        }

        let gone = advance(&mut self.leaving, delta_ms);
        for (key, transition) in gone {
            debug!(%key, "unit removal finished");
            self.departing.retain(|u| u.key != key);
            self.events.push(FlipEvent::Ended {
                transition_id: transition.id,
                key,
                phase: UnitPhase::Removing,
            });
        }

        trace!(
            arriving = self.arriving.len(),
            leaving = self.leaving.len(),
            "flip animator updated"
        );
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        !self.arriving.is_empty() || !self.leaving.is_empty()
    }

    /// Phase of the unit with `key`, if it is on screen.
    pub fn phase_of(&self, key: &UnitKey) -> Option<UnitPhase> {
        if self.arriving.contains_key(key) {
            Some(UnitPhase::Inserting)
        } else if self.leaving.contains_key(key) {
            Some(UnitPhase::Removing)
        } else if self.tree.units.iter().any(|u| &u.key == key) {
            Some(UnitPhase::Settled)
        } else {
            None
        }
    }

    /// Sample every visible unit, current and departing, ordered by slot.
    ///
    /// `size_of` gives each unit's laid-out size, which anchors its effect.
    pub fn frames<F>(&self, size_of: F) -> Vec<UnitFrame>
    where
        F: Fn(&RenderedUnit) -> Size,
    {
        let current = self.tree.units.iter().map(|unit| match self.arriving.get(&unit.key) {
            Some(transition) => {
                let progress = transition.progress();
                sample(unit, UnitPhase::Inserting, progress, size_of(unit))
            }
            // Settled units draw upright, even where the effect's identity state is not
            None => UnitFrame {
                key: unit.key.clone(),
                text: unit.text.clone(),
                slot: unit.slot,
                phase: UnitPhase::Settled,
                progress: 1.0,
                frame: EffectFrame::identity(),
            },
        });

        let departing = self.departing.iter().filter_map(|unit| {
            let transition = self.leaving.get(&unit.key)?;
            Some(sample(
                unit,
                UnitPhase::Removing,
                transition.progress(),
                size_of(unit),
            ))
        });

        let mut frames: Vec<UnitFrame> = current.chain(departing).collect();
        frames.sort_by_key(|f| (f.slot, f.phase == UnitPhase::Removing));
        frames
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<FlipEvent> {
        self.events.drain()
    }
}

/// Step every transition and pull out the ones that finished.
fn advance(
    transitions: &mut BTreeMap<UnitKey, UnitTransition>,
    delta_ms: f32,
) -> Vec<(UnitKey, UnitTransition)> {
    let done: Vec<UnitKey> = transitions
        .iter_mut()
        .filter_map(|(key, t)| (!t.update(delta_ms)).then(|| key.clone()))
        .collect();
    done.into_iter()
        .filter_map(|key| transitions.remove(&key).map(|t| (key, t)))
        .collect()
}

fn sample(unit: &RenderedUnit, phase: UnitPhase, progress: f64, size: Size) -> UnitFrame {
    UnitFrame {
        key: unit.key.clone(),
        text: unit.text.clone(),
        slot: unit.slot,
        phase,
        progress,
        frame: unit.transition.frame(progress, phase.is_insertion(), size),
    }
}
