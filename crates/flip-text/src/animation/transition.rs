//! Timing of a single unit's insertion or removal.
//!
//! - `TransitionSpec`: duration, delay and easing shared by every unit
//! - `UnitTransition`: runtime state of one unit's transition
//!
//! A transition runs a normalized clock `t` from 0 to 1 and maps it onto the
//! effect's `progress`. Insertion moves progress up towards 1 (the identity
//! state); removal moves it down towards 0 (the active state). Reversing a
//! transition keeps the current progress and heads for the other end, so an
//! interrupted unit never jumps.

use flip_config::FlipConfig;
use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::types::{AnimationId, AnimationState, UnitPhase};
use crate::error::Result;

/// How long unit transitions take and how they accelerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub easing: EasingFunction,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            delay_ms: 0.0,
            easing: EasingFunction::EaseIn,
        }
    }
}

impl TransitionSpec {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Timing from loaded configuration; fails on an unknown easing name.
    pub fn from_config(config: &FlipConfig) -> Result<Self> {
        let animation = &config.animation;
        Ok(Self {
            duration_ms: animation.duration_ms.max(0.0),
            delay_ms: animation.delay_ms.max(0.0),
            easing: animation.easing.parse()?,
        })
    }
}

/// Runtime state of one unit's transition.
#[derive(Debug, Clone)]
pub struct UnitTransition {
    pub id: AnimationId,
    /// `true` while heading for the identity state.
    pub insertion: bool,
    /// Progress when this leg started.
    pub from_progress: f64,
    pub spec: TransitionSpec,
    pub elapsed_ms: f32,
    pub state: AnimationState,
}

impl UnitTransition {
    /// Insertion from the active state.
    pub fn insert(id: AnimationId, spec: TransitionSpec) -> Self {
        Self::starting_at(id, true, 0.0, spec)
    }

    /// Removal from the identity state.
    pub fn remove(id: AnimationId, spec: TransitionSpec) -> Self {
        Self::starting_at(id, false, 1.0, spec)
    }

    fn starting_at(
        id: AnimationId,
        insertion: bool,
        from_progress: f64,
        spec: TransitionSpec,
    ) -> Self {
        Self {
            id,
            insertion,
            from_progress,
            spec,
            elapsed_ms: 0.0,
            state: if spec.delay_ms > 0.0 {
                AnimationState::Pending
            } else {
                AnimationState::Running
            },
        }
    }

    pub fn phase(&self) -> UnitPhase {
        if self.insertion {
            UnitPhase::Inserting
        } else {
            UnitPhase::Removing
        }
    }

    /// Linear clock of the current leg, 0.0 to 1.0.
    pub fn clock(&self) -> f64 {
        match self.state {
            AnimationState::Pending => 0.0,
            AnimationState::Finished => 1.0,
            AnimationState::Running => {
                if self.spec.duration_ms <= 0.0 {
                    return 1.0;
                }
                let active = (self.elapsed_ms - self.spec.delay_ms).max(0.0);
                f64::from((active / self.spec.duration_ms).clamp(0.0, 1.0))
            }
        }
    }

    /// Effect progress at the current time.
    pub fn progress(&self) -> f64 {
        let eased = f64::from(self.spec.easing.evaluate(self.clock() as f32));
        let target = if self.insertion { 1.0 } else { 0.0 };
        self.from_progress + (target - self.from_progress) * eased
    }

    /// Advance by `delta_ms`. Returns `true` while the transition is still active.
    pub fn update(&mut self, delta_ms: f32) -> bool {
        match self.state {
            AnimationState::Finished => false,
            AnimationState::Pending | AnimationState::Running => {
                self.elapsed_ms += delta_ms;
                let active = self.elapsed_ms - self.spec.delay_ms;
                if active >= 0.0 {
                    self.state = AnimationState::Running;
                }
                if self.state == AnimationState::Running && active >= self.spec.duration_ms {
                    self.state = AnimationState::Finished;
                }
                self.state != AnimationState::Finished
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Turn around towards the other end, starting from the current progress.
    ///
    /// The new leg runs without delay under the fresh `id`.
    pub fn reverse(&mut self, id: AnimationId) {
        self.from_progress = self.progress();
        self.insertion = !self.insertion;
        self.id = id;
        self.elapsed_ms = 0.0;
        self.spec.delay_ms = 0.0;
        self.state = AnimationState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::IdAllocator;

    fn linear(duration_ms: f32) -> TransitionSpec {
        TransitionSpec::new(duration_ms).with_easing(EasingFunction::Linear)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_spec_defaults() {
        let spec = TransitionSpec::default();
        assert_eq!(spec.duration_ms, 1000.0);
        assert_eq!(spec.delay_ms, 0.0);
        assert_eq!(spec.easing, EasingFunction::EaseIn);
    }

    #[test]
    fn test_spec_from_config() {
        let mut config = FlipConfig::default();
        config.animation.duration_ms = 300.0;
        config.animation.easing = "ease_out".into();
        let spec = TransitionSpec::from_config(&config).unwrap();
        assert_eq!(spec.duration_ms, 300.0);
        assert_eq!(spec.easing, EasingFunction::EaseOut);

        config.animation.easing = "wobble".into();
        assert!(TransitionSpec::from_config(&config).is_err());
    }

    #[test]
    fn test_insertion_runs_up() {
        let mut t = UnitTransition::insert(AnimationId(1), linear(100.0));
        assert_eq!(t.phase(), UnitPhase::Inserting);
        assert!(approx_eq(t.progress(), 0.0));

        assert!(t.update(25.0));
        assert!(approx_eq(t.progress(), 0.25));

        assert!(!t.update(80.0));
        assert!(t.is_finished());
        assert!(approx_eq(t.progress(), 1.0));
    }

    #[test]
    fn test_removal_runs_down() {
        let mut t = UnitTransition::remove(AnimationId(1), linear(100.0));
        assert_eq!(t.phase(), UnitPhase::Removing);
        assert!(approx_eq(t.progress(), 1.0));

        t.update(40.0);
        assert!(approx_eq(t.progress(), 0.6));

        t.update(60.0);
        assert!(t.is_finished());
        assert!(approx_eq(t.progress(), 0.0));
    }

    #[test]
    fn test_delay_holds_start() {
        let mut t = UnitTransition::insert(AnimationId(1), linear(100.0).with_delay(50.0));
        assert_eq!(t.state, AnimationState::Pending);

        t.update(30.0);
        assert_eq!(t.state, AnimationState::Pending);
        assert!(approx_eq(t.progress(), 0.0));

        t.update(30.0);
        assert_eq!(t.state, AnimationState::Running);
        assert!(approx_eq(t.progress(), 0.1));
    }

    #[test]
    fn test_reverse_continues_from_current_progress() {
        let mut ids = IdAllocator::new();
        let mut t = UnitTransition::remove(ids.next_id(), linear(100.0));
        t.update(30.0);
        let before = t.progress();
        let old_id = t.id;

        t.reverse(ids.next_id());
        assert!(t.insertion);
        assert_ne!(t.id, old_id);
        assert!(approx_eq(t.progress(), before));

        t.update(50.0);
        assert!(approx_eq(t.progress(), 0.7 + 0.3 * 0.5));

        t.update(50.0);
        assert!(t.is_finished());
        assert!(approx_eq(t.progress(), 1.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut t = UnitTransition::insert(AnimationId(1), linear(0.0));
        assert!(approx_eq(t.progress(), 1.0));
        assert!(!t.update(0.0));
        assert!(t.is_finished());
    }
}
