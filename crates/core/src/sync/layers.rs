use std::time::{Duration, Instant};

use super::Layer;

/// Which half of the frame the instant-split variant exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitSide {
    #[default]
    Left,
    Right,
}

/// Rendering signals for the UI: per-layer opacity and the split partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub primary_opacity: f32,
    pub secondary_opacity: f32,
    pub split: SplitSide,
}

impl Presentation {
    pub fn opacity(&self, layer: Layer) -> f32 {
        match layer {
            Layer::Primary => self.primary_opacity,
            Layer::Secondary => self.secondary_opacity,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    target: Layer,
    deadline: Instant,
}

/// Visible-layer bookkeeping of the sync engine.
///
/// A cross-fade runs in two steps: the target is raised to full opacity at
/// once, and the previously visible layer drops to zero when the deadline
/// passes. Only one transition may be in flight.
#[derive(Debug, Clone)]
pub struct LayerState {
    visible: Layer,
    opacity: [f32; 2],
    split: SplitSide,
    transition: Option<Transition>,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            visible: Layer::Primary,
            opacity: [1.0, 0.0],
            split: SplitSide::Left,
            transition: None,
        }
    }
}

impl LayerState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn visible(&self) -> Layer {
        self.visible
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition_target(&self) -> Option<Layer> {
        self.transition.map(|t| t.target)
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            primary_opacity: self.opacity[Layer::Primary.index()],
            secondary_opacity: self.opacity[Layer::Secondary.index()],
            split: self.split,
        }
    }

    pub(crate) fn set_split(&mut self, side: SplitSide) {
        self.split = side;
    }

    /// Starts fading towards the hidden layer. Returns the target, or `None`
    /// when a transition is already running.
    pub(crate) fn begin(&mut self, now: Instant, duration: Duration) -> Option<Layer> {
        if self.transition.is_some() {
            return None;
        }
        let target = self.visible.other();
        self.opacity[target.index()] = 1.0;
        self.transition = Some(Transition {
            target,
            deadline: now + duration,
        });
        Some(target)
    }

    /// Finishes a transition whose deadline has passed and returns the newly
    /// visible layer.
    pub(crate) fn complete_due(&mut self, now: Instant) -> Option<Layer> {
        let transition = self.transition.filter(|t| now >= t.deadline)?;
        self.opacity[transition.target.other().index()] = 0.0;
        self.visible = transition.target;
        self.transition = None;
        Some(transition.target)
    }
}
