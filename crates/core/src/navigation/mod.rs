use std::time::Instant;

use tracing::trace;

use crate::{NavigationConfig, TransitionMode};

/// Playlist movement requested by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
}

/// What a click or tap on the viewport should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    TogglePlayback,
    Crossfade,
    /// Playback was refused earlier; the click restarts it.
    RetryPlayback,
    /// Nothing loaded, or a touch gesture is still being tracked.
    Ignored,
}

/// Vertical extent of the viewport in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBounds {
    pub top: f32,
    pub bottom: f32,
}

impl VerticalBounds {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// A single wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_y: f32,
    pub pointer_y: f32,
    pub viewport: VerticalBounds,
}

#[derive(Debug, Clone, Copy)]
struct TouchTrack {
    start_y: f32,
    end_y: f32,
}

/// Turns raw wheel, touch and click input into navigation commands.
///
/// One physical scroll fires many wheel events, so after a wheel gesture is
/// accepted further wheel input is dropped until the cooldown elapses.
#[derive(Debug, Clone)]
pub struct NavigationController {
    config: NavigationConfig,
    locked_until: Option<Instant>,
    touch: Option<TouchTrack>,
}

impl NavigationController {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            locked_until: None,
            touch: None,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Scroll down means next, scroll up means previous. A zero delta inside
    /// the viewport still arms the cooldown.
    pub fn on_wheel(&mut self, input: WheelInput, now: Instant) -> Option<NavCommand> {
        if !input.viewport.contains(input.pointer_y) {
            return None;
        }
        if self.is_locked(now) {
            trace!(delta_y = input.delta_y, "wheel event dropped by cooldown");
            return None;
        }
        self.locked_until = Some(now + self.config.wheel_cooldown());

        if input.delta_y > 0.0 {
            Some(NavCommand::Next)
        } else if input.delta_y < 0.0 {
            Some(NavCommand::Previous)
        } else {
            None
        }
    }

    /// Begins tracking a swipe. Multi-finger touches are ignored.
    pub fn on_touch_start(&mut self, touches: usize, y: f32) {
        if touches != 1 {
            return;
        }
        self.touch = Some(TouchTrack {
            start_y: y,
            end_y: y,
        });
    }

    pub fn on_touch_move(&mut self, touches: usize, y: f32) {
        if touches != 1 {
            return;
        }
        if let Some(track) = self.touch.as_mut() {
            track.end_y = y;
        }
    }

    /// Ends the swipe. Upward swipes advance, downward swipes go back, and
    /// anything shorter than the threshold counts as a tap.
    pub fn on_touch_end(&mut self) -> Option<NavCommand> {
        let track = self.touch.take()?;
        let delta = track.end_y - track.start_y;
        if delta.abs() < self.config.swipe_threshold_px {
            trace!(delta, "swipe below threshold");
            return None;
        }
        if delta < 0.0 {
            Some(NavCommand::Next)
        } else {
            Some(NavCommand::Previous)
        }
    }

    pub fn is_tracking_touch(&self) -> bool {
        self.touch.is_some()
    }

    pub fn on_click(&self, mode: TransitionMode) -> ClickAction {
        if self.is_tracking_touch() {
            return ClickAction::Ignored;
        }
        match mode {
            TransitionMode::Instant => ClickAction::TogglePlayback,
            TransitionMode::Crossfade => ClickAction::Crossfade,
        }
    }

    /// Forgets any half-finished gesture and the wheel cooldown.
    pub fn reset(&mut self) {
        self.locked_until = None;
        self.touch = None;
    }
}
