//! Dual-layer sync engine.
//!
//! Two sinks show the same media: the primary owns audio and drives
//! synchronisation through its events, the secondary mirrors it so the two
//! can be cross-faded or split without a visible jump.

mod layers;
mod sink;

use std::time::Instant;

use tracing::{debug, info, trace, warn};

pub use layers::{LayerState, Presentation, SplitSide};
pub use sink::{Layer, PlayCause, PlayTicket, PlaybackBlocked, SinkEvent, VideoSink};

use crate::{SyncConfig, TransitionMode};

/// Aggregate outcome once every `play()` of one request has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    /// At least one layer refused; a click or tap retries.
    Blocked,
}

/// What a single sync pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyncReport {
    /// A pass was already running; nothing was touched.
    pub skipped: bool,
    /// Secondary was re-seeked to this position.
    pub seeked_to: Option<f64>,
    /// Secondary was paused (`Some(true)`) or resumed (`Some(false)`).
    pub mirrored_pause: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
struct PendingPlay {
    request: u64,
    cause: PlayCause,
    awaiting: [bool; 2],
    blocked: bool,
}

#[derive(Debug)]
pub struct SyncEngine<S> {
    config: SyncConfig,
    primary: S,
    secondary: S,
    layers: LayerState,
    loaded: bool,
    syncing: bool,
    next_request: u64,
    pending: Option<PendingPlay>,
}

impl<S: VideoSink> SyncEngine<S> {
    pub fn new(config: SyncConfig, mut primary: S, mut secondary: S) -> Self {
        primary.set_looping(true);
        secondary.set_looping(true);

        let mut engine = Self {
            config,
            primary,
            secondary,
            layers: LayerState::default(),
            loaded: false,
            syncing: false,
            next_request: 0,
            pending: None,
        };
        engine.apply_audio_policy();
        engine
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn mode(&self) -> TransitionMode {
        self.config.transition_mode
    }

    pub fn layers(&self) -> &LayerState {
        &self.layers
    }

    pub fn presentation(&self) -> Presentation {
        self.layers.presentation()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Points both layers at `url`, rewinds them and starts playback.
    ///
    /// Returns the request id that the pending `play()` settlements carry.
    pub fn load_both(&mut self, url: &str) -> u64 {
        for sink in [&mut self.primary, &mut self.secondary] {
            sink.load(url);
            sink.seek(0.0);
        }
        self.primary.set_muted(false);
        self.secondary.set_muted(true);
        if !self.config.secondary_audible {
            self.secondary.set_volume(0.0);
        }

        self.layers.reset();
        self.loaded = true;
        debug!(url, "loaded both layers");
        self.play_both(PlayCause::Load)
    }

    /// Pauses both layers and forgets the loaded media.
    pub fn unload(&mut self) {
        self.primary.pause();
        self.secondary.pause();
        self.layers.reset();
        self.loaded = false;
        self.pending = None;
    }

    /// Records the outcome of one `play()` call. Returns the aggregate state
    /// once every layer of the current request has settled.
    pub fn play_settled(
        &mut self,
        ticket: PlayTicket,
        outcome: Result<(), PlaybackBlocked>,
    ) -> Option<PlaybackState> {
        if let Err(blocked) = &outcome {
            warn!(layer = ?ticket.layer, cause = ?ticket.cause, %blocked, "play rejected");
        }

        let pending = match self.pending.as_mut() {
            Some(pending) if pending.request == ticket.request => pending,
            _ => {
                trace!(request = ticket.request, "ignoring superseded play settlement");
                return None;
            }
        };

        pending.awaiting[ticket.layer.index()] = false;
        pending.blocked |= outcome.is_err();
        if pending.awaiting.iter().any(|waiting| *waiting) {
            return None;
        }

        let settled = *pending;
        self.pending = None;
        let state = if settled.blocked {
            PlaybackState::Blocked
        } else {
            PlaybackState::Playing
        };
        debug!(request = settled.request, cause = ?settled.cause, ?state, "playback settled");
        Some(state)
    }

    /// Brings the secondary in line with the primary. Driven by the primary's
    /// `timeupdate`, `play` and `pause` events.
    pub fn sync(&mut self) -> SyncReport {
        // Only reachable if a sink adapter calls back into the engine
        // synchronously from inside a seek or play.
        if self.syncing {
            return SyncReport {
                skipped: true,
                ..SyncReport::default()
            };
        }
        self.syncing = true;

        let mut report = SyncReport::default();
        let target = self.primary.current_time();
        let drift = (self.secondary.current_time() - target).abs();
        if !target.is_nan() && drift > self.config.drift_threshold_secs {
            self.secondary.seek(target);
            report.seeked_to = Some(target);
            trace!(drift, target, "corrected secondary drift");
        }

        let primary_paused = self.primary.is_paused();
        if primary_paused != self.secondary.is_paused() {
            if primary_paused {
                self.secondary.pause();
            } else {
                let ticket = self.ticket(Layer::Secondary, PlayCause::Mirror);
                self.secondary.play(ticket);
            }
            report.mirrored_pause = Some(primary_paused);
        }

        self.apply_audio_policy();
        self.syncing = false;
        report
    }

    /// Forwards a primary sink event. Secondary events do not drive syncing.
    pub fn handle_event(&mut self, layer: Layer, event: SinkEvent) -> Option<SyncReport> {
        match layer {
            Layer::Primary => {
                trace!(?event, "primary event");
                Some(self.sync())
            }
            Layer::Secondary => None,
        }
    }

    /// Plays both layers if either is paused, otherwise pauses both.
    ///
    /// Returns `Some(request)` when playback was requested, `None` when the
    /// layers were paused or nothing is loaded.
    pub fn toggle_playback(&mut self) -> Option<u64> {
        if !self.loaded {
            return None;
        }
        if self.primary.is_paused() || self.secondary.is_paused() {
            Some(self.play_both(PlayCause::Resume))
        } else {
            self.primary.pause();
            self.secondary.pause();
            self.pending = None;
            debug!("paused both layers");
            None
        }
    }

    /// Requests playback on both layers regardless of their current state.
    pub fn resume(&mut self) -> Option<u64> {
        if !self.loaded {
            return None;
        }
        Some(self.play_both(PlayCause::Resume))
    }

    /// Starts a cross-fade to the hidden layer. No-op while one is in flight,
    /// when nothing is loaded, or in instant mode.
    pub fn begin_crossfade(&mut self, now: Instant) -> Option<Layer> {
        if !self.loaded || self.config.transition_mode != TransitionMode::Crossfade {
            return None;
        }
        match self.layers.begin(now, self.config.crossfade_duration()) {
            Some(target) => {
                debug!(?target, "cross-fade started");
                Some(target)
            }
            None => {
                trace!("cross-fade already in flight, click dropped");
                None
            }
        }
    }

    /// Completes a due cross-fade. Returns the newly visible layer.
    pub fn tick(&mut self, now: Instant) -> Option<Layer> {
        let visible = self.layers.complete_due(now)?;
        debug!(?visible, "cross-fade finished");
        Some(visible)
    }

    /// Instant-split partition switch. Returns whether the view changed.
    pub fn show_split(&mut self, side: SplitSide) -> bool {
        if !self.loaded || self.config.transition_mode != TransitionMode::Instant {
            return false;
        }
        self.layers.set_split(side);
        info!(?side, "split view");
        true
    }

    fn play_both(&mut self, cause: PlayCause) -> u64 {
        let primary = self.ticket(Layer::Primary, cause);
        let secondary = PlayTicket {
            layer: Layer::Secondary,
            ..primary
        };
        self.pending = Some(PendingPlay {
            request: primary.request,
            cause,
            awaiting: [true, true],
            blocked: false,
        });
        self.primary.play(primary);
        self.secondary.play(secondary);
        primary.request
    }

    fn ticket(&mut self, layer: Layer, cause: PlayCause) -> PlayTicket {
        self.next_request += 1;
        PlayTicket {
            request: self.next_request,
            layer,
            cause,
        }
    }

    fn apply_audio_policy(&mut self) {
        if self.config.secondary_audible {
            self.secondary.set_muted(self.primary.is_muted());
            self.secondary.set_volume(self.primary.volume());
        } else {
            self.secondary.set_muted(true);
            self.secondary.set_volume(0.0);
        }
    }
}
