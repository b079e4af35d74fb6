/// One of the two stacked video layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Audio-authoritative layer; its events drive synchronisation.
    Primary,
    /// Visual mirror of the primary layer.
    Secondary,
}

impl Layer {
    pub fn other(self) -> Self {
        match self {
            Layer::Primary => Layer::Secondary,
            Layer::Secondary => Layer::Primary,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Layer::Primary => 0,
            Layer::Secondary => 1,
        }
    }
}

/// Why a layer was asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCause {
    /// Autoplay right after a new entry was loaded.
    Load,
    /// Manual resume from a click or tap.
    Resume,
    /// Secondary following the primary during a sync pass.
    Mirror,
}

/// Identifies one `play()` call so its eventual settlement can be matched to
/// the request that issued it. Settlements of superseded requests are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket {
    pub request: u64,
    pub layer: Layer,
    pub cause: PlayCause,
}

/// The sink refused to start playback, typically because of autoplay policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("playback blocked: {reason}")]
pub struct PlaybackBlocked {
    pub reason: String,
}

impl PlaybackBlocked {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Events a sink reports back to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    TimeUpdate,
    Play,
    Pause,
}

/// Playable media output, the capability a `<video>` element provides.
///
/// `play` is fire-and-forget: the adapter reports the outcome later through
/// the session using the same ticket.
pub trait VideoSink {
    fn load(&mut self, url: &str);
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn set_looping(&mut self, looping: bool);
}
