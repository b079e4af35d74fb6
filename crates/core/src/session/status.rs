use std::fmt;

use crate::Presentation;

/// Position shown next to the status text, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current, self.total)
    }
}

/// The status and rendering widgets a session reports to.
pub trait StatusDisplay {
    fn set_status(&mut self, text: &str);
    /// `None` clears the counter.
    fn set_counter(&mut self, counter: Option<Counter>);
    fn set_reshuffle_enabled(&mut self, enabled: bool);
    fn set_presentation(&mut self, presentation: Presentation);
}

pub(crate) fn loaded(count: usize) -> String {
    format!("Loaded {count} videos (shuffled)")
}

pub(crate) fn reshuffled(count: usize) -> String {
    format!("Reshuffled, {count} videos")
}

pub(crate) fn playing(name: &str) -> String {
    format!("Playing: {name}")
}

pub(crate) fn blocked(name: &str) -> String {
    format!("Loading: {name} (click the video to start playback)")
}

pub(crate) const NO_VIDEOS: &str = "No video files found in the selected folder";
pub(crate) const AT_LAST: &str = "Already at the last video";
pub(crate) const AT_FIRST: &str = "Already at the first video";
