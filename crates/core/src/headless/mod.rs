//! In-memory backends for running a session without a browser.
//!
//! Every backend hands out a probe sharing its state, so a driver (the CLI
//! simulation or a test) can move playback time, flip pause state and read
//! back what the session did after the backend itself has been moved into it.

use std::{cell::RefCell, mem, rc::Rc};

use crate::{Counter, PlayTicket, Presentation, StatusDisplay, VideoSink};

#[derive(Debug)]
struct SinkState {
    url: Option<String>,
    time: f64,
    paused: bool,
    muted: bool,
    volume: f64,
    looping: bool,
    seeks: usize,
    play_requests: Vec<PlayTicket>,
}

impl Default for SinkState {
    fn default() -> Self {
        Self {
            url: None,
            time: 0.0,
            paused: true,
            muted: false,
            volume: 1.0,
            looping: false,
            seeks: 0,
            play_requests: Vec::new(),
        }
    }
}

/// Video sink that only tracks state. Playback time moves only when a probe
/// says so.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    state: Rc<RefCell<SinkState>>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> SinkProbe {
        SinkProbe {
            state: Rc::clone(&self.state),
        }
    }
}

impl VideoSink for HeadlessSink {
    fn load(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        state.url = Some(url.to_string());
        state.paused = true;
    }

    fn play(&mut self, ticket: PlayTicket) {
        let mut state = self.state.borrow_mut();
        state.paused = false;
        state.play_requests.push(ticket);
    }

    fn pause(&mut self) {
        self.state.borrow_mut().paused = true;
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.time = seconds;
        state.seeks += 1;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().time
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn is_muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }
}

/// Shared view over a [`HeadlessSink`].
#[derive(Debug, Clone)]
pub struct SinkProbe {
    state: Rc<RefCell<SinkState>>,
}

impl SinkProbe {
    pub fn url(&self) -> Option<String> {
        self.state.borrow().url.clone()
    }

    pub fn time(&self) -> f64 {
        self.state.borrow().time
    }

    /// Moves playback time without counting as a seek.
    pub fn set_time(&self, seconds: f64) {
        self.state.borrow_mut().time = seconds;
    }

    pub fn advance_time(&self, seconds: f64) {
        self.state.borrow_mut().time += seconds;
    }

    pub fn paused(&self) -> bool {
        self.state.borrow().paused
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.borrow_mut().paused = paused;
    }

    pub fn muted(&self) -> bool {
        self.state.borrow().muted
    }

    pub fn set_muted_directly(&self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    pub fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    pub fn set_volume_directly(&self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    pub fn looping(&self) -> bool {
        self.state.borrow().looping
    }

    pub fn seek_count(&self) -> usize {
        self.state.borrow().seeks
    }

    /// Drains the tickets of every `play()` issued since the last call.
    pub fn take_play_requests(&self) -> Vec<PlayTicket> {
        mem::take(&mut self.state.borrow_mut().play_requests)
    }
}

#[derive(Debug)]
struct DisplayState {
    statuses: Vec<String>,
    counter: Option<Counter>,
    reshuffle_enabled: bool,
    presentation: Option<Presentation>,
}

/// Status display that keeps a history of everything it was told.
#[derive(Debug)]
pub struct RecordingDisplay {
    state: Rc<RefCell<DisplayState>>,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(DisplayState {
                statuses: Vec::new(),
                counter: None,
                reshuffle_enabled: false,
                presentation: None,
            })),
        }
    }

    pub fn probe(&self) -> DisplayProbe {
        DisplayProbe {
            state: Rc::clone(&self.state),
        }
    }
}

impl StatusDisplay for RecordingDisplay {
    fn set_status(&mut self, text: &str) {
        self.state.borrow_mut().statuses.push(text.to_string());
    }

    fn set_counter(&mut self, counter: Option<Counter>) {
        self.state.borrow_mut().counter = counter;
    }

    fn set_reshuffle_enabled(&mut self, enabled: bool) {
        self.state.borrow_mut().reshuffle_enabled = enabled;
    }

    fn set_presentation(&mut self, presentation: Presentation) {
        self.state.borrow_mut().presentation = Some(presentation);
    }
}

/// Shared view over a [`RecordingDisplay`].
#[derive(Debug, Clone)]
pub struct DisplayProbe {
    state: Rc<RefCell<DisplayState>>,
}

impl DisplayProbe {
    pub fn status(&self) -> Option<String> {
        self.state.borrow().statuses.last().cloned()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.state.borrow().statuses.clone()
    }

    /// Counter as rendered, empty when there is no playlist.
    pub fn counter_text(&self) -> String {
        self.state
            .borrow()
            .counter
            .map(|counter| counter.to_string())
            .unwrap_or_default()
    }

    pub fn reshuffle_enabled(&self) -> bool {
        self.state.borrow().reshuffle_enabled
    }

    pub fn presentation(&self) -> Option<Presentation> {
        self.state.borrow().presentation
    }
}
