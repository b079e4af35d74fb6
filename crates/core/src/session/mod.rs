//! Session orchestrator.
//!
//! Owns every piece of per-session state and turns folder selections,
//! gestures, sink events and timer ticks into playlist moves and load cycles.

mod status;

use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info, warn};

pub use status::{Counter, StatusDisplay};

use crate::{
    ClickAction, Layer, MediaEntry, NavCommand, NavigationController, PlayTicket,
    PlayableHandle, PlaybackBlocked, PlaybackState, Playlist, ResourceManager, Result,
    SelectedFile, SinkEvent, SplitSide, Step, SyncEngine, VideoSink, ViewerConfig,
    ViewerError, WheelInput,
};

/// Collects the collaborators a session needs and refuses to start without
/// any of them.
#[derive(Debug)]
pub struct SessionBuilder<S, U> {
    config: ViewerConfig,
    primary: Option<S>,
    secondary: Option<S>,
    display: Option<U>,
    seed: Option<u64>,
}

impl<S: VideoSink, U: StatusDisplay> SessionBuilder<S, U> {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            primary: None,
            secondary: None,
            display: None,
            seed: None,
        }
    }

    pub fn primary(mut self, sink: S) -> Self {
        self.primary = Some(sink);
        self
    }

    pub fn secondary(mut self, sink: S) -> Self {
        self.secondary = Some(sink);
        self
    }

    pub fn display(mut self, display: U) -> Self {
        self.display = Some(display);
        self
    }

    /// Makes shuffles reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Session<S, U>> {
        let primary = require(self.primary, "primary video sink")?;
        let secondary = require(self.secondary, "secondary video sink")?;
        let mut display = require(self.display, "status display")?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let engine = SyncEngine::new(self.config.sync.clone(), primary, secondary);

        display.set_reshuffle_enabled(false);
        display.set_counter(None);
        display.set_presentation(engine.presentation());
        info!(mode = ?engine.mode(), "session initialised");

        Ok(Session {
            navigation: NavigationController::new(self.config.navigation.clone()),
            config: self.config,
            playlist: Playlist::new(),
            resources: ResourceManager::new(),
            engine,
            display,
            rng,
            current: None,
            blocked: false,
        })
    }
}

fn require<T>(slot: Option<T>, name: &'static str) -> Result<T> {
    slot.ok_or_else(|| {
        error!(missing = name, "initialization aborted");
        ViewerError::MissingCollaborator(name)
    })
}

/// One viewing session: playlist, live handle, both layers and gesture state.
#[derive(Debug)]
pub struct Session<S, U> {
    config: ViewerConfig,
    playlist: Playlist,
    resources: ResourceManager,
    engine: SyncEngine<S>,
    navigation: NavigationController,
    display: U,
    rng: StdRng,
    current: Option<PlayableHandle>,
    blocked: bool,
}

impl<S: VideoSink, U: StatusDisplay> Session<S, U> {
    pub fn builder(config: ViewerConfig) -> SessionBuilder<S, U> {
        SessionBuilder::new(config)
    }

    /// Replaces the playlist with the videos of a folder selection, shuffles
    /// it and starts the first entry. Returns the number of videos kept.
    pub fn select_folder<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.playlist.set_entries(files);
        self.navigation.reset();

        if self.playlist.is_empty() {
            warn!("selection contains no videos");
            self.release_current();
            self.engine.unload();
            self.blocked = false;
            self.display.set_status(status::NO_VIDEOS);
            self.display.set_counter(None);
            self.display.set_reshuffle_enabled(false);
            self.display.set_presentation(self.engine.presentation());
            return 0;
        }

        self.playlist.shuffle_with(&mut self.rng);
        let count = self.playlist.len();
        info!(count, "playlist loaded");
        self.display.set_reshuffle_enabled(true);
        self.display.set_status(&status::loaded(count));
        self.load_current();
        count
    }

    /// Shuffles again and restarts from the first entry. No-op without a
    /// playlist.
    pub fn reshuffle(&mut self) -> bool {
        if self.playlist.is_empty() {
            return false;
        }
        self.playlist.shuffle_with(&mut self.rng);
        let count = self.playlist.len();
        info!(count, "playlist reshuffled");
        self.display.set_status(&status::reshuffled(count));
        self.load_current();
        true
    }

    pub fn next(&mut self) -> Step {
        let step = self.playlist.advance();
        self.after_step(step);
        step
    }

    pub fn previous(&mut self) -> Step {
        let step = self.playlist.retreat();
        self.after_step(step);
        step
    }

    pub fn navigate(&mut self, command: NavCommand) -> Step {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Previous => self.previous(),
        }
    }

    pub fn wheel(&mut self, input: WheelInput, now: Instant) -> Option<Step> {
        if self.playlist.is_empty() {
            return None;
        }
        let command = self.navigation.on_wheel(input, now)?;
        Some(self.navigate(command))
    }

    pub fn touch_start(&mut self, touches: usize, y: f32) {
        if !self.playlist.is_empty() {
            self.navigation.on_touch_start(touches, y);
        }
    }

    pub fn touch_move(&mut self, touches: usize, y: f32) {
        if !self.playlist.is_empty() {
            self.navigation.on_touch_move(touches, y);
        }
    }

    pub fn touch_end(&mut self) -> Option<Step> {
        if self.playlist.is_empty() {
            return None;
        }
        let command = self.navigation.on_touch_end()?;
        Some(self.navigate(command))
    }

    /// Click or tap on the viewport: toggles playback in instant mode and
    /// starts a cross-fade otherwise. After autoplay was refused, the next
    /// click retries playback instead.
    pub fn click(&mut self, now: Instant) -> ClickAction {
        if !self.engine.is_loaded() {
            return ClickAction::Ignored;
        }
        let action = self.navigation.on_click(self.engine.mode());
        if self.blocked && action != ClickAction::Ignored {
            info!("retrying blocked playback");
            self.engine.resume();
            return ClickAction::RetryPlayback;
        }
        match action {
            ClickAction::TogglePlayback => {
                self.engine.toggle_playback();
            }
            ClickAction::Crossfade => {
                if self.engine.begin_crossfade(now).is_some() {
                    self.display.set_presentation(self.engine.presentation());
                }
            }
            ClickAction::RetryPlayback | ClickAction::Ignored => {}
        }
        action
    }

    /// Dedicated split controls of the instant variant.
    pub fn show_split(&mut self, side: SplitSide) -> bool {
        let changed = self.engine.show_split(side);
        if changed {
            self.display.set_presentation(self.engine.presentation());
        }
        changed
    }

    /// Runs timers whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.engine.tick(now).is_some() {
            self.display.set_presentation(self.engine.presentation());
        }
    }

    pub fn sink_event(&mut self, layer: Layer, event: SinkEvent) {
        self.engine.handle_event(layer, event);
    }

    /// Reports the outcome of a `play()` issued to one of the sinks.
    pub fn play_settled(
        &mut self,
        ticket: PlayTicket,
        outcome: std::result::Result<(), PlaybackBlocked>,
    ) {
        let Some(state) = self.engine.play_settled(ticket, outcome) else {
            return;
        };
        let Some(name) = self.playlist.current().map(MediaEntry::name) else {
            return;
        };
        let text = match state {
            PlaybackState::Playing => status::playing(name),
            PlaybackState::Blocked => status::blocked(name),
        };
        self.blocked = state == PlaybackState::Blocked;
        self.display.set_status(&text);
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn engine(&self) -> &SyncEngine<S> {
        &self.engine
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Whether the last playback attempt was refused by the sinks.
    pub fn is_playback_blocked(&self) -> bool {
        self.blocked
    }

    pub fn current_handle(&self) -> Option<&PlayableHandle> {
        self.current.as_ref()
    }

    pub fn counter(&self) -> Option<Counter> {
        self.playlist.cursor().map(|index| Counter {
            current: index + 1,
            total: self.playlist.len(),
        })
    }

    fn after_step(&mut self, step: Step) {
        match step {
            Step::Moved(index) => {
                debug!(index, "navigated");
                self.load_current();
            }
            Step::AtLast => self.display.set_status(status::AT_LAST),
            Step::AtFirst => self.display.set_status(status::AT_FIRST),
            Step::Empty => {}
        }
    }

    fn load_current(&mut self) {
        let Some(entry) = self.playlist.current() else {
            return;
        };

        if let Some(old) = self.current.take() {
            self.resources.release(&old);
        }
        let handle = self.resources.acquire(entry);
        info!(name = entry.name(), url = %handle, "loading entry");

        self.engine.load_both(handle.url());
        self.current = Some(handle);
        self.blocked = false;
        let counter = self.counter();
        self.display.set_counter(counter);
        self.display.set_presentation(self.engine.presentation());
    }

    fn release_current(&mut self) {
        if let Some(handle) = self.current.take() {
            self.resources.release(&handle);
        }
    }
}
