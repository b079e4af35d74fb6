//! End-to-end session behaviour driven through the headless backends.

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use shuffle_viewer_core::{
    ClickAction, DisplayProbe, HeadlessSink, Layer, PlaybackBlocked, Playlist, RecordingDisplay,
    SelectedFile, Session, SinkEvent, SinkProbe, SplitSide, Step, VerticalBounds, ViewerConfig,
    ViewerError, WheelInput,
};

type HeadlessSession = Session<HeadlessSink, RecordingDisplay>;

const SEED: u64 = 11;

struct Harness {
    session: HeadlessSession,
    primary: SinkProbe,
    secondary: SinkProbe,
    display: DisplayProbe,
}

impl Harness {
    fn new(config: ViewerConfig) -> Self {
        let primary = HeadlessSink::new();
        let secondary = HeadlessSink::new();
        let display = RecordingDisplay::new();
        let probes = (primary.probe(), secondary.probe(), display.probe());

        let session = Session::builder(config)
            .primary(primary)
            .secondary(secondary)
            .display(display)
            .seed(SEED)
            .build()
            .expect("all collaborators supplied");

        Self {
            session,
            primary: probes.0,
            secondary: probes.1,
            display: probes.2,
        }
    }

    fn settle(&mut self, outcome: Result<(), PlaybackBlocked>) {
        let tickets: Vec<_> = self
            .primary
            .take_play_requests()
            .into_iter()
            .chain(self.secondary.take_play_requests())
            .collect();
        for ticket in tickets {
            self.session.play_settled(ticket, outcome.clone());
        }
    }

    fn order(&self) -> Vec<String> {
        names(self.session.playlist())
    }

    fn current_name(&self) -> String {
        self.session
            .playlist()
            .current()
            .map(|entry| entry.name().to_string())
            .expect("playlist has a current entry")
    }
}

fn video(name: &str) -> SelectedFile {
    SelectedFile::new(name, Some("video/mp4"), format!("/clips/{name}"))
}

fn videos(count: usize) -> Vec<SelectedFile> {
    (0..count).map(|i| video(&format!("clip{i}.mp4"))).collect()
}

fn names(playlist: &Playlist) -> Vec<String> {
    playlist
        .entries()
        .iter()
        .map(|entry| entry.name().to_string())
        .collect()
}

fn wheel_down() -> WheelInput {
    WheelInput {
        delta_y: 100.0,
        pointer_y: 400.0,
        viewport: VerticalBounds::new(0.0, 800.0),
    }
}

#[test]
fn folder_selection_filters_and_loads_first_entry() {
    let mut h = Harness::new(ViewerConfig::default());

    let kept = h.session.select_folder(vec![
        video("A.mp4"),
        video("B.mp4"),
        SelectedFile::new("C.txt", Some("text/plain"), "/clips/C.txt"),
    ]);

    assert_eq!(kept, 2);
    assert_eq!(h.session.playlist().len(), 2);
    assert_eq!(h.display.counter_text(), "1 / 2");
    assert!(h.display.reshuffle_enabled());
    assert_eq!(h.display.status().as_deref(), Some("Loaded 2 videos (shuffled)"));

    let url = h.session.current_handle().map(|handle| handle.url().to_string());
    assert_eq!(h.primary.url(), url);
    assert_eq!(h.secondary.url(), url);

    h.settle(Ok(()));
    assert_eq!(h.display.status(), Some(format!("Playing: {}", h.current_name())));
}

#[test]
fn selection_and_reshuffle_reorder_with_the_session_seed() {
    let mut h = Harness::new(ViewerConfig::default());
    let files = videos(8);
    let input: Vec<String> = files.iter().map(|file| file.name.clone()).collect();

    let mut expected = Playlist::new();
    expected.set_entries(files.clone());
    let mut rng = StdRng::seed_from_u64(SEED);
    expected.shuffle_with(&mut rng);

    h.session.select_folder(files);
    let first = h.order();
    assert_ne!(first, input);
    assert_eq!(first, names(&expected));

    h.session.next();
    h.session.next();
    assert_eq!(h.session.playlist().cursor(), Some(2));

    expected.shuffle_with(&mut rng);
    assert!(h.session.reshuffle());
    let second = h.order();
    assert_ne!(second, first);
    assert_eq!(second, names(&expected));
    assert_eq!(h.session.playlist().cursor(), Some(0));
    assert_eq!(h.display.counter_text(), "1 / 8");
    assert_eq!(h.display.status().as_deref(), Some("Reshuffled, 8 videos"));
}

#[test]
fn empty_selection_clears_everything() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(3));
    let old = h.session.current_handle().cloned().unwrap();

    let kept = h.session.select_folder(vec![SelectedFile::new("x", None, "/clips/x")]);

    assert_eq!(kept, 0);
    assert!(h.session.playlist().is_empty());
    assert_eq!(h.session.playlist().cursor(), None);
    assert_eq!(h.display.counter_text(), "");
    assert!(!h.display.reshuffle_enabled());
    assert_eq!(
        h.display.status().as_deref(),
        Some("No video files found in the selected folder")
    );
    assert!(!h.session.resources().is_live(&old));
    assert!(h.primary.paused() && h.secondary.paused());
    assert!(!h.session.reshuffle());
}

#[test]
fn advancing_past_the_end_only_updates_status() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(2));

    assert_eq!(h.session.next(), Step::Moved(1));
    let handle = h.session.current_handle().cloned();

    assert_eq!(h.session.next(), Step::AtLast);
    assert_eq!(h.session.playlist().cursor(), Some(1));
    assert_eq!(h.session.current_handle().cloned(), handle);
    assert_eq!(h.display.status().as_deref(), Some("Already at the last video"));

    assert_eq!(h.session.previous(), Step::Moved(0));
    assert_eq!(h.session.previous(), Step::AtFirst);
    assert_eq!(h.display.status().as_deref(), Some("Already at the first video"));
    assert_eq!(h.display.counter_text(), "1 / 2");
}

#[test]
fn short_swipe_does_not_navigate() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(3));

    h.session.touch_start(1, 500.0);
    h.session.touch_move(1, 460.0);
    assert_eq!(h.session.touch_end(), None);
    assert_eq!(h.session.playlist().cursor(), Some(0));

    h.session.touch_start(1, 500.0);
    h.session.touch_move(1, 400.0);
    assert_eq!(h.session.touch_end(), Some(Step::Moved(1)));
}

#[test]
fn wheel_burst_advances_once() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(4));
    let start = Instant::now();

    assert_eq!(h.session.wheel(wheel_down(), start), Some(Step::Moved(1)));
    assert_eq!(
        h.session.wheel(wheel_down(), start + Duration::from_millis(120)),
        None
    );
    assert_eq!(h.session.playlist().cursor(), Some(1));

    assert_eq!(
        h.session.wheel(wheel_down(), start + Duration::from_millis(310)),
        Some(Step::Moved(2))
    );
}

#[test]
fn gestures_are_ignored_without_a_playlist() {
    let mut h = Harness::new(ViewerConfig::default());
    let now = Instant::now();

    assert_eq!(h.session.wheel(wheel_down(), now), None);
    h.session.touch_start(1, 500.0);
    assert!(!h.session.navigation().is_tracking_touch());
    assert_eq!(h.session.touch_end(), None);
    assert_eq!(h.session.click(now), ClickAction::Ignored);
}

#[test]
fn handles_are_released_before_the_next_acquire() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(5));

    for _ in 0..6 {
        h.session.next();
    }
    h.session.reshuffle();
    for _ in 0..3 {
        h.session.previous();
    }

    let resources = h.session.resources();
    assert_eq!(resources.acquired(), resources.released() + 1);
    assert_eq!(resources.live_count(), 1);
    assert!(resources.is_live(h.session.current_handle().unwrap()));
}

#[test]
fn blocked_autoplay_waits_for_a_click() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(2));
    let name = h.current_name();

    h.settle(Err(PlaybackBlocked::new("autoplay policy")));
    assert!(h.session.is_playback_blocked());
    assert_eq!(
        h.display.status(),
        Some(format!("Loading: {name} (click the video to start playback)"))
    );
    assert!(!h.session.engine().layers().is_transitioning());

    assert_eq!(h.session.click(Instant::now()), ClickAction::RetryPlayback);
    assert!(!h.session.engine().layers().is_transitioning());
    h.settle(Ok(()));

    assert!(!h.session.is_playback_blocked());
    assert_eq!(h.display.status(), Some(format!("Playing: {name}")));
}

#[test]
fn superseded_play_results_are_ignored() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(3));
    let stale: Vec<_> = h.primary.take_play_requests();
    h.secondary.take_play_requests();

    h.session.next();
    for ticket in stale {
        h.session
            .play_settled(ticket, Err(PlaybackBlocked::new("late rejection")));
    }

    assert!(!h.session.is_playback_blocked());
    assert_eq!(h.display.status().as_deref(), Some("Loaded 3 videos (shuffled)"));
}

#[test]
fn crossfade_click_runs_a_timed_transition() {
    let mut h = Harness::new(ViewerConfig::crossfade());
    h.session.select_folder(videos(2));
    h.settle(Ok(()));
    let start = Instant::now();

    assert_eq!(h.session.click(start), ClickAction::Crossfade);
    let fading = h.display.presentation().unwrap();
    assert_eq!(fading.primary_opacity, 1.0);
    assert_eq!(fading.secondary_opacity, 1.0);

    h.session.click(start + Duration::from_millis(100));
    assert_eq!(
        h.session.engine().layers().transition_target(),
        Some(Layer::Secondary)
    );

    h.session.tick(start + Duration::from_millis(400));
    let done = h.display.presentation().unwrap();
    assert_eq!(done.primary_opacity, 0.0);
    assert_eq!(done.secondary_opacity, 1.0);
    assert!(!h.primary.paused(), "cross-fade must not touch playback");

    h.session.next();
    let reset = h.display.presentation().unwrap();
    assert_eq!(reset.primary_opacity, 1.0);
    assert_eq!(reset.secondary_opacity, 0.0);
}

#[test]
fn crossfade_keeps_exactly_one_layer_audible() {
    let mut h = Harness::new(ViewerConfig::crossfade());
    h.session.select_folder(videos(3));
    let start = Instant::now();

    let check = |h: &Harness| {
        assert_ne!(h.primary.muted(), h.secondary.muted());
        assert!(h.secondary.muted());
        assert_eq!(h.secondary.volume(), 0.0);
    };

    check(&h);
    h.primary.set_time(4.0);
    h.session.sink_event(Layer::Primary, SinkEvent::TimeUpdate);
    check(&h);
    h.session.click(start);
    h.session.tick(start + Duration::from_millis(400));
    check(&h);
    h.session.next();
    check(&h);
}

#[test]
fn timeupdate_keeps_layers_in_lockstep() {
    let mut h = Harness::new(ViewerConfig::default());
    h.session.select_folder(videos(2));

    h.primary.set_time(10.20);
    h.secondary.set_time(10.00);
    h.session.sink_event(Layer::Primary, SinkEvent::TimeUpdate);
    assert!((h.secondary.time() - 10.20).abs() < 1e-9);

    h.primary.set_paused(true);
    h.session.sink_event(Layer::Primary, SinkEvent::Pause);
    assert!(h.secondary.paused());
}

#[test]
fn instant_split_click_toggles_playback() {
    let mut h = Harness::new(ViewerConfig::instant_split());
    assert!(!h.session.show_split(SplitSide::Right));

    h.session.select_folder(videos(2));
    h.settle(Ok(()));
    let now = Instant::now();

    assert_eq!(h.session.click(now), ClickAction::TogglePlayback);
    assert!(h.primary.paused() && h.secondary.paused());
    assert_eq!(h.session.click(now), ClickAction::TogglePlayback);
    assert!(!h.primary.paused() && !h.secondary.paused());

    assert!(h.session.show_split(SplitSide::Right));
    assert_eq!(h.display.presentation().unwrap().split, SplitSide::Right);

    h.session.next();
    assert_eq!(h.display.presentation().unwrap().split, SplitSide::Left);
}

#[test]
fn instant_split_secondary_mirrors_audio() {
    let mut h = Harness::new(ViewerConfig::instant_split());
    h.session.select_folder(videos(2));

    h.primary.set_volume_directly(0.5);
    h.session.sink_event(Layer::Primary, SinkEvent::Play);

    assert_eq!(h.secondary.muted(), h.primary.muted());
    assert!((h.secondary.volume() - 0.5).abs() < 1e-9);
}

#[test]
fn missing_collaborator_aborts_initialization() {
    let result = Session::<HeadlessSink, RecordingDisplay>::builder(ViewerConfig::default())
        .primary(HeadlessSink::new())
        .display(RecordingDisplay::new())
        .build();

    match result {
        Err(ViewerError::MissingCollaborator(name)) => assert_eq!(name, "secondary video sink"),
        other => panic!("expected missing collaborator, got {other:?}"),
    }
}

#[test]
fn sinks_always_loop() {
    let h = Harness::new(ViewerConfig::default());
    assert!(h.primary.looping());
    assert!(h.secondary.looping());
}
