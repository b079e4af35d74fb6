//! Headless session run: replays a scripted sequence of gestures against the
//! in-memory backends and logs what a user would have seen.

use std::time::{Duration, Instant};

use shuffle_viewer_core::{
    Counter, HeadlessSink, Layer, Presentation, Result, SelectedFile, Session, SinkEvent,
    SinkProbe, StatusDisplay, VerticalBounds, ViewerConfig, WheelInput,
};

const VIEWPORT: VerticalBounds = VerticalBounds {
    top: 0.0,
    bottom: 720.0,
};
const FRAME_STEP_SECS: f64 = 0.25;
// Secondary runs fast so drift correction has work to do.
const SECONDARY_RATE: f64 = 1.5;

/// Forwards every UI update to the log.
#[derive(Debug, Default)]
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn set_status(&mut self, text: &str) {
        tracing::info!(status = text);
    }

    fn set_counter(&mut self, counter: Option<Counter>) {
        let counter = counter.map(|c| c.to_string()).unwrap_or_default();
        tracing::info!(%counter, "counter");
    }

    fn set_reshuffle_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "reshuffle control");
    }

    fn set_presentation(&mut self, presentation: Presentation) {
        tracing::debug!(?presentation, "layers");
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    pub videos: usize,
    pub visited: Vec<String>,
    pub acquired: u64,
    pub released: u64,
}

pub fn run(
    config: ViewerConfig,
    files: Vec<SelectedFile>,
    steps: usize,
    seed: Option<u64>,
) -> Result<SimulationSummary> {
    let primary = HeadlessSink::new();
    let secondary = HeadlessSink::new();
    let probes = [primary.probe(), secondary.probe()];

    let mut builder = Session::builder(config)
        .primary(primary)
        .secondary(secondary)
        .display(LogDisplay);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let mut session = builder.build()?;

    let videos = session.select_folder(files);
    let mut summary = SimulationSummary {
        videos,
        ..SimulationSummary::default()
    };
    if videos == 0 {
        return Ok(summary);
    }

    let mut now = Instant::now();
    settle(&mut session, &probes);
    record_current(&session, &mut summary);

    for step in 0..steps {
        probes[0].advance_time(FRAME_STEP_SECS);
        probes[1].advance_time(FRAME_STEP_SECS * SECONDARY_RATE);
        session.sink_event(Layer::Primary, SinkEvent::TimeUpdate);

        if step % 2 == 1 {
            let action = session.click(now);
            tracing::info!(?action, "click");
            now += session.config().sync.crossfade_duration();
            session.tick(now);
        }

        let wheel = WheelInput {
            delta_y: 100.0,
            pointer_y: VIEWPORT.bottom / 2.0,
            viewport: VIEWPORT,
        };
        if let Some(moved) = session.wheel(wheel, now) {
            tracing::info!(?moved, "wheel");
            settle(&mut session, &probes);
            record_current(&session, &mut summary);
        }
        now += session.config().navigation.wheel_cooldown() + Duration::from_millis(1);
    }

    summary.acquired = session.resources().acquired();
    summary.released = session.resources().released();
    Ok(summary)
}

fn settle(session: &mut Session<HeadlessSink, LogDisplay>, probes: &[SinkProbe; 2]) {
    for probe in probes {
        for ticket in probe.take_play_requests() {
            session.play_settled(ticket, Ok(()));
        }
    }
}

fn record_current(
    session: &Session<HeadlessSink, LogDisplay>,
    summary: &mut SimulationSummary,
) {
    if let Some(entry) = session.playlist().current() {
        if summary.visited.last().map(String::as_str) != Some(entry.name()) {
            summary.visited.push(entry.name().to_string());
        }
    }
}
