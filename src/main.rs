//! Pixel Watchface - host simulator
//!
//! Plays the part of the watch's display runtime: creates a surface, shows
//! the face, optionally drops into ambient mode or hides it, and reports the
//! frames the engine draws.

use std::time::Duration;

use anyhow::Context;
use tokio::{
    sync::mpsc,
    time::{interval_at, sleep_until, Instant},
};
use tracing::{debug, info, warn};

use pixel_watchface::{
    config::Config,
    engine::WatchFaceEngine,
    render::{replay, Frame, RasterSurface, WatchFaceVariant},
    scheduler::SystemClock,
    state::DeviceProperties,
    tasks::{watchface_engine_task, HostEvent, RedrawFlag, TokioTickScheduler},
    utils::shutdown_signal,
};

const TIME_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Collects what the engine draws
struct FrameReporter {
    dump: bool,
    frames: u64,
    last: Option<Frame>,
}

impl FrameReporter {
    fn present(&mut self, frame: Frame) {
        self.frames += 1;
        debug!(
            "Frame {}: {} commands, label {:?}",
            self.frames,
            frame.commands.len(),
            frame.label()
        );
        if self.dump {
            match serde_json::to_string(&frame) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize frame: {}", e),
            }
        }
        self.last = Some(frame);
    }
}

/// Timed host notifications for one simulated session
fn host_script(config: &Config) -> Vec<(Duration, HostEvent)> {
    let mut script = vec![
        (
            Duration::ZERO,
            HostEvent::PropertiesChanged(DeviceProperties {
                low_bit_ambient: config.low_bit_ambient,
                burn_in_protection: false,
            }),
        ),
        (
            Duration::ZERO,
            HostEvent::SurfaceChanged {
                width: config.width,
                height: config.height,
            },
        ),
        (Duration::ZERO, HostEvent::VisibilityChanged(true)),
    ];

    if let Some(secs) = config.ambient_after {
        script.push((Duration::from_secs(secs), HostEvent::AmbientModeChanged(true)));
    }
    if let Some(secs) = config.hide_after {
        script.push((Duration::from_secs(secs), HostEvent::VisibilityChanged(false)));
    }
    if let Some(duration) = config.run_duration() {
        script.push((duration, HostEvent::Shutdown));
    }

    // Stable: same-time events keep their order
    script.sort_by_key(|(at, _)| *at);
    script
}

async fn simulate_host(script: Vec<(Duration, HostEvent)>, events: mpsc::UnboundedSender<HostEvent>) {
    let start = Instant::now();
    for (at, event) in script {
        sleep_until(start + at).await;
        if events.send(event).is_err() {
            return;
        }
    }
}

async fn time_ticks(events: mpsc::UnboundedSender<HostEvent>) {
    let mut ticker = interval_at(Instant::now() + TIME_TICK_INTERVAL, TIME_TICK_INTERVAL);
    loop {
        ticker.tick().await;
        if events.send(HostEvent::TimeTick).is_err() {
            return;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Frames may go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("pixel_watchface={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pixel-watchface simulator v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: variant={:?}, surface={}x{}, run_for={}s",
        config.variant, config.width, config.height, config.run_for
    );

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let variant = WatchFaceVariant::new(config.variant).context("Failed to build watch face variant")?;
    let engine = WatchFaceEngine::create(
        variant,
        TokioTickScheduler::new(events_tx.clone()),
        RedrawFlag::new(),
        SystemClock,
    )
    .context("Failed to create watch face")?;

    tokio::spawn(simulate_host(host_script(&config), events_tx.clone()));
    tokio::spawn(time_ticks(events_tx.clone()));

    let shutdown_tx = events_tx;
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(HostEvent::Shutdown);
    });

    let mut reporter = FrameReporter {
        dump: config.dump_frames,
        frames: 0,
        last: None,
    };
    let engine = watchface_engine_task(engine, events_rx, |frame| reporter.present(frame)).await;
    drop(engine);

    info!("Simulation finished: {} frames drawn", reporter.frames);

    if let Some(path) = &config.snapshot {
        match &reporter.last {
            Some(frame) => {
                let mut surface = RasterSurface::new(frame.width, frame.height);
                if let Err(never) = replay(frame, &mut surface) {
                    match never {}
                }
                std::fs::write(path, surface.to_ppm())
                    .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
                info!("Wrote snapshot to {}", path.display());
            }
            None => warn!("No frame was drawn, skipping snapshot"),
        }
    }

    Ok(())
}
