//! Watch face engine event loop

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::tick_driver::{HostEvent, RedrawFlag};
use crate::{
    engine::WatchFaceEngine,
    render::Frame,
    scheduler::{Clock, TickScheduler},
};

/// Receives every frame the engine draws
pub trait FrameSink {
    fn present(&mut self, frame: Frame);
}

impl<F> FrameSink for F
where
    F: FnMut(Frame),
{
    fn present(&mut self, frame: Frame) {
        self(frame)
    }
}

/// Runs the engine on a single task: one host event at a time, then at most
/// one draw for whatever redraws that event requested.
///
/// Returns the destroyed engine once `Shutdown` arrives or every sender is
/// gone.
pub async fn watchface_engine_task<S, C, F>(
    mut engine: WatchFaceEngine<S, RedrawFlag, C>,
    mut events: mpsc::UnboundedReceiver<HostEvent>,
    mut sink: F,
) -> WatchFaceEngine<S, RedrawFlag, C>
where
    S: TickScheduler,
    C: Clock,
    F: FrameSink,
{
    info!("Starting watch face engine task");
    let redraw = engine.scheduler().redraw().clone();
    let mut frames: u64 = 0;

    while let Some(event) = events.recv().await {
        debug!("Host event: {:?}", event);
        match event {
            HostEvent::VisibilityChanged(visible) => engine.on_visibility_changed(visible),
            HostEvent::AmbientModeChanged(ambient) => engine.on_ambient_mode_changed(ambient),
            HostEvent::PropertiesChanged(properties) => engine.on_properties_changed(properties),
            HostEvent::TimeTick => engine.on_time_tick(),
            HostEvent::SurfaceChanged { width, height } => engine.on_surface_changed(width, height),
            HostEvent::Tick(token) => {
                engine.on_tick(token);
            }
            HostEvent::Shutdown => break,
        }

        if redraw.take() {
            match engine.draw_surface() {
                Some(frame) => {
                    frames += 1;
                    sink.present(frame);
                }
                None => debug!("Redraw requested before the surface exists"),
            }
        }
    }

    engine.on_destroy();
    info!("Watch face engine task finished after {} frames", frames);
    engine
}
