//! Watch face engine
//!
//! Receives the host's lifecycle notifications and routes them to the redraw
//! scheduler and the frame renderer. All calls are expected on one thread.

use tracing::{debug, info, warn};

use crate::assets::AssetSet;
use crate::error::Result;
use crate::render::{Frame, FrameRenderer, WatchFaceVariant};
use crate::scheduler::{Clock, RedrawRequester, RenderScheduler, TickOutcome, TickScheduler, TickToken};
use crate::state::{DeviceProperties, DisplayState};

/// One running watch face
#[derive(Debug)]
pub struct WatchFaceEngine<S, R, C> {
    scheduler: RenderScheduler<S, R>,
    renderer: FrameRenderer,
    clock: C,
    display: DisplayState,
    properties: DeviceProperties,
    surface: Option<(u32, u32)>,
    destroyed: bool,
}

impl<S, R, C> WatchFaceEngine<S, R, C>
where
    S: TickScheduler,
    R: RedrawRequester,
    C: Clock,
{
    /// Create the engine with the variant's built-in artwork
    pub fn create(variant: WatchFaceVariant, ticks: S, redraw: R, clock: C) -> Result<Self> {
        let assets = variant.load_assets()?;
        Self::with_assets(variant, assets, ticks, redraw, clock)
    }

    /// Create the engine with caller-supplied artwork
    pub fn with_assets(
        variant: WatchFaceVariant,
        assets: AssetSet,
        ticks: S,
        redraw: R,
        clock: C,
    ) -> Result<Self> {
        assets.validate()?;
        info!(
            "Creating {:?} watch face (pattern {:?}, {:?} updates)",
            variant.kind,
            variant.time_pattern.as_str(),
            variant.update_period
        );

        Ok(Self {
            scheduler: RenderScheduler::new(variant.update_period, ticks, redraw),
            renderer: FrameRenderer::new(variant, assets),
            clock,
            display: DisplayState::new(),
            properties: DeviceProperties::default(),
            surface: None,
            destroyed: false,
        })
    }

    pub fn display_state(&self) -> DisplayState {
        self.display
    }

    pub fn properties(&self) -> DeviceProperties {
        self.properties
    }

    pub fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn scheduler(&self) -> &RenderScheduler<S, R> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut RenderScheduler<S, R> {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The face came on or went off screen
    pub fn on_visibility_changed(&mut self, visible: bool) {
        if self.ignore_after_destroy("visibility change") {
            return;
        }
        debug!("Visibility changed: {}", visible);
        self.display = self.display.with_visible(visible);
        self.update_timer();
    }

    /// The watch entered or left ambient mode
    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if self.ignore_after_destroy("ambient mode change") {
            return;
        }
        info!("Ambient mode changed: {}", ambient);
        self.display = self.display.with_ambient(ambient);
        self.scheduler.request_redraw();
        self.update_timer();
    }

    /// The host reported its display capabilities
    pub fn on_properties_changed(&mut self, properties: DeviceProperties) {
        if self.ignore_after_destroy("properties change") {
            return;
        }
        info!(
            "Device properties: low_bit_ambient={}, burn_in_protection={}",
            properties.low_bit_ambient, properties.burn_in_protection
        );
        self.properties = properties;
    }

    /// The host's own once-a-minute tick, delivered in ambient mode too
    pub fn on_time_tick(&mut self) {
        if self.ignore_after_destroy("time tick") {
            return;
        }
        debug!("Host time tick");
        self.scheduler.request_redraw();
    }

    /// The draw surface was created or resized
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        if self.ignore_after_destroy("surface change") || self.surface == Some((width, height)) {
            return;
        }
        info!("Surface is now {}x{}", width, height);
        self.surface = Some((width, height));
        self.scheduler.request_redraw();
    }

    /// Produce the draw calls for a `width` x `height` surface
    pub fn on_draw(&mut self, width: u32, height: u32) -> Frame {
        let now = self.clock.now();
        let anti_alias = self.properties.anti_alias_text(self.display);
        self.renderer.render(width, height, &now, anti_alias)
    }

    /// Draw at the last reported surface size, if one is known
    pub fn draw_surface(&mut self) -> Option<Frame> {
        let (width, height) = self.surface?;
        Some(self.on_draw(width, height))
    }

    /// A tick scheduled through the tick scheduler arrived
    pub fn on_tick(&mut self, token: TickToken) -> TickOutcome {
        if self.destroyed {
            debug!("Ignoring tick {:?} after destroy", token);
            return TickOutcome::Ignored;
        }
        let now_millis = self.clock.now_millis();
        self.scheduler.on_tick(token, now_millis)
    }

    /// Tear down: stop the timer and ignore anything that arrives later
    pub fn on_destroy(&mut self) {
        if self.destroyed {
            return;
        }
        info!("Destroying watch face");
        self.scheduler.stop();
        self.destroyed = true;
    }

    fn update_timer(&mut self) {
        let now_millis = self.clock.now_millis();
        self.scheduler.update(self.display, now_millis);
    }

    fn ignore_after_destroy(&self, what: &str) -> bool {
        if self.destroyed {
            warn!("Ignoring {} after destroy", what);
        }
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::VariantKind;
    use crate::scheduler::{FixedClock, ManualTickScheduler, RedrawCounter};
    use chrono::{FixedOffset, TimeZone};
    use std::time::Duration;

    type TestEngine = WatchFaceEngine<ManualTickScheduler, RedrawCounter, FixedClock>;

    fn engine(kind: VariantKind, clock: FixedClock) -> TestEngine {
        WatchFaceEngine::create(
            WatchFaceVariant::new(kind).unwrap(),
            ManualTickScheduler::new(),
            RedrawCounter::new(),
            clock,
        )
        .unwrap()
    }

    #[test]
    fn becoming_visible_starts_aligned_ticks() {
        let mut engine = engine(VariantKind::Pixel, FixedClock::at_millis(1_000));
        engine.on_visibility_changed(true);

        assert!(engine.scheduler().is_running());
        let tick = engine.scheduler().ticks().last_scheduled().unwrap();
        assert_eq!(tick.delay, Duration::from_millis(500));

        // The tick fires at T=1500 and schedules the next boundary
        engine.clock().advance(tick.delay);
        let token = engine.scheduler_mut().ticks_mut().take_next().unwrap().token;
        assert_eq!(
            engine.on_tick(token),
            TickOutcome::Redrawn {
                next_in: Duration::from_millis(500)
            }
        );
        assert_eq!(engine.scheduler().redraw().requests, 2);
    }

    #[test]
    fn ambient_stops_ticks_but_still_redraws_once() {
        let mut engine = engine(VariantKind::Mascot, FixedClock::at_millis(0));
        engine.on_visibility_changed(true);
        let pending = engine.scheduler().timer_state().pending_token().unwrap();
        engine.scheduler_mut().redraw_mut().take();

        engine.on_ambient_mode_changed(true);
        assert!(!engine.scheduler().is_running());
        assert!(engine.scheduler().ticks().pending().is_empty());
        assert_eq!(engine.scheduler().redraw().requests, 1);

        assert_eq!(engine.on_tick(pending), TickOutcome::Ignored);
        assert_eq!(engine.scheduler().redraw().requests, 1);

        engine.on_time_tick();
        assert_eq!(engine.scheduler().redraw().requests, 2);
    }

    #[test]
    fn low_bit_ambient_draws_aliased_text() {
        let mut engine = engine(VariantKind::Classic, FixedClock::at_millis(0));
        engine.on_properties_changed(DeviceProperties {
            low_bit_ambient: true,
            burn_in_protection: true,
        });
        engine.on_visibility_changed(true);
        engine.on_ambient_mode_changed(true);

        let frame = engine.on_draw(320, 320);
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            crate::render::DrawCommand::Text {
                anti_alias: false,
                ..
            }
        )));
    }

    #[test]
    fn label_uses_the_clock_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let clock = FixedClock::new(offset.with_ymd_and_hms(2024, 3, 1, 9, 5, 30).unwrap());
        let mut engine = engine(VariantKind::Classic, clock);
        engine.on_surface_changed(360, 360);

        let frame = engine.draw_surface().unwrap();
        assert_eq!(frame.label(), Some("09:05"));
        assert_eq!((frame.width, frame.height), (360, 360));
    }

    #[test]
    fn destroy_cancels_and_ignores_late_events() {
        let mut engine = engine(VariantKind::Pixel, FixedClock::at_millis(0));
        engine.on_visibility_changed(true);
        let pending = engine.scheduler().timer_state().pending_token().unwrap();

        engine.on_destroy();
        assert!(engine.is_destroyed());
        assert_eq!(engine.scheduler().ticks().cancelled(), &[pending]);

        engine.scheduler_mut().redraw_mut().take();
        assert_eq!(engine.on_tick(pending), TickOutcome::Ignored);
        engine.on_visibility_changed(true);
        engine.on_time_tick();
        engine.on_surface_changed(320, 320);
        assert_eq!(engine.surface(), None);
        assert_eq!(engine.scheduler().redraw().requests, 0);
        assert!(engine.scheduler().ticks().pending().is_empty());
    }
}
