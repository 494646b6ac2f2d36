//! Scripted host for driving `ScaleManager` without a browser.
//!
//! Time only moves when a test calls [`advance`]. Timer ticks fire at
//! exact multiples of the interval period, and scripted inner-size changes
//! land at their scheduled instant before the tick that observes them.

#![allow(dead_code)]

use std::time::Duration;

use zenviewport::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub handle: TimerHandle,
    pub period: Duration,
    pub next_fire: Duration,
}

#[derive(Debug, Default)]
pub struct FakeWindow {
    pub inner: Size,
    pub outer: Size,
    pub native: Option<i32>,
    pub min_content_height: Option<u32>,
    pub scrolls: Vec<(i32, i32)>,
    pub now: Duration,
    pub interval: Option<Interval>,
    pub started: u32,
    pub cancelled: u32,
    /// `(at, inner)` pairs applied once `now >= at`.
    pub script: Vec<(Duration, Size)>,
    pub fullscreen_apis: Vec<FullscreenApi>,
    pub fullscreen: bool,
    pub requests: Vec<FullscreenApi>,
    pub cancels: Vec<FullscreenApi>,
    /// When set, `start_interval` reports that no timer could start.
    pub timer_fails: bool,
}

impl FakeWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: Size::new(width, height),
            outer: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn native(mut self, angle: i32) -> Self {
        self.native = Some(angle);
        self
    }

    /// Inner size becomes `size` at `at`.
    pub fn grow_at(mut self, at: Duration, size: Size) -> Self {
        self.script.push((at, size));
        self
    }

    pub fn with_fullscreen(mut self, apis: &[FullscreenApi]) -> Self {
        self.fullscreen_apis = apis.to_vec();
        self
    }

    /// Resize both inner and outer boxes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner = Size::new(width, height);
        self.outer = Size::new(width, height);
    }

    fn apply_script(&mut self) {
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) =
            self.script.drain(..).partition(|(at, _)| *at <= now);
        self.script = pending;
        if let Some((_, size)) = due.into_iter().max_by_key(|(at, _)| *at) {
            self.inner = size;
        }
    }
}

impl Viewport for FakeWindow {
    fn inner_size(&self) -> Size {
        self.inner
    }

    fn outer_size(&self) -> Size {
        self.outer
    }

    fn native_orientation(&self) -> Option<i32> {
        self.native
    }

    fn set_min_content_height(&mut self, px: u32) {
        self.min_content_height = Some(px);
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        self.scrolls.push((x, y));
    }

    fn start_interval(&mut self, period: Duration) -> Option<TimerHandle> {
        if self.timer_fails {
            return None;
        }
        assert!(self.interval.is_none(), "second interval started");
        self.started += 1;
        let handle = TimerHandle(self.started as i32);
        self.interval = Some(Interval {
            handle,
            period,
            next_fire: self.now + period,
        });
        Some(handle)
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        let active = self.interval.take().expect("cancel without interval");
        assert_eq!(active.handle, handle);
        self.cancelled += 1;
    }

    fn supports_fullscreen_request(&self, api: FullscreenApi) -> bool {
        self.fullscreen_apis.contains(&api)
    }

    fn supports_fullscreen_cancel(&self, api: FullscreenApi) -> bool {
        self.fullscreen_apis.contains(&api)
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) {
        self.requests.push(api);
    }

    fn cancel_fullscreen(&mut self, api: FullscreenApi) {
        self.cancels.push(api);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[derive(Debug)]
pub struct FakeStage {
    pub logical: Size,
    pub mode: ScaleMode,
    pub display: Option<Size>,
    pub margin: Option<Margin>,
}

impl FakeStage {
    pub fn new(mode: ScaleMode) -> Self {
        Self {
            logical: Size::new(800, 600),
            mode,
            display: None,
            margin: None,
        }
    }
}

impl Stage for FakeStage {
    fn logical_size(&self) -> Size {
        self.logical
    }

    fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    fn set_display_size(&mut self, size: Size) {
        self.display = Some(size);
    }

    fn set_display_margin(&mut self, margin: Margin) {
        self.margin = Some(margin);
    }
}

pub type Manager = ScaleManager<FakeWindow, FakeStage, ScaleFactor>;

pub fn manager(window: FakeWindow, mode: ScaleMode, platform: Platform) -> Manager {
    manager_with(window, mode, platform, StageConfig::new())
}

pub fn manager_with(
    window: FakeWindow,
    mode: ScaleMode,
    platform: Platform,
    config: StageConfig,
) -> Manager {
    ScaleManager::new(
        window,
        FakeStage::new(mode),
        ScaleFactor::IDENTITY,
        platform,
        config,
    )
}

pub const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Move the clock forward, firing every due tick. Returns the sizes
/// committed along the way.
pub fn advance(m: &mut Manager, by: Duration) -> Vec<Size> {
    let target = m.viewport().now + by;
    let mut commits = Vec::new();
    loop {
        let vp = m.viewport_mut();
        let Some(due) = vp.interval.map(|i| i.next_fire).filter(|&t| t <= target) else {
            break;
        };
        vp.now = due;
        vp.apply_script();
        if let Some(i) = vp.interval.as_mut() {
            i.next_fire += i.period;
        }
        if let Some(size) = m.sample() {
            commits.push(size);
        }
    }
    let vp = m.viewport_mut();
    vp.now = target;
    vp.apply_script();
    commits
}
