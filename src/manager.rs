//! End-to-end viewport negotiation.
//!
//! [`ScaleManager`] owns the orientation tracker, the stabilizer, and the
//! committed size, and drives the host collaborators:
//!
//! ```text
//!  orientationchange ─▶ handle_orientation_change ─┐
//!  resize ────────────▶ handle_resize ─────────────┼─▶ refresh ─▶ timer
//!  every frame ───────▶ update (size drifted) ─────┘                │
//!                                                                   ▼
//!  Stage / InputScale ◀── commit ◀── compute_target ◀── sample (converged)
//! ```

use crate::config::StageConfig;
use crate::fullscreen::Fullscreen;
use crate::host::{InputScale, Stage, Viewport};
use crate::orientation::{
    ForcedOrientation, Orientation, OrientationCheck, OrientationEvent, OrientationTracker,
};
use crate::platform::Platform;
use crate::scale::{Bounds, Margin, ScaleFactor, Size, compute_target};
use crate::stabilizer::{StabilizerState, Tick, ViewportStabilizer};

/// Keeps a stage's display size in step with its window.
#[derive(Debug)]
pub struct ScaleManager<V, S, I> {
    viewport: V,
    stage: S,
    input: I,
    platform: Platform,
    bounds: Bounds,
    align_horizontally: bool,
    align_vertically: bool,
    forced_orientation: Option<ForcedOrientation>,
    incorrect_orientation: bool,
    tracker: OrientationTracker,
    stabilizer: ViewportStabilizer,
    fullscreen: Fullscreen,
    committed: Size,
    scale_factor: ScaleFactor,
    margin: Margin,
}

impl<V: Viewport, S: Stage, I: InputScale> ScaleManager<V, S, I> {
    /// Detect the initial orientation and resolve fullscreen support.
    ///
    /// The committed size starts at the stage's logical size. Nothing is
    /// applied until the first refresh converges.
    pub fn new(
        viewport: V,
        stage: S,
        input: I,
        platform: Platform,
        config: StageConfig,
    ) -> Self {
        let tracker =
            OrientationTracker::detect(viewport.native_orientation(), viewport.outer_size());
        let fullscreen = Fullscreen::resolve(
            |api| viewport.supports_fullscreen_request(api),
            |api| viewport.supports_fullscreen_cancel(api),
        );
        let committed = stage.logical_size();
        Self {
            viewport,
            stage,
            input,
            platform,
            bounds: config.bounds,
            align_horizontally: config.align_horizontally,
            align_vertically: config.align_vertically,
            forced_orientation: config.forced_orientation,
            incorrect_orientation: false,
            tracker,
            stabilizer: ViewportStabilizer::new(
                config.budget,
                config.period,
                config.sentinel_height,
            ),
            fullscreen,
            committed,
            scale_factor: ScaleFactor::IDENTITY,
            margin: Margin::default(),
        }
    }

    // ── event handlers ──────────────────────────────────────────────────

    /// Native orientation-change notification.
    pub fn handle_orientation_change(&mut self) -> OrientationEvent {
        let event = self
            .tracker
            .handle_orientation_change(self.viewport.native_orientation());
        self.refresh_if_tracking();
        event
    }

    /// Window resize notification. Orientation is re-inferred from the outer size.
    pub fn handle_resize(&mut self) -> OrientationEvent {
        let event = self.tracker.handle_resize(self.viewport.outer_size());
        self.refresh_if_tracking();
        event
    }

    fn refresh_if_tracking(&mut self) {
        if self.stage.scale_mode().tracks_window() {
            self.refresh();
        }
    }

    /// Start a stabilization run, or re-nudge the active one.
    ///
    /// Returns `true` if a new run was started.
    pub fn refresh(&mut self) -> bool {
        self.stabilizer.refresh(&mut self.viewport, &self.platform)
    }

    /// Timer tick. Returns the committed size when the run converged.
    pub fn sample(&mut self) -> Option<Size> {
        match self.stabilizer.sample(&mut self.viewport, &self.platform) {
            Tick::Converged { inner, .. } => Some(self.commit(inner)),
            Tick::Pending | Tick::Idle => None,
        }
    }

    /// Per-frame consistency check.
    ///
    /// Tracks forced-orientation changes, then refreshes if the committed
    /// size has drifted from the window's inner size. This catches resizes
    /// that never produced a discrete resize event.
    pub fn update(&mut self) -> Option<OrientationCheck> {
        let check = self.check_orientation_state();
        if self.stage.scale_mode().tracks_window() && self.viewport.inner_size() != self.committed
        {
            self.refresh();
        }
        check
    }

    fn check_orientation_state(&mut self) -> Option<OrientationCheck> {
        let forced = self.forced_orientation?;
        let inner = self.viewport.inner_size();
        let check = if self.incorrect_orientation {
            if !forced.is_satisfied_by(inner) {
                return None;
            }
            self.incorrect_orientation = false;
            OrientationCheck::LeaveIncorrect
        } else {
            if !forced.is_violated_by(inner) {
                return None;
            }
            self.incorrect_orientation = true;
            OrientationCheck::EnterIncorrect
        };
        tracing::debug!(
            ?forced,
            ?check,
            width = inner.width,
            height = inner.height,
            "forced orientation"
        );
        if self.stage.scale_mode().tracks_window() {
            self.refresh();
        }
        Some(check)
    }

    fn commit(&mut self, inner: Size) -> Size {
        let logical = self.stage.logical_size();
        let mode = self.stage.scale_mode();
        let size = if self.incorrect_orientation && mode.tracks_window() {
            inner
        } else {
            compute_target(
                mode,
                inner,
                logical,
                &self.bounds,
                self.committed,
            )
        };

        self.stage.set_display_size(size);
        self.scale_factor = ScaleFactor::between(logical, size);
        self.input.set_input_scale(self.scale_factor);

        if self.align_horizontally || self.align_vertically {
            self.margin = Margin {
                x: self.centering(self.align_horizontally, inner.width, size.width),
                y: self.centering(self.align_vertically, inner.height, size.height),
            };
            self.stage.set_display_margin(self.margin);
        }

        self.committed = size;
        tracing::debug!(
            width = size.width,
            height = size.height,
            scale_x = self.scale_factor.x,
            scale_y = self.scale_factor.y,
            "surface size committed"
        );
        size
    }

    fn centering(&self, enabled: bool, window: u32, surface: u32) -> u32 {
        if enabled && !self.incorrect_orientation && surface < window {
            (window - surface).div_ceil(2)
        } else {
            0
        }
    }

    // ── fullscreen ──────────────────────────────────────────────────────

    /// Request fullscreen on the surface. Returns `false` if already
    /// fullscreen or no request API is available.
    pub fn start_full_screen(&mut self) -> bool {
        if self.viewport.is_fullscreen() {
            return false;
        }
        match self.fullscreen.request_api() {
            Some(api) => {
                self.viewport.request_fullscreen(api);
                true
            }
            None => {
                tracing::debug!("fullscreen request unavailable");
                false
            }
        }
    }

    /// Leave fullscreen. Returns `false` if no cancel API is available.
    pub fn stop_full_screen(&mut self) -> bool {
        match self.fullscreen.cancel_api() {
            Some(api) => {
                self.viewport.cancel_fullscreen(api);
                true
            }
            None => {
                tracing::debug!("fullscreen cancel unavailable");
                false
            }
        }
    }

    /// Whether the host reports fullscreen.
    pub fn is_full_screen(&self) -> bool {
        self.viewport.is_fullscreen()
    }
}

impl<V, S, I> ScaleManager<V, S, I> {
    /// Last committed display size.
    pub fn committed_size(&self) -> Size {
        self.committed
    }

    /// Committed width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.committed.aspect_ratio()
    }

    /// Last input scale published (`logical / committed` per axis).
    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale_factor
    }

    /// Last alignment margin. Zero unless alignment is enabled.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Last tracked orientation.
    pub fn orientation(&self) -> Orientation {
        self.tracker.orientation()
    }

    /// Tracked angle is ±90.
    pub fn is_landscape(&self) -> bool {
        self.tracker.is_landscape()
    }

    /// Tracked angle is anything but ±90.
    pub fn is_portrait(&self) -> bool {
        self.tracker.is_portrait()
    }

    /// Whether the window currently violates the forced orientation.
    pub fn is_incorrect_orientation(&self) -> bool {
        self.incorrect_orientation
    }

    /// Current stabilizer phase.
    pub fn state(&self) -> StabilizerState {
        self.stabilizer.state()
    }

    /// The stabilizer and its active run.
    pub fn stabilizer(&self) -> &ViewportStabilizer {
        &self.stabilizer
    }

    /// Device facts given at construction.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Display size bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Bounds are owned by the caller and may change at any time. They
    /// take effect on the next commit.
    pub fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }

    /// The window collaborator.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the window collaborator.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The surface collaborator.
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutable access to the surface collaborator.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// The input scale sink.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Give back the collaborators.
    pub fn into_parts(self) -> (V, S, I) {
        (self.viewport, self.stage, self.input)
    }
}
