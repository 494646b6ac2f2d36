//! Bounded polling loop that waits out mobile browser chrome collapse.
//!
//! On a phone, scrolling to the top asks the browser to hide its address
//! bar, but the resulting viewport growth lands asynchronously and at no
//! predictable time. A refresh therefore makes the page scrollable, records
//! the current inner height as a baseline, nudges the scroll position, and
//! starts a repeating timer. Each tick re-nudges and checks whether the
//! inner height has grown past the baseline. Growth, or running out of
//! iterations, commits.
//!
//! ```text
//!   refresh()                 sample()           sample()
//!      │                         │                  │
//!   Idle ──▶ Settling ──tick──▶ Polling ──tick──▶ … ──grew / budget < 0──▶ Idle
//!      ▲         (mobile only)                                   │
//!      └──────────────────────── commit ◀────────────────────────┘
//! ```
//!
//! At most one run exists. A refresh during a run re-applies the scroll
//! hint but leaves the run's baseline and remaining iterations alone.

use core::time::Duration;

use crate::host::{TimerHandle, Viewport};
use crate::platform::Platform;
use crate::scale::Size;

/// Iterations before a run gives up waiting for growth.
pub const DEFAULT_BUDGET: u32 = 40;
/// Interval between samples.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(10);
/// Minimum content height forced while waiting, so the page can scroll.
pub const DEFAULT_SENTINEL_HEIGHT: u32 = 5000;

/// Observable phase of the stabilizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StabilizerState {
    /// No run active.
    Idle,
    /// A run started on a chrome-hiding platform and has not ticked yet.
    Settling,
    /// A run is sampling on its timer.
    Polling,
}

/// Why a run committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Convergence {
    /// Inner height grew past the baseline.
    Grew,
    /// Iteration budget exhausted; whatever size is available is accepted.
    TimedOut,
}

/// Outcome of one timer tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    /// No run was active; the tick was stray.
    Idle,
    /// Still waiting.
    Pending,
    /// The run ended. The timer is cancelled and the stabilizer is idle.
    Converged {
        /// Inner size at the moment of convergence.
        inner: Size,
        /// What ended the run.
        reason: Convergence,
    },
}

/// State of the single active polling sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StabilizationRun {
    baseline_height: u32,
    remaining_iterations: i32,
    timer: TimerHandle,
    hiding_chrome: bool,
    ticks: u32,
}

impl StabilizationRun {
    /// Inner height captured when the run started. Zero on platforms
    /// without collapsible chrome, so their first tick commits.
    pub fn baseline_height(&self) -> u32 {
        self.baseline_height
    }

    /// Iterations left. Goes negative on the timeout tick.
    pub fn remaining_iterations(&self) -> i32 {
        self.remaining_iterations
    }

    /// Handle of the polling timer.
    pub fn timer(&self) -> TimerHandle {
        self.timer
    }

    /// Ticks sampled so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

/// Owns the single-slot polling run and its tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportStabilizer {
    budget: u32,
    period: Duration,
    sentinel_height: u32,
    run: Option<StabilizationRun>,
}

impl Default for ViewportStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET, DEFAULT_PERIOD, DEFAULT_SENTINEL_HEIGHT)
    }
}

impl ViewportStabilizer {
    /// A stabilizer with the given iteration budget, tick period and
    /// sentinel content height.
    pub fn new(budget: u32, period: Duration, sentinel_height: u32) -> Self {
        Self {
            budget,
            period,
            sentinel_height,
            run: None,
        }
    }

    /// Ticks a run may take before it times out.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Interval between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Minimum content height forced while a run waits.
    pub fn sentinel_height(&self) -> u32 {
        self.sentinel_height
    }

    /// The active run, if any.
    pub fn run(&self) -> Option<&StabilizationRun> {
        self.run.as_ref()
    }

    /// Current phase, derived from the active run.
    pub fn state(&self) -> StabilizerState {
        match &self.run {
            None => StabilizerState::Idle,
            Some(r) if r.hiding_chrome && r.ticks == 0 => StabilizerState::Settling,
            Some(_) => StabilizerState::Polling,
        }
    }

    /// Begin a refresh. Returns `true` if a new run was started.
    ///
    /// If the host cannot start a timer no run is recorded, so a later
    /// refresh can try again.
    ///
    /// On chrome-hiding platforms the page is made scrollable and nudged
    /// every time, even when a run is already active.
    pub fn refresh<V: Viewport>(&mut self, viewport: &mut V, platform: &Platform) -> bool {
        let hiding_chrome = platform.can_hide_chrome();
        let mut baseline_height = 0;
        if hiding_chrome {
            viewport.set_min_content_height(self.sentinel_height);
            baseline_height = viewport.inner_size().height;
            let (x, y) = platform.chrome_nudge();
            viewport.scroll_to(x, y);
        }

        if let Some(run) = &self.run {
            tracing::debug!(
                remaining = run.remaining_iterations,
                baseline = run.baseline_height,
                "refresh ignored, run already active"
            );
            return false;
        }

        let Some(timer) = viewport.start_interval(self.period) else {
            tracing::warn!("no polling timer available, run not started");
            return false;
        };
        let remaining_iterations = i32::try_from(self.budget).unwrap_or(i32::MAX);
        tracing::debug!(
            baseline = baseline_height,
            budget = self.budget,
            hiding_chrome,
            "stabilization run started"
        );
        self.run = Some(StabilizationRun {
            baseline_height,
            remaining_iterations,
            timer,
            hiding_chrome,
            ticks: 0,
        });
        true
    }

    /// One timer tick.
    ///
    /// On convergence the document minimum height is locked to the current
    /// inner height, the timer is cancelled, and the run is cleared. The
    /// caller computes and applies the final size.
    pub fn sample<V: Viewport>(&mut self, viewport: &mut V, platform: &Platform) -> Tick {
        let Some(run) = self.run.as_mut() else {
            return Tick::Idle;
        };

        if run.hiding_chrome {
            let (x, y) = platform.chrome_nudge();
            viewport.scroll_to(x, y);
        }

        run.remaining_iterations -= 1;
        run.ticks += 1;

        let inner = viewport.inner_size();
        let reason = if inner.height > run.baseline_height {
            Convergence::Grew
        } else if run.remaining_iterations < 0 {
            Convergence::TimedOut
        } else {
            tracing::trace!(
                height = inner.height,
                baseline = run.baseline_height,
                remaining = run.remaining_iterations,
                "waiting for viewport"
            );
            return Tick::Pending;
        };

        let timer = run.timer;
        let ticks = run.ticks;
        viewport.set_min_content_height(inner.height);
        viewport.cancel_interval(timer);
        self.run = None;
        tracing::debug!(
            width = inner.width,
            height = inner.height,
            ?reason,
            ticks,
            "viewport settled"
        );
        Tick::Converged { inner, reason }
    }
}
