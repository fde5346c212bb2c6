//! Viewer loop orchestration
//!
//! One tick = drain input events, poll the sample source once, update the
//! filter if a sample arrived, render the current estimate. The estimate is
//! rendered every tick, whether or not it changed.

use crate::core::types::Orientation;
use crate::display::{DisplayToggle, Presenter};
use crate::estimator::{ComplementaryFilter, TimeStep};
use crate::ingestion::SampleSource;
use crate::input::ViewerEvent;
use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Pause after a poll that produced nothing
const IDLE_SLEEP: Duration = Duration::from_millis(2);

/// Pause after a transport error
const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A sample was fused into the estimate
    Updated,
    /// A sample arrived but the time-step gate discarded it
    Rejected(TimeStep),
    /// No valid sample this tick
    NoSample,
    /// The source failed; treated as no sample
    SourceError,
}

/// Viewer counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerStats {
    pub ticks: u64,
    pub accepted: u64,
    pub rejected_non_positive: u64,
    pub rejected_stale: u64,
    pub empty_polls: u64,
    pub source_errors: u64,
    pub render_errors: u64,
}

impl ViewerStats {
    pub fn rejected(&self) -> u64 {
        self.rejected_non_positive + self.rejected_stale
    }
}

impl fmt::Display for ViewerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} accepted={} rejected={} (non-positive={}, stale={}) empty={} source_errors={} render_errors={}",
            self.ticks,
            self.accepted,
            self.rejected(),
            self.rejected_non_positive,
            self.rejected_stale,
            self.empty_polls,
            self.source_errors,
            self.render_errors
        )
    }
}

/// Single-threaded viewer owning the source, the filter and the presenter.
pub struct ViewerApp<S: SampleSource, P: Presenter> {
    source: S,
    filter: ComplementaryFilter,
    presenter: P,
    toggle: DisplayToggle,
    events: Option<Receiver<ViewerEvent>>,
    running: Arc<AtomicBool>,
    stats: ViewerStats,
    stats_interval: Option<Duration>,
    sample_period: Option<Duration>,
}

impl<S: SampleSource, P: Presenter> ViewerApp<S, P> {
    /// Create a viewer.
    ///
    /// `running` is the shared stop flag; clearing it from any thread ends
    /// [`ViewerApp::run`] after the current tick.
    pub fn new(
        source: S,
        filter: ComplementaryFilter,
        presenter: P,
        toggle: DisplayToggle,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            filter,
            presenter,
            toggle,
            events: None,
            running,
            stats: ViewerStats::default(),
            stats_interval: None,
            sample_period: None,
        }
    }

    /// Attach a keyboard event channel
    pub fn with_events(mut self, events: Receiver<ViewerEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Log statistics every `interval` while running
    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Stamp samples at a fixed rate instead of with the wall clock.
    ///
    /// Each sample is timestamped `period` after the last accepted update, and
    /// [`ViewerApp::run`] waits `period` per sample. Used to replay recordings
    /// at their capture rate.
    pub fn with_sample_period(mut self, period: Duration) -> Self {
        self.sample_period = (!period.is_zero()).then_some(period);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.filter.orientation()
    }

    pub fn stats(&self) -> ViewerStats {
        self.stats
    }

    pub fn filter(&self) -> &ComplementaryFilter {
        &self.filter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn toggle(&self) -> &DisplayToggle {
        &self.toggle
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Run one tick.
    ///
    /// Samples are timestamped with the wall clock right after the poll, or
    /// one sample period after the last update when a period is set.
    pub fn tick(&mut self) -> TickOutcome {
        match self.sample_period {
            Some(period) => {
                let stamp = self.filter.state().last_update() + period;
                self.tick_with(|| stamp)
            }
            None => self.tick_with(Instant::now),
        }
    }

    /// Run one tick, timestamping any sample with `now`.
    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        self.tick_with(|| now)
    }

    fn tick_with<F: FnOnce() -> Instant>(&mut self, clock: F) -> TickOutcome {
        self.handle_events();
        self.stats.ticks += 1;

        let outcome = match self.source.try_read() {
            Ok(Some(sample)) => {
                let now = clock();
                let (_, step) = self.filter.update_with_step(sample, now);
                match step {
                    TimeStep::Accepted(_) => {
                        self.stats.accepted += 1;
                        TickOutcome::Updated
                    }
                    TimeStep::NonPositive => {
                        self.stats.rejected_non_positive += 1;
                        debug!("Sample discarded: non-positive time step");
                        TickOutcome::Rejected(step)
                    }
                    TimeStep::Stale(dt) => {
                        self.stats.rejected_stale += 1;
                        debug!(
                            "Sample discarded: {:.3}s since last update exceeds max_dt {:.3}s, resyncing",
                            dt,
                            self.filter.config().max_dt()
                        );
                        // Measure the next sample from here, not from before the stall
                        self.filter.resync(now);
                        TickOutcome::Rejected(step)
                    }
                }
            }
            Ok(None) => {
                self.stats.empty_polls += 1;
                TickOutcome::NoSample
            }
            Err(e) => {
                self.stats.source_errors += 1;
                warn!("Sample source error: {}", e);
                TickOutcome::SourceError
            }
        };

        let orientation = self.filter.orientation();
        if let Err(e) = self.presenter.render(&orientation, self.toggle.is_enabled()) {
            self.stats.render_errors += 1;
            warn!("Render failed: {}", e);
        }

        outcome
    }

    fn handle_events(&mut self) {
        let Some(events) = &self.events else {
            return;
        };
        let mut disconnected = false;
        loop {
            match events.try_recv() {
                Ok(ViewerEvent::ToggleYaw) => {
                    let shown = self.toggle.flip();
                    info!("Yaw display {}", if shown { "enabled" } else { "disabled" });
                }
                Ok(ViewerEvent::Quit) => {
                    info!("Quit requested");
                    self.running.store(false, Ordering::Relaxed);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            debug!("Input channel closed");
            self.events = None;
        }
    }

    /// Tick until the stop flag clears, a quit event arrives, or the source
    /// is exhausted. Returns the final counters.
    pub fn run(&mut self) -> ViewerStats {
        info!("Viewer running (z = toggle yaw, q = quit, Ctrl-C = stop)");
        let mut last_stats = Instant::now();

        while self.is_running() {
            match self.tick() {
                TickOutcome::NoSample => {
                    if self.source.is_exhausted() {
                        info!("Sample source exhausted");
                        break;
                    }
                    thread::sleep(IDLE_SLEEP);
                }
                TickOutcome::SourceError => thread::sleep(ERROR_BACKOFF),
                TickOutcome::Updated | TickOutcome::Rejected(_) => {
                    if let Some(period) = self.sample_period {
                        thread::sleep(period);
                    }
                }
            }

            if let Some(interval) = self.stats_interval
                && last_stats.elapsed() >= interval
            {
                info!("{} | {}", self.stats, self.filter.orientation());
                last_stats = Instant::now();
            }
        }

        info!("Viewer stopped: {}", self.stats);
        info!("Final estimate: {}", self.filter.orientation());
        self.stats
    }
}
