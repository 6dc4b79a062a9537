//! Picker: The animated random selection engine.
//!
//! A run cycles through random names on a dedicated worker thread,
//! slowing down according to its [`Schedule`], then settles on a final
//! pick. Progress is reported through callbacks or an event channel.
//!
//! # Lifecycle
//!
//! ```text
//!          start()                 total elapsed
//! ┌──────┐ ───────▶ ┌─────────┐ ───────────────▶ ┌──────────┐
//! │ Idle │          │ Running │                  │ Settling │
//! └──────┘ ◀─────── └─────────┘                  └──────────┘
//!    ▲     cancel()                                   │
//!    └────────────────────────────────────────────────┘
//!                       result delivered
//! ```

use super::clock::{Clock, SystemClock};
use super::messages::{EngineState, PickEvent, RunObserver, RunOutcome, Tick};
use super::sampler::{Sampler, ThreadRngSampler};
use super::schedule::Schedule;
use crate::error::{ConfigError, PickError};
use crate::roster::Roster;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Which name a run settles on once its time is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettleMode {
    /// Take one more independent sample.
    #[default]
    Independent,
    /// Keep the name shown on the last tick.
    LastShown,
}

/// Configuration for the Picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerConfig {
    /// Run timing.
    pub schedule: Schedule,
    /// How the final name is chosen.
    pub settle: SettleMode,
}

impl PickerConfig {
    /// Set the total run length, rescaling the deceleration bands.
    #[must_use]
    pub fn with_total_duration(mut self, total: Duration) -> Self {
        self.schedule = self.schedule.with_total(total);
        self
    }

    /// Replace the schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the settle mode.
    #[must_use]
    pub const fn with_settle(mut self, settle: SettleMode) -> Self {
        self.settle = settle;
        self
    }

    /// Check that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()
    }
}

/// The random selection engine.
///
/// A `Picker` does not own a roster. Each [`Picker::start`] takes a value
/// snapshot of the roster it is given, so editing the roster while a run is
/// in flight never affects that run.
///
/// Clones share state: at most one run is active across a picker and all
/// its clones.
#[derive(Clone)]
pub struct Picker {
    /// Configuration.
    config: PickerConfig,
    /// Time source for the run loop.
    clock: Arc<dyn Clock>,
    /// Index source for picks.
    sampler: Arc<dyn Sampler>,
    /// Current [`EngineState`], shared with the worker thread.
    state: Arc<AtomicU8>,
}

impl Picker {
    /// Create a picker with the default 7 second schedule, the system clock
    /// and a thread-local RNG.
    pub fn new() -> Self {
        Self {
            config: PickerConfig::default(),
            clock: Arc::new(SystemClock::new()),
            sampler: Arc::new(ThreadRngSampler),
            state: Arc::new(AtomicU8::new(EngineState::Idle as u8)),
        }
    }

    /// Create a picker with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: PickerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Use a different clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different sampler.
    #[must_use]
    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Get the configuration.
    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Get the current state.
    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if a new run can be started.
    pub fn is_idle(&self) -> bool {
        self.state() == EngineState::Idle
    }

    /// Pick one name immediately, without animation.
    ///
    /// Returns `None` if the roster is empty.
    pub fn pick(&self, roster: &Roster) -> Option<String> {
        if roster.is_empty() {
            return None;
        }
        let index = sample(self.sampler.as_ref(), roster.count());
        roster.get(index).map(str::to_string)
    }

    /// Start an animated run on a background thread.
    ///
    /// `on_update` is called with the name shown on every tick and
    /// `on_result` once with the final pick. Both run on the worker thread;
    /// marshalling to a UI thread is the caller's concern.
    ///
    /// # Errors
    ///
    /// - [`PickError::EmptyRoster`] if the roster has no names. No callback
    ///   is invoked and the state is unchanged.
    /// - [`PickError::RunInProgress`] if a run is already active. The
    ///   active run is not affected.
    /// - [`PickError::Spawn`] if the worker thread cannot be created.
    pub fn start<U, R>(
        &self,
        roster: &Roster,
        on_update: U,
        on_result: R,
    ) -> Result<RunHandle, PickError>
    where
        U: FnMut(&str) + Send + 'static,
        R: FnOnce(&str) + Send + 'static,
    {
        self.start_observed(
            roster,
            CallbackObserver {
                on_update,
                on_result: Some(on_result),
            },
        )
    }

    /// Start an animated run that reports through a channel.
    ///
    /// The receiver yields [`PickEvent::Tick`] for each tick followed by
    /// exactly one [`PickEvent::Picked`] or [`PickEvent::Cancelled`].
    ///
    /// # Errors
    ///
    /// Same as [`Picker::start`].
    pub fn start_events(
        &self,
        roster: &Roster,
    ) -> Result<(RunHandle, Receiver<PickEvent>), PickError> {
        let (tx, rx) = unbounded();
        let handle = self.start_observed(roster, ChannelObserver { tx })?;
        Ok((handle, rx))
    }

    /// Start an animated run that reports to a custom observer.
    ///
    /// # Errors
    ///
    /// Same as [`Picker::start`].
    pub fn start_observed<O>(&self, roster: &Roster, observer: O) -> Result<RunHandle, PickError>
    where
        O: RunObserver + 'static,
    {
        if roster.is_empty() {
            return Err(PickError::EmptyRoster);
        }

        self.state
            .compare_exchange(
                EngineState::Idle as u8,
                EngineState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| PickError::RunInProgress)?;

        // Resets the state to Idle however the worker ends, including when
        // the thread never starts.
        let guard = StateGuard(self.state.clone());
        let cancel = Arc::new(AtomicBool::new(false));

        let run = Run {
            snapshot: roster.snapshot(),
            schedule: self.config.schedule.clone(),
            settle: self.config.settle,
            clock: self.clock.clone(),
            sampler: self.sampler.clone(),
            cancel: cancel.clone(),
        };

        tracing::debug!(
            names = run.snapshot.len(),
            total = ?run.schedule.total(),
            "starting selection run"
        );

        let mut observer = observer;
        let handle = thread::Builder::new()
            .name("rollcall-picker".to_string())
            .spawn(move || run.execute(&mut observer, &guard))
            .map_err(PickError::Spawn)?;

        Ok(RunHandle {
            handle: Some(handle),
            cancel,
        })
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Picker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Handle to a run started by [`Picker::start`].
///
/// Dropping the handle detaches the run; it keeps going and still delivers
/// its result.
#[derive(Debug)]
pub struct RunHandle {
    /// Handle to the worker thread.
    handle: Option<JoinHandle<RunOutcome>>,
    /// Flag to request cancellation.
    cancel: Arc<AtomicBool>,
}

impl RunHandle {
    /// Ask the run to stop.
    ///
    /// The worker notices before its next tick or before settling, so the
    /// latency is at most one interval. A cancelled run never invokes the
    /// result callback. Has no effect once the run has settled.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Check if the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the run to end.
    ///
    /// Returns `None` if a callback panicked on the worker thread.
    pub fn join(mut self) -> Option<RunOutcome> {
        self.handle.take().and_then(|handle| handle.join().ok())
    }
}

/// Resets the shared state to Idle when dropped.
struct StateGuard(Arc<AtomicU8>);

impl StateGuard {
    fn set(&self, state: EngineState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

impl Drop for StateGuard {
    fn drop(&mut self) {
        self.set(EngineState::Idle);
    }
}

/// Everything a worker thread needs for one run.
struct Run {
    /// Names to pick from, fixed for the whole run.
    snapshot: Arc<[String]>,
    schedule: Schedule,
    settle: SettleMode,
    clock: Arc<dyn Clock>,
    sampler: Arc<dyn Sampler>,
    cancel: Arc<AtomicBool>,
}

impl Run {
    /// Main run loop.
    fn execute(&self, observer: &mut dyn RunObserver, state: &StateGuard) -> RunOutcome {
        let start = self.clock.now();
        let total = self.schedule.total();
        let mut interval = self.schedule.base_interval();
        let mut frame = 0u64;
        let mut last_shown = None;

        loop {
            let elapsed = self.clock.now().saturating_sub(start);
            if elapsed >= total {
                break;
            }
            if self.is_cancelled() {
                return Self::cancelled(observer, frame);
            }

            let index = self.sample();
            let tick = Tick {
                frame,
                name: self.snapshot[index].clone(),
                elapsed,
                interval,
            };
            tracing::trace!(frame, name = %tick.name, interval = ?interval, "tick");
            observer.on_tick(&tick);
            last_shown = Some(index);

            self.clock.sleep(interval);
            let elapsed = self.clock.now().saturating_sub(start);
            interval += self.schedule.increment_at(elapsed);
            frame += 1;
        }

        if self.is_cancelled() {
            return Self::cancelled(observer, frame);
        }

        state.set(EngineState::Settling);
        let index = match (self.settle, last_shown) {
            (SettleMode::LastShown, Some(index)) => index,
            _ => self.sample(),
        };
        let name = self.snapshot[index].clone();

        tracing::info!(name = %name, ticks = frame, "picked");
        observer.on_result(&name);
        RunOutcome::Picked(name)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn sample(&self) -> usize {
        sample(self.sampler.as_ref(), self.snapshot.len())
    }

    fn cancelled(observer: &mut dyn RunObserver, frame: u64) -> RunOutcome {
        tracing::warn!(ticks = frame, "selection run cancelled");
        observer.on_cancel();
        RunOutcome::Cancelled
    }
}

/// Draw an index in `[0, len)`, clamping a misbehaving sampler.
fn sample(sampler: &dyn Sampler, len: usize) -> usize {
    let index = sampler.index(len);
    debug_assert!(index < len, "sampler returned {index} for len {len}");
    index.min(len - 1)
}

/// Adapts the closures given to [`Picker::start`].
struct CallbackObserver<U, R> {
    on_update: U,
    on_result: Option<R>,
}

impl<U, R> RunObserver for CallbackObserver<U, R>
where
    U: FnMut(&str) + Send,
    R: FnOnce(&str) + Send,
{
    fn on_tick(&mut self, tick: &Tick) {
        (self.on_update)(&tick.name);
    }

    fn on_result(&mut self, name: &str) {
        if let Some(on_result) = self.on_result.take() {
            on_result(name);
        }
    }
}

/// Forwards run progress to a channel.
struct ChannelObserver {
    tx: Sender<PickEvent>,
}

impl RunObserver for ChannelObserver {
    fn on_tick(&mut self, tick: &Tick) {
        // Receiver dropped: keep running, nobody is watching
        let _ = self.tx.send(PickEvent::Tick(tick.clone()));
    }

    fn on_result(&mut self, name: &str) {
        let _ = self.tx.send(PickEvent::Picked(name.to_string()));
    }

    fn on_cancel(&mut self) {
        let _ = self.tx.send(PickEvent::Cancelled);
    }
}
