//! Message types reported by a selection run.
//!
//! These types describe what a run tells the outside world: one [`Tick`]
//! per intermediate pick and a final [`RunOutcome`].

use std::time::Duration;

/// One intermediate pick of a running selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Tick number within the run (monotonically increasing from 0).
    pub frame: u64,
    /// The name shown on this tick.
    pub name: String,
    /// Time elapsed since the run started, measured before this tick.
    pub elapsed: Duration,
    /// How long the run sleeps after this tick.
    pub interval: Duration,
}

/// Events sent over the channel returned by
/// [`Picker::start_events`](super::Picker::start_events).
///
/// A run sends zero or more `Tick`s followed by exactly one `Picked` or
/// `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickEvent {
    /// An intermediate pick.
    Tick(Tick),
    /// The final pick.
    Picked(String),
    /// The run was cancelled before it settled.
    Cancelled,
}

impl PickEvent {
    /// Check if this is the last event of a run.
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Picked(_) | Self::Cancelled)
    }
}

/// How a finished run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run settled on this name.
    Picked(String),
    /// The run was cancelled.
    Cancelled,
}

impl RunOutcome {
    /// Get the picked name, if the run settled.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Picked(name) => Some(name),
            Self::Cancelled => None,
        }
    }
}

/// Lifecycle state of a [`Picker`](super::Picker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EngineState {
    /// No run is active; `start` is accepted.
    Idle = 0,
    /// A run is cycling through names.
    Running = 1,
    /// A run has timed out and is taking its final pick.
    Settling = 2,
}

impl EngineState {
    /// Decode a state stored in an atomic cell.
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Settling,
            _ => Self::Idle,
        }
    }
}

/// Receives the progress of a run on the picker's worker thread.
///
/// Callbacks passed to [`Picker::start`](super::Picker::start) and the
/// event channel of [`Picker::start_events`](super::Picker::start_events)
/// are both built on this trait. Implementations must not block for long:
/// the run's timer waits for every call to return.
pub trait RunObserver: Send {
    /// Called once per tick, in tick order.
    fn on_tick(&mut self, tick: &Tick);

    /// Called exactly once when the run settles, after the last tick.
    fn on_result(&mut self, name: &str);

    /// Called instead of [`RunObserver::on_result`] when the run is
    /// cancelled.
    fn on_cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_final() {
        let tick = Tick {
            frame: 0,
            name: "Ana".to_string(),
            elapsed: Duration::ZERO,
            interval: Duration::from_millis(50),
        };
        assert!(!PickEvent::Tick(tick).is_final());
        assert!(PickEvent::Picked("Ana".to_string()).is_final());
        assert!(PickEvent::Cancelled.is_final());
    }

    #[test]
    fn test_state_round_trip() {
        for state in [EngineState::Idle, EngineState::Running, EngineState::Settling] {
            assert_eq!(EngineState::from_u8(state as u8), state);
        }
    }

    #[test]
    fn test_outcome_name() {
        assert_eq!(RunOutcome::Picked("Bo".to_string()).name(), Some("Bo"));
        assert_eq!(RunOutcome::Cancelled.name(), None);
    }
}
