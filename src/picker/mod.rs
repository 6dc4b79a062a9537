//! Picker: The timed, multi-phase random selection engine.
//!
//! A run lives on its own worker thread and talks to the caller only
//! through callbacks or a crossbeam channel:
//!
//! ```text
//! ┌──────────────┐   start(&Roster)   ┌──────────────────┐
//! │    Caller    │ ─────────────────▶ │  Picker Thread   │
//! │  (UI, CLI)   │                    │ sample → notify  │
//! │              │ ◀───────────────── │ → sleep → slow   │
//! └──────────────┘  Tick ... Picked   └──────────────────┘
//!                                              │
//!                                     Clock / Sampler ports
//! ```
//!
//! Time and randomness are injected through [`Clock`] and [`Sampler`], so
//! a run can be replayed deterministically with a [`ManualClock`] and a
//! [`SeededSampler`].

mod clock;
mod engine;
mod messages;
mod sampler;
mod schedule;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Picker, PickerConfig, RunHandle, SettleMode};
pub use messages::{EngineState, PickEvent, RunObserver, RunOutcome, Tick};
pub use sampler::{Sampler, SeededSampler, SequenceSampler, ThreadRngSampler};
pub use schedule::{Band, Schedule, DEFAULT_BASE_INTERVAL, DEFAULT_TOTAL};
