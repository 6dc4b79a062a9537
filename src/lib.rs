//! # Rollcall
//!
//! An animated random name caller for classrooms.
//!
//! Given a roster, a run cycles through random names on a background
//! thread, slowing down over a few seconds, then settles on a final pick.
//!
//! ## Core Concepts
//!
//! - **Roster**: An ordered list of names, owned by the caller
//! - **Picker**: The timed selection engine; one run at a time
//! - **Schedule**: The deceleration table that makes a run slow down
//! - **Snapshot semantics**: A run samples a value copy of the roster taken
//!   at start, so editing the roster mid-run is safe
//!
//! ## Example
//!
//! ```rust,no_run
//! use rollcall::{Picker, Roster};
//!
//! let roster = Roster::from_names(["Ana", "Bo", "Cy"]);
//! let picker = Picker::new();
//!
//! let run = picker
//!     .start(
//!         &roster,
//!         |name| println!("... {name}"),
//!         |name| println!("Picked: {name}"),
//!     )
//!     .expect("roster is not empty");
//! run.join();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod picker;
pub mod roster;
pub mod terminal;

// Re-exports for convenience
pub use error::{ConfigError, PickError, RosterError};
pub use picker::{
    Clock, EngineState, ManualClock, PickEvent, Picker, PickerConfig, RunHandle, RunObserver,
    RunOutcome, Sampler, Schedule, SeededSampler, SettleMode, SystemClock, Tick,
};
pub use roster::{Roster, RosterStore};
pub use terminal::{DisplayConfig, NameDisplay};
