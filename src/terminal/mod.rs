//! Terminal presentation for selection runs.
//!
//! The picker never draws anything itself. [`NameDisplay`] is the terminal
//! front end: feed it ticks and the final pick, either directly or by
//! passing it to [`Picker::start_observed`](crate::Picker::start_observed).

mod display;

pub use display::{DisplayConfig, NameDisplay};
