//! Roster module: The names to pick from and where they come from.
//!
//! This module contains:
//! - [`Roster`]: The ordered list of participant names
//! - [`RosterStore`]: JSON file persistence, invoked explicitly by callers
//! - [`import`]: Reading names from CSV/TSV spreadsheet exports

#[allow(clippy::module_inception)]
mod roster;
mod store;
pub mod import;

pub use roster::Roster;
pub use store::{RosterStore, DEFAULT_STORE_PATH};
