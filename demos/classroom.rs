//! Classroom Demo: A full animated pick drawn straight from the picker
//! thread.
//!
//! Names come from the command line, or a built-in class list.
//! The display itself is the run observer, so no event loop is needed.

use rollcall::{NameDisplay, Picker, Roster};
use std::io;

fn main() -> io::Result<()> {
    let mut roster: Roster = std::env::args().skip(1).collect();
    if roster.is_empty() {
        roster.add(["Ana", "Bo", "Cy", "Dara", "Eun-ji", "Femi", "张伟", "Zoë"]);
    }

    println!("Rollcall Demo");
    println!("=============");
    println!("{} names, 7 seconds.", roster.count());
    println!();

    let picker = Picker::new();
    let mut display = NameDisplay::new(io::stdout());
    display.begin()?;

    let run = picker
        .start_observed(&roster, display)
        .map_err(io::Error::other)?;

    // Edits after start do not reach the run in flight.
    roster.clear();

    if let Some(outcome) = run.join() {
        println!("Outcome: {outcome:?}");
    }
    Ok(())
}
