//! Rollcall command line: manage the roster and run the picker in a
//! terminal.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rollcall::roster::{import, DEFAULT_STORE_PATH};
use rollcall::{
    NameDisplay, PickError, PickEvent, Picker, PickerConfig, Roster, RosterStore, SeededSampler,
    SettleMode,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(version, about = "Animated random name caller for classrooms")]
struct Cli {
    #[arg(
        long,
        env = "ROLLCALL_STORE",
        help = "Path of the saved roster",
        default_value = DEFAULT_STORE_PATH
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the animated pick.
    Pick {
        #[arg(long, help = "Length of the animation in milliseconds", default_value_t = 7000)]
        duration_ms: u64,
        #[arg(long, help = "Seed for a reproducible pick")]
        seed: Option<u64>,
        #[arg(long, help = "Settle on the last name shown instead of a fresh sample")]
        last_shown: bool,
        #[arg(long, help = "Only print the final pick")]
        quiet: bool,
        #[arg(long, help = "Print the tick intervals without animating")]
        dry_run: bool,
    },
    /// Import names from the first column of a workbook, CSV or TSV file.
    Import {
        file: PathBuf,
        #[arg(long, help = "Append to the saved roster instead of replacing it")]
        append: bool,
    },
    /// Add names to the saved roster.
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the saved roster.
    List,
    /// Remove every name from the saved roster.
    Clear,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = RosterStore::new(cli.store);

    match cli.command {
        Command::Pick {
            duration_ms,
            seed,
            last_shown,
            quiet,
            dry_run,
        } => {
            let settle = if last_shown {
                SettleMode::LastShown
            } else {
                SettleMode::Independent
            };
            let config = PickerConfig::default()
                .with_total_duration(Duration::from_millis(duration_ms))
                .with_settle(settle);
            let mut picker = Picker::with_config(config).context("invalid timing")?;
            if let Some(seed) = seed {
                picker = picker.with_sampler(Arc::new(SeededSampler::new(seed)));
            }

            if dry_run {
                print_schedule(&picker);
                return Ok(());
            }
            pick(&picker, &store.load_or_default(), quiet)
        }
        Command::Import { file, append } => {
            let (imported, roster) = import_names(&store, &file, append)?;
            println!("Imported {imported} names ({} in roster)", roster.count());
            Ok(())
        }
        Command::Add { names } => {
            let (added, roster) = add_names(&store, names)?;
            println!("Added {added} names ({} in roster)", roster.count());
            Ok(())
        }
        Command::List => {
            let roster = store.load_or_default();
            if roster.is_empty() {
                println!("Roster is empty, import some names first");
            }
            for (i, name) in roster.iter().enumerate() {
                println!("{:>3}. {name}", i + 1);
            }
            Ok(())
        }
        Command::Clear => {
            clear_roster(&store)?;
            println!("Roster cleared");
            Ok(())
        }
    }
}

/// Run one animated pick, drawing it on stdout.
fn pick(picker: &Picker, roster: &Roster, quiet: bool) -> anyhow::Result<()> {
    let (handle, events) = match picker.start_events(roster) {
        Ok(run) => run,
        Err(PickError::EmptyRoster) => {
            bail!("roster is empty, run `rollcall import <file>` first")
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut display = NameDisplay::new(stdout.lock());
    if !quiet {
        display.begin()?;
    }

    for event in &events {
        match event {
            PickEvent::Tick(tick) if !quiet => display.show_text(&tick.name)?,
            PickEvent::Tick(_) => {}
            PickEvent::Picked(name) if quiet => println!("{name}"),
            PickEvent::Picked(name) => {
                display.show_result(&name)?;
                display.pulse(&name)?;
            }
            PickEvent::Cancelled => display.show_text("Cancelled")?,
        }
    }

    if !quiet {
        display.end()?;
    }
    if handle.join().is_none() {
        bail!("picker thread panicked");
    }
    Ok(())
}

/// Import `file` into the store, replacing the saved roster unless
/// `append` is set. Returns the number of names read and the new roster.
fn import_names(
    store: &RosterStore,
    file: &Path,
    append: bool,
) -> anyhow::Result<(usize, Roster)> {
    let names = import::import_file(file)
        .with_context(|| format!("failed to import {}", file.display()))?;
    let imported = names.len();

    let mut roster = if append {
        store.load_or_default()
    } else {
        Roster::new()
    };
    roster.add(names);
    save(store, &roster)?;
    Ok((imported, roster))
}

/// Add names to the saved roster. Returns how many were kept and the new
/// roster.
fn add_names(store: &RosterStore, names: Vec<String>) -> anyhow::Result<(usize, Roster)> {
    let mut roster = store.load_or_default();
    let before = roster.count();
    roster.add(names);
    save(store, &roster)?;
    Ok((roster.count() - before, roster))
}

fn clear_roster(store: &RosterStore) -> anyhow::Result<()> {
    save(store, &Roster::new())
}

fn save(store: &RosterStore, roster: &Roster) -> anyhow::Result<()> {
    store
        .save(roster)
        .with_context(|| format!("failed to save {}", store.path().display()))
}

fn print_schedule(picker: &Picker) {
    let intervals = picker.config().schedule.simulate();
    let mut elapsed = Duration::ZERO;
    for (frame, interval) in intervals.iter().enumerate() {
        println!("{frame:>4} {:>6}ms {:>5}ms", elapsed.as_millis(), interval.as_millis());
        elapsed += *interval;
    }
    println!("{} ticks over {}ms", intervals.len(), elapsed.as_millis());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store(dir: &tempfile::TempDir) -> RosterStore {
        RosterStore::new(dir.path().join("students.json"))
    }

    fn names(roster: &Roster) -> Vec<&str> {
        roster.iter().collect()
    }

    #[test]
    fn test_import_replaces_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);
        store.save(&Roster::from_names(["Old"])).unwrap();
        let file = dir.path().join("class.csv");
        fs::write(&file, "Ana,1\nBo,2\n").unwrap();

        let (imported, roster) = import_names(&store, &file, false).unwrap();
        assert_eq!(imported, 2);
        assert_eq!(names(&roster), ["Ana", "Bo"]);
        assert_eq!(store.load().unwrap(), roster);
    }

    #[test]
    fn test_import_append_keeps_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);
        store.save(&Roster::from_names(["Old"])).unwrap();
        let file = dir.path().join("class.csv");
        fs::write(&file, "Ana\n").unwrap();

        let (imported, roster) = import_names(&store, &file, true).unwrap();
        assert_eq!(imported, 1);
        assert_eq!(names(&store.load().unwrap()), ["Old", "Ana"]);
        assert_eq!(roster.count(), 2);
    }

    #[test]
    fn test_failed_import_leaves_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);
        store.save(&Roster::from_names(["Old"])).unwrap();
        let file = dir.path().join("empty.csv");
        fs::write(&file, "\n").unwrap();

        assert!(import_names(&store, &file, false).is_err());
        assert_eq!(names(&store.load().unwrap()), ["Old"]);
    }

    #[test]
    fn test_add_counts_kept_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);

        let (added, _) = add_names(&store, vec!["Ana".into(), "  ".into()]).unwrap();
        assert_eq!(added, 1);
        let (added, roster) = add_names(&store, vec!["Bo".into(), "Ana".into()]).unwrap();
        assert_eq!(added, 2);
        assert_eq!(names(&roster), ["Ana", "Bo", "Ana"]);
        assert_eq!(store.load().unwrap(), roster);
    }

    #[test]
    fn test_clear_saves_empty_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);
        add_names(&store, vec!["Ana".into()]).unwrap();

        clear_roster(&store).unwrap();
        assert!(store.exists());
        assert!(store.load().unwrap().is_empty());
    }
}
