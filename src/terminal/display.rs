//! `NameDisplay`: Single-line terminal presenter for a selection run.
//!
//! Every update redraws one line in place: move to column 0, clear the
//! line, print the name centred in the terminal width. The final pick is
//! drawn bold and green, and can be pulsed for emphasis.

use crate::picker::{RunObserver, Tick};
use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width used when the terminal size cannot be queried.
const FALLBACK_WIDTH: u16 = 80;

/// Styling and timing for the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Text shown before the final pick.
    pub result_prefix: String,
    /// Color of the final pick.
    pub result_color: Color,
    /// Number of emphasis flashes in [`NameDisplay::pulse`].
    pub pulses: u32,
    /// How long each flash is held.
    pub pulse_on: Duration,
    /// Pause between flashes.
    pub pulse_off: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            result_prefix: "Picked: ".to_string(),
            // #219453
            result_color: Color::Rgb {
                r: 33,
                g: 148,
                b: 83,
            },
            pulses: 2,
            pulse_on: Duration::from_millis(120),
            pulse_off: Duration::from_millis(80),
        }
    }
}

/// Line style for a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Plain,
    Result,
    Flash,
}

/// Renders picks on a single terminal line.
///
/// A display dropped between [`begin`](Self::begin) and
/// [`end`](Self::end) shows the cursor again.
pub struct NameDisplay<W: Write> {
    out: W,
    width: u16,
    config: DisplayConfig,
    cursor_hidden: bool,
}

impl<W: Write> NameDisplay<W> {
    /// Create a display sized to the current terminal.
    pub fn new(out: W) -> Self {
        let width = terminal::size().map_or(FALLBACK_WIDTH, |(w, _)| w);
        Self::with_width(out, width)
    }

    /// Create a display with a fixed width in columns.
    pub fn with_width(out: W, width: u16) -> Self {
        Self {
            out,
            width: width.max(1),
            config: DisplayConfig::default(),
            cursor_hidden: false,
        }
    }

    /// Replace the styling.
    #[must_use]
    pub fn with_config(mut self, config: DisplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the display width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get a reference to the writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Get a mutable reference to the writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Whether the cursor is hidden by [`begin`](Self::begin).
    pub const fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Hide the cursor while a run animates.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn begin(&mut self) -> io::Result<()> {
        self.cursor_hidden = true;
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    /// Move past the display line and show the cursor again.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn end(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"), Show)?;
        self.out.flush()?;
        self.cursor_hidden = false;
        Ok(())
    }

    /// Show an intermediate name or a status message.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn show_text(&mut self, text: &str) -> io::Result<()> {
        self.draw(text, LineStyle::Plain)
    }

    /// Show the final pick.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn show_result(&mut self, name: &str) -> io::Result<()> {
        let text = format!("{}{name}", self.config.result_prefix);
        self.draw(&text, LineStyle::Result)
    }

    /// Flash the final pick a few times. Blocks for the whole animation.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn pulse(&mut self, name: &str) -> io::Result<()> {
        let text = format!("{}{name}", self.config.result_prefix);
        for _ in 0..self.config.pulses {
            self.draw(&text, LineStyle::Flash)?;
            thread::sleep(self.config.pulse_on);
            self.draw(&text, LineStyle::Result)?;
            thread::sleep(self.config.pulse_off);
        }
        Ok(())
    }

    /// Redraw the line.
    fn draw(&mut self, text: &str, style: LineStyle) -> io::Result<()> {
        let (text, pad) = fit(text, self.width);

        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(" ".repeat(pad))
        )?;
        match style {
            LineStyle::Plain => {}
            LineStyle::Result => queue!(
                self.out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(self.config.result_color)
            )?,
            LineStyle::Flash => queue!(
                self.out,
                SetAttribute(Attribute::Bold),
                SetAttribute(Attribute::Reverse),
                SetForegroundColor(self.config.result_color)
            )?,
        }
        queue!(
            self.out,
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )?;
        self.out.flush()
    }
}

impl<W: Write> Drop for NameDisplay<W> {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = queue!(self.out, Print("\r\n"), Show);
            let _ = self.out.flush();
        }
    }
}

impl<W: Write + Send> RunObserver for NameDisplay<W> {
    fn on_tick(&mut self, tick: &Tick) {
        if let Err(e) = self.show_text(&tick.name) {
            tracing::debug!(error = %e, "failed to draw tick");
        }
    }

    fn on_result(&mut self, name: &str) {
        let drawn = self
            .show_result(name)
            .and_then(|()| self.pulse(name))
            .and_then(|()| self.end());
        if let Err(e) = drawn {
            tracing::debug!(error = %e, "failed to draw result");
        }
    }

    fn on_cancel(&mut self) {
        if let Err(e) = self.show_text("Cancelled").and_then(|()| self.end()) {
            tracing::debug!(error = %e, "failed to draw cancellation");
        }
    }
}

/// Truncate `text` to `width` columns on grapheme boundaries and compute
/// the left padding that centres it.
fn fit(text: &str, width: u16) -> (&str, usize) {
    let width = usize::from(width);
    let mut used = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = grapheme.width();
        if used + w > width {
            break;
        }
        used += w;
        end = offset + grapheme.len();
    }
    (&text[..end], (width - used) / 2)
}
