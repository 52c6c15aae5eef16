//! Terminal output through crossterm.
//!
//! [`write_lines`] maps view styles onto terminal attributes for any writer.
//! [`Terminal`] owns raw mode and the alternate screen for the live view and
//! restores both when dropped, so panics and early returns leave the shell
//! usable.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use dining_core::Tint;

use crate::view::{Line, ListView, Span, Style};

pub(crate) fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Green => Color::Green,
        Tint::Red => Color::Red,
        Tint::Orange => Color::AnsiValue(208),
    }
}

/// Queues `lines` on `out`, ending each with `newline`. Styles are dropped
/// when `color` is false. The caller flushes.
pub(crate) fn write_lines<W: Write>(
    out: &mut W,
    lines: &[Line],
    color: bool,
    newline: &str,
) -> io::Result<()> {
    for line in lines {
        for span in line {
            let style = if color { span.style } else { Style::Plain };
            match style {
                Style::Plain => queue!(out, Print(&span.text))?,
                Style::Heading => queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?,
                Style::Muted => queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?,
                Style::Tint(tint) => queue!(
                    out,
                    SetForegroundColor(tint_color(tint)),
                    Print(&span.text),
                    ResetColor
                )?,
            }
        }
        queue!(out, Print(newline))?;
    }
    Ok(())
}

/// Raw-mode alternate screen for the live view.
pub(crate) struct Terminal {
    out: Stdout,
    color: bool,
}

impl Terminal {
    pub(crate) fn enter(color: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        tracing::debug!("terminal in raw mode");
        Ok(Self { out, color })
    }

    /// Replaces the screen with `view` and its key legend.
    pub(crate) fn draw(&mut self, view: &ListView) -> io::Result<()> {
        let mut lines = view.lines();
        lines.push(vec![Span::new(view.action_legend(), Style::Muted)]);

        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // raw mode turns off output post-processing, so "\n" alone does not return the cursor
        write_lines(&mut self.out, &lines, self.color, "\r\n")?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "failed to leave alternate screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
    }
}
