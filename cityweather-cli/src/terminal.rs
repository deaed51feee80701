//! Terminal output region.

use std::io::{self, IsTerminal, Stdout, Write};

use cityweather_core::{Line, LineKind, OutputRegion};
use crossterm::{
    QueueableCommand,
    cursor::MoveToPreviousLine,
    style::{PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType},
};

/// Draws display states below the cursor. On a terminal the previous state is
/// erased first; otherwise every state is simply appended.
pub struct TerminalRegion<W: Write = Stdout> {
    out: W,
    styled: bool,
    drawn: u16,
}

impl TerminalRegion<Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let styled = out.is_terminal();
        Self::new(out, styled)
    }
}

impl<W: Write> TerminalRegion<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled, drawn: 0 }
    }

    /// Keep what is on screen; the next state is drawn below it.
    pub fn release(&mut self) {
        self.drawn = 0;
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: &Line) -> io::Result<()> {
        if !self.styled {
            return writeln!(self.out, "{}", line.text);
        }

        let text = line.text.as_str();
        let content = match line.kind {
            LineKind::Loading => text.dim(),
            LineKind::Error => text.red(),
            LineKind::Condition | LineKind::Temperature => text.bold(),
            LineKind::Detail => text.stylize(),
        };
        self.out.queue(PrintStyledContent(content))?;
        writeln!(self.out)
    }
}

impl<W: Write> OutputRegion for TerminalRegion<W> {
    fn replace(&mut self, lines: &[Line]) -> io::Result<()> {
        if self.styled && self.drawn > 0 {
            self.out
                .queue(MoveToPreviousLine(self.drawn))?
                .queue(Clear(ClearType::FromCursorDown))?;
        }

        for line in lines {
            self.print(line)?;
        }
        self.out.flush()?;

        let columns = if self.styled { terminal::size().ok().map(|(cols, _)| cols) } else { None };
        self.drawn = screen_rows(lines, columns);
        Ok(())
    }
}

/// Rows `lines` occupy once long lines wrap at `columns`.
fn screen_rows(lines: &[Line], columns: Option<u16>) -> u16 {
    let columns = usize::from(columns.unwrap_or(0));
    let rows: usize = lines
        .iter()
        .map(|line| {
            let width = line.text.chars().count();
            if columns == 0 || width == 0 { 1 } else { width.div_ceil(columns) }
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::{DisplayState, render};

    #[test]
    fn plain_output_appends_each_state() {
        let mut region = TerminalRegion::new(Vec::new(), false);
        region.replace(&render(&DisplayState::Loading)).expect("write");
        region
            .replace(&render(&DisplayState::Error("City not found!".into())))
            .expect("write");

        let out = String::from_utf8(region.into_inner()).expect("utf8");
        assert_eq!(out, "Loading weather data...\nCity not found!\n");
    }

    #[test]
    fn styled_output_erases_previous_state() {
        let mut region = TerminalRegion::new(Vec::new(), true);
        region.replace(&render(&DisplayState::Loading)).expect("write");
        let first_len = region.out.len();
        region
            .replace(&render(&DisplayState::Error("boom".into())))
            .expect("write");

        let out = String::from_utf8(region.into_inner()).expect("utf8");
        let second = &out[first_len..];
        // Cursor moves up one line and clears before redrawing.
        assert!(second.starts_with("\u{1b}[1F\u{1b}[J"), "{second:?}");
        assert!(second.contains("boom"));
    }

    #[test]
    fn wrapped_lines_count_every_row() {
        let message = "x".repeat(85);
        let lines = render(&DisplayState::Error(message));

        assert_eq!(screen_rows(&lines, Some(40)), 3);
        assert_eq!(screen_rows(&lines, Some(85)), 1);
        assert_eq!(screen_rows(&lines, None), 1);

        let loading = render(&DisplayState::Loading);
        assert_eq!(screen_rows(&loading, Some(10)), 3);
        assert_eq!(screen_rows(&[], Some(80)), 0);
    }

    #[test]
    fn release_keeps_previous_state() {
        let mut region = TerminalRegion::new(Vec::new(), true);
        region.replace(&render(&DisplayState::Loading)).expect("write");
        region.release();
        let first_len = region.out.len();
        region.replace(&render(&DisplayState::Loading)).expect("write");

        let out = String::from_utf8(region.into_inner()).expect("utf8");
        assert!(!out[first_len..].contains("\u{1b}[1F"));
    }
}
