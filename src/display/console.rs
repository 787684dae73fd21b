use anyhow::Result;
use std::io::Write;

use super::{Frame, Renderer};

/// Base text color (dark green), scaled by slot weight
const TEXT_GREEN: u16 = 128;

/// Draws frames on a terminal: history oldest first, then the input line
pub struct ConsoleRenderer<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        writeln!(self.out)?;
        for slot in frame.slots().rev().filter(|slot| !slot.text.is_empty()) {
            if self.color {
                let green = TEXT_GREEN * u16::from(slot.weight) / 255;
                writeln!(self.out, "\x1b[38;2;0;{};0m  {}\x1b[0m", green, slot.text)?;
            } else {
                writeln!(self.out, "  {}", slot.text)?;
            }
        }
        writeln!(self.out, "> {}", frame.active_line)?;
        self.out.flush()?;
        Ok(())
    }
}
