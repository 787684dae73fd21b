//! Rendering of the history slots and the input line

mod console;
mod frame;

use anyhow::Result;

pub use console::ConsoleRenderer;
pub use frame::{Frame, SlotView};

/// Receives the visible state after every event
pub trait Renderer: Send {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}
