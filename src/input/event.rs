use crate::idioms::ShortcutSlot;

/// Input delivered by the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter on the input line, carrying what it currently shows
    Submit(String),
    /// Up arrow: step back into history
    NavigateUp,
    /// Down arrow: step toward the live line
    NavigateDown,
    /// Function key bound to an idiom
    Idiom(ShortcutSlot),
    /// The user typed into the input line
    Edit(String),
    /// Escape
    Cancel,
    /// Click on the stage or window close
    Dismiss,
}

/// Whether the session continues after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
