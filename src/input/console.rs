//! Line-oriented front-end: one stdin line per event
//!
//! Plain text is submitted as typed. Lines starting with `/` are commands:
//!
//! | Line          | Effect                              |
//! |---------------|-------------------------------------|
//! | (empty)       | empty submission, ends the session  |
//! | `/up` `/down` | browse history                      |
//! | `/f1`-`/f12`  | insert an idiom                     |
//! | `/edit TEXT`  | replace the input line              |
//! | `/send`       | submit what the input line shows    |
//! | `/esc` `/quit`| cancel                              |
//! | `//TEXT`      | submit `/TEXT` literally            |

use crate::idioms::ShortcutSlot;

use super::event::InputEvent;

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(InputEvent),
    /// Submit the controller's current input line
    SubmitActive,
}

pub fn parse_line(line: &str) -> ConsoleCommand {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix('/') else {
        return ConsoleCommand::Event(InputEvent::Submit(line.to_string()));
    };

    let event = match command {
        "up" => InputEvent::NavigateUp,
        "down" => InputEvent::NavigateDown,
        "esc" | "quit" => InputEvent::Cancel,
        "send" => return ConsoleCommand::SubmitActive,
        "edit" => InputEvent::Edit(String::new()),
        _ => {
            if let Some(text) = command.strip_prefix("edit ") {
                InputEvent::Edit(text.to_string())
            } else if let Ok(slot) = command.parse::<ShortcutSlot>() {
                InputEvent::Idiom(slot)
            } else if command.starts_with('/') {
                InputEvent::Submit(command.to_string())
            } else {
                InputEvent::Submit(line.to_string())
            }
        }
    };

    ConsoleCommand::Event(event)
}
