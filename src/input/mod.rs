pub mod console;
mod event;
mod handler;

pub use event::{Flow, InputEvent};
pub use handler::InputController;
