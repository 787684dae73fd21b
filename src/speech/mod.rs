//! Text-to-speech: language tag dispatch and synthesis backends

mod backend;
mod dispatch;

pub use backend::{EspeakBackend, LogBackend, SpeechBackend, SpeechError};
pub use dispatch::{dispatch, Utterance, VoiceTable};
