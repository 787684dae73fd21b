use tracing::{debug, info, warn};

use crate::config::Config;
use crate::display::Frame;
use crate::history::{HistoryRing, NavigationCursor, HISTORY_LEN};
use crate::idioms::{IdiomTable, ShortcutSlot};
use crate::speech::{dispatch, SpeechBackend, VoiceTable};

use super::event::{Flow, InputEvent};

/// Owns the input line, its history and the speech backend, and applies
/// front-end events to them one at a time
pub struct InputController {
    history: HistoryRing,
    cursor: NavigationCursor,
    idioms: IdiomTable,
    voices: VoiceTable,
    active_line: String,
    speech: Box<dyn SpeechBackend>,
}

impl InputController {
    pub fn new(idioms: IdiomTable, voices: VoiceTable, speech: Box<dyn SpeechBackend>) -> Self {
        Self {
            history: HistoryRing::new(),
            cursor: NavigationCursor::new(HISTORY_LEN),
            idioms,
            voices,
            active_line: String::new(),
            speech,
        }
    }

    pub fn from_config(config: &Config, speech: Box<dyn SpeechBackend>) -> Self {
        Self::new(config.idiom_table(), config.voice_table(), speech)
    }

    /// Apply one event
    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        debug!("Handling {:?}", event);

        match event {
            InputEvent::Submit(text) => return self.submit(text),
            InputEvent::NavigateUp => self.navigate_up(),
            InputEvent::NavigateDown => self.navigate_down(),
            InputEvent::Idiom(slot) => self.apply_idiom(slot),
            InputEvent::Edit(text) => self.active_line = text,
            InputEvent::Cancel => {
                info!("Cancelled, ending session");
                return Flow::Quit;
            }
            InputEvent::Dismiss => {
                info!("Dismissed, ending session");
                return Flow::Quit;
            }
        }

        Flow::Continue
    }

    pub fn active_line(&self) -> &str {
        &self.active_line
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.position()
    }

    /// Current display contents for the renderer
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(&self.history, &self.active_line)
    }

    /// Speak a line and move it into history. An empty line ends the session.
    fn submit(&mut self, text: String) -> Flow {
        if text.is_empty() {
            info!("Empty submission, ending session");
            return Flow::Quit;
        }

        self.speak(&text);
        self.history.push(text);
        self.active_line.clear();
        self.cursor.reset();
        Flow::Continue
    }

    /// Stop handing lines to the speech backend
    pub fn close_speech(&mut self) {
        self.speech.close();
    }

    fn speak(&mut self, text: &str) {
        let utterance = dispatch(text, &self.voices);
        if utterance.is_silent() {
            debug!("Nothing to say for {:?}", text);
            if let Some(voice) = utterance.voice {
                self.speech.select_voice(voice);
            }
            return;
        }

        info!("Speaking: {}", utterance.text);
        if let Err(e) = self.speech.speak(utterance.text, utterance.voice) {
            warn!("Speech failed: {}", e);
        }
    }

    fn navigate_up(&mut self) {
        if let Some(index) = self.cursor.up() {
            self.show_history(index);
        }
    }

    fn navigate_down(&mut self) {
        match self.cursor.down() {
            Some(index) => self.show_history(index),
            None => self.active_line.clear(),
        }
    }

    fn show_history(&mut self, index: usize) {
        self.active_line.clear();
        if let Some(text) = self.history.read(index) {
            self.active_line.push_str(text);
        }
    }

    fn apply_idiom(&mut self, slot: ShortcutSlot) {
        match self.idioms.lookup(slot) {
            Some(phrase) => {
                debug!("{} -> {}", slot, phrase);
                self.active_line = phrase.to_string();
            }
            None => debug!("{} has no idiom", slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idioms::DEFAULT_IDIOMS;
    use crate::speech::SpeechError;
    use std::sync::{Arc, Mutex};

    /// Lines with the voice active when they were spoken
    type Spoken = Arc<Mutex<Vec<(String, Option<String>)>>>;

    struct RecordingBackend {
        spoken: Spoken,
        voice: Option<String>,
    }

    impl SpeechBackend for RecordingBackend {
        fn select_voice(&mut self, voice: &str) {
            self.voice = Some(voice.to_string());
        }

        fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<(), SpeechError> {
            if let Some(voice) = voice {
                self.select_voice(voice);
            }
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), self.voice.clone()));
            Ok(())
        }
    }

    fn controller() -> (InputController, Spoken) {
        let spoken = Spoken::default();
        let voices = VoiceTable::new(
            vec![
                ("en".to_string(), "english".to_string()),
                ("de".to_string(), "german".to_string()),
            ],
            None,
        );
        let controller = InputController::new(
            IdiomTable::from_phrases(DEFAULT_IDIOMS.iter().copied()),
            voices,
            Box::new(RecordingBackend {
                spoken: spoken.clone(),
                voice: None,
            }),
        );
        (controller, spoken)
    }

    fn submit(controller: &mut InputController, text: &str) -> Flow {
        controller.handle_event(InputEvent::Submit(text.to_string()))
    }

    #[test]
    fn test_submit_speaks_and_records() {
        let (mut controller, spoken) = controller();

        assert_eq!(submit(&mut controller, "<de>Guten Tag"), Flow::Continue);

        assert_eq!(
            spoken.lock().unwrap().as_slice(),
            &[("Guten Tag".to_string(), Some("german".to_string()))]
        );
        // History keeps the line as typed
        assert_eq!(controller.history().read(0), Some("<de>Guten Tag"));
        assert_eq!(controller.active_line(), "");
        assert_eq!(controller.cursor(), None);
    }

    #[test]
    fn test_empty_submit_quits() {
        let (mut controller, spoken) = controller();
        assert_eq!(submit(&mut controller, ""), Flow::Quit);
        assert!(spoken.lock().unwrap().is_empty());
        assert!(controller.history().iter().all(str::is_empty));
    }

    #[test]
    fn test_whitespace_submit_is_recorded_but_silent() {
        let (mut controller, spoken) = controller();
        assert_eq!(submit(&mut controller, "   "), Flow::Continue);
        assert!(spoken.lock().unwrap().is_empty());
        assert_eq!(controller.history().read(0), Some("   "));
    }

    #[test]
    fn test_silent_tagged_line_switches_voice() {
        let (mut controller, spoken) = controller();

        submit(&mut controller, "<de>   ");
        submit(&mut controller, "<fr>Bonjour");

        assert_eq!(
            spoken.lock().unwrap().as_slice(),
            &[("Bonjour".to_string(), Some("german".to_string()))]
        );
    }

    #[test]
    fn test_cancel_and_dismiss_quit() {
        let (mut controller, _) = controller();
        assert_eq!(controller.handle_event(InputEvent::Cancel), Flow::Quit);
        assert_eq!(controller.handle_event(InputEvent::Dismiss), Flow::Quit);
    }

    #[test]
    fn test_browse_history() {
        let (mut controller, _) = controller();
        submit(&mut controller, "first");
        submit(&mut controller, "second");

        controller.handle_event(InputEvent::NavigateUp);
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(controller.active_line(), "second");

        controller.handle_event(InputEvent::NavigateUp);
        assert_eq!(controller.active_line(), "first");

        // Past the last line the slots are empty
        controller.handle_event(InputEvent::NavigateUp);
        assert_eq!(controller.cursor(), Some(2));
        assert_eq!(controller.active_line(), "");

        controller.handle_event(InputEvent::NavigateDown);
        assert_eq!(controller.active_line(), "first");

        controller.handle_event(InputEvent::NavigateDown);
        controller.handle_event(InputEvent::NavigateDown);
        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.active_line(), "");
    }

    #[test]
    fn test_down_when_idle_clears_line() {
        let (mut controller, _) = controller();
        controller.handle_event(InputEvent::Edit("half typed".to_string()));

        controller.handle_event(InputEvent::NavigateDown);

        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.active_line(), "");
    }

    #[test]
    fn test_up_clamps_at_oldest_slot() {
        let (mut controller, _) = controller();
        for _ in 0..HISTORY_LEN + 3 {
            controller.handle_event(InputEvent::NavigateUp);
        }
        assert_eq!(controller.cursor(), Some(HISTORY_LEN - 1));
    }

    #[test]
    fn test_submit_while_browsing_resets_cursor() {
        let (mut controller, spoken) = controller();
        submit(&mut controller, "hello");
        controller.handle_event(InputEvent::NavigateUp);

        let shown = controller.active_line().to_string();
        submit(&mut controller, &shown);

        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.history().read(0), Some("hello"));
        assert_eq!(controller.history().read(1), Some("hello"));
        assert_eq!(spoken.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_idiom_replaces_line() {
        let (mut controller, spoken) = controller();
        controller.handle_event(InputEvent::Edit("something".to_string()));

        controller.handle_event(InputEvent::Idiom(ShortcutSlot::F1));
        assert_eq!(controller.active_line(), "Yup");

        controller.handle_event(InputEvent::Idiom(ShortcutSlot::F3));
        assert_eq!(controller.active_line(), "Yup");

        assert_eq!(controller.cursor(), None);
        assert!(spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn test_idiom_while_browsing_keeps_cursor() {
        let (mut controller, _) = controller();
        submit(&mut controller, "hello");
        controller.handle_event(InputEvent::NavigateUp);

        controller.handle_event(InputEvent::Idiom(ShortcutSlot::F2));

        assert_eq!(controller.active_line(), "Nope");
        assert_eq!(controller.cursor(), Some(0));
    }
}
