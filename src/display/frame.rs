use crate::history::HistoryRing;

/// One history line as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub text: &'a str,
    /// Alpha, 255 = fully opaque
    pub weight: u8,
}

/// Everything visible after an event: the history slots and the input line
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    history: &'a HistoryRing,
    pub active_line: &'a str,
}

impl<'a> Frame<'a> {
    pub fn new(history: &'a HistoryRing, active_line: &'a str) -> Self {
        Self {
            history,
            active_line,
        }
    }

    /// Slots newest first
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = SlotView<'a>> + ExactSizeIterator + 'a {
        let history = self.history;
        (0..history.capacity()).map(move |index| SlotView {
            text: history.read(index).unwrap_or(""),
            weight: HistoryRing::weight(index),
        })
    }
}
