/// How far back into the history the input line currently mirrors
///
/// `None` means the input line is the live buffer. `Some(k)` means it shows
/// a copy of history slot `k`. The position never leaves `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    position: Option<usize>,
    len: usize,
}

impl NavigationCursor {
    pub fn new(len: usize) -> Self {
        Self {
            position: None,
            len,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_browsing(&self) -> bool {
        self.position.is_some()
    }

    /// Step one line older, stopping at the oldest slot
    pub fn up(&mut self) -> Option<usize> {
        let last = self.len.checked_sub(1)?;
        let next = self.position.map_or(0, |k| (k + 1).min(last));
        self.position = Some(next);
        self.position
    }

    /// Step one line newer. Computed as `max(cursor, 0) - 1`, so from the
    /// live buffer and from slot 0 alike the cursor lands back on `None`.
    pub fn down(&mut self) -> Option<usize> {
        self.position = self.position.unwrap_or(0).checked_sub(1);
        self.position
    }

    pub fn reset(&mut self) {
        self.position = None;
    }
}
