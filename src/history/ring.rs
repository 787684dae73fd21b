/// Number of history slots shown above the input line
pub const HISTORY_LEN: usize = 15;

/// Alpha step between two neighbouring slots
const WEIGHT_STEP: u8 = 16;

/// Fixed-size shift register of previously spoken lines
///
/// Slot 0 holds the most recent line, slot `HISTORY_LEN - 1` the oldest one.
/// Slots are allocated once; pushing only moves text between them.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    slots: [String; HISTORY_LEN],
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| String::new()),
        }
    }

    /// Insert a line as slot 0, shifting everything one slot older.
    /// The oldest line falls off the end.
    pub fn push(&mut self, text: impl Into<String>) {
        self.slots.rotate_right(1);
        self.slots[0] = text.into();
    }

    /// Text of slot `index`, `None` outside the ring
    pub fn read(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Iterate slot texts from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    /// Display emphasis of a slot (alpha, 0-255). Older slots are dimmer.
    pub fn weight(index: usize) -> u8 {
        let steps = HISTORY_LEN.saturating_sub(index).min(usize::from(u8::MAX / WEIGHT_STEP));
        steps as u8 * WEIGHT_STEP
    }

    pub const fn capacity(&self) -> usize {
        HISTORY_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ring_is_empty() {
        let ring = HistoryRing::new();
        assert_eq!(ring.iter().count(), HISTORY_LEN);
        assert!(ring.iter().all(str::is_empty));
    }

    #[test]
    fn test_push_shifts_toward_oldest() {
        let mut ring = HistoryRing::new();
        ring.push("one");
        ring.push("two");
        ring.push("three");

        assert_eq!(ring.read(0), Some("three"));
        assert_eq!(ring.read(1), Some("two"));
        assert_eq!(ring.read(2), Some("one"));
        for i in 3..HISTORY_LEN {
            assert_eq!(ring.read(i), Some(""));
        }
    }

    #[test]
    fn test_full_ring_keeps_every_line() {
        let mut ring = HistoryRing::new();
        for i in 0..HISTORY_LEN {
            ring.push(format!("line {}", i));
        }

        assert_eq!(ring.read(0), Some("line 14"));
        assert_eq!(ring.read(HISTORY_LEN - 1), Some("line 0"));
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut ring = HistoryRing::new();
        for i in 0..=HISTORY_LEN {
            ring.push(format!("line {}", i));
        }

        assert!(ring.iter().all(|text| text != "line 0"));
        assert_eq!(ring.read(HISTORY_LEN - 1), Some("line 1"));
        assert_eq!(ring.read(0), Some("line 15"));
    }

    #[test]
    fn test_read_out_of_range() {
        let ring = HistoryRing::new();
        assert_eq!(ring.read(HISTORY_LEN), None);
    }

    #[test]
    fn test_weight_dims_with_age() {
        assert_eq!(HistoryRing::weight(0), 240);
        assert_eq!(HistoryRing::weight(HISTORY_LEN - 1), 16);
        for i in 1..HISTORY_LEN {
            assert!(HistoryRing::weight(i) < HistoryRing::weight(i - 1));
        }
    }
}
