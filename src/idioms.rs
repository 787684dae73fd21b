//! Canned phrases bound to the function keys

use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Number of addressable idiom shortcuts (F1-F12)
pub const SHORTCUT_COUNT: usize = 12;

/// Function key carrying an idiom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutSlot {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl ShortcutSlot {
    pub const ALL: [ShortcutSlot; SHORTCUT_COUNT] = [
        ShortcutSlot::F1,
        ShortcutSlot::F2,
        ShortcutSlot::F3,
        ShortcutSlot::F4,
        ShortcutSlot::F5,
        ShortcutSlot::F6,
        ShortcutSlot::F7,
        ShortcutSlot::F8,
        ShortcutSlot::F9,
        ShortcutSlot::F10,
        ShortcutSlot::F11,
        ShortcutSlot::F12,
    ];

    /// Slot for a zero-based index (0 = F1)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShortcutSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.index() + 1)
    }
}

impl FromStr for ShortcutSlot {
    type Err = String;

    /// Parses "F1".."F12", case insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)
            .ok_or_else(|| format!("unknown shortcut '{}'", s))
    }
}

/// Phrases used when the configuration names no idioms at all
pub const DEFAULT_IDIOMS: &[&str] = &["Yup", "Nope"];

/// Immutable mapping from function key to phrase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdiomTable {
    phrases: [Option<String>; SHORTCUT_COUNT],
}

impl IdiomTable {
    /// Build from an ordered phrase list: entry `i` binds to shortcut `i`.
    /// Keys past the list stay unbound, entries past F12 are dropped.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (index, phrase) in phrases.into_iter().enumerate() {
            match table.phrases.get_mut(index) {
                Some(slot) => *slot = Some(phrase.into()),
                None => {
                    warn!(
                        "Ignoring idiom #{}: only {} shortcuts available",
                        index + 1,
                        SHORTCUT_COUNT
                    );
                }
            }
        }
        table
    }

    pub fn lookup(&self, slot: ShortcutSlot) -> Option<&str> {
        self.phrases[slot.index()].as_deref()
    }

    /// Number of bound shortcuts
    pub fn len(&self) -> usize {
        self.phrases.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_position() {
        let table = IdiomTable::from_phrases(DEFAULT_IDIOMS.iter().copied());
        assert_eq!(table.lookup(ShortcutSlot::F1), Some("Yup"));
        assert_eq!(table.lookup(ShortcutSlot::F2), Some("Nope"));
        assert_eq!(table.lookup(ShortcutSlot::F3), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_extra_idioms_dropped() {
        let phrases: Vec<String> = (1..=14).map(|i| format!("phrase {}", i)).collect();
        let table = IdiomTable::from_phrases(phrases);
        assert_eq!(table.len(), SHORTCUT_COUNT);
        assert_eq!(table.lookup(ShortcutSlot::F12), Some("phrase 12"));
    }

    #[test]
    fn test_empty_list_binds_nothing() {
        let table = IdiomTable::from_phrases(Vec::<String>::new());
        assert!(table.is_empty());
        assert!(ShortcutSlot::ALL.iter().all(|s| table.lookup(*s).is_none()));
    }

    #[test]
    fn test_slot_index_roundtrip() {
        assert_eq!(ShortcutSlot::from_index(0), Some(ShortcutSlot::F1));
        assert_eq!(ShortcutSlot::from_index(11), Some(ShortcutSlot::F12));
        assert_eq!(ShortcutSlot::from_index(12), None);
        assert_eq!(ShortcutSlot::F7.index(), 6);
    }

    #[test]
    fn test_parse_slot_name() {
        assert_eq!("F1".parse::<ShortcutSlot>(), Ok(ShortcutSlot::F1));
        assert_eq!("f12".parse::<ShortcutSlot>(), Ok(ShortcutSlot::F12));
        assert!("F0".parse::<ShortcutSlot>().is_err());
        assert!("F13".parse::<ShortcutSlot>().is_err());
        assert!("x1".parse::<ShortcutSlot>().is_err());
        assert_eq!(ShortcutSlot::F10.to_string(), "F10");
    }
}
