use core::fmt::Write as _;

pub const ENTRY_TEXT_CAPACITY: usize = 32;
pub const DEFAULT_ENTRY_MAX_LEN: usize = 18;

const STYLE_SMALL_FROM_LEN: usize = 12;
const STYLE_SMALLER_FROM_LEN: usize = 15;

pub type EntryText = heapless::String<ENTRY_TEXT_CAPACITY>;

/// Font size class of the entry display, shrinking as the text grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Small,
    Smaller,
}

impl TextStyle {
    pub const fn for_len(len: usize) -> Self {
        if len < STYLE_SMALL_FROM_LEN {
            Self::Normal
        } else if len < STYLE_SMALLER_FROM_LEN {
            Self::Small
        } else {
            Self::Smaller
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Small => "small",
            Self::Smaller => "smaller",
        }
    }
}

/// Text of the central entry display.
///
/// Typed characters stop at `max_len`; messages written with [`show`] may
/// use the whole buffer.
///
/// [`show`]: EntryBuffer::show
#[derive(Clone, Debug)]
pub struct EntryBuffer {
    text: EntryText,
    max_len: usize,
}

impl EntryBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: EntryText::new(),
            max_len: max_len.min(ENTRY_TEXT_CAPACITY),
        }
    }

    pub fn text(&self) -> &EntryText {
        &self.text
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn style(&self) -> TextStyle {
        TextStyle::for_len(self.text.len())
    }

    pub fn append(&mut self, ch: char) -> bool {
        if self.text.len() >= self.max_len {
            return false;
        }
        self.text.push(ch).is_ok()
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        changed
    }

    /// Replaces the whole text, truncating at buffer capacity.
    pub fn show(&mut self, message: &str) {
        self.text.clear();
        for ch in message.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn show_level(&mut self, level: u16) {
        self.text.clear();
        if write!(self.text, "level {level}").is_err() {
            log::warn!("game: level text truncated level={level}");
        }
    }
}

impl Default for EntryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRY_MAX_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_thresholds() {
        assert_eq!(TextStyle::for_len(0), TextStyle::Normal);
        assert_eq!(TextStyle::for_len(11), TextStyle::Normal);
        assert_eq!(TextStyle::for_len(12), TextStyle::Small);
        assert_eq!(TextStyle::for_len(14), TextStyle::Small);
        assert_eq!(TextStyle::for_len(15), TextStyle::Smaller);
    }

    #[test]
    fn append_stops_at_max_len() {
        let mut entry = EntryBuffer::new(3);
        assert!(entry.append('#'));
        assert!(entry.append('+'));
        assert!(entry.append('*'));
        assert!(!entry.append('#'));
        assert_eq!(entry.as_str(), "#+*");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut entry = EntryBuffer::default();
        assert!(!entry.backspace());
        entry.append('+');
        assert!(entry.backspace());
        assert_eq!(entry.as_str(), "");
    }

    #[test]
    fn show_ignores_append_limit_but_not_capacity() {
        let mut entry = EntryBuffer::new(4);
        entry.show("Congratulations!");
        assert_eq!(entry.as_str(), "Congratulations!");
        assert_eq!(entry.style(), TextStyle::Smaller);

        let long = "x".repeat(ENTRY_TEXT_CAPACITY + 8);
        entry.show(&long);
        assert_eq!(entry.as_str().len(), ENTRY_TEXT_CAPACITY);
    }

    #[test]
    fn show_level_formats_number() {
        let mut entry = EntryBuffer::default();
        entry.show_level(12);
        assert_eq!(entry.as_str(), "level 12");
        entry.show_level(u16::MAX);
        assert_eq!(entry.as_str(), "level 65535");
        assert!(entry.clear());
        assert!(!entry.clear());
    }
}
