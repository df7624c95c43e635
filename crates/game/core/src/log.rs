//! In-game message sink.
//!
//! Core code pushes player-facing text through [`MessageLog`]; it never reads
//! the log back. [`MessageBuffer`] is the bounded in-memory implementation used
//! by the runtime and tests.
use std::collections::VecDeque;

/// Presentation class of a message. Renderers map tags to colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageTag {
    Neutral,
    Welcome,
    PlayerAttack,
    EnemyAttack,
    PlayerDie,
    EnemyDie,
    Invalid,
    Impossible,
    HealthRecovered,
    StatusEffect,
    Descend,
    Spiritual,
    LevelUp,
    BodyStatus,
}

/// Append-only sink for `(text, tag)` pairs.
pub trait MessageLog {
    fn add_message(&mut self, text: String, tag: MessageTag);
}

/// Single log line. Consecutive identical lines collapse into one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageEntry {
    pub text: String,
    pub tag: MessageTag,
    pub count: u32,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, tag: MessageTag) -> Self {
        Self {
            text: text.into(),
            tag,
            count: 1,
        }
    }

    /// Text with a repeat suffix, e.g. `"That way is blocked. (x3)"`.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// Circular buffer of messages shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageBuffer {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageBuffer {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.back()
    }

    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    /// True if any entry's text equals `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| entry.text == text)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl MessageLog for MessageBuffer {
    fn add_message(&mut self, text: String, tag: MessageTag) {
        if let Some(last) = self.entries.back_mut()
            && last.text == text
            && last.tag == tag
        {
            last.count += 1;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry::new(text, tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_stack() {
        let mut log = MessageBuffer::default();
        log.add_message("That way is blocked.".into(), MessageTag::Impossible);
        log.add_message("That way is blocked.".into(), MessageTag::Impossible);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|e| e.count), Some(2));
        assert_eq!(
            log.last().map(MessageEntry::full_text).as_deref(),
            Some("That way is blocked. (x2)")
        );
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = MessageBuffer::new(2);
        log.add_message("a".into(), MessageTag::Neutral);
        log.add_message("b".into(), MessageTag::Neutral);
        log.add_message("c".into(), MessageTag::Neutral);
        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }
}
