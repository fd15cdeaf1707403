// Fixed-rate character reveal for generated reviews.
//
// Reveal progress is derived from wall-clock time since the text appeared,
// so it does not depend on how often the frame is drawn.

use std::time::Instant;

/// A text revealed one char at a time at `chars_per_second`.
#[derive(Debug, Clone)]
pub struct TypingText {
    text: String,
    total_chars: usize,
    chars_per_second: u32,
    started: Instant,
}

impl TypingText {
    pub fn new(text: &str, chars_per_second: u32, now: Instant) -> Self {
        TypingText {
            text: text.to_string(),
            total_chars: text.chars().count(),
            chars_per_second,
            started: now,
        }
    }

    /// Replace the text. A different text restarts the reveal from zero.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        if self.text != text {
            *self = TypingText::new(text, self.chars_per_second, now);
        }
    }

    /// Number of chars visible at `now`.
    pub fn revealed_chars(&self, now: Instant) -> usize {
        let elapsed_ms = now.saturating_duration_since(self.started).as_millis();
        let revealed = elapsed_ms * u128::from(self.chars_per_second) / 1000;
        usize::try_from(revealed).map_or(self.total_chars, |n| n.min(self.total_chars))
    }

    /// The visible prefix at `now`.
    pub fn visible(&self, now: Instant) -> &str {
        let count = self.revealed_chars(now);
        match self.text.char_indices().nth(count) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.revealed_chars(now) >= self.total_chars
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
