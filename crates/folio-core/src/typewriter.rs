//! Typewriter text animation
//!
//! Cycles through a list of phrases, typing and deleting one character per
//! tick. The animator never sleeps itself: every `tick()` returns the delay
//! the caller should wait before the next one.

use std::time::Duration;

use tracing::debug;

use crate::{Error, Result};

/// Delays between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Delay after typing a character
    pub type_speed: Duration,
    /// Delay after deleting a character
    pub delete_speed: Duration,
    /// Pause once a phrase is fully typed
    pub pause_time: Duration,
    /// Pause after a phrase is fully deleted, before the next one starts
    pub inter_phrase_delay: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(100),
            delete_speed: Duration::from_millis(50),
            pause_time: Duration::from_millis(2000),
            inter_phrase_delay: Duration::from_millis(500),
        }
    }
}

/// Direction the animation is currently moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMode {
    Typing,
    Deleting,
}

/// State snapshot returned by every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub displayed_len: usize,
    pub mode: TypeMode,
    pub phrase_index: usize,
    /// How long to wait before calling `tick()` again
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TypewriterAnimator {
    phrases: Vec<String>,
    /// Character count of each phrase, cached so ticks never rescan
    lengths: Vec<usize>,
    phrase_index: usize,
    displayed_len: usize,
    mode: TypeMode,
    /// Phrase fully typed; the next tick starts deleting
    pending_delete: bool,
    timing: TypewriterTiming,
}

impl TypewriterAnimator {
    /// Create an animator positioned before the first character of the first phrase.
    ///
    /// Fails with `InvalidConfiguration` if `phrases` is empty or any phrase is empty.
    pub fn new<I, S>(phrases: I, timing: TypewriterTiming) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();

        if phrases.is_empty() {
            return Err(Error::InvalidConfiguration(
                "typewriter needs at least one phrase".to_string(),
            ));
        }
        if let Some(idx) = phrases.iter().position(|p| p.is_empty()) {
            return Err(Error::InvalidConfiguration(format!(
                "typewriter phrase #{} is empty",
                idx
            )));
        }

        let lengths = phrases.iter().map(|p| p.chars().count()).collect();

        Ok(Self {
            phrases,
            lengths,
            phrase_index: 0,
            displayed_len: 0,
            mode: TypeMode::Typing,
            pending_delete: false,
            timing,
        })
    }

    /// Create with default timing
    pub fn with_defaults<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(phrases, TypewriterTiming::default())
    }

    /// Advance by exactly one character
    pub fn tick(&mut self) -> Tick {
        let full_len = self.lengths[self.phrase_index];

        let delay = match self.mode {
            TypeMode::Typing if self.pending_delete => {
                // The mode switch shares its tick with the first deletion
                self.pending_delete = false;
                self.mode = TypeMode::Deleting;
                self.delete_one()
            }
            TypeMode::Typing => {
                self.displayed_len = (self.displayed_len + 1).min(full_len);
                if self.displayed_len == full_len {
                    self.pending_delete = true;
                    self.timing.pause_time
                } else {
                    self.timing.type_speed
                }
            }
            TypeMode::Deleting => self.delete_one(),
        };

        self.snapshot(delay)
    }

    fn delete_one(&mut self) -> Duration {
        self.displayed_len = self.displayed_len.saturating_sub(1);
        if self.displayed_len > 0 {
            return self.timing.delete_speed;
        }

        self.mode = TypeMode::Typing;
        self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
        debug!(phrase_index = self.phrase_index, "typewriter moved to next phrase");
        self.timing.inter_phrase_delay
    }

    fn snapshot(&self, delay: Duration) -> Tick {
        Tick {
            displayed_len: self.displayed_len,
            mode: self.mode,
            phrase_index: self.phrase_index,
            delay,
        }
    }

    /// Visible prefix of the current phrase
    pub fn displayed(&self) -> &str {
        let phrase = &self.phrases[self.phrase_index];
        match phrase.char_indices().nth(self.displayed_len) {
            Some((byte_idx, _)) => &phrase[..byte_idx],
            None => phrase,
        }
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.phrase_index]
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn displayed_len(&self) -> usize {
        self.displayed_len
    }

    pub fn mode(&self) -> TypeMode {
        self.mode
    }

    /// True while the full phrase is shown and the pause before deletion runs
    pub fn at_boundary(&self) -> bool {
        self.pending_delete
    }

    /// Back to the first phrase, nothing displayed
    pub fn reset(&mut self) {
        self.phrase_index = 0;
        self.displayed_len = 0;
        self.mode = TypeMode::Typing;
        self.pending_delete = false;
    }
}
