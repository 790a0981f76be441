//! Debounced user search.
//!
//! Each keystroke bumps a generation counter. A timer armed for generation
//! `n` only fires a lookup if nothing newer has arrived in the meantime, so
//! a burst of keystrokes inside the quiet period yields one request.

use std::time::Duration;

/// Quiet period before a user lookup is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest query (after trimming) that reaches the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// What the caller must do after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceDecision {
    /// Query too short: clear results locally, no timer.
    Clear,
    /// Arm a timer; when it elapses, call [`SearchDebouncer::fire`] with `generation`.
    Schedule { generation: u64, delay: Duration },
}

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: u64,
    query: String,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            query: String::new(),
        }
    }

    /// Text as last typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a query change. Any previously armed timer is superseded.
    pub fn on_input(&mut self, query: &str) -> DebounceDecision {
        self.generation += 1;
        self.query = query.to_string();

        if self.query.trim().chars().count() < MIN_QUERY_CHARS {
            return DebounceDecision::Clear;
        }
        DebounceDecision::Schedule {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Supersede the pending timer without changing the query (view left).
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Forget the query too.
    pub fn reset(&mut self) {
        self.cancel();
        self.query.clear();
    }

    /// Timer for `generation` elapsed. Returns the query to look up, or
    /// `None` if the timer was superseded.
    pub fn fire(&self, generation: u64) -> Option<String> {
        if generation != self.generation {
            tracing::debug!(
                "Debounce timer {} superseded by {}",
                generation,
                self.generation
            );
            return None;
        }
        let query = self.query.trim();
        (query.chars().count() >= MIN_QUERY_CHARS).then(|| query.to_string())
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
