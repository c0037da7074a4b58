//! Prompt debouncing and response caching for the generation request layer.
//!
//! Time is injected by the caller so both are deterministic under test.

use crate::request::ImageResponse;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds back prompt changes until typing pauses for `delay`.
#[derive(Debug, Clone)]
pub struct PromptDebouncer {
    delay: Duration,
    pending: String,
    changed_at: Duration,
    settled: String,
}

impl Default for PromptDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl PromptDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: String::new(),
            changed_at: Duration::ZERO,
            settled: String::new(),
        }
    }

    /// Record the prompt as typed at time `now`.
    pub fn input(&mut self, prompt: &str, now: Duration) {
        if prompt != self.pending {
            self.pending = prompt.to_string();
            self.changed_at = now;
        }
    }

    /// Advance to `now`. Returns the newly settled prompt when the quiet
    /// period has elapsed since the last change.
    pub fn poll(&mut self, now: Duration) -> Option<&str> {
        if self.pending != self.settled && now.saturating_sub(self.changed_at) >= self.delay {
            self.settled = self.pending.clone();
            return Some(self.settled.as_str());
        }
        None
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// True while typed input has not yet settled.
    pub fn is_debouncing(&self) -> bool {
        self.pending != self.settled
    }
}

/// Prompt-keyed cache of generation responses. Entries never go stale
/// within a session.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: HashMap<String, ImageResponse>,
}

impl ResponseCache {
    pub fn get(&self, prompt: &str) -> Option<&ImageResponse> {
        self.entries.get(prompt)
    }

    pub fn insert(&mut self, prompt: &str, response: ImageResponse) {
        self.entries.insert(prompt.to_string(), response);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Timings;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn settles_after_quiet_period() {
        let mut d = PromptDebouncer::default();
        d.input("a c", ms(0));
        d.input("a ca", ms(100));
        d.input("a cat", ms(200));
        assert_eq!(d.poll(ms(450)), None);
        assert!(d.is_debouncing());
        assert_eq!(d.poll(ms(500)), Some("a cat"));
        assert!(!d.is_debouncing());
        assert_eq!(d.poll(ms(900)), None);
    }

    #[test]
    fn cache_hits_by_exact_prompt() {
        let mut cache = ResponseCache::default();
        let resp = ImageResponse {
            b64_json: "AAAA".into(),
            timings: Timings { inference: 1.0 },
        };
        cache.insert("fox", resp.clone());
        assert_eq!(cache.get("fox"), Some(&resp));
        assert_eq!(cache.get("fox "), None);
    }
}
