//! Response store - trigger words and canned replies

use rand::seq::SliceRandom;
use rand::Rng;

use crate::infrastructure::assets::Assets;

/// Trigger and reply corpora, loaded once at startup and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    triggers: Vec<String>,
    responses: Vec<String>,
}

impl ResponseStore {
    pub fn new(triggers: Vec<String>, responses: Vec<String>) -> Self {
        Self { triggers, responses }
    }

    /// Build from raw asset text.
    ///
    /// Trigger words are whitespace-separated and lowercased; replies are one per
    /// non-blank line.
    pub fn from_texts(triggers: &str, responses: &str) -> Self {
        let triggers = triggers
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        let responses = responses
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_string())
            .collect();
        Self::new(triggers, responses)
    }

    /// Load both corpora. A corpus that cannot be read is logged and left empty.
    pub fn load(assets: &Assets) -> Self {
        let triggers = match assets.trigger_words() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{}", e);
                String::new()
            }
        };
        let responses = match assets.responses() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{}", e);
                String::new()
            }
        };

        let store = Self::from_texts(&triggers, &responses);
        tracing::debug!(
            "Loaded {} trigger words and {} responses",
            store.triggers.len(),
            store.responses.len()
        );
        store
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Uniformly pick one reply line. An empty corpus yields an empty string.
    pub fn pick_random(&self) -> String {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.responses.choose(rng).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_texts_parses_corpora() {
        let store = ResponseStore::from_texts("Cat  DOG\nkrydder\n", "first line\r\nsecond line\n\n");
        assert_eq!(store.triggers(), &["cat", "dog", "krydder"]);
        assert_eq!(store.responses(), &["first line", "second line"]);
    }

    #[test]
    fn test_pick_random_stays_in_corpus() {
        let store = ResponseStore::from_texts("", "one\ntwo\nthree");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let picked = store.pick_random();
            assert!(store.responses().contains(&picked), "unexpected pick: {picked:?}");
            seen.insert(picked);
        }
        // The last line must be reachable too.
        assert!(seen.contains("three"));
    }

    #[test]
    fn test_pick_random_on_empty_corpus_is_empty_string() {
        let store = ResponseStore::default();
        assert_eq!(store.pick_random(), "");
    }

    #[test]
    fn test_load_with_missing_override_degrades_to_empty() {
        let assets = Assets::default()
            .with_responses_file("/definitely/not/here/responses.txt");
        let store = ResponseStore::load(&assets);
        assert!(store.responses().is_empty());
        assert!(!store.triggers().is_empty());
    }
}
