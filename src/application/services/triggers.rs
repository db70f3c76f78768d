//! Trigger matcher - decides whether plain text should get a reply

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Punctuation removed from messages before whole-word matching
const STRIPPED_PUNCTUATION: &[char] = &['!', ',', '.', '?', ';', ':'];

/// How trigger words are compared against message text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// A trigger must equal one whitespace-delimited word of the message
    #[default]
    WholeWord,
    /// A trigger may appear anywhere in the message, `cat` matches `concatenate`
    Substring,
}

/// Case-insensitive trigger word matcher
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
    words: Vec<String>,
    policy: MatchPolicy,
}

impl TriggerMatcher {
    pub fn new(words: &[String], policy: MatchPolicy) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
            policy,
        }
    }

    pub fn is_trigger(&self, text: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        match self.policy {
            MatchPolicy::WholeWord => {
                let cleaned: String = lower
                    .chars()
                    .map(|c| if STRIPPED_PUNCTUATION.contains(&c) { ' ' } else { c })
                    .collect();
                cleaned
                    .split_whitespace()
                    .any(|token| self.words.iter().any(|w| w == token))
            }
            MatchPolicy::Substring => self.words.iter().any(|w| lower.contains(w.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(policy: MatchPolicy) -> TriggerMatcher {
        TriggerMatcher::new(&["cat".to_string(), "Oregano".to_string()], policy)
    }

    #[test]
    fn test_whole_word_policy() {
        let m = matcher(MatchPolicy::WholeWord);
        assert!(m.is_trigger("cat"));
        assert!(m.is_trigger("Cat!"));
        assert!(m.is_trigger("my cat, your dog"));
        assert!(m.is_trigger("is that a CAT?"));
        assert!(m.is_trigger("I love oregano"));
        assert!(!m.is_trigger("I love cats"));
        assert!(!m.is_trigger("concatenate"));
        assert!(!m.is_trigger(""));
    }

    #[test]
    fn test_substring_policy() {
        let m = matcher(MatchPolicy::Substring);
        assert!(m.is_trigger("I love cats"));
        assert!(m.is_trigger("conCATenate"));
        assert!(!m.is_trigger("dog"));
    }

    #[test]
    fn test_empty_corpus_never_matches() {
        let m = TriggerMatcher::new(&[], MatchPolicy::Substring);
        assert!(!m.is_trigger("anything at all"));
    }
}
