//! Bundled text assets with optional on-disk overrides

use std::path::{Path, PathBuf};

use crate::application::errors::AssetError;

const TRIGGER_WORDS: &str = include_str!("../../../assets/triggerwords.txt");
const RESPONSES: &str = include_str!("../../../assets/responses.txt");

/// Source of the trigger word and response corpora
#[derive(Debug, Clone, Default)]
pub struct Assets {
    triggers_file: Option<PathBuf>,
    responses_file: Option<PathBuf>,
}

impl Assets {
    pub fn new(triggers_file: Option<PathBuf>, responses_file: Option<PathBuf>) -> Self {
        Self { triggers_file, responses_file }
    }

    pub fn with_triggers_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.triggers_file = Some(path.into());
        self
    }

    pub fn with_responses_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.responses_file = Some(path.into());
        self
    }

    /// Contents of `triggerwords.txt`
    pub fn trigger_words(&self) -> Result<String, AssetError> {
        read_or_bundled("triggerwords.txt", self.triggers_file.as_deref(), TRIGGER_WORDS)
    }

    /// Contents of `responses.txt`
    pub fn responses(&self) -> Result<String, AssetError> {
        read_or_bundled("responses.txt", self.responses_file.as_deref(), RESPONSES)
    }
}

fn read_or_bundled(name: &str, path: Option<&Path>, bundled: &str) -> Result<String, AssetError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            name: path.display().to_string(),
            source,
        }),
        None => {
            tracing::trace!("Using bundled {}", name);
            Ok(bundled.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_assets_are_not_empty() {
        let assets = Assets::default();
        assert!(!assets.trigger_words().unwrap().trim().is_empty());
        assert!(!assets.responses().unwrap().trim().is_empty());
    }

    #[test]
    fn test_override_file_is_read() {
        let path = std::env::temp_dir().join(format!("krydder-triggers-{}.txt", std::process::id()));
        std::fs::write(&path, "salvie\n").unwrap();

        let assets = Assets::default().with_triggers_file(path.clone());
        assert_eq!(assets.trigger_words().unwrap(), "salvie\n");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let assets = Assets::default().with_triggers_file("/no/such/triggerwords.txt");
        let err = assets.trigger_words().unwrap_err();
        assert!(err.to_string().contains("/no/such/triggerwords.txt"));
    }
}
