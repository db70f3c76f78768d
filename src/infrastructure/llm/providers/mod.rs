//! AI providers

pub mod completions;

pub use completions::CompletionsProvider;
