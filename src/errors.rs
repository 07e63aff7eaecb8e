// ABOUTME: Error types for the md-slides application
// ABOUTME: Provides structured error handling for each stage of the pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidesError {
    #[error("Failed to read file {path:?}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path:?}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Title section has no markup to take the title from")]
    MissingTitle,

    #[error("Slide {index} has no line break separating its header from its content")]
    MalformedSlide { index: usize },

    #[error("Malformed code block marker: {0}")]
    MalformedCodeBlock(String),

    #[error("No lexer for language: {0}")]
    UnknownLanguage(String),

    #[error("Syntax highlighting error: {0}")]
    HighlightError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SlidesError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlidesError::FileReadError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlidesError::FileWriteError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlidesError>;
