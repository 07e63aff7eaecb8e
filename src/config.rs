// ABOUTME: Configuration module for the md-slides application
// ABOUTME: Provides default paths, highlight options and environment variable handling

use crate::errors::{Result, SlidesError};
use crate::highlight::HighlightOptions;
use crate::render::RenderOptions;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "slides.md";
pub const DEFAULT_DESTINATION: &str = "presentation.html";
pub const DEFAULT_TEMPLATE: &str = "base.html";
pub const DEFAULT_ENCODING: &str = "utf8";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub template: PathBuf,
    pub encoding: String,
    pub highlight: HighlightOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            encoding: DEFAULT_ENCODING.to_string(),
            highlight: HighlightOptions::default(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let source = lookup("MD_SLIDES_SOURCE")
            .map(PathBuf::from)
            .unwrap_or(defaults.source);
        let destination = lookup("MD_SLIDES_DESTINATION")
            .map(PathBuf::from)
            .unwrap_or(defaults.destination);
        let template = lookup("MD_SLIDES_TEMPLATE")
            .map(PathBuf::from)
            .unwrap_or(defaults.template);
        let encoding = lookup("MD_SLIDES_ENCODING").unwrap_or(defaults.encoding);
        let line_numbers = match lookup("MD_SLIDES_LINE_NUMBERS") {
            Some(value) => parse_flag("MD_SLIDES_LINE_NUMBERS", &value)?,
            None => defaults.highlight.line_numbers,
        };

        Ok(Self {
            source,
            destination,
            template,
            encoding,
            highlight: HighlightOptions {
                line_numbers,
                ..defaults.highlight
            },
        })
    }

    /// Get render options, letting explicit values win over this config
    pub fn render_options(
        &self,
        source: Option<PathBuf>,
        destination: Option<PathBuf>,
        template: Option<PathBuf>,
        encoding: Option<String>,
    ) -> RenderOptions {
        RenderOptions {
            source: source.unwrap_or_else(|| self.source.clone()),
            destination: destination.unwrap_or_else(|| self.destination.clone()),
            template: template.unwrap_or_else(|| self.template.clone()),
            encoding: encoding.unwrap_or_else(|| self.encoding.clone()),
            highlight: self.highlight.clone(),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SlidesError::ConfigError(format!(
            "{} must be true or false, got {:?}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(config.destination, PathBuf::from(DEFAULT_DESTINATION));
        assert_eq!(config.template, PathBuf::from(DEFAULT_TEMPLATE));
        assert_eq!(config.encoding, DEFAULT_ENCODING);
        assert_eq!(config.highlight, HighlightOptions::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_in(&[
            ("MD_SLIDES_SOURCE", "talk.md"),
            ("MD_SLIDES_DESTINATION", "out/talk.html"),
            ("MD_SLIDES_TEMPLATE", "dark.html"),
            ("MD_SLIDES_ENCODING", "latin1"),
            ("MD_SLIDES_LINE_NUMBERS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.source, PathBuf::from("talk.md"));
        assert_eq!(config.destination, PathBuf::from("out/talk.html"));
        assert_eq!(config.template, PathBuf::from("dark.html"));
        assert_eq!(config.encoding, "latin1");
        assert!(!config.highlight.line_numbers);
        assert!(config.highlight.no_classes);
    }

    #[test]
    fn test_line_number_flag_spellings() {
        for (value, expected) in [("TRUE", true), ("1", true), ("off", false), (" No ", false)] {
            let config =
                Config::from_lookup(lookup_in(&[("MD_SLIDES_LINE_NUMBERS", value)])).unwrap();
            assert_eq!(config.highlight.line_numbers, expected, "{:?}", value);
        }
    }

    #[test]
    fn test_bad_line_number_flag_is_an_error() {
        let err = Config::from_lookup(lookup_in(&[("MD_SLIDES_LINE_NUMBERS", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, SlidesError::ConfigError(msg) if msg.contains("sometimes")));
    }

    #[test]
    fn test_explicit_values_win_over_environment() {
        let config = Config::from_lookup(lookup_in(&[
            ("MD_SLIDES_SOURCE", "env.md"),
            ("MD_SLIDES_ENCODING", "latin1"),
            ("MD_SLIDES_LINE_NUMBERS", "no"),
        ]))
        .unwrap();
        let options = config.render_options(
            Some(PathBuf::from("cli.md")),
            None,
            None,
            Some("utf-16le".to_string()),
        );

        assert_eq!(options.source, PathBuf::from("cli.md"));
        assert_eq!(options.destination, PathBuf::from(DEFAULT_DESTINATION));
        assert_eq!(options.encoding, "utf-16le");
        assert!(!options.highlight.line_numbers);
    }
}
