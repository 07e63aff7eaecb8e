// ABOUTME: Code block highlighting for the md-slides application
// ABOUTME: Finds `<code>!lang` blocks in slide HTML and splices in highlighted markup

use crate::errors::{Result, SlidesError};
use crate::formatter::HtmlFormatter;
use html_escape::decode_html_entities;
use log::debug;
use std::panic::{self, AssertUnwindSafe};

/// Opening of a code block whose first line names a language.
const MARKER: &str = "<code>!";
const CODE_CLOSE: &str = "</code";

/// Languages compiled into the highlighter.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "cpp",
    "css",
    "go",
    "html",
    "java",
    "javascript",
    "json",
    "lua",
    "markdown",
    "python",
    "ruby",
    "rust",
    "sql",
    "toml",
    "typescript",
    "yaml",
];

/// Options for the highlighted HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    pub line_numbers: bool,
    pub no_classes: bool,
    pub no_background: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            no_classes: true,
            no_background: true,
        }
    }
}

impl From<&HighlightOptions> for HtmlFormatter {
    fn from(options: &HighlightOptions) -> Self {
        HtmlFormatter {
            line_numbers: options.line_numbers,
            no_classes: options.no_classes,
            no_background: options.no_background,
            ..HtmlFormatter::default()
        }
    }
}

/// Turns a language name and raw code into highlighted HTML.
pub trait CodeHighlighter {
    /// Highlight `code` as `language`.
    ///
    /// Fails with [`SlidesError::UnknownLanguage`] when no lexer exists for the name.
    fn highlight(&mut self, language: &str, code: &str) -> Result<String>;
}

/// Tree-sitter highlighting through arborium.
pub struct ArboriumHighlighter {
    inner: arborium::Highlighter,
    formatter: HtmlFormatter,
}

impl ArboriumHighlighter {
    pub fn new(options: &HighlightOptions) -> Self {
        Self {
            inner: arborium::Highlighter::new(),
            formatter: HtmlFormatter::from(options),
        }
    }
}

impl Default for ArboriumHighlighter {
    fn default() -> Self {
        Self::new(&HighlightOptions::default())
    }
}

impl CodeHighlighter for ArboriumHighlighter {
    fn highlight(&mut self, language: &str, code: &str) -> Result<String> {
        let lang = resolve_language(language)?;

        // Tree-sitter grammars can panic on odd input
        let inner = &mut self.inner;
        let highlighted =
            panic::catch_unwind(AssertUnwindSafe(|| inner.highlight_to_html(lang, code)))
            .map_err(|_| {
                SlidesError::HighlightError(format!("highlighter panicked on {} code", lang))
            })?
            .map_err(|e| SlidesError::HighlightError(e.to_string()))?;

        Ok(self.formatter.format(&highlighted))
    }
}

/// Map a language name or common alias to a compiled-in grammar.
pub fn resolve_language(language: &str) -> Result<&'static str> {
    let lang = language.trim().to_lowercase();
    let lang = match lang.as_str() {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" | "python3" | "py3" => "python",
        "rb" => "ruby",
        "rs" => "rust",
        "sh" | "shell" | "zsh" | "console" => "bash",
        "yml" => "yaml",
        "md" => "markdown",
        "c++" | "cc" | "cxx" => "cpp",
        "golang" => "go",
        "htm" | "xhtml" => "html",
        other => other,
    };
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|supported| *supported == lang)
        .ok_or_else(|| SlidesError::UnknownLanguage(language.to_string()))
}

/// A marked code block located inside a fragment.
#[derive(Debug, PartialEq, Eq)]
struct CodeBlock<'a> {
    language: &'a str,
    code: &'a str,
    /// Offset of the `<code>` opening tag.
    start: usize,
    /// Offset just past the `>` that ends the closing tag.
    end: usize,
}

fn find_code_block(content: &str) -> Result<Option<CodeBlock<'_>>> {
    let Some(start) = content.find(MARKER) else {
        return Ok(None);
    };

    let lang_start = start + MARKER.len();
    let line_len = content[lang_start..].find('\n').ok_or_else(|| {
        SlidesError::MalformedCodeBlock("no line break after the language name".to_string())
    })?;
    let language = content[lang_start..lang_start + line_len].trim();
    if language.is_empty() {
        return Err(SlidesError::MalformedCodeBlock(
            "missing language name after `!`".to_string(),
        ));
    }

    let code_start = lang_start + line_len;
    let close = code_start
        + content[code_start..].find(CODE_CLOSE).ok_or_else(|| {
            SlidesError::MalformedCodeBlock(format!("unterminated {} block", language))
        })?;
    let end = close
        + content[close..].find('>').ok_or_else(|| {
            SlidesError::MalformedCodeBlock(format!("unterminated {} block", language))
        })?
        + 1;

    Ok(Some(CodeBlock {
        language,
        code: content[code_start..close].trim_matches('\n'),
        start,
        end,
    }))
}

/// Replace every marked code block in `content` with highlighted HTML, left to right.
pub fn highlight_code_blocks<H: CodeHighlighter + ?Sized>(
    content: &str,
    highlighter: &mut H,
) -> Result<String> {
    let mut content = content.to_string();

    while let Some(block) = find_code_block(&content)? {
        debug!(
            "Highlighting {} code block ({} bytes)",
            block.language,
            block.code.len()
        );
        // Source text arrives entity-escaped from the markdown renderer;
        // the lexer has to see the raw characters.
        let code = decode_html_entities(block.code);
        let pretty = highlighter
            .highlight(block.language, &code)?
            .replace("&amp;", "&");

        let mut spliced = String::with_capacity(content.len() + pretty.len());
        spliced.push_str(&content[..block.start]);
        spliced.push_str(&pretty);
        spliced.push_str(&content[block.end..]);
        content = spliced;
    }

    Ok(content)
}
