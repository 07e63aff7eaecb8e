// ABOUTME: Slide segmentation for the md-slides application
// ABOUTME: Renders markdown to HTML and splits it into a title and slides on horizontal rules

use crate::errors::{Result, SlidesError};
use crate::highlight::{highlight_code_blocks, CodeHighlighter};
use comrak::{markdown_to_html, ComrakOptions};
use log::{debug, info};
use serde::Serialize;

/// Markup the markdown renderer emits for a horizontal rule.
pub const SLIDE_SEPARATOR: &str = "<hr />\n";

/// One slide: its heading line and the HTML that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub header: String,
    pub content: String,
}

/// A segmented document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Rendered HTML preceding the first horizontal rule.
    pub title: String,
    /// Text of the first element in the title section.
    pub head_title: String,
    /// Rendered HTML of each slide before it was split or highlighted.
    pub sections: Vec<String>,
    pub slides: Vec<Slide>,
}

/// Convert markdown to HTML, letting raw HTML such as inline `<code>` through
pub fn markdown_to_slides_html(markdown: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}

/// Render `markdown` and split it into a title and highlighted slides.
pub fn segment<H: CodeHighlighter + ?Sized>(markdown: &str, highlighter: &mut H) -> Result<Deck> {
    let html = markdown_to_slides_html(markdown);

    let mut sections = html.split(SLIDE_SEPARATOR).map(str::to_string);
    // split always yields at least one piece
    let title = sections.next().unwrap_or_default();
    let sections: Vec<String> = sections.collect();

    let head_title = extract_title(&title)?.to_string();
    info!(
        "Segmented {:?} into {} slides",
        head_title,
        sections.len()
    );

    let slides = parse_slides(&sections, highlighter)?;

    Ok(Deck {
        title,
        head_title,
        sections,
        slides,
    })
}

/// Text between the first `>` and the next `<` of the title section.
pub fn extract_title(title_section: &str) -> Result<&str> {
    let (_, rest) = title_section
        .split_once('>')
        .ok_or(SlidesError::MissingTitle)?;
    Ok(rest.split('<').next().unwrap_or(rest))
}

/// Split each section into header and content, highlighting marked code blocks.
pub fn parse_slides<H: CodeHighlighter + ?Sized>(
    sections: &[String],
    highlighter: &mut H,
) -> Result<Vec<Slide>> {
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let (header, content) = section
                .split_once('\n')
                .ok_or(SlidesError::MalformedSlide { index: index + 1 })?;
            debug!("Slide {}: {}", index + 1, header);

            Ok(Slide {
                header: header.to_string(),
                content: highlight_code_blocks(content, highlighter)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct NoLexers;

    impl CodeHighlighter for NoLexers {
        fn highlight(&mut self, language: &str, _code: &str) -> Result<String> {
            Err(SlidesError::UnknownLanguage(language.to_string()))
        }
    }

    #[test]
    fn test_title_and_one_slide() {
        let deck = segment("# Title\n\n---\n\n## Slide One\nHello\n", &mut NoLexers).unwrap();

        assert_eq!(deck.head_title, "Title");
        assert_eq!(deck.title, "<h1>Title</h1>\n");
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].header, "<h2>Slide One</h2>");
        assert!(deck.slides[0].content.contains("Hello"));
    }

    #[test]
    fn test_slide_count_matches_rule_count() {
        for rules in 0..5 {
            let mut markdown = String::from("# Deck\n");
            for i in 0..rules {
                markdown.push_str(&format!("\n---\n\n## Slide {}\n\nBody {}\n", i, i));
            }
            let deck = segment(&markdown, &mut NoLexers).unwrap();
            assert_eq!(deck.slides.len(), rules);
            assert_eq!(deck.sections.len(), rules);
            assert_eq!(deck.head_title, "Deck");
        }
    }

    #[test]
    fn test_no_rule_gives_no_slides() {
        let deck = segment("# Only a title\n\nSome text.\n", &mut NoLexers).unwrap();
        assert_eq!(deck.head_title, "Only a title");
        assert!(deck.slides.is_empty());
    }

    #[test]
    fn test_header_is_first_line_and_content_the_rest() {
        let deck = segment("# T\n\n***\n\n## H\n\n* a\n* b\n", &mut NoLexers).unwrap();
        let section = &deck.sections[0];
        let slide = &deck.slides[0];
        assert_eq!(format!("{}\n{}", slide.header, slide.content), *section);
        assert_eq!(slide.content, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    }

    #[test]
    fn test_missing_title_markup() {
        assert!(matches!(extract_title(""), Err(SlidesError::MissingTitle)));
        assert!(matches!(
            segment("", &mut NoLexers),
            Err(SlidesError::MissingTitle)
        ));
    }

    #[test]
    fn test_title_without_closing_tag() {
        assert_eq!(extract_title("<h1>Title").unwrap(), "Title");
    }

    #[test]
    fn test_empty_trailing_section_is_an_error() {
        let err = segment("# T\n\n---\n\n## A\n\n---\n", &mut NoLexers).unwrap_err();
        assert!(matches!(err, SlidesError::MalformedSlide { index: 2 }));
    }

    #[test]
    fn test_unknown_language_propagates() {
        let markdown = "# T\n\n---\n\n## Code\n\n```\n!python\nprint(1)\n```\n";
        let err = segment(markdown, &mut NoLexers).unwrap_err();
        assert!(matches!(err, SlidesError::UnknownLanguage(_)));
    }

    #[test]
    fn test_fenced_language_block_is_not_marked() {
        let markdown = "# T\n\n---\n\n## Code\n\n```python\nprint(1)\n```\n";
        let deck = segment(markdown, &mut NoLexers).unwrap();
        assert!(deck.slides[0]
            .content
            .contains("<code class=\"language-python\">print(1)"));
    }
}
