// ABOUTME: HTML formatter for highlighted code
// ABOUTME: Turns arborium's custom highlight elements into themed spans with line numbers

use arborium::highlights::HIGHLIGHTS;
use arborium::theme::{builtin, Style, Theme};

const LINE_NUMBER_STYLE: &str = "color: inherit; background-color: transparent; padding-left: 5px; padding-right: 5px";
const PRE_STYLE: &str = "line-height: 125%";

/// Renders highlighter output as a standalone HTML block.
#[derive(Debug, Clone)]
pub struct HtmlFormatter {
    /// Prefix every line with its number.
    pub line_numbers: bool,
    /// Use inline `style` attributes instead of CSS classes.
    pub no_classes: bool,
    /// Leave the background to the page.
    pub no_background: bool,
    /// Colors for inline styles and the block background.
    pub theme: &'static Theme,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self {
            line_numbers: true,
            no_classes: true,
            no_background: true,
            theme: builtin::github_light(),
        }
    }
}

enum Piece<'a> {
    Open(&'a str),
    Close,
    Text(&'a str),
}

impl HtmlFormatter {
    /// Format arborium's element markup. Text is expected to be HTML-escaped already.
    pub fn format(&self, highlighted: &str) -> String {
        let mut out = String::with_capacity(highlighted.len() * 2);
        out.push_str("<div class=\"highlight\"><pre style=\"");
        out.push_str(PRE_STYLE);
        if !self.no_background {
            if let Some(background) = &self.theme.background {
                out.push_str("; background: ");
                out.push_str(&background.to_hex());
            }
        }
        out.push_str("\">");

        // Numbers are right-aligned to the widest one
        let width = (highlighted.matches('\n').count() + 1).to_string().len();
        let mut line = 1;
        let mut open: Vec<&str> = Vec::new();
        if self.line_numbers {
            self.push_line_number(&mut out, line, width);
        }

        for piece in pieces(highlighted) {
            match piece {
                Piece::Open(tag) => {
                    self.push_open(&mut out, tag);
                    open.push(tag);
                }
                Piece::Close => {
                    if open.pop().is_some() {
                        out.push_str("</span>");
                    }
                }
                Piece::Text(text) => {
                    let mut lines = text.split('\n').peekable();
                    while let Some(part) = lines.next() {
                        out.push_str(part);
                        if lines.peek().is_none() {
                            break;
                        }
                        // Each line carries its own spans so the number sits outside them.
                        for _ in &open {
                            out.push_str("</span>");
                        }
                        out.push('\n');
                        line += 1;
                        if self.line_numbers {
                            self.push_line_number(&mut out, line, width);
                        }
                        for tag in &open {
                            self.push_open(&mut out, tag);
                        }
                    }
                }
            }
        }
        for _ in &open {
            out.push_str("</span>");
        }

        out.push_str("\n</pre></div>\n");
        out
    }

    fn push_open(&self, out: &mut String, tag: &str) {
        if self.no_classes {
            match theme_style(self.theme, tag) {
                Some(style) => {
                    out.push_str("<span style=\"");
                    out.push_str(&inline_css(style));
                    out.push_str("\">");
                }
                None => out.push_str("<span>"),
            }
        } else {
            out.push_str("<span class=\"tok-");
            out.push_str(tag);
            out.push_str("\">");
        }
    }

    fn push_line_number(&self, out: &mut String, line: usize, width: usize) {
        if self.no_classes {
            out.push_str("<span style=\"");
            out.push_str(LINE_NUMBER_STYLE);
            out.push_str("\">");
        } else {
            out.push_str("<span class=\"linenos\">");
        }
        out.push_str(&format!("{:>width$}", line, width = width));
        out.push_str("</span>");
    }
}

/// Theme style for an element tag, falling back to the tag's parent category.
fn theme_style<'t>(theme: &'t Theme, tag: &str) -> Option<&'t Style> {
    own_style(theme, tag).or_else(|| {
        let parent = HIGHLIGHTS
            .iter()
            .find(|def| def.tag == tag)
            .map(|def| def.parent_tag)
            .filter(|parent| !parent.is_empty())?;
        own_style(theme, parent)
    })
}

fn own_style<'t>(theme: &'t Theme, tag: &str) -> Option<&'t Style> {
    HIGHLIGHTS
        .iter()
        .enumerate()
        .filter(|(_, def)| def.tag == tag)
        .filter_map(|(index, _)| theme.style(index))
        .find(|style| !style.is_empty())
}

fn inline_css(style: &Style) -> String {
    let mut rules = Vec::new();
    if let Some(fg) = &style.fg {
        rules.push(format!("color: {}", fg.to_hex()));
    }
    if let Some(bg) = &style.bg {
        rules.push(format!("background: {}", bg.to_hex()));
    }
    let mut decorations = Vec::new();
    if style.modifiers.underline {
        decorations.push("underline");
    }
    if style.modifiers.strikethrough {
        decorations.push("line-through");
    }
    if !decorations.is_empty() {
        rules.push(format!("text-decoration: {}", decorations.join(" ")));
    }
    if style.modifiers.bold {
        rules.push("font-weight: bold".to_string());
    }
    if style.modifiers.italic {
        rules.push("font-style: italic".to_string());
    }
    rules.join("; ")
}

/// Split element markup into open tags, close tags and text runs.
///
/// Only arborium's `<a-*>` elements are treated as markup; anything else
/// (there should be nothing else besides entities) passes through as text.
fn pieces(html: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        let next_tag = rest
            .find("<a-")
            .into_iter()
            .chain(rest.find("</a-"))
            .min();

        let Some(start) = next_tag else {
            pieces.push(Piece::Text(rest));
            break;
        };
        if start > 0 {
            pieces.push(Piece::Text(&rest[..start]));
        }

        let tag_text = &rest[start..];
        let Some(end) = tag_text.find('>') else {
            pieces.push(Piece::Text(tag_text));
            break;
        };

        if tag_text.starts_with("</") {
            pieces.push(Piece::Close);
        } else {
            let name = &tag_text[3..end];
            let name = name.split_whitespace().next().unwrap_or(name);
            pieces.push(Piece::Open(name));
        }
        rest = &tag_text[end + 1..];
    }

    pieces
}
