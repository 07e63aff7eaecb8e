// ABOUTME: Library module for the md-slides program.
// ABOUTME: Contains the markdown segmenter, code highlighter and deck renderer.

// Reexport modules
pub mod config;
pub mod encoding;
pub mod errors;
pub mod formatter;
pub mod highlight;
pub mod render;
pub mod segment;
pub mod template;

// Reexport common types and functions
pub use config::Config;
pub use encoding::TextEncoding;
pub use errors::{Result, SlidesError};
pub use highlight::{highlight_code_blocks, ArboriumHighlighter, CodeHighlighter, HighlightOptions};
pub use render::{make_slides, RenderOptions};
pub use segment::{segment, Deck, Slide};
pub use template::{render_template, TemplateContext};
