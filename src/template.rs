// ABOUTME: Template rendering for the md-slides application
// ABOUTME: Feeds the title, slides and run parameters to a Jinja-style page template

use crate::errors::Result;
use crate::segment::Slide;
use log::debug;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

const TEMPLATE_NAME: &str = "deck";

/// Every variable a page template can reference.
#[derive(Debug, Serialize)]
pub struct TemplateContext<'a> {
    /// Rendered HTML of the title section
    pub title: &'a str,
    /// Plain title text, for `<title>`
    pub head_title: &'a str,
    pub slides: &'a [Slide],
    pub inpath: String,
    pub outpath: String,
    pub templatepath: String,
    pub encoding: &'a str,
    /// Decoded markdown source
    pub md_src: &'a str,
    /// Rendered slide sections before highlighting
    pub slides_src: &'a [String],
}

/// Compile `source` and render it with `context`.
///
/// Output is not escaped, since slide content is already HTML.
pub fn render_template(source: &str, context: &TemplateContext<'_>) -> Result<String> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(TEMPLATE_NAME, source)?;

    debug!("Rendering template with {} slides", context.slides.len());
    let rendered = env.get_template(TEMPLATE_NAME)?.render(context)?;
    Ok(rendered)
}
