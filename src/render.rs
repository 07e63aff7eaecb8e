// ABOUTME: Deck rendering module for the md-slides application
// ABOUTME: Reads the markdown source, builds the slides and writes the templated HTML

use crate::config::{DEFAULT_DESTINATION, DEFAULT_ENCODING, DEFAULT_SOURCE, DEFAULT_TEMPLATE};
use crate::encoding::TextEncoding;
use crate::errors::{Result, SlidesError};
use crate::highlight::{ArboriumHighlighter, HighlightOptions};
use crate::segment::{segment, Deck};
use crate::template::{render_template, TemplateContext};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub template: PathBuf,
    pub encoding: String,
    pub highlight: HighlightOptions,
}

impl Default for RenderOptions {
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

/// Build the deck described by `options` and write it to the destination.
///
/// Nothing is written unless every earlier step succeeds.
pub fn make_slides(options: &RenderOptions) -> Result<Deck> {
    let encoding = TextEncoding::for_label(&options.encoding)?;

    info!(
        "Reading markdown from {:?} as {}",
        options.source,
        encoding.name()
    );
    let md_src = read_text(&options.source, encoding)?;

    let mut highlighter = ArboriumHighlighter::new(&options.highlight);
    let deck = segment(&md_src, &mut highlighter)?;

    info!("Rendering template {:?}", options.template);
    let template_src = read_text(&options.template, encoding)?;
    let context = TemplateContext {
        title: &deck.title,
        head_title: &deck.head_title,
        slides: &deck.slides,
        inpath: options.source.display().to_string(),
        outpath: options.destination.display().to_string(),
        templatepath: options.template.display().to_string(),
        encoding: &options.encoding,
        md_src: &md_src,
        slides_src: &deck.sections,
    };
    let output = render_template(&template_src, &context)?;

    info!(
        "Writing {} slides to {:?}",
        deck.slides.len(),
        options.destination
    );
    let bytes = encoding.encode(&output)?;
    fs::write(&options.destination, bytes)
        .map_err(|e| SlidesError::write(&options.destination, e))?;

    Ok(deck)
}

fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| SlidesError::read(path, e))?;
    Ok(encoding.decode(&bytes)?.into_owned())
}
