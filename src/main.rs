// ABOUTME: Main entry point for the md-slides program.
// ABOUTME: Provides the CLI interface and runs the deck renderer from the library.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The path to the markdown source file [default: slides.md]
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// The path to the destination file [default: presentation.html]
    #[arg(short, long, value_name = "FILE")]
    destination: Option<PathBuf>,

    /// The path to the Jinja template file [default: base.html]
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// The file encoding to use [default: utf8]
    #[arg(short, long, value_name = "ENCODING")]
    encoding: Option<String>,

    /// Log per-slide detail
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = md_slides::Config::from_env().context("Invalid configuration")?;
    let options = config.render_options(cli.source, cli.destination, cli.template, cli.encoding);

    let deck = md_slides::make_slides(&options).with_context(|| {
        format!(
            "Failed to build {:?} from {:?}",
            options.destination, options.source
        )
    })?;

    info!(
        "Presentation generated successfully: {:?} ({} slides)",
        options.destination,
        deck.slides.len()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
