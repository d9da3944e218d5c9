//! comment-blocks - command line entry point
//!
//! Renders a markdown comment into render blocks and prints them, one line
//! per block or as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use comment_blocks::config::{load_config, load_config_from, save_config, Settings, Theme};
use comment_blocks::error::{Error, Result};
use comment_blocks::{CommentRenderer, RenderBlock};

#[derive(Parser)]
#[command(name = "comment-blocks")]
#[command(about = "Render a markdown comment into display blocks")]
struct Cli {
    /// Markdown file to render (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Width of the container the text blocks are laid out in
    #[arg(short, long, default_value_t = 375.0)]
    width: f32,

    /// Color theme, overrides the configured one
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the blocks as JSON
    #[arg(long)]
    json: bool,

    /// Persist the effective settings to the default location
    #[arg(long)]
    save_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    if let Some(theme) = cli.theme {
        settings.theme = theme.into();
    }

    if cli.save_config {
        let path = save_config(&settings)?;
        info!("Saved settings to {}", path.display());
    }

    let markdown = read_input(cli.input.as_ref())?;
    let blocks = render(&settings, &markdown, cli.width);

    if cli.json {
        let json = serde_json::to_string_pretty(&blocks)?;
        println!("{}", json);
    } else {
        for block in &blocks {
            println!("{}", describe(block));
        }
    }
    Ok(())
}

fn render(settings: &Settings, markdown: &str, width: f32) -> Vec<RenderBlock> {
    CommentRenderer::from_settings(settings).render(markdown, width)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        }),
        None => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

/// One-line summary of a block for plain output.
fn describe(block: &RenderBlock) -> String {
    match block {
        RenderBlock::Text(text) => format!("[text] {:?}", text.text()),
        RenderBlock::Code(code) => match &code.language {
            Some(language) => format!("[code:{}] {:?}", language, code.text),
            None => format!("[code] {:?}", code.text),
        },
        RenderBlock::Image(image) => match &image.alt {
            Some(alt) => format!("[image] {} ({:?})", image.url, alt),
            None => format!("[image] {}", image.url),
        },
    }
}
