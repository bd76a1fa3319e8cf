//! CLI tool for rendering PowerPoint slides to PNG images.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slideshot_core::FontResolver;
use slideshot_service::{RenderOptions, SlideConverter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Render presentation slides as images.
#[derive(Parser, Debug)]
#[command(name = "slideshot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Font file to try before the platform defaults (repeatable)
    #[arg(long, global = true, env = "SLIDESHOT_FONT", value_delimiter = ',')]
    font: Vec<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the slide count as JSON
    Info {
        /// Input PowerPoint file (.pptx)
        input: PathBuf,
    },

    /// Render a single slide to PNG
    Render {
        /// Input PowerPoint file (.pptx)
        input: PathBuf,

        /// Zero-based slide index
        #[arg(short, long, allow_negative_numbers = true)]
        slide: i64,

        /// Output PNG path (default: <input stem>-<slide>.png next to the input)
        #[arg(short, long, conflicts_with = "base64")]
        output: Option<PathBuf>,

        /// Print {"image": "<base64>"} to stdout instead of writing a file
        #[arg(long)]
        base64: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Render several slides into a ZIP archive
    Batch {
        /// Input PowerPoint file (.pptx)
        input: PathBuf,

        /// Zero-based slide indices, comma separated or as a JSON array
        #[arg(short, long, allow_hyphen_values = true)]
        slides: String,

        /// Output directory (default: same as input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Background color (hex)
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Text color (hex)
    #[arg(long, default_value = "#000000")]
    text_color: String,

    /// Keyword to highlight (repeatable, first match wins)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,
}

impl StyleArgs {
    fn to_options(&self) -> RenderOptions {
        RenderOptions {
            background_color: self.background.clone(),
            text_color: self.text_color.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut fonts = FontResolver::new();
    for path in &cli.font {
        fonts = fonts.with_preferred(path);
    }
    let converter = SlideConverter::new().with_font_resolver(fonts);

    match run(&cli, &converter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if is_client_error(&e) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli, converter: &SlideConverter) -> Result<()> {
    match &cli.command {
        Command::Info { input } => {
            let (data, filename) = read_input(input)?;
            let info = converter.slide_info(&data, &filename)?;
            println!("{}", serde_json::to_string(&info)?);
        }
        Command::Render {
            input,
            slide,
            output,
            base64,
            style,
        } => {
            let (data, filename) = read_input(input)?;
            let image = converter.render_slide(&data, &filename, *slide, &style.to_options())?;

            if *base64 {
                println!("{}", serde_json::to_string(&image.body())?);
            } else {
                let path = match output {
                    Some(path) => path.clone(),
                    None => sibling_path(input, &format!("-{}.png", image.slide_index + 1)),
                };
                write_output(&path, &image.png)?;
                if cli.verbose {
                    eprintln!("Written to: {}", path.display());
                }
            }
        }
        Command::Batch {
            input,
            slides,
            output,
            style,
        } => {
            let (data, filename) = read_input(input)?;
            let selections = parse_slide_list(slides)?;
            let archive =
                converter.render_batch(&data, &filename, &selections, &style.to_options())?;

            let dir = match output {
                Some(dir) => {
                    std::fs::create_dir_all(dir).with_context(|| {
                        format!("Failed to create output directory: {}", dir.display())
                    })?;
                    dir.clone()
                }
                None => input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default(),
            };
            let path = dir.join(&archive.filename);
            write_output(&path, &archive.bytes)?;

            if cli.verbose {
                eprintln!(
                    "  Rendered {} of {} requested slides",
                    archive.entries.len(),
                    selections.len()
                );
                eprintln!("Written to: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Bad input from the caller, as opposed to a processing failure.
fn is_client_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<slideshot_core::Error>()
        .is_some_and(|e| e.is_client_error())
}

/// Read the whole input file and its display name.
fn read_input(path: &Path) -> Result<(Vec<u8>, String)> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok((data, filename))
}

/// Accept `2,0,1` or `[2, 0, 1]`.
fn parse_slide_list(raw: &str) -> Result<Vec<i64>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return Ok(slideshot_service::parse_selections(trimmed)?);
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|e| {
                anyhow::Error::from(slideshot_core::Error::InvalidRequest(format!(
                    "Invalid slide index {:?}: {}",
                    s, e
                )))
            })
        })
        .collect()
}

/// `<dir>/<stem><suffix>` next to the input file.
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = format!("{}{}", stem, suffix);
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
