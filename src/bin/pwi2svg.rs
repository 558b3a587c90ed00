//! Command-line converter from Pocket Word documents to SVG.
//!
//! # Usage
//!
//! ```sh
//! pwi2svg sketch.pwi sketch.svg
//! pwi2svg sketch.pwi sketch.svg --strict --parallel -vv
//! pwi2svg sketch.pwi sketch.svg --dump yaml
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use pocketword::pwi::{DecodeOptions, Document};
use pocketword::render::{RenderOptions, Scene, svg};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert a psw/pwi document to SVG
#[derive(Parser, Debug)]
#[command(
    name = "pwi2svg",
    about = "Convert Pocket Word (psw/pwi) drawings and inline pictures to SVG",
    version
)]
struct Args {
    /// Input psw/pwi file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output SVG file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Abort on dangling references and truncated payloads instead of
    /// skipping the affected paragraph, drawing or shape
    #[arg(long)]
    strict: bool,

    /// Resolve drawings in parallel
    #[arg(long)]
    parallel: bool,

    /// Outline and label every drawing frame
    #[arg(long)]
    debug_overlay: bool,

    /// Also print the decoded document to stdout
    #[arg(long, value_enum, value_name = "FORMAT")]
    dump: Option<DumpFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Yaml,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> pocketword::Result<()> {
    let options = DecodeOptions::new()
        .with_strict(args.strict)
        .with_parallel(args.parallel);

    let doc = Document::open_with_options(&args.input, &options)?;

    if let Some(DumpFormat::Yaml) = args.dump {
        print!("{}", doc.to_yaml()?);
    }

    let render_options = RenderOptions::new().with_debug_overlay(args.debug_overlay);
    let scene = Scene::from_document(&doc, &render_options);
    fs::write(&args.output, svg::render(&scene)?)?;

    tracing::info!(
        output = %args.output.display(),
        drawables = scene.drawables.len(),
        diagnostics = doc.diagnostics.len(),
        "wrote svg"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}: {}", args.input.display(), e);
            ExitCode::FAILURE
        },
    }
}
