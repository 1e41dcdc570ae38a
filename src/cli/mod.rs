//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod color;
mod export;
mod slice;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{apply_overrides, load_config, CliOverrides, SpritecutConfig};
use crate::effects::EFFECTS;
use crate::error::StudioError;
use crate::session::Session;
use crate::slicer::{ColorLookupProps, GridProps, SlicerConfig, SLICERS};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spritecut - Cut spritesheets into frames and export them as PNG
#[derive(Parser)]
#[command(name = "spritecut")]
#[command(about = "Spritecut - Slice spritesheets into frames, apply effects, and export PNGs")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Slicer selection shared by `slice` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct SlicerArgs {
    /// Slice into fixed cells (e.g. --grid 16x16)
    #[arg(long, value_name = "WxH", value_parser = parse_grid, conflicts_with = "background")]
    pub grid: Option<GridProps>,

    /// Background color for lookup slicing (repeatable)
    #[arg(long, value_name = "COLOR")]
    pub background: Vec<String>,

    /// Path to spritecut.toml (default: discovered from the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl SlicerArgs {
    /// The slicer chosen on the command line, if any.
    pub fn slicer_override(&self) -> Option<SlicerConfig> {
        if let Some(grid) = self.grid {
            return Some(SlicerConfig::Grid(grid));
        }
        if !self.background.is_empty() {
            return Some(SlicerConfig::ColorLookup(ColorLookupProps {
                background_colors: self.background.clone(),
            }));
        }
        None
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Slice a spritesheet and print the frame rectangles
    Slice {
        /// Spritesheet image (PNG, GIF, ...)
        input: PathBuf,

        #[command(flatten)]
        slicer: SlicerArgs,

        /// Print slices as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Slice a spritesheet, apply effects, and write one PNG per frame
    Export {
        /// Spritesheet image (PNG, GIF, ...)
        input: PathBuf,

        /// Output directory (default: [export].out, or "frames")
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// File name prefix for frames (default: [export].prefix, or "frame")
        #[arg(long)]
        prefix: Option<String>,

        #[command(flatten)]
        slicer: SlicerArgs,

        /// Color to turn transparent in every frame (repeatable)
        #[arg(long, value_name = "COLOR")]
        blind: Vec<String>,
    },

    /// Print the canonical #rrggbbaa form of colors
    Color {
        /// Colors in any CSS notation (#rgb, #rrggbb, rgb(), named, ...)
        #[arg(required = true)]
        colors: Vec<String>,
    },

    /// List the available slicing strategies and effects
    Strategies,
}

/// Parse a `WxH` grid size. Sign is checked when the slicer is built.
pub fn parse_grid(s: &str) -> Result<GridProps, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid grid '{}', expected WxH (e.g. 16x16)", s))?;
    let cell_width =
        w.trim().parse::<i64>().map_err(|_| format!("invalid grid width '{}'", w.trim()))?;
    let cell_height =
        h.trim().parse::<i64>().map_err(|_| format!("invalid grid height '{}'", h.trim()))?;
    Ok(GridProps { cell_width, cell_height })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Slice { input, slicer, json } => slice::run_slice(&input, &slicer, json),
        Commands::Export { input, output, prefix, slicer, blind } => {
            export::run_export(&input, output, prefix, &slicer, blind)
        }
        Commands::Color { colors } => color::run_color(&colors),
        Commands::Strategies => run_strategies(),
    }
}

/// Print the strategy catalogs
fn run_strategies() -> ExitCode {
    println!("Slicers:");
    for entry in SLICERS {
        println!("  {:<16} {}", entry.name, entry.description);
    }
    println!();
    println!("Effects:");
    for entry in EFFECTS {
        println!("  {:<16} {}", entry.name, entry.description);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Load spritecut.toml (explicit or discovered) and merge CLI overrides.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SpritecutConfig, ExitCode> {
    match load_config(config_path) {
        Ok(config) => Ok(apply_overrides(config, overrides)),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Open `input` and set up a session with the configured slicer and effects.
pub(crate) fn open_session(input: &Path, config: &SpritecutConfig) -> Result<Session, ExitCode> {
    let mut session = Session::new();
    if let Err(e) = session.load_spritesheet(input) {
        eprintln!("Error: Failed to open '{}': {}", input.display(), e);
        return Err(ExitCode::from(EXIT_ERROR));
    }

    if let Some(slicer) = &config.slicer {
        session.configure_slicer(slicer).map_err(report)?;
    }
    for effect in &config.effects {
        session.configure_effect(effect.name.clone(), &effect.config).map_err(report)?;
    }

    Ok(session)
}

/// Print a library error and map it to an exit code.
pub(crate) fn report(e: StudioError) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::from(exit_code_for(&e))
}

/// Bad user input exits with `EXIT_INVALID_ARGS`, everything else with `EXIT_ERROR`.
fn exit_code_for(e: &StudioError) -> u8 {
    match e {
        StudioError::InvalidColorFormat(_)
        | StudioError::InvalidConfiguration(_)
        | StudioError::NoSlicerSelected => EXIT_INVALID_ARGS,
        _ => EXIT_ERROR,
    }
}
