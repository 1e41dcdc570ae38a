//! Export command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{open_session, report, resolve_config, SlicerArgs, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::export::write_frames;

/// Execute the export command
pub fn run_export(
    input: &Path,
    output: Option<PathBuf>,
    prefix: Option<String>,
    args: &SlicerArgs,
    blind: Vec<String>,
) -> ExitCode {
    let overrides =
        CliOverrides { slicer: args.slicer_override(), blind_colors: blind, out: output, prefix };
    let config = match resolve_config(args.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut session = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    if let Err(e) = session.slice() {
        return report(e);
    }

    let frames = match session.export_frames() {
        Ok(f) => f,
        Err(e) => return report(e),
    };

    let out = &config.export.out;
    match write_frames(&frames, out, &config.export.prefix) {
        Ok(paths) => {
            println!("Exported {} frame(s) to {}", paths.len(), out.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report(e),
    }
}
