//! Slice command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{open_session, report, resolve_config, SlicerArgs, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::slicing::Slice;

/// Execute the slice command
pub fn run_slice(input: &Path, args: &SlicerArgs, json: bool) -> ExitCode {
    let overrides = CliOverrides { slicer: args.slicer_override(), ..Default::default() };
    let config = match resolve_config(args.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut session = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let slices = match session.slice() {
        Ok(slices) => slices,
        Err(e) => return report(e),
    };

    if json {
        match serde_json::to_string_pretty(slices) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: Failed to serialize slices: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", format_slices(slices));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// One `#index x1,y1-x2,y2 (wxh)` line per slice.
fn format_slices(slices: &[Slice]) -> String {
    slices.iter().enumerate().map(|(i, s)| format!("#{} {}\n", i, s)).collect()
}
