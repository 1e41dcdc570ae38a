//! Color command implementation

use std::process::ExitCode;

use super::{EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::color::canonicalize;

/// Execute the color command
///
/// Every input is reported; the exit code is non-zero if any failed.
pub fn run_color(colors: &[String]) -> ExitCode {
    let mut failed = false;

    for input in colors {
        match canonicalize(input) {
            Ok(color) => println!("{}\t{}", input, color),
            Err(e) => {
                eprintln!("Error: '{}': {}", input, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_INVALID_ARGS)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
