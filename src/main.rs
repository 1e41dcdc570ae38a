//! Spritecut - Command-line tool for slicing spritesheets into PNG frames

use std::process::ExitCode;

use spritecut::cli;

fn main() -> ExitCode {
    cli::run()
}
