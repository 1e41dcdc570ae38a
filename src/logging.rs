//! Diagnostic logging setup for the command-line tool
//!
//! Events go to stderr so that stdout stays machine-readable (`--json`).

use tracing::Level;

/// Map `-v` repetitions and `--quiet` to a maximum level.
///
/// | flags | level |
/// |-------|-------|
/// | `-q` | error |
/// | none | warn |
/// | `-v` | info |
/// | `-vv` | debug |
/// | `-vvv` | trace |
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global fmt subscriber. Calling it twice is harmless.
pub fn init(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
