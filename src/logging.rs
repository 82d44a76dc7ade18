//! Logging setup.
//!
//! Uses the `log` facade with an `env_logger` backend. The level comes from,
//! in priority order: the `RUST_LOG` environment variable, then `--quiet`
//! (errors only), then the `-v` count (debug, trace), defaulting to warn.
//!
//! The TUI owns the terminal while it runs, so the default level is kept
//! quiet; anything above warn only appears with explicit flags, typically
//! combined with `RUST_LOG`-style redirection.

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logging subsystem from CLI verbosity flags.
///
/// Call once at startup before any log statements.
///
/// # Panics
///
/// Panics if called twice; `env_logger` initializes once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(
            buf,
            "{style}{:<5}{style:#} [{}] {}",
            level,
            record.module_path().unwrap_or("?"),
            record.args()
        )
    });

    builder.init();
    log::debug!("Logging initialized at {:?}", log::max_level());
}

/// Map CLI flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_default_is_warn() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
    }

    #[test]
    fn test_level_verbosity_steps() {
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(3, false), LevelFilter::Trace);
        assert_eq!(level_for(9, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(level_for(0, true), LevelFilter::Error);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
