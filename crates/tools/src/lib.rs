//! Shared plumbing for the headless front ends: config loading, logging setup and ASCII views.

pub mod config_file;
pub mod render;

use log::LevelFilter;

/// Installs `env_logger` at info, debug for `-v` and trace for `-vv`. `RUST_LOG` still wins.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}
