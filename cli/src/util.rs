use std::{io::Write as _, path::PathBuf};

use colored::Colorize;
use log::LevelFilter;
use tjudge_core::style::ColorTheme;

pub fn current_dir() -> anyhow::Result<PathBuf> {
    use anyhow::Context as _;
    std::env::current_dir().context("Failed to get current dir")
}

/// `-v` → info, `-vv` → debug. `RUST_LOG` wins over both.
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logger(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(self::level_filter(verbosity))
        .parse_default_env()
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "[{}] {}",
                level.to_string().color(level.color()).bold(),
                record.args()
            )
        })
        .init();
}
