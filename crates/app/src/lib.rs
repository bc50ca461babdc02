//! lzw16: command-line front end for the lzw16 codec.
//!
//! The `lzw-compress` and `lzw-decompress` binaries are thin wrappers around
//! [`main`]; `lzw-sample` writes generated test input.

pub mod config;
pub mod input_gen;

use std::process::ExitCode;

use anyhow::Context;
use lzw16_core::{compress_file, decompress_file, Metrics};
use tracing::Level;

pub use config::{Config, Mode};

/// Install the stderr log subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run one compression or decompression described by `config`.
pub fn run(config: &Config) -> anyhow::Result<Metrics> {
    let input = &config.input_file;
    let output = &config.output_file;

    let metrics = match config.mode {
        Mode::Compress => compress_file(input, output)
            .with_context(|| format!("compressing {}", input.display()))?,
        Mode::Decompress => decompress_file(input, output)
            .with_context(|| format!("decompressing {}", input.display()))?,
    };

    if config.print_metrics {
        let title = match config.mode {
            Mode::Compress => "Compression Summary",
            Mode::Decompress => "Decompression Summary",
        };
        metrics.print_summary(title);
    }
    Ok(metrics)
}

/// Entry point shared by the codec binaries.
pub fn main(mode: Mode) -> ExitCode {
    let config = Config::parse(mode);
    init_logging(config.log_level());

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", mode.program_name(), err);
            ExitCode::FAILURE
        }
    }
}
