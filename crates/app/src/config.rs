//! Configuration for the lzw16 command-line tools.
//!
//! Both codec tools take exactly two positional arguments, the input path and
//! the output path, plus a few optional reporting flags. The output path is
//! always created exclusively.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use tracing::Level;

/// Which direction a codec tool runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    /// Binary name, used in usage messages and diagnostics.
    pub fn program_name(self) -> &'static str {
        match self {
            Mode::Compress => "lzw-compress",
            Mode::Decompress => "lzw-decompress",
        }
    }

    fn about(self) -> &'static str {
        match self {
            Mode::Compress => "Compress a file into an lzw16 code stream",
            Mode::Decompress => "Decompress an lzw16 code stream into the original file",
        }
    }
}

/// Arguments shared by `lzw-compress` and `lzw-decompress`.
#[derive(Debug, Parser)]
#[command(version)]
struct CodecArgs {
    /// File to read
    input: PathBuf,

    /// File to create (must not exist yet)
    output: PathBuf,

    /// Print a summary of the run to stdout
    #[arg(long)]
    metrics: bool,

    /// Print the resolved configuration before running
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Complete configuration for one codec run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// Input file path
    pub input_file: PathBuf,

    /// Output file path, created exclusively
    pub output_file: PathBuf,

    // === Behavior ===
    /// Whether to print the metrics summary
    pub print_metrics: bool,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Number of `-v` flags given
    pub verbosity: u8,
}

impl Config {
    /// Parse the process arguments, exiting with a usage message on error.
    pub fn parse(mode: Mode) -> Self {
        Self::try_parse_from(mode, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse an explicit argument list (the first item is the program name).
    pub fn try_parse_from<I, T>(mode: Mode, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = CodecArgs::command()
            .name(mode.program_name())
            .about(mode.about())
            .try_get_matches_from(args)?;
        let args = CodecArgs::from_arg_matches(&matches)?;

        Ok(Config {
            mode,
            input_file: args.input,
            output_file: args.output,
            print_metrics: args.metrics,
            print_config: args.print_config,
            verbosity: args.verbose,
        })
    }

    /// Most verbose log level to emit.
    pub fn log_level(&self) -> Level {
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:        {:?}", self.mode);
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        println!("Log level:   {}", self.log_level());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positional_arguments() {
        let config =
            Config::try_parse_from(Mode::Compress, ["lzw-compress", "in.bin", "out.lzw"]).unwrap();
        assert_eq!(config.mode, Mode::Compress);
        assert_eq!(config.input_file, PathBuf::from("in.bin"));
        assert_eq!(config.output_file, PathBuf::from("out.lzw"));
        assert!(!config.print_metrics);
        assert_eq!(config.log_level(), Level::WARN);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from(
            Mode::Decompress,
            ["lzw-decompress", "-vv", "--metrics", "in.lzw", "out.bin"],
        )
        .unwrap();
        assert!(config.print_metrics);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = Config::try_parse_from(Mode::Compress, ["lzw-compress", "in.bin"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = Config::try_parse_from(Mode::Compress, ["lzw-compress", "a", "b", "c"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_usage_names_the_tool() {
        let err = Config::try_parse_from(Mode::Decompress, ["lzw-decompress"]).unwrap_err();
        assert!(err.to_string().contains("lzw-decompress"));
    }
}
