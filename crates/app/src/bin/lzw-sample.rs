//! Write a generated sample input file for trying out the codec.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{ArgAction, Parser};
use lzw16_app::input_gen::write_sample_file;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "lzw-sample", version, about = "Generate sample input for lzw-compress")]
struct Args {
    /// File to create (must not exist yet)
    output: PathBuf,

    /// Random seed; derived from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of bytes to generate
    #[arg(long, default_value_t = 1024 * 1024)]
    size: usize,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    lzw16_app::init_logging(if args.verbose > 0 { Level::INFO } else { Level::WARN });

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    match write_sample_file(&args.output, seed, args.size) {
        Ok(()) => {
            println!("Wrote {} bytes to {} (seed {})", args.size, args.output.display(), seed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("lzw-sample: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
