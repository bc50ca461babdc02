//! File drivers: one input path, one output path per run.
//!
//! # Output Policy
//!
//! - The input is opened and the output created before any dictionary work.
//! - The output is created exclusively; an existing file is never overwritten.
//! - If the run fails after the output was created, the partial output is
//!   removed so it cannot be mistaken for a complete file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::decoder::decompress;
use crate::encoder::compress;
use crate::error::{Error, Result};
use crate::metrics::Metrics;

/// Compress the file at `input` into a new file at `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<Metrics> {
    run_file(input, output, |reader, writer| compress(reader, writer))
}

/// Decompress the code stream at `input` into a new file at `output`.
pub fn decompress_file(input: &Path, output: &Path) -> Result<Metrics> {
    run_file(input, output, |reader, writer| decompress(reader, writer))
}

/// Create `path` for writing, failing if anything already exists there.
pub fn create_exclusive(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| Error::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
}

fn run_file<F>(input: &Path, output: &Path, codec: F) -> Result<Metrics>
where
    F: FnOnce(File, &mut BufWriter<File>) -> Result<Metrics>,
{
    let reader = File::open(input).map_err(|source| Error::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(create_exclusive(output)?);

    let result = codec(reader, &mut writer).and_then(|metrics| {
        writer.flush()?;
        Ok(metrics)
    });
    drop(writer);

    if result.is_err() {
        match fs::remove_file(output) {
            Ok(()) => tracing::debug!(path = %output.display(), "removed partial output"),
            Err(e) => tracing::warn!(
                path = %output.display(),
                error = %e,
                "failed to remove partial output"
            ),
        }
    }
    result
}
