//! Error types for the lzw16 codec.
//!
//! All operations return structured errors rather than panicking, including
//! decoding of code streams that were not produced by the encoder.

use std::path::PathBuf;
use thiserror::Error;

use crate::code::Code;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Stream: the code stream is corrupt or was not produced by the encoder
/// - Table: a dictionary operation was used outside its contract
/// - I/O: reading or writing the underlying streams
/// - Input/Output paths: opening the files of a single invocation
#[derive(Debug, Error)]
pub enum Error {
    /// Code stream corruption detected while decoding
    #[error("corrupt code stream: {0}")]
    Stream(#[from] StreamError),

    /// Dictionary misuse (e.g., inserting into a full table)
    #[error("code table error: {0}")]
    Table(#[from] TableError),

    /// I/O error while streaming
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened
    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created (it may exist already)
    #[error("cannot create output {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True if this error reports a malformed code stream.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(self, Error::Stream(_))
    }
}

/// Code stream corruption errors.
///
/// `position` is the zero-based index of the offending code in the stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    /// An unassigned code arrived with no previous code to resolve it against
    #[error("code {code} at position {position} is unassigned and has no preceding code in its epoch")]
    UnresolvableCode { code: Code, position: u64 },

    /// A code beyond the one the encoder could possibly have just assigned
    #[error("code {code} at position {position} is beyond next available code {next_code}")]
    CodeOutOfRange {
        code: Code,
        next_code: u32,
        position: u64,
    },

    /// The dictionary is full but the stream continued without a reset marker
    #[error("code {code} at position {position} follows a full dictionary without a reset marker")]
    MissingReset { code: Code, position: u64 },

    /// The stream ended partway through a 2-byte code record
    #[error("stream ends with a partial code record ({trailing} trailing byte)")]
    TruncatedCode { trailing: usize },
}

/// Dictionary contract violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Attempted to assign a code when all 65536 codes are in use
    #[error("code table is full: cannot assign a code to ({parent}, {byte:#04x})")]
    Full { parent: Code, byte: u8 },

    /// Attempted to look up or extend a code that has not been assigned
    #[error("code {code} is not assigned (next available code is {next_code})")]
    Unassigned { code: Code, next_code: u32 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
