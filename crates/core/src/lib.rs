//! lzw16-core: LZW byte-stream codec with 16-bit codes and in-band resets
//!
//! This library compresses an arbitrary byte stream into a stream of fixed-width
//! 16-bit codes and reconstructs the original bytes exactly. The dictionary is
//! never transmitted: the encoder and decoder each build their own copy, and
//! both evolve identically from the code stream alone.
//!
//! # Architecture
//!
//! - `code`: code values and the reserved `NULL_CODE`
//! - `code_table`: encoder trie, (code, byte) → code
//! - `reverse_table`: decoder table, code → (parent, byte)
//! - `sequence`: scratch buffer for the decoder's current sequence
//! - `encoder` / `decoder`: the two state machines and stream drivers
//! - `codeio`: batched reading and writing of 2-byte code records
//! - `file`: path-level drivers with exclusive output creation
//! - `metrics`: counters, CRC-32 and timing for a run
//!
//! # Wire Format
//!
//! A bare sequence of little-endian `u16` codes. Code 0 marks a dictionary
//! reset; codes 1..=256 are the single bytes. No header, no trailer; an empty
//! input compresses to an empty stream.
//!
//! # Example
//! ```
//! let stream = lzw16_core::compress_to_vec(b"ABABABABAB").unwrap();
//! assert_eq!(stream.len(), 12);
//! let restored = lzw16_core::decompress_from_slice(&stream).unwrap();
//! assert_eq!(restored, b"ABABABABAB");
//! ```

pub mod code;
pub mod code_table;
pub mod codeio;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod file;
pub mod metrics;
pub mod reverse_table;
pub mod sequence;

// Re-export commonly used types
pub use code::{Code, NULL_CODE};
pub use decoder::{decode, decompress, decompress_from_slice, Decoder};
pub use encoder::{compress, compress_to_vec, encode, Encoder};
pub use error::{Error, Result, StreamError};
pub use file::{compress_file, decompress_file};
pub use metrics::Metrics;
