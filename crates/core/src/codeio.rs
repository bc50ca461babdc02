//! Batched reading and writing of fixed-width code records.
//!
//! The compressed stream is a bare sequence of 2-byte little-endian codes with
//! no header or trailer. `CodeWriter` and `CodeReader` move codes in batches
//! to keep syscalls off the per-code path; the batch size never affects the
//! bytes on the wire.
//!
//! # Example
//! ```
//! use lzw16_core::codeio::{CodeReader, CodeSink, CodeWriter};
//!
//! let mut writer = CodeWriter::new(Vec::<u8>::new());
//! writer.put(66).unwrap();
//! writer.put(257).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0x42, 0x00, 0x01, 0x01]);
//!
//! let mut reader = CodeReader::new(&bytes[..]);
//! assert_eq!(reader.read_code().unwrap(), Some(66));
//! assert_eq!(reader.read_code().unwrap(), Some(257));
//! assert_eq!(reader.read_code().unwrap(), None);
//! ```

use std::io::{self, Read, Write};

use crate::code::{Code, CODE_BYTES};
use crate::error::{Result, StreamError};

/// Codes moved per read or write call.
pub const DEFAULT_BATCH_CODES: usize = 1024;

/// Destination for codes produced by the encoder.
pub trait CodeSink {
    /// Append one code to the stream.
    fn put(&mut self, code: Code) -> Result<()>;
}

impl CodeSink for Vec<Code> {
    fn put(&mut self, code: Code) -> Result<()> {
        self.push(code);
        Ok(())
    }
}

/// Writes codes to an underlying writer in fixed-size batches.
///
/// Codes are buffered until a batch is full; `finish` writes whatever is left
/// and flushes the writer. Dropping a `CodeWriter` without calling `finish`
/// loses the buffered tail.
#[derive(Debug)]
pub struct CodeWriter<W: Write> {
    inner: W,
    /// Encoded records not yet handed to `inner`
    buf: Vec<u8>,
    /// Flush threshold in bytes (batch size * record size)
    batch_bytes: usize,
    codes_written: u64,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_batch_size(inner, DEFAULT_BATCH_CODES)
    }

    /// Create a writer that flushes every `batch_codes` codes (minimum 1).
    pub fn with_batch_size(inner: W, batch_codes: usize) -> Self {
        let batch_bytes = batch_codes.max(1) * CODE_BYTES;
        Self {
            inner,
            buf: Vec::with_capacity(batch_bytes),
            batch_bytes,
            codes_written: 0,
        }
    }

    /// Number of codes accepted so far, including buffered ones.
    pub fn codes_written(&self) -> u64 {
        self.codes_written
    }

    /// Write buffered codes and flush the underlying writer, returning it.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_batch()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_batch(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> CodeSink for CodeWriter<W> {
    fn put(&mut self, code: Code) -> Result<()> {
        self.buf.extend_from_slice(&code.to_le_bytes());
        self.codes_written += 1;
        if self.buf.len() >= self.batch_bytes {
            self.write_batch()?;
        }
        Ok(())
    }
}

/// Reads codes from an underlying reader in fixed-size batches.
#[derive(Debug)]
pub struct CodeReader<R: Read> {
    inner: R,
    buf: Vec<u8>,
    /// Next unread byte in `buf`
    pos: usize,
    /// End of valid data in `buf`
    end: usize,
    codes_read: u64,
}

impl<R: Read> CodeReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_batch_size(inner, DEFAULT_BATCH_CODES)
    }

    /// Create a reader that pulls up to `batch_codes` codes per refill (minimum 1).
    pub fn with_batch_size(inner: R, batch_codes: usize) -> Self {
        Self {
            inner,
            buf: vec![0; batch_codes.max(1) * CODE_BYTES],
            pos: 0,
            end: 0,
            codes_read: 0,
        }
    }

    /// Read the next code, or `None` at a clean end of stream.
    ///
    /// # Errors
    /// - `StreamError::TruncatedCode` if the stream ends inside a code record
    /// - `Error::Io` if the underlying reader fails
    pub fn read_code(&mut self) -> Result<Option<Code>> {
        if self.pos == self.end && !self.refill()? {
            return Ok(None);
        }

        let code = Code::from_le_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += CODE_BYTES;
        self.codes_read += 1;
        Ok(Some(code))
    }

    /// Number of codes returned so far; also the index of the next code.
    pub fn codes_read(&self) -> u64 {
        self.codes_read
    }

    /// Refill the batch buffer. Returns false at end of stream.
    fn refill(&mut self) -> Result<bool> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        // The buffer length is a whole number of records, so a remainder can
        // only appear when the stream ended.
        let trailing = filled % CODE_BYTES;
        if trailing != 0 {
            return Err(StreamError::TruncatedCode { trailing }.into());
        }

        self.pos = 0;
        self.end = filled;
        Ok(filled > 0)
    }
}
