//! LZW decoder: codes in, bytes out.
//!
//! The decoder rebuilds the encoder's dictionary one step behind it. Reading
//! code `k` tells the decoder which byte followed the sequence of code `k - 1`
//! in the input (the first byte of `k`'s sequence), which is exactly the entry
//! the encoder learned when it emitted `k - 1`.
//!
//! # Special Case
//!
//! When the encoder emits a code it assigned on the previous step, the decoder
//! has not learned it yet. That sequence is necessarily the previous sequence
//! followed by its own first byte, so the decoder extends the buffered previous
//! sequence in place.
//!
//! # Corrupt Streams
//!
//! A stream not produced by the encoder can reference codes the decoder cannot
//! resolve. These are reported as `StreamError`s carrying the offending code
//! and its position; the decoder never reads stale table state.

use std::io::{Read, Write};

use crate::code::{Code, NULL_CODE};
use crate::codeio::CodeReader;
use crate::error::{Result, StreamError};
use crate::metrics::{Metrics, TallyWriter};
use crate::reverse_table::ReverseCodeTable;
use crate::sequence::SequenceBuffer;

/// Streaming LZW decoder.
#[derive(Debug)]
pub struct Decoder {
    table: ReverseCodeTable,
    /// Previously decoded code (`NULL_CODE` at the start of each epoch)
    prev: Code,
    /// Byte sequence of `prev`
    seq: SequenceBuffer,
    /// First byte of `seq`; meaningful only while `prev != NULL_CODE`
    first_byte: u8,
    /// Reset markers consumed so far
    resets: u64,
    /// Index of the next code in the stream
    position: u64,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            table: ReverseCodeTable::new(),
            prev: NULL_CODE,
            seq: SequenceBuffer::new(),
            first_byte: 0,
            resets: 0,
            position: 0,
        }
    }

    /// Consume one code and return the bytes it stands for.
    ///
    /// A reset marker yields an empty sequence.
    ///
    /// # Errors
    /// - `StreamError::UnresolvableCode`: unassigned code with no previous code
    /// - `StreamError::CodeOutOfRange`: unassigned code the encoder cannot have assigned yet
    /// - `StreamError::MissingReset`: the dictionary is full and no reset marker arrived
    pub fn decode_code(&mut self, code: Code) -> Result<&SequenceBuffer> {
        let position = self.position;
        self.position += 1;

        if code == NULL_CODE {
            self.table.reset();
            self.prev = NULL_CODE;
            self.seq.clear();
            self.resets += 1;
            tracing::debug!(epoch = self.resets, position, "reset marker, starting new epoch");
            return Ok(&self.seq);
        }

        if self.table.is_unassigned(code) {
            if self.prev == NULL_CODE {
                return Err(StreamError::UnresolvableCode { code, position }.into());
            }
            let next_code = self.table.next_code();
            if code as u32 != next_code {
                return Err(StreamError::CodeOutOfRange {
                    code,
                    next_code,
                    position,
                }
                .into());
            }

            // `seq` still holds the previous sequence
            self.table.insert(self.prev, self.first_byte)?;
            self.seq.push_back(self.first_byte);
        } else {
            if self.prev != NULL_CODE && self.table.is_full() {
                return Err(StreamError::MissingReset { code, position }.into());
            }

            self.first_byte = self.table.materialize(code, &mut self.seq)?;
            if self.prev != NULL_CODE {
                self.table.insert(self.prev, self.first_byte)?;
            }
        }

        self.prev = code;
        Ok(&self.seq)
    }

    /// The code the table will assign next.
    pub fn next_code(&self) -> u32 {
        self.table.next_code()
    }

    /// Number of reset markers consumed so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a list of codes into the original bytes.
pub fn decode(codes: &[Code]) -> Result<Vec<u8>> {
    let mut out = Vec::<u8>::new();
    let mut decoder = Decoder::new();
    for &code in codes {
        decoder.decode_code(code)?.write_to(&mut out)?;
    }
    Ok(out)
}

/// Decompress the code stream in `input`, writing the original bytes to `output`.
///
/// The output is flushed before returning. On error the output holds a
/// truncated result and must be discarded.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<Metrics> {
    let mut metrics = Metrics::new();
    let mut decoder = Decoder::new();
    let mut reader = CodeReader::new(input);
    let mut out = TallyWriter::new(output);

    if let Err(err) = decode_stream(&mut decoder, &mut reader, &mut out) {
        if err.is_corrupt_stream() {
            tracing::warn!(error = %err, "rejecting corrupt code stream");
        }
        return Err(err);
    }
    out.flush()?;

    let (_, tally) = out.into_parts();
    metrics.codes = reader.codes_read();
    metrics.resets = decoder.resets();
    tally.record(&mut metrics);
    metrics.complete();

    tracing::info!(
        raw_bytes = metrics.raw_bytes,
        codes = metrics.codes,
        resets = metrics.resets,
        "decompression complete"
    );
    Ok(metrics)
}

/// Decompress an in-memory code stream.
pub fn decompress_from_slice(stream: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::<u8>::new();
    decompress(stream, &mut out)?;
    Ok(out)
}

fn decode_stream<R: Read, W: Write>(
    decoder: &mut Decoder,
    reader: &mut CodeReader<R>,
    out: &mut W,
) -> Result<()> {
    while let Some(code) = reader.read_code()? {
        decoder.decode_code(code)?.write_to(out)?;
    }
    Ok(())
}
