//! LZW encoder: bytes in, codes out.
//!
//! The encoder extends the current match one byte at a time and only emits a
//! code when the match cannot be extended. Each emission teaches the table one
//! new sequence (the match plus the byte that broke it), unless the table is
//! full, in which case a reset marker follows the code and a new epoch begins.
//!
//! # Empty Input
//!
//! Nothing at all is emitted for an empty input, not even a reset marker, so
//! an empty file compresses to an empty file.

use std::io::{self, Read, Write};

use crate::code::{byte_code, Code, NULL_CODE};
use crate::code_table::CodeTable;
use crate::codeio::{CodeSink, CodeWriter};
use crate::error::Result;
use crate::metrics::{Metrics, RawTally};

/// Bytes pulled from the input per read call in [`compress`].
const INPUT_CHUNK: usize = 64 * 1024;

/// Streaming LZW encoder.
///
/// Owns its code table for the lifetime of the stream. Feed bytes with
/// [`push`](Self::push) or [`push_slice`](Self::push_slice), then call
/// [`finish`](Self::finish) exactly once to emit the pending match.
#[derive(Debug)]
pub struct Encoder {
    table: CodeTable,
    /// Code of the longest sequence matched so far (`NULL_CODE` before any input)
    current: Code,
    /// Reset markers emitted so far
    resets: u64,
    /// Bytes consumed so far
    position: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            table: CodeTable::new(),
            current: NULL_CODE,
            resets: 0,
            position: 0,
        }
    }

    /// Consume one input byte, emitting a code if the match ends here.
    pub fn push<S: CodeSink>(&mut self, byte: u8, sink: &mut S) -> Result<()> {
        self.position += 1;

        if let Some(next) = self.table.lookup(self.current, byte) {
            self.current = next;
            return Ok(());
        }

        sink.put(self.current)?;
        if self.table.is_full() {
            sink.put(NULL_CODE)?;
            self.table.reset();
            self.resets += 1;
            tracing::debug!(
                epoch = self.resets,
                position = self.position,
                "code table full, starting new epoch"
            );
        } else {
            self.table.insert(self.current, byte)?;
        }
        self.current = byte_code(byte);
        Ok(())
    }

    /// Consume a run of input bytes.
    pub fn push_slice<S: CodeSink>(&mut self, data: &[u8], sink: &mut S) -> Result<()> {
        for &byte in data {
            self.push(byte, sink)?;
        }
        Ok(())
    }

    /// Emit the pending match. Emits nothing if no byte was ever pushed.
    pub fn finish<S: CodeSink>(self, sink: &mut S) -> Result<()> {
        if self.current != NULL_CODE {
            sink.put(self.current)?;
        }
        Ok(())
    }

    /// The code the table will assign next.
    pub fn next_code(&self) -> u32 {
        self.table.next_code()
    }

    /// Number of reset markers emitted so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an in-memory buffer into a list of codes.
pub fn encode(data: &[u8]) -> Result<Vec<Code>> {
    let mut codes = Vec::with_capacity(data.len() / 2);
    let mut encoder = Encoder::new();
    encoder.push_slice(data, &mut codes)?;
    encoder.finish(&mut codes)?;
    Ok(codes)
}

/// Compress `input` into a code stream written to `output`.
///
/// The output is flushed before returning. On error the output holds an
/// incomplete stream and must be discarded.
pub fn compress<R: Read, W: Write>(mut input: R, output: W) -> Result<Metrics> {
    let mut metrics = Metrics::new();
    let mut encoder = Encoder::new();
    let mut writer = CodeWriter::new(output);
    let mut tally = RawTally::new();
    let mut buf = vec![0u8; INPUT_CHUNK];

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        tally.update(&buf[..n]);
        encoder.push_slice(&buf[..n], &mut writer)?;
    }

    metrics.resets = encoder.resets();
    encoder.finish(&mut writer)?;
    metrics.codes = writer.codes_written();
    writer.finish()?;
    tally.record(&mut metrics);
    metrics.complete();

    tracing::info!(
        raw_bytes = metrics.raw_bytes,
        codes = metrics.codes,
        resets = metrics.resets,
        "compression complete"
    );
    Ok(metrics)
}

/// Compress an in-memory buffer into wire-format bytes.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::<u8>::new();
    compress(data, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{FIRST_LEARNED_CODE, MAX_NUM_CODES};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        data
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        assert!(encode(b"").unwrap().is_empty());
        assert!(compress_to_vec(b"").unwrap().is_empty());
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(b"A").unwrap(), vec![byte_code(b'A')]);
        assert_eq!(encode(&[0x00]).unwrap(), vec![1]);
        assert_eq!(encode(&[0xFF]).unwrap(), vec![256]);
    }

    #[test]
    fn test_repeated_byte() {
        // "A", then "AA" (257), then the trailing "A"
        assert_eq!(encode(b"AAAA").unwrap(), vec![66, 257, 66]);
    }

    #[test]
    fn test_alternating_pattern_references_fresh_code() {
        // 259 ("ABA") is emitted right after being assigned
        assert_eq!(
            encode(b"ABABABABAB").unwrap(),
            vec![66, 67, 257, 259, 258, 67]
        );
    }

    #[test]
    fn test_wire_bytes_are_little_endian() {
        assert_eq!(compress_to_vec(b"AAAA").unwrap(), vec![66, 0, 1, 1, 66, 0]);
    }

    #[test]
    fn test_determinism() {
        let data = random_bytes(7, 20_000);
        assert_eq!(compress_to_vec(&data).unwrap(), compress_to_vec(&data).unwrap());
    }

    #[test]
    fn test_redundant_input_compresses() {
        let data = vec![b'z'; 10_000];
        let codes = encode(&data).unwrap();
        assert!(codes.len() < data.len());
        // A run of n bytes needs roughly sqrt(2n) codes
        assert!(codes.len() < 200);
    }

    #[test]
    fn test_dictionary_growth_is_bounded_and_resets() {
        let data = random_bytes(42, 400_000);
        let mut encoder = Encoder::new();
        let mut codes = Vec::<Code>::new();
        let mut prev_next = encoder.next_code();

        for &byte in &data {
            let resets_before = encoder.resets();
            encoder.push(byte, &mut codes).unwrap();
            let next = encoder.next_code();
            assert!(next <= MAX_NUM_CODES);

            if encoder.resets() > resets_before {
                assert_eq!(prev_next, MAX_NUM_CODES);
                assert_eq!(next, FIRST_LEARNED_CODE);
                assert_eq!(codes.last(), Some(&NULL_CODE));
            } else {
                assert!(next == prev_next || next == prev_next + 1);
            }
            prev_next = next;
        }
        encoder.finish(&mut codes).unwrap();

        let markers = codes.iter().filter(|&&c| c == NULL_CODE).count() as u64;
        assert!(markers >= 1);
    }

    #[test]
    fn test_compress_reports_metrics() {
        let data = b"ABABABABAB";
        let mut out = Vec::<u8>::new();
        let metrics = compress(&data[..], &mut out).unwrap();

        assert_eq!(metrics.raw_bytes, 10);
        assert_eq!(metrics.codes, 6);
        assert_eq!(metrics.resets, 0);
        assert_eq!(metrics.compressed_bytes(), out.len() as u64);
        assert_eq!(metrics.raw_crc32, crc32fast::hash(data));
    }
}
