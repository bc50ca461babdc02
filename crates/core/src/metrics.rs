//! Metrics collected over one compress or decompress run.
//!
//! Both directions report the same quantities from opposite ends: the raw
//! (uncompressed) side and the code stream side. The CRC-32 always covers the
//! raw bytes, so the checksum printed by the compressor for its input matches
//! the one printed by the decompressor for its output.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain struct owned by the single worker of a run.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::code::CODE_BYTES;

/// Counters and timing for one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Streams ===
    /// Uncompressed bytes read (compress) or written (decompress)
    pub raw_bytes: u64,

    /// Codes written (compress) or read (decompress), reset markers included
    pub codes: u64,

    /// Reset markers in the code stream
    pub resets: u64,

    /// CRC-32 of the uncompressed bytes
    pub raw_crc32: u32,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            raw_bytes: 0,
            codes: 0,
            resets: 0,
            raw_crc32: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Size of the code stream in bytes.
    pub fn compressed_bytes(&self) -> u64 {
        self.codes * CODE_BYTES as u64
    }

    /// Number of dictionary epochs in the stream (0 for an empty stream).
    pub fn epochs(&self) -> u64 {
        if self.codes == 0 {
            0
        } else {
            self.resets + 1
        }
    }

    /// Compute compression ratio (compressed / raw).
    ///
    /// Returns 0.0 if no data was processed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes() as f64 / self.raw_bytes as f64
        }
    }

    /// Compute throughput over the raw bytes in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, title: &str) {
        println!("\n=== {} ===", title);
        println!("Duration: {} ms", self.duration().as_millis());
        println!(
            "Raw:        {} bytes ({:.2} MiB)",
            self.raw_bytes,
            self.raw_bytes as f64 / 1024.0 / 1024.0
        );
        println!(
            "Compressed: {} bytes ({:.2} MiB)",
            self.compressed_bytes(),
            self.compressed_bytes() as f64 / 1024.0 / 1024.0
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Codes: {}", self.codes);
        println!("Epochs: {} ({} resets)", self.epochs(), self.resets);
        println!("CRC-32 (raw): {:#010x}", self.raw_crc32);
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             raw_bytes={}\n\
             compressed_bytes={}\n\
             codes={}\n\
             resets={}\n\
             compression_ratio={:.4}\n\
             raw_crc32={:08x}\n",
            self.duration().as_millis(),
            self.raw_bytes,
            self.compressed_bytes(),
            self.codes,
            self.resets,
            self.compression_ratio(),
            self.raw_crc32,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Running byte count and CRC-32 over the raw side of a run.
#[derive(Debug, Clone, Default)]
pub struct RawTally {
    hasher: crc32fast::Hasher,
    bytes: u64,
}

impl RawTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes += data.len() as u64;
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Store the byte count and checksum into `metrics`.
    pub fn record(self, metrics: &mut Metrics) {
        metrics.raw_bytes = self.bytes;
        metrics.raw_crc32 = self.hasher.finalize();
    }
}

/// Writer adapter that tallies everything written through it.
#[derive(Debug)]
pub struct TallyWriter<W: Write> {
    inner: W,
    tally: RawTally,
}

impl<W: Write> TallyWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            tally: RawTally::new(),
        }
    }

    /// Split into the wrapped writer and the final tally.
    pub fn into_parts(self) -> (W, RawTally) {
        (self.inner, self.tally)
    }
}

impl<W: Write> Write for TallyWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.tally.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
