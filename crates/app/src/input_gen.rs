//! Sample input generation for exercising the codec.
//!
//! Generated data is a concatenation of segments, each with its own shape:
//!
//! - Runs of one byte, which LZW collapses into a handful of long codes
//! - Text over a small alphabet, which compresses moderately
//! - Short repeating patterns
//! - Copies of earlier output, so long matches span segment boundaries
//! - Uniform noise, which expands and fills the dictionary quickly
//!
//! A megabyte or more of this fills the 65536-entry dictionary several times,
//! so reset markers show up in the code stream.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound on the length of one segment.
const MAX_SEGMENT: usize = 8192;

const TEXT_ALPHABET: &[u8] = b"etaoinshrdlucmfwypvbgkqjxz  .,\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Run,
    Text,
    Pattern,
    Echo,
    Noise,
}

impl Segment {
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10u8) {
            0..=1 => Segment::Run,
            2..=4 => Segment::Text,
            5..=6 => Segment::Pattern,
            7 => Segment::Echo,
            _ => Segment::Noise,
        }
    }
}

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
///
/// The same seed and size always produce the same bytes.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let len = (size_bytes - data.len()).min(rng.gen_range(256..=MAX_SEGMENT));

        match Segment::pick(&mut rng) {
            Segment::Run => {
                let byte: u8 = rng.gen();
                data.resize(data.len() + len, byte);
            }
            Segment::Text => {
                data.extend((0..len).map(|_| TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())]));
            }
            Segment::Pattern => {
                let pattern: Vec<u8> = (0..rng.gen_range(2..=24)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(len));
            }
            Segment::Echo if data.len() >= len => {
                let start = rng.gen_range(0..=data.len() - len);
                data.extend_from_within(start..start + len);
            }
            // Nothing long enough to copy yet
            Segment::Echo | Segment::Noise => {
                let from = data.len();
                data.resize(from + len, 0);
                rng.fill_bytes(&mut data[from..]);
            }
        }
    }

    data
}

/// Generate sample data and write it to a new file at `path`.
///
/// Fails without touching anything if `path` already exists.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> anyhow::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = lzw16_core::file::create_exclusive(path)?;
    file.write_all(&data)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), seed, bytes = data.len(), "wrote sample input");
    Ok(())
}
