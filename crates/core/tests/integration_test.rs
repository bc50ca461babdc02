//! Integration tests for the full codec pipeline.
//!
//! These tests verify end-to-end behavior: bytes -> codes -> wire bytes ->
//! codes -> bytes, across dictionary resets, batch sizes and corrupt input.

use lzw16_core::{
    code::{byte_code, Code, MAX_NUM_CODES, NULL_CODE},
    codeio::{CodeReader, CodeSink, CodeWriter},
    compress, compress_to_vec, decode, decompress, decompress_from_slice, encode, Encoder, Error,
    StreamError,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Text-like data over a small alphabet.
fn text_like(seed: u64, len: usize) -> Vec<u8> {
    let alphabet = b"abcdefghijklmnopqrstuvwxyz .,\n";
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// De Bruijn sequence over all byte values: every two-byte pattern occurs once.
fn all_byte_pairs() -> Vec<u8> {
    fn visit(t: usize, p: usize, a: &mut [u8; 3], seq: &mut Vec<u8>) {
        if t > 2 {
            if 2 % p == 0 {
                seq.extend_from_slice(&a[1..=p]);
            }
            return;
        }
        a[t] = a[t - p];
        visit(t + 1, p, a, seq);
        for j in (a[t - p] as usize + 1)..256 {
            a[t] = j as u8;
            visit(t + 1, t, a, seq);
        }
    }

    let mut seq = Vec::with_capacity(65537);
    visit(1, 1, &mut [0; 3], &mut seq);
    // Close the cycle so the wrap-around pair is present too
    seq.push(seq[0]);
    seq
}

fn round_trip(data: &[u8]) -> Vec<u8> {
    let stream = compress_to_vec(data).expect("compression failed");
    decompress_from_slice(&stream).expect("decompression failed")
}

#[test]
fn test_round_trip_small_inputs() {
    let cases: [&[u8]; 8] = [
        b"",
        b"A",
        b"AAAA",
        b"ABABABABAB",
        b"TOBEORNOTTOBEORTOBEORNOT",
        b"\x00\x00\x00\x00",
        b"\xff\x00\xff\x00\xff",
        b"abcabcabcabcabcabcabcabcabcabcabc",
    ];
    for data in cases {
        assert_eq!(round_trip(data), data, "round trip of {:?}", data);
    }
}

#[test]
fn test_empty_input_is_empty_stream() {
    let stream = compress_to_vec(b"").unwrap();
    assert!(stream.is_empty());
    assert!(decompress_from_slice(&stream).unwrap().is_empty());
}

#[test]
fn test_single_byte_is_single_code() {
    let stream = compress_to_vec(b"A").unwrap();
    assert_eq!(stream, byte_code(b'A').to_le_bytes());
}

#[test]
fn test_all_byte_values() {
    let data: Vec<u8> = (0..=255).collect();
    let codes = encode(&data).unwrap();
    // No pair repeats, so every byte is its own code
    assert_eq!(codes, data.iter().map(|&b| byte_code(b)).collect::<Vec<_>>());
    assert_eq!(decode(&codes).unwrap(), data);
}

#[test]
fn test_text_like_round_trip() {
    let data = text_like(3, 200_000);
    let stream = compress_to_vec(&data).unwrap();
    assert!(stream.len() < data.len());
    assert_eq!(decompress_from_slice(&stream).unwrap(), data);
}

#[test]
fn test_run_of_identical_bytes_compresses() {
    let data = vec![b'Q'; 10_000];
    let codes = encode(&data).unwrap();
    assert!(codes.len() < data.len());
    assert_eq!(decode(&codes).unwrap(), data);
}

#[test]
fn test_distinct_pairs_force_reset() {
    let data = all_byte_pairs();
    assert_eq!(data.len(), 65537);

    let codes = encode(&data).unwrap();
    let resets = codes.iter().filter(|&&c| c == NULL_CODE).count();
    assert_eq!(resets, 1);
    assert_eq!(decode(&codes).unwrap(), data);
}

#[test]
fn test_random_data_resets_and_round_trips() {
    let data = random_bytes(2024, 1 << 20);

    let mut stream = Vec::<u8>::new();
    let packed = compress(&data[..], &mut stream).unwrap();
    assert!(packed.resets >= 1);

    let mut restored = Vec::<u8>::new();
    let unpacked = decompress(&stream[..], &mut restored).unwrap();
    assert_eq!(restored, data);

    assert_eq!(unpacked.resets, packed.resets);
    assert_eq!(unpacked.codes, packed.codes);
    assert_eq!(unpacked.raw_crc32, packed.raw_crc32);
}

#[test]
fn test_reset_marker_follows_a_full_table() {
    let data = random_bytes(99, 300_000);
    let mut encoder = Encoder::new();
    let mut codes = Vec::<Code>::new();

    for &byte in &data {
        let full_before = encoder.next_code() == MAX_NUM_CODES;
        let emitted_before = codes.len();
        encoder.push(byte, &mut codes).unwrap();

        let emitted = &codes[emitted_before..];
        if emitted.contains(&NULL_CODE) {
            assert!(full_before, "reset marker before the table was full");
            assert_eq!(emitted.len(), 2);
            assert_eq!(emitted[1], NULL_CODE);
        }
    }
    encoder.finish(&mut codes).unwrap();

    assert!(codes.contains(&NULL_CODE));
    assert_eq!(decode(&codes).unwrap(), data);
}

#[test]
fn test_determinism() {
    let data = text_like(11, 50_000);
    assert_eq!(compress_to_vec(&data).unwrap(), compress_to_vec(&data).unwrap());
}

#[test]
fn test_chunked_input_matches_whole_input() {
    let data = text_like(5, 30_000);
    let whole = encode(&data).unwrap();

    let mut encoder = Encoder::new();
    let mut codes = Vec::<Code>::new();
    for chunk in data.chunks(997) {
        encoder.push_slice(chunk, &mut codes).unwrap();
    }
    encoder.finish(&mut codes).unwrap();

    assert_eq!(codes, whole);
}

#[test]
fn test_batch_size_does_not_change_stream() {
    let data = random_bytes(17, 200_000);
    let reference = compress_to_vec(&data).unwrap();

    for batch in [1, 5, 1024, 4096] {
        let mut encoder = Encoder::new();
        let mut writer = CodeWriter::with_batch_size(Vec::<u8>::new(), batch);
        encoder.push_slice(&data, &mut writer).unwrap();
        encoder.finish(&mut writer).unwrap();
        assert_eq!(writer.finish().unwrap(), reference, "batch size {}", batch);

        let mut reader = CodeReader::with_batch_size(&reference[..], batch);
        let mut codes = Vec::<Code>::new();
        while let Some(code) = reader.read_code().unwrap() {
            codes.put(code).unwrap();
        }
        assert_eq!(decode(&codes).unwrap(), data);
    }
}

#[test]
fn test_tampered_stream_is_rejected() {
    let mut codes = encode(b"ABABABABAB").unwrap();
    // Point the third code past anything the decoder could know
    codes[2] = 1000;

    let result = decode(&codes);
    assert!(matches!(
        result,
        Err(Error::Stream(StreamError::CodeOutOfRange { code: 1000, position: 2, .. }))
    ));
}

#[test]
fn test_stream_starting_with_learned_code_is_rejected() {
    let stream = 257u16.to_le_bytes();
    let err = decompress_from_slice(&stream).unwrap_err();
    assert!(matches!(
        err,
        Error::Stream(StreamError::UnresolvableCode { code: 257, position: 0 })
    ));
}
