//! Code values shared by the encoder and decoder.
//!
//! Every epoch starts with the 256 single-byte sequences pre-assigned:
//!
//! ```text
//! code 0        NULL_CODE: empty sequence (encoder), reset marker (wire)
//! code 1..=256  single bytes 0x00..=0xFF
//! code 257..    learned sequences, assigned in order of first use
//! ```

/// A dictionary code as carried on the wire.
pub type Code = u16;

/// Root of the trie and, on the wire, the epoch-reset marker.
pub const NULL_CODE: Code = 0;

/// First code handed out to a single-byte sequence.
pub const FIRST_AVAILABLE_CODE: u32 = 1;

/// First code handed out to a learned (multi-byte) sequence.
pub const FIRST_LEARNED_CODE: u32 = FIRST_AVAILABLE_CODE + 256;

/// Total number of distinct codes; the dictionary is full at this count.
pub const MAX_NUM_CODES: u32 = Code::MAX as u32 + 1;

/// Size of one code record on the wire.
pub const CODE_BYTES: usize = std::mem::size_of::<Code>();

/// Pre-assigned code for the single-byte sequence `byte`.
#[inline]
pub const fn byte_code(byte: u8) -> Code {
    byte as Code + FIRST_AVAILABLE_CODE as Code
}
