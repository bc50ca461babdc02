//! Scratch buffer holding the byte sequence of the most recent code.
//!
//! The decoder fills it back to front while walking parent links, and in the
//! special case extends the previous sequence by one byte at the back. A
//! deque keeps both operations O(1).

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::code::MAX_NUM_CODES;

/// Byte sequence of a single code, in emission order.
///
/// A sequence never exceeds `MAX_NUM_CODES` bytes: each learned code is one
/// byte longer than some earlier code of the same epoch.
#[derive(Debug, Clone, Default)]
pub struct SequenceBuffer {
    bytes: VecDeque<u8>,
}

impl SequenceBuffer {
    pub fn new() -> Self {
        Self {
            bytes: VecDeque::new(),
        }
    }

    /// Prepend a byte discovered while walking towards the root.
    #[inline]
    pub fn push_front(&mut self, byte: u8) {
        debug_assert!(self.bytes.len() < MAX_NUM_CODES as usize);
        self.bytes.push_front(byte);
    }

    /// Append a byte to the end of the sequence.
    #[inline]
    pub fn push_back(&mut self, byte: u8) {
        debug_assert!(self.bytes.len() < MAX_NUM_CODES as usize);
        self.bytes.push_back(byte);
    }

    /// First byte of the sequence, if any.
    #[inline]
    pub fn first(&self) -> Option<u8> {
        self.bytes.front().copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Write the sequence to `out` without consuming it.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (head, tail) = self.bytes.as_slices();
        out.write_all(head)?;
        out.write_all(tail)
    }

    /// Copy the sequence into a contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.iter().copied().collect()
    }
}
