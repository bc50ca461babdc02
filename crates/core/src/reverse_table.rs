//! Decoder-side dictionary: codes mapped back to byte sequences.
//!
//! Every assigned code records its parent code and the byte that extends the
//! parent's sequence. Codes are assigned sequentially, so the table is a flat
//! array indexed by code and appending is a push at `next_code`.
//!
//! A parent is always assigned before its child, which means walking parent
//! links strictly decreases the code and always reaches `NULL_CODE`.

use crate::code::{Code, FIRST_AVAILABLE_CODE, FIRST_LEARNED_CODE, MAX_NUM_CODES, NULL_CODE};
use crate::error::{Result, TableError};
use crate::sequence::SequenceBuffer;

/// A (parent code, trailing byte) record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseEntry {
    pub parent: Code,
    pub byte: u8,
}

/// Reverse trie mapping a code to its parent and trailing byte.
///
/// # Invariants
/// - `entries.len() == next_code` (slot 0 is a placeholder for `NULL_CODE`)
/// - `entries[c].parent < c` for every assigned code `c`
#[derive(Debug, Clone)]
pub struct ReverseCodeTable {
    entries: Vec<ReverseEntry>,
}

impl ReverseCodeTable {
    /// Allocate a table holding only the 256 single-byte codes.
    pub fn new() -> Self {
        let mut table = Self {
            entries: Vec::with_capacity(MAX_NUM_CODES as usize),
        };
        table.reset();
        table
    }

    /// Parent and trailing byte of an assigned code.
    ///
    /// # Errors
    /// Returns `TableError::Unassigned` for `NULL_CODE` or codes not yet assigned.
    #[inline]
    pub fn lookup(&self, code: Code) -> Result<ReverseEntry> {
        if code == NULL_CODE || self.is_unassigned(code) {
            return Err(TableError::Unassigned {
                code,
                next_code: self.next_code(),
            }
            .into());
        }
        Ok(self.entries[code as usize])
    }

    /// Assign the next available code to the sequence `parent` + `byte`.
    ///
    /// # Errors
    /// - `TableError::Full` if all codes are in use
    /// - `TableError::Unassigned` if `parent` is not a code of this epoch
    pub fn insert(&mut self, parent: Code, byte: u8) -> Result<Code> {
        if self.is_full() {
            return Err(TableError::Full { parent, byte }.into());
        }
        if self.is_unassigned(parent) {
            return Err(TableError::Unassigned {
                code: parent,
                next_code: self.next_code(),
            }
            .into());
        }

        let code = self.entries.len() as Code;
        self.entries.push(ReverseEntry { parent, byte });
        Ok(code)
    }

    /// True if `code` has not been assigned in the current epoch.
    #[inline]
    pub fn is_unassigned(&self, code: Code) -> bool {
        code as u32 >= self.next_code()
    }

    /// True once every code in the 16-bit space has been assigned.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.next_code() == MAX_NUM_CODES
    }

    /// The code the next `insert` will assign.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Write the byte sequence of `code` into `buf`, replacing its contents,
    /// and return the sequence's first byte.
    ///
    /// Parent links yield bytes last-to-first, so each one is pushed to the
    /// front of the buffer and the result reads in emission order.
    ///
    /// # Errors
    /// Returns `TableError::Unassigned` for `NULL_CODE` or codes not yet assigned.
    pub fn materialize(&self, code: Code, buf: &mut SequenceBuffer) -> Result<u8> {
        buf.clear();
        let mut entry = self.lookup(code)?;
        buf.push_front(entry.byte);
        while entry.parent != NULL_CODE {
            entry = self.lookup(entry.parent)?;
            buf.push_front(entry.byte);
        }
        Ok(entry.byte)
    }

    /// Start a new epoch: forget learned sequences, keep single bytes.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(ReverseEntry::default());
        debug_assert_eq!(self.entries.len() as u32, FIRST_AVAILABLE_CODE);

        for byte in 0..=u8::MAX {
            self.entries.push(ReverseEntry {
                parent: NULL_CODE,
                byte,
            });
        }
        debug_assert_eq!(self.next_code(), FIRST_LEARNED_CODE);
    }
}

impl Default for ReverseCodeTable {
    fn default() -> Self {
        Self::new()
    }
}
