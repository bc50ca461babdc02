//! Encoder-side dictionary: a trie over byte sequences.
//!
//! Each code owns a row of 256 child slots, one per possible next byte. The
//! row for `NULL_CODE` is the trie root, whose children are the pre-assigned
//! single-byte codes. A slot holding `NULL_CODE` has no child yet.
//!
//! # Memory
//!
//! The table is allocated once at full capacity (65536 rows of 256 codes,
//! 32 MiB) and reset in place. A reset only clears the rows that were
//! assigned during the epoch, since no other row can have children.

use crate::code::{
    byte_code, Code, FIRST_AVAILABLE_CODE, FIRST_LEARNED_CODE, MAX_NUM_CODES, NULL_CODE,
};
use crate::error::{Result, TableError};

type Row = [Code; 256];

/// Forward trie mapping (code, next byte) to the code of the extended sequence.
///
/// # Invariants
/// - `next_code` is in `FIRST_LEARNED_CODE..=MAX_NUM_CODES`
/// - every non-null child slot holds a code `< next_code`
/// - rows at or above `next_code` are all `NULL_CODE`
pub struct CodeTable {
    rows: Vec<Row>,
    next_code: u32,
}

impl CodeTable {
    /// Allocate a table holding only the 256 single-byte codes.
    pub fn new() -> Self {
        let mut table = Self {
            rows: vec![[NULL_CODE; 256]; MAX_NUM_CODES as usize],
            next_code: FIRST_AVAILABLE_CODE,
        };
        table.reset();
        table
    }

    /// Code for the sequence `code` extended by `byte`, if one was assigned.
    #[inline]
    pub fn lookup(&self, code: Code, byte: u8) -> Option<Code> {
        match self.rows[code as usize][byte as usize] {
            NULL_CODE => None,
            child => Some(child),
        }
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
        if parent as u32 >= self.next_code {
            return Err(TableError::Unassigned {
                code: parent,
                next_code: self.next_code,
            }
            .into());
        }

        let slot = &mut self.rows[parent as usize][byte as usize];
        debug_assert_eq!(*slot, NULL_CODE, "trie slot assigned twice in one epoch");

        let code = self.next_code as Code;
        *slot = code;
        self.next_code += 1;
        Ok(code)
    }

    /// True once every code in the 16-bit space has been assigned.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.next_code == MAX_NUM_CODES
    }

    /// The code the next `insert` will assign.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// Start a new epoch: forget learned sequences, keep single bytes.
    pub fn reset(&mut self) {
        for row in &mut self.rows[..self.next_code as usize] {
            row.fill(NULL_CODE);
        }

        let root = &mut self.rows[NULL_CODE as usize];
        for byte in 0..=u8::MAX {
            root[byte as usize] = byte_code(byte);
        }
        self.next_code = FIRST_LEARNED_CODE;
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeTable")
            .field("next_code", &self.next_code)
            .finish_non_exhaustive()
    }
}
