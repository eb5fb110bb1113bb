//! Text edit buffer.
//!
//! Edits are expressed against offsets of the *original* source and are
//! never read back while patching, so rules can emit them in any order that
//! respects the two rules below.
//!
//! # Same-offset insertions
//!
//! Insertions at one offset form an ordered sequence, emitted in call order,
//! with no deduplication or reordering:
//!
//! ```text
//! insert(0, "!")            →  !a
//! insert(0, "b.includes(")  →  !b.includes(a
//! ```
//!
//! # Removals
//!
//! `remove(start, end)` deletes original bytes `[start, end)` and drops
//! insertions queued earlier at offsets in `(start, end]`; text queued at
//! `start` belongs to whatever precedes the removed range and survives.
//! Insertions queued after the removal always survive.

use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included};

/// Invalid use of the edit buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    OffsetOutOfBounds { offset: u32, len: u32 },
    NotCharBoundary { offset: u32 },
    InvertedRange { start: u32, end: u32 },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {offset} is past the end of the source ({len} bytes)")
            }
            EditError::NotCharBoundary { offset } => {
                write!(f, "offset {offset} is not on a character boundary")
            }
            EditError::InvertedRange { start, end } => {
                write!(f, "range {start}..{end} ends before it starts")
            }
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Clone, Debug)]
pub struct EditBuffer {
    original: String,
    /// One bit per original byte.
    removed: FixedBitSet,
    inserts: BTreeMap<u32, SmallVec<[String; 2]>>,
}

impl EditBuffer {
    pub fn new(source: impl Into<String>) -> Self {
        let original = source.into();
        let removed = FixedBitSet::with_capacity(original.len());
        EditBuffer {
            original,
            removed,
            inserts: BTreeMap::new(),
        }
    }

    /// Whether any edit has been queued.
    pub fn has_changes(&self) -> bool {
        !self.inserts.is_empty() || self.removed.count_ones(..) > 0
    }

    fn check_offset(&self, offset: u32) -> Result<(), EditError> {
        let len = self.original.len() as u32;
        if offset > len {
            return Err(EditError::OffsetOutOfBounds { offset, len });
        }
        if !self.original.is_char_boundary(offset as usize) {
            return Err(EditError::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_range(&self, start: u32, end: u32) -> Result<(), EditError> {
        if end < start {
            return Err(EditError::InvertedRange { start, end });
        }
        self.check_offset(start)?;
        self.check_offset(end)
    }

    /// Queue `text` at `offset`, after anything already queued there.
    pub fn insert(&mut self, offset: u32, text: &str) -> Result<(), EditError> {
        self.check_offset(offset)?;
        if !text.is_empty() {
            self.inserts
                .entry(offset)
                .or_default()
                .push(text.to_string());
        }
        Ok(())
    }

    /// Delete original bytes `[start, end)`.
    pub fn remove(&mut self, start: u32, end: u32) -> Result<(), EditError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(());
        }
        self.removed.insert_range(start as usize..end as usize);
        let dropped: SmallVec<[u32; 8]> = self
            .inserts
            .range((Excluded(start), Included(end)))
            .map(|(&offset, _)| offset)
            .collect();
        for offset in dropped {
            self.inserts.remove(&offset);
        }
        Ok(())
    }

    /// Current text of original range `[start, end)`, including insertions
    /// queued at both boundary offsets.
    pub fn slice(&self, start: u32, end: u32) -> Result<String, EditError> {
        self.check_range(start, end)?;
        Ok(self.render_range(start, end))
    }

    /// The fully edited text.
    pub fn render(&self) -> String {
        if !self.has_changes() {
            return self.original.clone();
        }
        self.render_range(0, self.original.len() as u32)
    }

    fn render_range(&self, start: u32, end: u32) -> String {
        let mut out = String::with_capacity((end - start) as usize);
        let mut pos = start;
        for (&offset, texts) in self.inserts.range(start..=end) {
            self.push_kept(&mut out, pos, offset);
            for text in texts {
                out.push_str(text);
            }
            pos = offset;
        }
        self.push_kept(&mut out, pos, end);
        out
    }

    /// Append the surviving original bytes of `[from, to)`.
    fn push_kept(&self, out: &mut String, from: u32, to: u32) {
        let (mut i, to) = (from as usize, to as usize);
        while i < to {
            if self.removed.contains(i) {
                i += 1;
                continue;
            }
            let run_start = i;
            while i < to && !self.removed.contains(i) {
                i += 1;
            }
            out.push_str(&self.original[run_start..i]);
        }
    }
}

#[cfg(test)]
#[path = "../tests/edit_buffer_tests.rs"]
mod tests;
