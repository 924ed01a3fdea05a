//! Byte offset -> rune offset translation for one snapshot of source text.
//!
//! The parser reports byte offsets; the text widget counts Unicode scalar values. Every
//! multi-byte character pushes the two apart by its extra bytes.

/// Per-byte adjustment table: `rune = byte + adjust[byte]`.
///
/// All bytes of one scalar share the adjustment of its first byte, so a lookup inside a
/// multi-byte character yields the index of that character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    adjust: Vec<isize>,
    rune_len: usize,
}

impl OffsetTable {
    pub fn build(text: &str) -> Self {
        let mut adjust = vec![0isize; text.len()];
        let mut overhead = 0usize;
        let mut rune_len = 0usize;
        for (byte_idx, ch) in text.char_indices() {
            let width = ch.len_utf8();
            adjust[byte_idx..byte_idx + width].fill(-(overhead as isize));
            overhead += width - 1;
            rune_len += 1;
        }
        Self { adjust, rune_len }
    }

    pub fn byte_len(&self) -> usize {
        self.adjust.len()
    }

    pub fn rune_len(&self) -> usize {
        self.rune_len
    }

    pub fn adjustment(&self, byte_offset: usize) -> Option<isize> {
        self.adjust.get(byte_offset).copied()
    }

    /// Rune index of the character starting at or containing `byte_offset`.
    ///
    /// `None` past the end of the text: stale positions are not clamped.
    pub fn rune_offset(&self, byte_offset: usize) -> Option<usize> {
        let adjust = self.adjustment(byte_offset)?;
        Some(byte_offset.wrapping_add_signed(adjust))
    }

    /// Like [`Self::rune_offset`], but accepts the one-past-the-end position of a range.
    pub fn rune_end(&self, byte_offset: usize) -> Option<usize> {
        if byte_offset == self.byte_len() {
            return Some(self.rune_len);
        }
        self.rune_offset(byte_offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/offsets.rs"]
mod tests;
