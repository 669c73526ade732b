//! Character/byte offset conversion
//!
//! The regex engine reports byte offsets while every public offset in lexmask
//! is a character offset. `CharIndex` maps between the two for one text.

/// Byte position of every character boundary in a text
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// `boundaries[i]` is the byte offset of character `i`; the last entry is the text length
    boundaries: Vec<usize>,
}

impl CharIndex {
    /// Build the index for `text`
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Number of characters in the indexed text
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Character offset of a byte offset lying on a character boundary
    ///
    /// Offsets inside a multi-byte character resolve to the following character.
    pub fn char_at_byte(&self, byte: usize) -> usize {
        self.boundaries.partition_point(|&b| b < byte)
    }

    /// Characters `start..end` of `text`, clipped to the text bounds
    pub fn slice<'a>(&self, text: &'a str, start: usize, end: usize) -> &'a str {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        &text[self.boundaries[start]..self.boundaries[end]]
    }
}

/// Byte offset of `char_idx` in `text`, clamped to the text length
pub fn clamped_byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}
