//! Sliding-window segmentation of document text.
//!
//! Documents are cut into fixed-size, overlapping windows that are handed to
//! the generation LLM as self-contained context. The same splitter sizes the
//! chunks of the keyword retriever's index.
//!
//! Sizes and offsets are counted in characters (Unicode scalar values), so a
//! window never splits a multi-byte character.
//!
//! # Example
//!
//! ```
//! use ragprobe_core::windowing::split_windows;
//!
//! let text = "a".repeat(2600);
//! let windows = split_windows(&text, 1500, 300).unwrap();
//! assert_eq!(windows.len(), 2);
//! assert_eq!(windows[1].len(), 1400);
//! ```

use crate::error::ConfigError;

/// A contiguous slice of a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    /// Index of this window in the document (0-based)
    pub index: usize,
    /// The window text (borrowed from the document)
    pub text: &'a str,
    /// ID of the document the window was cut from
    pub source_id: &'a str,
    /// Character offset where this window starts in the document
    pub start_char: usize,
    /// Character offset where this window ends (exclusive)
    pub end_char: usize,
}

/// Checks that windows of `size` with `overlap` can make progress.
pub fn validate_window(size: usize, overlap: usize) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroContextSize);
    }
    if overlap >= size {
        return Err(ConfigError::OverlapTooLarge { size, overlap });
    }
    Ok(())
}

/// Splits `content` into windows of `size` characters sharing `overlap`.
///
/// Content no longer than `size` comes back as a single window. Otherwise the
/// start advances by `size - overlap` until a window reaches the end of the
/// content; the last window always ends exactly at the end.
pub fn context_windows<'a>(
    source_id: &'a str,
    content: &'a str,
    size: usize,
    overlap: usize,
) -> Result<Vec<ContextWindow<'a>>, ConfigError> {
    validate_window(size, overlap)?;

    let char_len = content.chars().count();
    if char_len <= size {
        return Ok(vec![ContextWindow {
            index: 0,
            text: content,
            source_id,
            start_char: 0,
            end_char: char_len,
        }]);
    }

    let step = size - overlap;
    let count = (char_len - size).div_ceil(step) + 1;

    // Byte offsets of window starts (every `step` chars) and of the ends of
    // all but the last window (every `step` chars after `size`)
    let mut starts = Vec::with_capacity(count);
    let mut ends = Vec::with_capacity(count);
    for (pos, (byte, _)) in content.char_indices().enumerate() {
        if pos % step == 0 && starts.len() < count {
            starts.push(byte);
        }
        if pos >= size && (pos - size) % step == 0 && ends.len() < count - 1 {
            ends.push(byte);
        }
    }
    ends.push(content.len());

    Ok(starts
        .into_iter()
        .zip(ends)
        .enumerate()
        .map(|(index, (start_byte, end_byte))| {
            let start_char = index * step;
            ContextWindow {
                index,
                text: &content[start_byte..end_byte],
                source_id,
                start_char,
                end_char: (start_char + size).min(char_len),
            }
        })
        .collect())
}

/// Convenience wrapper returning only the window texts.
pub fn split_windows(content: &str, size: usize, overlap: usize) -> Result<Vec<&str>, ConfigError> {
    Ok(context_windows("", content, size, overlap)?
        .into_iter()
        .map(|w| w.text)
        .collect())
}
