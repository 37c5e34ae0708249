//! Text filtering and padding around the 36-symbol alphabet.

use crate::preset::alphabet::{PADDING_SYMBOL, index_to_symbol, symbol_to_index};
use crate::ring::Vector;

/// Keeps ASCII letters and digits, upper-cased. Everything else is dropped.
///
/// Lossy: encryption is only defined over the filtered text.
pub fn clean_and_uppercase(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// Right-pads with `X` until the length is a multiple of `block_size`.
pub fn pad(text: &str, block_size: usize) -> String {
    let mut padded = text.to_string();
    let remainder = padded.chars().count() % block_size;
    if remainder != 0 {
        padded.extend(std::iter::repeat_n(PADDING_SYMBOL, block_size - remainder));
    }
    padded
}

/// Maps already-cleaned text to indices; characters outside the alphabet are skipped.
pub fn to_indices(text: &str) -> Vector {
    text.chars().filter_map(symbol_to_index).collect()
}

pub fn from_indices(indices: &[i64]) -> String {
    indices.iter().map(|&i| index_to_symbol(i)).collect()
}
