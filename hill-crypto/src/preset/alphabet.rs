use lazy_static::lazy_static;
use std::collections::HashMap;

/// Symbols in index order: letters take 0..=25, digits take 26..=35.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of symbols, and therefore the modulus of the cipher ring.
pub const ALPHABET_SIZE: u64 = 36;

/// Symbol appended to plaintext until it fills a whole block.
pub const PADDING_SYMBOL: char = 'X';

lazy_static! {
    /// A static HashMap mapping an index (0 to 35) to its alphabet symbol.
    pub static ref INDEX_TO_SYMBOL_MAP: HashMap<u8, char> = ALPHABET
        .chars()
        .enumerate()
        .map(|(i, ch)| (i as u8, ch))
        .collect();

    /// A static HashMap mapping an alphabet symbol (A-Z, 0-9) to its index (0 to 35).
    pub static ref SYMBOL_TO_INDEX_MAP: HashMap<char, u8> = INDEX_TO_SYMBOL_MAP
        .iter()
        .map(|(&index, &ch)| (ch, index))
        .collect();
}

/// Maps an upper-case letter or digit to its index. Anything else has no index.
pub fn symbol_to_index(ch: char) -> Option<i64> {
    SYMBOL_TO_INDEX_MAP.get(&ch).map(|&i| i as i64)
}

/// Maps an index back to its symbol, reducing it mod 36 first.
pub fn index_to_symbol(index: i64) -> char {
    let reduced = index.rem_euclid(ALPHABET_SIZE as i64) as u8;
    // every residue in [0, 36) is a key of the table
    INDEX_TO_SYMBOL_MAP.get(&reduced).copied().unwrap_or(PADDING_SYMBOL)
}
