use crate::ring::Matrix;

/// Known-good 2×2 key over Z/36Z (det = -121 ≡ 23).
pub const DEFAULT_KEY_2X2: [[i64; 2]; 2] = [[5, 8], [17, 3]];

/// Known-good 3×3 key over Z/36Z (det = 1).
pub const DEFAULT_KEY_3X3: [[i64; 3]; 3] = [[1, 2, 3], [0, 1, 4], [5, 6, 0]];

/// Returns the built-in key for block size `n`, if there is one.
pub fn default_key(n: usize) -> Option<Matrix> {
    match n {
        2 => Some(DEFAULT_KEY_2X2.iter().map(|row| row.to_vec()).collect()),
        3 => Some(DEFAULT_KEY_3X3.iter().map(|row| row.to_vec()).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::is_valid_key;

    #[test]
    fn test_defaults_are_valid_mod_36() {
        for n in [2, 3] {
            let key = default_key(n).unwrap();
            assert_eq!(key.len(), n);
            assert!(is_valid_key(&key, 36));
        }
    }

    #[test]
    fn test_no_default_for_other_sizes() {
        assert!(default_key(1).is_none());
        assert!(default_key(4).is_none());
    }
}
