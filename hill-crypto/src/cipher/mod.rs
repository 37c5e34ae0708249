//! # Hill Cipher
//!
//! Block substitution over the 36-symbol alphabet `A-Z0-9`. A plaintext block `p` of `n`
//! symbol indices becomes `K·p mod 36`; decryption applies `K⁻¹ mod 36`.
//!
//! ```
//! # use hill_crypto::cipher::{HillCipher, KeyMatrix};
//! let key = KeyMatrix::try_with(vec![vec![5, 8], vec![17, 3]]).unwrap();
//! let cipher = HillCipher::try_with(key).unwrap();
//!
//! assert_eq!(cipher.encrypt("ab"), "ID");
//! assert_eq!(cipher.decrypt("ID").unwrap(), "AB");
//! ```

pub mod key;
pub mod text;

pub use key::KeyMatrix;
pub use text::{clean_and_uppercase, pad};

use crate::errors::HillCryptoError;
use crate::preset::alphabet::ALPHABET_SIZE;
use crate::ring::matrix_ops::{apply_to_block, inspect_key, matrix_mod_inverse};
use crate::ring::{KeyDiagnostics, Matrix, Ring, Vector};

use text::{from_indices, to_indices};

use serde::{Deserialize, Serialize};

/// Ciphertext together with the length of the filtered plaintext it came from.
///
/// Padding symbols are valid alphabet symbols, so only the recorded length tells
/// them apart from plaintext that really ends in `X`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sealed {
    pub ciphertext: String,
    pub plaintext_len: usize,
}

impl Sealed {
    /// Number of padding symbols appended during encryption.
    pub fn padding(&self) -> usize {
        self.ciphertext.len().saturating_sub(self.plaintext_len)
    }
}

#[derive(Debug, Clone)]
pub struct HillCipher {
    key: KeyMatrix,
    inverse_key: Matrix,
    diagnostics: KeyDiagnostics,
    ring: Ring,
}

impl HillCipher {
    /// The ring size, equal to the alphabet size.
    pub const MODULUS: u64 = ALPHABET_SIZE;

    /// Builds a cipher, rejecting keys whose determinant is not coprime to 36.
    ///
    /// The inverse key is computed here, so a constructed cipher can always decrypt.
    pub fn try_with(key: KeyMatrix) -> Result<Self, HillCryptoError> {
        let ring = Ring::try_with(Self::MODULUS)?;
        let diagnostics = inspect_key(key.rows(), &ring)?;

        if !diagnostics.is_valid() {
            return Err(HillCryptoError::InvalidKey {
                determinant: diagnostics.determinant,
                det_mod: diagnostics.det_mod,
                gcd: diagnostics.gcd,
                modulus: Self::MODULUS,
            });
        }

        let inverse_key = matrix_mod_inverse(key.rows(), &ring)?;

        log::debug!(
            "Hill cipher ready: n={}, det={}, det mod {}={}, det^-1={:?}",
            key.size(),
            diagnostics.determinant,
            Self::MODULUS,
            diagnostics.det_mod,
            diagnostics.det_inverse
        );

        Ok(Self {
            key,
            inverse_key,
            diagnostics,
            ring,
        })
    }

    pub fn key(&self) -> &KeyMatrix {
        &self.key
    }

    /// `K⁻¹ mod 36`, entries in `[0, 36)`.
    pub fn inverse_key(&self) -> &Matrix {
        &self.inverse_key
    }

    pub fn block_size(&self) -> usize {
        self.key.size()
    }

    /// Cleans, pads with `X` and encrypts. The output length is a multiple of the block size.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let cleaned = clean_and_uppercase(plaintext);
        let padded = pad(&cleaned, self.block_size());

        let cipher_indices = self.transform(self.key.rows(), &to_indices(&padded));
        from_indices(&cipher_indices)
    }

    /// Decrypts ciphertext. Padding added by [`HillCipher::encrypt`] is kept.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::MalformedInput` if the filtered ciphertext does not
    /// split into whole blocks.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, HillCryptoError> {
        let indices = to_indices(&clean_and_uppercase(ciphertext));

        if indices.len() % self.block_size() != 0 {
            return Err(HillCryptoError::MalformedInput {
                len: indices.len(),
                block_size: self.block_size(),
            });
        }

        let plain_indices = self.transform(&self.inverse_key, &indices);
        Ok(from_indices(&plain_indices))
    }

    /// Encrypts and records the filtered plaintext length so [`HillCipher::open`] can drop the padding.
    pub fn seal(&self, plaintext: &str) -> Sealed {
        Sealed {
            plaintext_len: clean_and_uppercase(plaintext).len(),
            ciphertext: self.encrypt(plaintext),
        }
    }

    /// Decrypts a [`Sealed`] message and cuts it back to the recorded plaintext length.
    pub fn open(&self, sealed: &Sealed) -> Result<String, HillCryptoError> {
        let mut plaintext = self.decrypt(&sealed.ciphertext)?;

        if sealed.plaintext_len > plaintext.len() {
            return Err(HillCryptoError::InvalidParameters(format!(
                "Recorded plaintext length {} exceeds decrypted length {}",
                sealed.plaintext_len,
                plaintext.len()
            )));
        }
        plaintext.truncate(sealed.plaintext_len);

        Ok(plaintext)
    }

    /// Determinant, determinant mod 36 and its inverse for the active key.
    pub fn key_diagnostics(&self) -> &KeyDiagnostics {
        &self.diagnostics
    }

    fn transform(&self, matrix: &Matrix, indices: &[i64]) -> Vector {
        indices
            .chunks_exact(self.block_size())
            .flat_map(|block| apply_to_block(matrix, block, &self.ring))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigInt;

    fn default_cipher() -> HillCipher {
        let key = KeyMatrix::try_with(vec![vec![5, 8], vec![17, 3]]).unwrap();
        HillCipher::try_with(key).unwrap()
    }

    #[test]
    fn test_encrypt_known_block() {
        let cipher = default_cipher();
        assert_eq!(cipher.encrypt("AB"), "ID");
        assert_eq!(cipher.decrypt("ID").unwrap(), "AB");
    }

    #[test]
    fn test_padding_is_not_stripped() {
        let cipher = default_cipher();
        let ciphertext = cipher.encrypt("HI5");
        assert_eq!(ciphertext, "19PU");
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "HI5X");
    }

    #[test]
    fn test_seal_and_open() {
        let cipher = default_cipher();

        let sealed = cipher.seal("hi 5");
        assert_eq!(sealed.ciphertext, "19PU");
        assert_eq!(sealed.plaintext_len, 3);
        assert_eq!(sealed.padding(), 1);
        assert_eq!(cipher.open(&sealed).unwrap(), "HI5");

        // A real trailing X survives.
        let sealed = cipher.seal("BOX");
        assert_eq!(cipher.open(&sealed).unwrap(), "BOX");
    }

    #[test]
    fn test_open_rejects_bad_length() {
        let cipher = default_cipher();
        let sealed = Sealed {
            ciphertext: "ID".to_string(),
            plaintext_len: 5,
        };
        assert!(matches!(
            cipher.open(&sealed),
            Err(HillCryptoError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_decrypt_malformed_length() {
        let cipher = default_cipher();
        match cipher.decrypt("IDA") {
            Err(HillCryptoError::MalformedInput { len, block_size }) => {
                assert_eq!(len, 3);
                assert_eq!(block_size, 2);
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_text() {
        let cipher = default_cipher();
        assert_eq!(cipher.encrypt(""), "");
        assert_eq!(cipher.encrypt("!?"), "");
        assert_eq!(cipher.decrypt("").unwrap(), "");
    }

    #[test]
    fn test_rejects_singular_key() {
        let key = KeyMatrix::try_with(vec![vec![2, 4], vec![4, 8]]).unwrap();
        match HillCipher::try_with(key) {
            Err(HillCryptoError::InvalidKey {
                determinant,
                det_mod,
                gcd,
                modulus,
            }) => {
                assert_eq!(determinant, BigInt::from(0));
                assert_eq!(det_mod, 0);
                assert_eq!(gcd, 36);
                assert_eq!(modulus, 36);
            }
            other => panic!("expected InvalidKey, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_even_determinant() {
        // det = 14: nonzero, but shares 2 with 36
        let key = KeyMatrix::try_with(vec![vec![4, 2], vec![1, 4]]).unwrap();
        assert!(matches!(
            HillCipher::try_with(key),
            Err(HillCryptoError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_key_diagnostics() {
        let cipher = default_cipher();
        let diag = cipher.key_diagnostics();
        assert_eq!(diag.determinant, BigInt::from(-121));
        assert_eq!(diag.det_mod, 23);
        assert_eq!(diag.det_inverse, Some(11));
    }

    #[test]
    fn test_inverse_key() {
        let cipher = default_cipher();
        assert_eq!(cipher.inverse_key(), &vec![vec![33, 20], vec![29, 19]]);
        assert_eq!(cipher.block_size(), 2);
    }

    #[test]
    fn test_cipher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HillCipher>();
    }
}
