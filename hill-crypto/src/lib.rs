//! Hill cipher over the 36-symbol alphabet `A-Z0-9`, with exact modular linear algebra over Z/36Z.
//!
//! Because 36 is composite, a key matrix is usable iff its determinant is coprime to 36.
//! Determinants and inverses are computed with exact integer arithmetic.

pub mod cipher;
pub mod errors;
pub mod keygen;
pub mod preset;
pub mod ring;

pub use cipher::{HillCipher, KeyMatrix, Sealed};
pub use errors::HillCryptoError;
pub use keygen::generate_valid_key;
pub use ring::{KeyDiagnostics, is_valid_key};
