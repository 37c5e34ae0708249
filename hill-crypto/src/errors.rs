use num_bigint::BigInt;

#[derive(thiserror::Error, Debug)]
pub enum HillCryptoError {
    /// The key determinant shares a factor with the modulus, so the key has no inverse.
    #[error(
        "InvalidKey: determinant {determinant} (mod {modulus} = {det_mod}) is not coprime to {modulus} (gcd={gcd})"
    )]
    InvalidKey {
        determinant: BigInt,
        det_mod: i64,
        gcd: i64,
        modulus: u64,
    },
    /// Modular matrix inversion failed for a key that should have been invertible.
    #[error("NotInvertible: {0}")]
    NotInvertible(String),
    /// Ciphertext whose filtered length does not split into whole blocks.
    #[error("MalformedInput: length {len} is not a multiple of block size {block_size}")]
    MalformedInput { len: usize, block_size: usize },

    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, k) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring with an invalid modulus (k <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
