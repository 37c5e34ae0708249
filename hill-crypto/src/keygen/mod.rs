use crate::cipher::KeyMatrix;
use crate::errors::HillCryptoError;
use crate::preset::default_keys::default_key;
use crate::ring::matrix_ops::identity_matrix;
use crate::ring::{Matrix, Ring, is_valid_key};

use rand::prelude::{Rng, SeedableRng, StdRng};

/// Candidates tried by callers that do not pick their own budget.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Searches for a random `n×n` key that is invertible mod `modulus`.
///
/// # Parameters
/// * `n`: Block size, at least 2.
/// * `modulus`: Ring size, greater than 1.
/// * `max_attempts`: Number of random candidates tried before falling back.
/// * `seed`: Seed for the entry generator. The same seed always yields the same key.
///
/// # Algorithm
/// 1. Draw every entry uniformly from `[0, modulus)` with a `StdRng` seeded from `seed`.
/// 2. Return the first candidate with `gcd(det mod modulus, modulus) == 1`.
/// 3. After `max_attempts` rejections return the built-in key for `n` when it is valid
///    for `modulus`, otherwise the identity matrix (det = 1 is a unit in every ring).
pub fn generate_valid_key(
    n: usize,
    modulus: u64,
    max_attempts: usize,
    seed: u64,
) -> Result<KeyMatrix, HillCryptoError> {
    if n < 2 {
        return Err(HillCryptoError::InvalidParameters(format!(
            "Key size must be at least 2, got {}",
            n
        )));
    }
    let ring = Ring::try_with(modulus)?;
    let upper = ring.modulus() as i64;

    let mut rng = StdRng::seed_from_u64(seed);

    for attempt in 1..=max_attempts {
        let candidate: Matrix = (0..n)
            .map(|_| (0..n).map(|_| rng.random_range(0..upper)).collect())
            .collect();

        if is_valid_key(&candidate, modulus) {
            log::debug!(
                "Found valid {}x{} key mod {} after {} attempt(s)",
                n,
                n,
                modulus,
                attempt
            );
            return KeyMatrix::try_with(candidate);
        }
    }

    let fallback = default_key(n)
        .filter(|key| is_valid_key(key, modulus))
        .unwrap_or_else(|| identity_matrix(n));

    log::warn!(
        "No valid {}x{} key mod {} in {} attempts, using fallback key",
        n,
        n,
        modulus,
        max_attempts
    );

    KeyMatrix::try_with(fallback)
}
