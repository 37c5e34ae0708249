use crate::errors::HillCryptoError;
use crate::ring::{Matrix, Ring, Vector, gcd};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Scalar values derived from a key matrix: `det`, `det mod m`, its inverse and `gcd(det mod m, m)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDiagnostics {
    pub determinant: BigInt,
    pub det_mod: i64,
    pub det_inverse: Option<i64>,
    pub gcd: i64,
    pub modulus: u64,
}

impl KeyDiagnostics {
    /// A key is usable iff its determinant is a unit mod m.
    pub fn is_valid(&self) -> bool {
        self.gcd == 1
    }
}

fn ensure_square(matrix: &Matrix) -> Result<usize, HillCryptoError> {
    let n = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Matrix must be square: row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

/// Computes the matrix product `C = AB` modulo `m`, where `m` is the modulus of the ring.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the inner dimensions of the matrices do not match
/// or if rows within the matrices have inconsistent lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let n = a.len(); // rows in A
    if n == 0 {
        return Ok(Matrix::new());
    }
    let m_common = a[0].len(); // cols in A
    if b.len() != m_common {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common,
            b.len()
        )));
    }
    let p = b.first().map_or(0, Vec::len); // cols in B

    for (k, row) in b.iter().enumerate() {
        if row.len() != p {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Matrix B row {} has incorrect length (expected {})",
                k, p
            )));
        }
    }

    let mut c = vec![vec![0; p]; n];
    for (i, a_row) in a.iter().enumerate() {
        if a_row.len() != m_common {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Matrix A row {} has incorrect length (expected {})",
                i, m_common
            )));
        }
        for j in 0..p {
            c[i][j] = a_row
                .iter()
                .zip(b.iter())
                .fold(0, |sum, (&a_ik, b_row)| ring.add(sum, ring.mul(a_ik, b_row[j])));
        }
    }
    Ok(c)
}

/// Multiplies a square matrix by a column block: `(A · x) mod m`.
///
/// Callers guarantee `a` is `n×n` and `x.len() == n`; every output entry is in `[0, m)`.
pub fn apply_to_block(a: &Matrix, x: &[i64], ring: &Ring) -> Vector {
    a.iter()
        .map(|row| {
            row.iter()
                .zip(x)
                .fold(0, |sum, (&a_ij, &x_j)| ring.add(sum, ring.mul(a_ij, x_j)))
        })
        .collect()
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1;
    }
    identity
}

/// Fraction-free Gaussian elimination (Bareiss). Every division is exact.
fn bareiss(mut a: Vec<Vec<BigInt>>) -> BigInt {
    let n = a.len();
    if n == 0 {
        return BigInt::one();
    }

    let mut negate = false;
    let mut prev = BigInt::one();

    for k in 0..n - 1 {
        if a[k][k].is_zero() {
            match (k + 1..n).find(|&i| !a[i][k].is_zero()) {
                Some(i) => {
                    a.swap(k, i);
                    negate = !negate;
                }
                None => return BigInt::zero(),
            }
        }

        for i in k + 1..n {
            for j in k + 1..n {
                let numerator = &a[i][j] * &a[k][k] - &a[i][k] * &a[k][j];
                a[i][j] = numerator / &prev;
            }
        }
        prev = a[k][k].clone();
    }

    let det = a[n - 1][n - 1].clone();
    if negate { -det } else { det }
}

/// Computes the exact integer determinant of a square matrix.
///
/// Uses arbitrary precision, so no entry size can overflow. The empty matrix has determinant 1.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the matrix is not square.
///
/// # Example
///
/// ```
/// # use hill_crypto::ring::matrix_ops::determinant;
/// # use num_bigint::BigInt;
/// let det = determinant(&vec![vec![5, 8], vec![17, 3]]).unwrap();
/// assert_eq!(det, BigInt::from(-121));
/// ```
pub fn determinant(matrix: &Matrix) -> Result<BigInt, HillCryptoError> {
    ensure_square(matrix)?;

    let big = matrix
        .iter()
        .map(|row| row.iter().map(|&v| BigInt::from(v)).collect())
        .collect();

    Ok(bareiss(big))
}

fn reduce_big(value: &BigInt, ring: &Ring) -> i64 {
    let residue = value.mod_floor(&BigInt::from(ring.modulus()));
    // mod_floor with a positive modulus lands in [0, m), which fits in i64.
    residue.to_i64().unwrap_or_default()
}

/// Computes `det(matrix) mod m` in `[0, m)`.
pub fn determinant_mod(matrix: &Matrix, ring: &Ring) -> Result<i64, HillCryptoError> {
    let det = determinant(matrix)?;
    Ok(reduce_big(&det, ring))
}

/// Returns the matrix with row `skip_row` and column `skip_col` removed.
fn minor(matrix: &Matrix, skip_row: usize, skip_col: usize) -> Matrix {
    matrix
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != skip_row)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|&(j, _)| j != skip_col)
                .map(|(_, &v)| v)
                .collect()
        })
        .collect()
}

/// Computes the classical adjugate (transposed cofactor matrix) reduced mod `m`.
///
/// Each cofactor is an exact determinant; reduction happens only at the end.
pub fn adjugate(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let n = ensure_square(matrix)?;
    let mut adj = vec![vec![0; n]; n];

    for i in 0..n {
        for j in 0..n {
            let mut cofactor = determinant(&minor(matrix, i, j))?;
            if (i + j) % 2 == 1 {
                cofactor = -cofactor;
            }
            // adj = transpose(cofactors)
            adj[j][i] = reduce_big(&cofactor, ring);
        }
    }

    Ok(adj)
}

/// Computes the inverse of a square matrix over Z_m via `det^-1 · adj(A)`.
///
/// The result `A'` satisfies `A · A' ≡ I (mod m)`.
///
/// # Errors
///
/// Returns `HillCryptoError::NotInvertible` if `det(A)` is not a unit mod `m`.
/// Returns `HillCryptoError::DimensionMismatch` if the matrix is not square.
pub fn matrix_mod_inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let det_mod = determinant_mod(matrix, ring)?;
    let det_inv = ring.inv(det_mod).map_err(|_| {
        HillCryptoError::NotInvertible(format!(
            "det mod {} = {} has no inverse (gcd={})",
            ring.modulus(),
            det_mod,
            gcd(det_mod, ring.modulus() as i64)
        ))
    })?;

    let adj = adjugate(matrix, ring)?;
    Ok(adj
        .into_iter()
        .map(|row| row.into_iter().map(|v| ring.mul(det_inv, v)).collect())
        .collect())
}

/// Collects det, det mod m, its inverse and the gcd with m for a candidate key.
pub fn inspect_key(matrix: &Matrix, ring: &Ring) -> Result<KeyDiagnostics, HillCryptoError> {
    let determinant = determinant(matrix)?;
    let det_mod = reduce_big(&determinant, ring);
    let det_inverse = ring.inv(det_mod).ok();

    Ok(KeyDiagnostics {
        gcd: gcd(det_mod, ring.modulus() as i64),
        determinant,
        det_mod,
        det_inverse,
        modulus: ring.modulus(),
    })
}

/// Decides whether `matrix` may serve as a Hill cipher key over Z_modulus.
///
/// True iff the matrix is square and `gcd(det mod modulus, modulus) == 1`.
pub fn is_valid_key(matrix: &Matrix, modulus: u64) -> bool {
    let Ok(ring) = Ring::try_with(modulus) else {
        return false;
    };

    inspect_key(matrix, &ring).is_ok_and(|diag| diag.is_valid())
}
