/// Computes the greatest common divisor of two numbers.
///
/// The result is always non-negative.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a.abs()
}

/// Finds (g, x, y) such that ax + by = g = gcd(a, b).
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        if b.is_negative() {
            return (-b, 0, -1);
        }

        return (b, 0, 1);
    }

    let (g, x1, y1) = extended_gcd(b % a, a);
    let x = y1 - (b / a) * x1;
    let y = x1;
    (g, x, y)
}

/// Reduces `value` into the canonical residue range `[0, m)`.
///
/// Negative inputs land on their non-negative representative, so `-1` becomes `m - 1`.
///
/// # Example
///
/// ```
/// # use hill_crypto::ring::normalize;
/// assert_eq!(normalize(-121, 36), 23);
/// assert_eq!(normalize(72, 36), 0);
/// ```
pub fn normalize(value: i64, m: i64) -> i64 {
    value.rem_euclid(m)
}

/// Modular inverse of a mod m, if it exists.
///
/// Returns `x` in `[1, m)` with `a·x ≡ 1 (mod m)`, or `None` when `gcd(a, m) != 1`.
///
/// # Example
///
/// ```
/// # use hill_crypto::ring::mod_inverse;
/// assert_eq!(mod_inverse(23, 36), Some(11));
/// assert_eq!(mod_inverse(-13, 36), Some(11));
/// assert_eq!(mod_inverse(6, 36), None);
/// ```
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    if m <= 1 {
        return None;
    }
    let (g, x, _) = extended_gcd(normalize(a, m), m);
    if g != 1 {
        None
    } else {
        Some(normalize(x, m))
    }
}

/// True iff `a` is a unit of Z/mZ.
pub fn is_invertible(a: i64, m: i64) -> bool {
    m > 1 && gcd(normalize(a, m), m) == 1
}
