//! Implementation of ring ops using modular arithmetic.

use crate::errors::HillCryptoError;

use super::helper::{gcd, mod_inverse, normalize};

use serde::{Deserialize, Serialize};

/// Represents a finite ring Z_k using modular arithmetic.
///
/// Only [`Ring::try_with`] builds one, so the modulus is always in `(1, i64::MAX]`.
/// Serialized as the bare modulus.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Ring {
    modulus: u64,
}

impl TryFrom<u64> for Ring {
    type Error = HillCryptoError;

    fn try_from(modulus: u64) -> Result<Self, Self::Error> {
        Ring::try_with(modulus)
    }
}

impl From<Ring> for u64 {
    fn from(ring: Ring) -> Self {
        ring.modulus
    }
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1 and fit in an `i64`.
    pub fn try_with(modulus: u64) -> Result<Self, HillCryptoError> {
        if modulus <= 1 || modulus > i64::MAX as u64 {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Modulus must be in (1, {}], got {}",
                i64::MAX,
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(36).unwrap();
    /// assert_eq!(ring.modulus(), 36);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    fn m(&self) -> i64 {
        self.modulus as i64
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(36).unwrap();
    /// assert_eq!(ring.normalize(40), 4);
    /// assert_eq!(ring.normalize(-121), 23);
    /// assert_eq!(ring.normalize(36), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        normalize(value, self.m())
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(36).unwrap();
    /// assert_eq!(ring.add(30, 10), 4);
    /// assert_eq!(ring.add(-2, 5), 3);
    /// ```
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a) as i128;
        let b_norm = self.normalize(b) as i128;

        ((a_norm + b_norm) % self.modulus as i128) as i64
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(36).unwrap();
    /// assert_eq!(ring.mul(5, 8), 4);
    /// assert_eq!(ring.mul(-8, 11), 20);
    /// assert_eq!(ring.mul(6, 6), 0);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a) as i128;
        let b_norm = self.normalize(b) as i128;

        ((a_norm * b_norm) % self.modulus as i128) as i64
    }

    /// Returns true if `a` has a multiplicative inverse in the ring.
    pub fn is_unit(&self, a: i64) -> bool {
        gcd(self.normalize(a), self.m()) == 1
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::NoInverse` if `gcd(a, modulus) != 1`, which includes `a = 0`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(36).unwrap();
    /// assert_eq!(ring.inv(23).unwrap(), 11);
    /// assert_eq!(ring.inv(35).unwrap(), 35);
    /// assert!(ring.inv(4).is_err());
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, HillCryptoError> {
        let a_norm = self.normalize(a);

        mod_inverse(a_norm, self.m()).ok_or_else(|| {
            HillCryptoError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm,
                self.modulus,
                gcd(a_norm, self.m())
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(36).is_ok());
        assert!(Ring::try_with(2).is_ok());
        assert!(Ring::try_with(1).is_err());
        assert!(Ring::try_with(0).is_err());
        assert!(Ring::try_with(u64::MAX).is_err());
    }

    #[test]
    fn test_deserialize_checks_modulus() -> Result<(), HillCryptoError> {
        let ring: Ring = serde_json::from_str("36")?;
        assert_eq!(ring.modulus(), 36);
        assert_eq!(serde_json::to_string(&ring)?, "36");

        assert!(serde_json::from_str::<Ring>("0").is_err());
        assert!(serde_json::from_str::<Ring>("1").is_err());
        assert!(serde_json::from_str::<Ring>(r#"{"modulus":0}"#).is_err());
        Ok(())
    }

    #[test]
    fn test_element_normalization() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(36)?;
        assert_eq!(ring.normalize(5), 5);
        assert_eq!(ring.normalize(41), 5);
        assert_eq!(ring.normalize(-31), 5);
        assert_eq!(ring.normalize(i64::MIN), ring.normalize(i64::MIN % 36));
        Ok(())
    }

    #[test]
    fn test_large_operands_do_not_overflow() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(36)?;
        assert_eq!(ring.mul(i64::MAX, i64::MAX), ring.mul(i64::MAX % 36, i64::MAX % 36));
        assert_eq!(ring.add(i64::MAX, i64::MAX), ring.add(i64::MAX % 36, i64::MAX % 36));
        Ok(())
    }

    #[test]
    fn test_units() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(36)?;
        let units: Vec<i64> = (0..36).filter(|&a| ring.is_unit(a)).collect();
        assert_eq!(units, vec![1, 5, 7, 11, 13, 17, 19, 23, 25, 29, 31, 35]);
        for a in units {
            assert_eq!(ring.mul(a, ring.inv(a)?), 1);
        }
        Ok(())
    }

    #[test]
    fn test_inversion_error() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(36)?;
        assert!(matches!(ring.inv(12), Err(HillCryptoError::NoInverse(_))));
        Ok(())
    }
}
