use crate::errors::HillCryptoError;
use crate::ring::Matrix;

use itertools::Itertools;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A square key matrix with at least two rows.
///
/// Only the shape is checked here; invertibility is decided by [`crate::ring::is_valid_key`]
/// when a [`super::HillCipher`] is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Matrix", into = "Matrix")]
pub struct KeyMatrix {
    rows: Matrix,
}

impl KeyMatrix {
    pub fn try_with(rows: Matrix) -> Result<Self, HillCryptoError> {
        let n = rows.len();
        if n < 2 {
            return Err(HillCryptoError::InvalidParameters(format!(
                "Key matrix must be at least 2x2, got {} rows",
                n
            )));
        }
        if let Some((i, row)) = rows.iter().find_position(|row| row.len() != n) {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Key matrix must be square: row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }

        Ok(Self { rows })
    }

    /// Parses a key from a JSON array of rows, e.g. `[[5,8],[17,3]]`.
    pub fn from_json(json: &str) -> Result<Self, HillCryptoError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, HillCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Block size `n` of the cipher using this key.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &Matrix {
        &self.rows
    }
}

impl TryFrom<Matrix> for KeyMatrix {
    type Error = HillCryptoError;

    fn try_from(rows: Matrix) -> Result<Self, Self::Error> {
        KeyMatrix::try_with(rows)
    }
}

impl From<KeyMatrix> for Matrix {
    fn from(key: KeyMatrix) -> Self {
        key.rows
    }
}

impl fmt::Display for KeyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .flatten()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);

        let lines = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| format!("{:>width$}", v)).join("  "))
            .join("\n");

        write!(f, "{}", lines)
    }
}
