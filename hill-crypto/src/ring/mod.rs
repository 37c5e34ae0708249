//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_k, the scalar number theory
//! behind it, and exact matrix routines (determinant, adjugate, inverse) over Z_k.

pub mod helper;
pub mod math;
pub mod matrix_ops;

/// Represents a mathematical vector using a `Vec<i64>`.
pub type Vector = Vec<i64>;
/// Represents a mathematical matrix using a `Vec<Vec<i64>>`.
pub type Matrix = Vec<Vec<i64>>;

pub use helper::{extended_gcd, gcd, is_invertible, mod_inverse, normalize};
pub use math::Ring;
pub use matrix_ops::{KeyDiagnostics, is_valid_key};
