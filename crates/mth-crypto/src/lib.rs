//! # mth-crypto
//!
//! Keccak-256 hashing, used for ABI function selectors and event signatures.
//! Signing is left to whoever broadcasts the transactions this SDK builds.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::keccak256;
