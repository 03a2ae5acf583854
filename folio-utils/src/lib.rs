//! Small helpers shared across the Folio crates: password hashing, session tokens
//! and text normalization.
pub mod hash;
pub mod jwt;
pub mod text;
