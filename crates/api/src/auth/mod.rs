//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and verification for passwords and PINs.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.

pub mod jwt;
pub mod password;
