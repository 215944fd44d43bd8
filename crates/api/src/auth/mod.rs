//! Authentication building blocks: JWT access tokens, Argon2id password
//! hashing, and magic-link token helpers.

pub mod jwt;
pub mod magic_link;
pub mod password;
