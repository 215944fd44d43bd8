//! Pure domain logic for the SlimPath 30-day coaching program.
//!
//! No I/O lives here: enums and their database string forms, webhook payload
//! normalization, program-day arithmetic, gamification rules, and biometric
//! calculators. The `db` and `api` crates build on these types.

pub mod biometrics;
pub mod error;
pub mod gamification;
pub mod plan;
pub mod profile;
pub mod program;
pub mod types;
pub mod webhook;
