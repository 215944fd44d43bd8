//! HTTP API for the SlimPath coaching program.
//!
//! Public modules are exported so integration tests can build the exact
//! router and state that `main.rs` runs.

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
