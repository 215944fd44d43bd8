//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod onboarding;
pub mod rewards;
pub mod webhook;
