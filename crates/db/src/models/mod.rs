pub mod bonus;
pub mod content;
pub mod identity;
pub mod login_token;
pub mod mood;
pub mod onboarding;
pub mod progress;
pub mod user;
