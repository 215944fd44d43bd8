mod bonus_repo;
mod content_repo;
mod identity_repo;
mod login_token_repo;
mod mood_repo;
mod onboarding_repo;
mod progress_repo;
mod user_repo;

pub use bonus_repo::BonusRepo;
pub use content_repo::ContentRepo;
pub use identity_repo::IdentityRepo;
pub use login_token_repo::LoginTokenRepo;
pub use mood_repo::MoodRepo;
pub use onboarding_repo::OnboardingRepo;
pub use progress_repo::ProgressRepo;
pub use user_repo::UserRepo;
