//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`SnapshotRepo`] and
//! [`ApprovalRepo`] are insert-only: immutability of the audit history is
//! enforced at the interface, not by convention.

pub mod approval_repo;
pub mod campaign_question_repo;
pub mod campaign_repo;
pub mod pricing_config_repo;
pub mod question_repo;
pub mod reward_repo;
pub mod snapshot_repo;
pub mod user_repo;

pub use approval_repo::ApprovalRepo;
pub use campaign_question_repo::CampaignQuestionRepo;
pub use campaign_repo::CampaignRepo;
pub use pricing_config_repo::PricingConfigRepo;
pub use question_repo::QuestionRepo;
pub use reward_repo::{CampaignVersionRepo, QualityRulesRepo, RewardConfigRepo};
pub use snapshot_repo::SnapshotRepo;
pub use user_repo::UserRepo;
