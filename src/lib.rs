// EcoPet Core Library
// Exposes the rank/points domain logic, redemption arithmetic, payload
// validation, and the backend client for use in the CLI and tests

pub mod entities;
pub mod ranks;
pub mod redemption;
pub mod schema;

#[cfg(feature = "client")]
pub mod client;

// Re-export commonly used types
pub use entities::{EcoTask, Reward, RewardCatalog, TaskBoard, UserProfile};
pub use ranks::{ConfigurationError, Rank, RankStatus, RankTable};
pub use redemption::{can_redeem, redeem, ClaimedReward, InsufficientPoints, RedemptionLog};
pub use schema::{
    validate_redeem_outcome, validate_reward, validate_rewards, validate_task, validate_tasks,
    validate_user, RawReward, RawTask, RawUser, RedeemOutcome, ValidationError, ValidationResult,
};

#[cfg(feature = "client")]
pub use client::{ApiClient, RedeemStatus, RedemptionConfirmation, DEFAULT_API_URL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
