// Domain Entities
// Backend-owned records the core computes over: the user holding a point
// balance, the reward catalog, and the eco-task list. All three are
// per-fetch snapshots; nothing here persists or caches.

pub mod reward;
pub mod task;
pub mod user;

pub use reward::{Reward, RewardCatalog};
pub use task::{EcoTask, TaskBoard};
pub use user::UserProfile;
