pub mod global_state;
pub mod loader;
pub mod provider;
pub mod stake_account;
pub mod subscription_service;
pub mod user;
pub mod user_subscription;

pub use global_state::*;
pub use loader::*;
pub use provider::*;
pub use stake_account::*;
pub use subscription_service::*;
pub use user::*;
pub use user_subscription::*;
