pub mod admin;
pub mod deactivate_subscription_service;
pub mod deposit;
pub mod get_protocol_stats;
pub mod get_subscription_services;
pub mod get_user_balance;
pub mod get_user_subscriptions;
pub mod initialize;
pub mod process_subscription_payment;
pub mod register_provider;
pub mod register_subscription_service;
pub mod stake_sol;
pub mod subscribe_to_service;
pub mod unstake_sol;
pub mod unsubscribe_from_service;
pub mod withdraw;

pub use admin::*;
pub use deactivate_subscription_service::*;
pub use deposit::*;
pub use get_protocol_stats::*;
pub use get_subscription_services::*;
pub use get_user_balance::*;
pub use get_user_subscriptions::*;
pub use initialize::*;
pub use process_subscription_payment::*;
pub use register_provider::*;
pub use register_subscription_service::*;
pub use stake_sol::*;
pub use subscribe_to_service::*;
pub use unstake_sol::*;
pub use unsubscribe_from_service::*;
pub use withdraw::*;
