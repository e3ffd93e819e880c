use anchor_lang::prelude::*;

// Global seeds
#[constant]
pub const GLOBAL_STATE_SEED: &str = "global_state";
pub const TREASURY_SEED: &str = "treasury";

// Provider related seeds
#[constant]
pub const PROVIDER_SEED: &str = "provider";
#[constant]
pub const SUBSCRIPTION_SERVICE_SEED: &str = "subscription_service";

// User related seeds
#[constant]
pub const USER_SEED: &str = "user";
#[constant]
pub const USER_SUBSCRIPTION_SEED: &str = "user_subscription";
#[constant]
pub const STAKE_ACCOUNT_SEED: &str = "stake_account";

// Vault seeds
#[constant]
pub const SOL_VAULT_SEED: &str = "vault";
// Owns the protocol's JitoSOL token account
#[constant]
pub const JITO_VAULT_SEED: &str = "jito_vault";

// Maximum string lengths (bytes)
pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_URL_LENGTH: usize = 200;

// Account schema version written into every record
pub const ACCOUNT_VERSION: u8 = 1;

// Protocol configuration
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 100; // 1%
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1000; // 10%
pub const BPS_DENOMINATOR: u64 = 10_000;

// Billing
pub const SECONDS_PER_DAY: i64 = 86_400;

// Views: runtime cap on instruction return data (bytes)
pub const MAX_RETURN_DATA: usize = 1024;

// Pyth price feed
pub const MAX_PRICE_AGE_SECONDS: u64 = 300;
pub const MIN_SOL_PRICE_CENTS: u64 = 1_000; // $10
pub const MAX_SOL_PRICE_CENTS: u64 = 100_000; // $1000
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
