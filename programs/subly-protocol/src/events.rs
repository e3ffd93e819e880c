use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub protocol_fee_bps: u16,
    pub jito_stake_pool: Pubkey,
    pub sol_usd_price_feed: Pubkey,
}

#[event]
pub struct ProtocolPauseSet {
    pub authority: Pubkey,
    pub paused: bool,
    pub slot: u64,
}

#[event]
pub struct ProtocolFeeUpdated {
    pub authority: Pubkey,
    pub protocol_fee_bps: u16,
}

#[event]
pub struct CapabilitiesUpdated {
    pub authority: Pubkey,
    pub tokens_required: bool,
    pub subscriber_caps_enforced: bool,
}

#[event]
pub struct ProviderRegistered {
    pub provider: Pubkey,
    pub identity_mint: Option<Pubkey>,
    pub total_providers: u64,
}

#[event]
pub struct SubscriptionServiceRegistered {
    pub provider: Pubkey,
    pub service_id: u64,
    pub fee_usd: u64,
    pub billing_frequency_days: u64,
    pub max_subscribers: Option<u64>,
}

#[event]
pub struct SubscriptionServiceDeactivated {
    pub provider: Pubkey,
    pub service_id: u64,
}

#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub amount: u64,
    pub deposited_sol: u64,
    pub first_deposit: bool,
}

#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
    pub deposited_sol: u64,
}

#[event]
pub struct SolStaked {
    pub user: Pubkey,
    pub lamports: u64,
    pub derived_tokens: u64,
    pub staked_sol: u64,
}

#[event]
pub struct SolUnstaked {
    pub user: Pubkey,
    pub derived_tokens: u64,
    pub principal: u64,
    pub lamports_received: u64,
}

#[event]
pub struct Subscribed {
    pub user: Pubkey,
    pub provider: Pubkey,
    pub service_id: u64,
    pub subscription_id: u64,
    pub reserved_lamports: u64,
    pub certificate_mint: Option<Pubkey>,
}

#[event]
pub struct Unsubscribed {
    pub user: Pubkey,
    pub subscription_id: u64,
    pub released_lamports: u64,
    pub unsubscribed_at: i64,
}

#[event]
pub struct SubscriptionPaymentProcessed {
    pub user: Pubkey,
    pub provider: Pubkey,
    pub subscription_id: u64,
    pub charged_lamports: u64,
    pub protocol_fee_lamports: u64,
    pub renewed: bool,
    pub next_payment_due: i64,
}
