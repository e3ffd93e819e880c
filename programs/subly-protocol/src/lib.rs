pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod pda;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("9MV6eJ5CfimYDv4WSqtyPx1Uc36apP1dzTMpGrobYCnc");

#[program]
pub mod subly_protocol {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        jito_stake_pool: Pubkey,
        jito_sol_mint: Pubkey,
        spl_stake_pool_program: Pubkey,
        sol_usd_price_feed: Pubkey,
    ) -> Result<()> {
        ctx.accounts.initialize(
            jito_stake_pool,
            jito_sol_mint,
            spl_stake_pool_program,
            sol_usd_price_feed,
            &ctx.bumps,
        )
    }

    pub fn set_paused(ctx: Context<UpdateGlobalState>, paused: bool) -> Result<()> {
        ctx.accounts.set_paused(paused)
    }

    pub fn update_protocol_fee(ctx: Context<UpdateGlobalState>, protocol_fee_bps: u16) -> Result<()> {
        ctx.accounts.update_protocol_fee(protocol_fee_bps)
    }

    pub fn set_capabilities(
        ctx: Context<UpdateGlobalState>,
        tokens_required: bool,
        subscriber_caps_enforced: bool,
    ) -> Result<()> {
        ctx.accounts
            .set_capabilities(tokens_required, subscriber_caps_enforced)
    }

    pub fn register_provider(
        ctx: Context<RegisterProvider>,
        name: String,
        description: String,
        website: String,
    ) -> Result<()> {
        ctx.accounts
            .register_provider(name, description, website, &ctx.bumps)
    }

    pub fn register_subscription_service(
        ctx: Context<RegisterSubscriptionService>,
        name: String,
        description: String,
        fee_usd: u64,
        billing_frequency_days: u64,
        image_url: String,
        max_subscribers: Option<u64>,
        service_id: u64,
    ) -> Result<()> {
        ctx.accounts.register_subscription_service(
            name,
            description,
            fee_usd,
            billing_frequency_days,
            image_url,
            max_subscribers,
            service_id,
            &ctx.bumps,
        )
    }

    pub fn deactivate_subscription_service(
        ctx: Context<DeactivateSubscriptionService>,
        service_id: u64,
    ) -> Result<()> {
        ctx.accounts.deactivate_subscription_service(service_id)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        ctx.accounts.deposit(amount, &ctx.bumps)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw(amount, &ctx.bumps)
    }

    pub fn stake_sol(ctx: Context<StakeSol>, amount: u64) -> Result<()> {
        ctx.accounts.stake_sol(amount, &ctx.bumps)
    }

    pub fn unstake_sol(ctx: Context<UnstakeSol>, pool_token_amount: u64) -> Result<()> {
        ctx.accounts.unstake_sol(pool_token_amount, &ctx.bumps)
    }

    pub fn subscribe_to_service(
        ctx: Context<SubscribeToService>,
        provider: Pubkey,
        service_id: u64,
        subscription_id: u64,
    ) -> Result<()> {
        ctx.accounts
            .subscribe_to_service(provider, service_id, subscription_id, &ctx.bumps)
    }

    pub fn unsubscribe_from_service(
        ctx: Context<UnsubscribeFromService>,
        subscription_id: u64,
    ) -> Result<()> {
        ctx.accounts.unsubscribe_from_service(subscription_id)
    }

    pub fn process_subscription_payment(
        ctx: Context<ProcessSubscriptionPayment>,
        user: Pubkey,
        subscription_id: u64,
    ) -> Result<()> {
        ctx.accounts
            .process_subscription_payment(user, subscription_id, &ctx.bumps)
    }

    // ===== Views =====

    pub fn get_protocol_stats(ctx: Context<GetProtocolStats>) -> Result<ProtocolStatsInfo> {
        ctx.accounts.get_protocol_stats()
    }

    pub fn get_subscription_service(
        ctx: Context<GetSubscriptionService>,
        provider: Pubkey,
        service_id: u64,
    ) -> Result<SubscriptionServiceInfo> {
        ctx.accounts.get_subscription_service(provider, service_id)
    }

    pub fn get_subscription_services<'info>(
        ctx: Context<'_, '_, '_, 'info, GetSubscriptionServices<'info>>,
        provider: Pubkey,
        start_id: u64,
    ) -> Result<Vec<SubscriptionServiceInfo>> {
        GetSubscriptionServices::get_subscription_services(ctx, provider, start_id)
    }

    pub fn get_user_balance(ctx: Context<GetUserBalance>, user: Pubkey) -> Result<UserBalanceInfo> {
        ctx.accounts.get_user_balance(user)
    }

    pub fn get_user_subscription(
        ctx: Context<GetUserSubscription>,
        user: Pubkey,
        subscription_id: u64,
    ) -> Result<UserSubscriptionInfo> {
        ctx.accounts.get_user_subscription(user, subscription_id)
    }

    pub fn get_user_subscriptions<'info>(
        ctx: Context<'_, '_, '_, 'info, GetUserSubscriptions<'info>>,
        user: Pubkey,
        start_id: u64,
    ) -> Result<Vec<UserSubscriptionInfo>> {
        GetUserSubscriptions::get_user_subscriptions(ctx, user, start_id)
    }
}
