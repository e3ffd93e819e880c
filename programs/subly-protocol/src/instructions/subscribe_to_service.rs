use crate::{
    constants::*,
    error::ErrorCode,
    events::Subscribed,
    oracle,
    pda,
    state::*,
    utils::{lamports_to_sol, mint_marker_token},
};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

#[derive(Accounts)]
#[instruction(provider: Pubkey, service_id: u64, subscription_id: u64)]
pub struct SubscribeToService<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_SEED.as_bytes(), user.key().as_ref()],
        bump = user_account.bump,
        constraint = user_account.wallet == user.key() @ ErrorCode::UnauthorizedUser
    )]
    pub user_account: Box<Account<'info, User>>,

    #[account(
        mut,
        address = pda::subscription_service_address(&provider, service_id).0 @ ErrorCode::InvalidAddress,
        constraint = subscription_service.provider != user.key() @ ErrorCode::CannotSubscribeToOwnService
    )]
    pub subscription_service: Box<Account<'info, SubscriptionService>>,

    #[account(
        mut,
        seeds = [PROVIDER_SEED.as_bytes(), provider.as_ref()],
        bump = provider_account.bump
    )]
    pub provider_account: Box<Account<'info, Provider>>,

    // Addressed by the caller's view of user_account.subscription_count,
    // verified against the live counter by the handler
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserSubscription::INIT_SPACE,
        seeds = [
            USER_SUBSCRIPTION_SEED.as_bytes(),
            user.key().as_ref(),
            subscription_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub user_subscription: Box<Account<'info, UserSubscription>>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    /// CHECK: Pyth SOL/USD price account, parsed by the oracle module
    #[account(address = global_state.sol_usd_price_feed @ ErrorCode::InvalidPriceFeed)]
    pub sol_usd_price_feed: UncheckedAccount<'info>,

    // Subscription certificate, required while tokens_required is set
    #[account(
        init,
        payer = user,
        mint::decimals = 0,
        mint::authority = user,
        mint::freeze_authority = user,
    )]
    pub certificate_mint: Option<Account<'info, Mint>>,

    #[account(
        init,
        payer = user,
        associated_token::mint = certificate_mint,
        associated_token::authority = user,
    )]
    pub certificate_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> SubscribeToService<'info> {
    /// Opens a subscription and reserves one billing period's fee, priced at
    /// the current SOL/USD rate, out of the user's available balance.
    pub fn subscribe_to_service(
        &mut self,
        provider: Pubkey,
        service_id: u64,
        subscription_id: u64,
        bumps: &SubscribeToServiceBumps,
    ) -> Result<()> {
        self.global_state.ensure_not_paused()?;
        // An id already in use is always behind the live counter
        let subscription_id = self.user_account.claim_subscription_id(subscription_id)?;

        let now = Clock::get()?.unix_timestamp;
        let sol_usd_price_cents = oracle::sol_usd_price_cents(&self.sol_usd_price_feed, now)?;
        let reserved_lamports =
            oracle::usd_cents_to_lamports(self.subscription_service.fee_usd, sol_usd_price_cents)?;
        let next_payment_due = now
            .checked_add(self.subscription_service.billing_period_seconds()?)
            .ok_or(ErrorCode::Overflow)?;

        self.user_account.reserve(reserved_lamports)?;
        self.subscription_service
            .add_subscriber(self.global_state.subscriber_caps_enforced)?;
        self.provider_account.add_subscriber()?;

        let certificate_mint = mint_marker_token(
            self.global_state.tokens_required,
            &self.certificate_mint,
            &self.certificate_token_account,
            &self.user,
            &self.token_program,
        )?;

        self.user_subscription.set_inner(UserSubscription {
            version: ACCOUNT_VERSION,
            user: self.user.key(),
            provider,
            service_id,
            subscription_id,
            subscribed_at: now,
            reserved_lamports,
            last_payment_at: None,
            next_payment_due,
            total_payments_made: 0,
            certificate_mint,
            is_active: true,
            unsubscribed_at: None,
            bump: bumps.user_subscription,
        });
        self.global_state.record_subscription_opened()?;

        msg!(
            "User {} subscribed to service '{}' from provider {} (Fee: ${:.2}/{} days)",
            self.user.key(),
            self.subscription_service.name,
            provider,
            self.subscription_service.fee_usd as f64 / 100.0,
            self.subscription_service.billing_frequency_days
        );
        msg!(
            "Reserved {} SOL at ${:.2}/SOL, next payment due at {}",
            lamports_to_sol(reserved_lamports),
            sol_usd_price_cents as f64 / 100.0,
            next_payment_due
        );
        emit!(Subscribed {
            user: self.user.key(),
            provider,
            service_id,
            subscription_id,
            reserved_lamports,
            certificate_mint,
        });

        Ok(())
    }
}
