use crate::{
    constants::*,
    error::ErrorCode,
    events::SubscriptionServiceRegistered,
    state::*,
    utils::check_text,
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(
    name: String,
    description: String,
    fee_usd: u64,
    billing_frequency_days: u64,
    image_url: String,
    max_subscribers: Option<u64>,
    service_id: u64
)]
pub struct RegisterSubscriptionService<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

    #[account(
        mut,
        seeds = [PROVIDER_SEED.as_bytes(), provider.key().as_ref()],
        bump = provider_account.bump,
        constraint = provider_account.wallet == provider.key() @ ErrorCode::UnauthorizedProvider
    )]
    pub provider_account: Box<Account<'info, Provider>>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    // Addressed by the caller's view of provider_account.service_count,
    // verified against the live counter by the handler
    #[account(
        init_if_needed,
        payer = provider,
        space = 8 + SubscriptionService::INIT_SPACE,
        seeds = [
            SUBSCRIPTION_SERVICE_SEED.as_bytes(),
            provider.key().as_ref(),
            service_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub subscription_service: Box<Account<'info, SubscriptionService>>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterSubscriptionService<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn register_subscription_service(
        &mut self,
        name: String,
        description: String,
        fee_usd: u64,
        billing_frequency_days: u64,
        image_url: String,
        max_subscribers: Option<u64>,
        service_id: u64,
        bumps: &RegisterSubscriptionServiceBumps,
    ) -> Result<()> {
        check_service_registration(
            &self.global_state,
            &self.provider_account,
            service_id,
            &name,
            &description,
            &image_url,
            fee_usd,
            billing_frequency_days,
            max_subscribers,
        )?;

        let service_id = self.provider_account.claim_service_id(service_id)?;
        self.subscription_service.set_inner(SubscriptionService {
            version: ACCOUNT_VERSION,
            provider: self.provider.key(),
            service_id,
            name: name.clone(),
            description,
            fee_usd,
            billing_frequency_days,
            image_url,
            max_subscribers,
            current_subscribers: 0,
            is_active: true,
            created_at: Clock::get()?.unix_timestamp,
            bump: bumps.subscription_service,
        });
        self.global_state.record_subscription_service()?;

        msg!(
            "Subscription service '{}' (#{}) registered by provider {} with fee ${:.2} per {} days",
            name,
            service_id,
            self.provider.key(),
            fee_usd as f64 / 100.0,
            billing_frequency_days
        );
        emit!(SubscriptionServiceRegistered {
            provider: self.provider.key(),
            service_id,
            fee_usd,
            billing_frequency_days,
            max_subscribers,
        });

        Ok(())
    }
}

/// Checks a service registration. A stale `service_id` is reported before
/// any problem with the service terms.
#[allow(clippy::too_many_arguments)]
pub fn check_service_registration(
    global_state: &GlobalState,
    provider: &Provider,
    service_id: u64,
    name: &str,
    description: &str,
    image_url: &str,
    fee_usd: u64,
    billing_frequency_days: u64,
    max_subscribers: Option<u64>,
) -> Result<()> {
    global_state.ensure_not_paused()?;
    require!(service_id == provider.service_count, ErrorCode::StaleCounter);
    check_text(name, MAX_NAME_LENGTH, ErrorCode::NameTooLong)?;
    check_text(description, MAX_DESCRIPTION_LENGTH, ErrorCode::DescriptionTooLong)?;
    check_text(image_url, MAX_URL_LENGTH, ErrorCode::UrlTooLong)?;
    require!(fee_usd > 0, ErrorCode::InvalidFeeAmount);
    require!(billing_frequency_days > 0, ErrorCode::InvalidBillingFrequency);
    require!(
        max_subscribers != Some(0),
        ErrorCode::InvalidMaxSubscribers
    );
    Ok(())
}
