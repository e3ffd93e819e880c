use crate::{constants::*, error::ErrorCode, events::SubscriptionServiceDeactivated, pda, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(service_id: u64)]
pub struct DeactivateSubscriptionService<'info> {
    pub provider: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        mut,
        address = pda::subscription_service_address(&provider.key(), service_id).0 @ ErrorCode::InvalidAddress,
        constraint = subscription_service.provider == provider.key() @ ErrorCode::UnauthorizedProvider
    )]
    pub subscription_service: Box<Account<'info, SubscriptionService>>,
}

impl<'info> DeactivateSubscriptionService<'info> {
    pub fn deactivate_subscription_service(&mut self, service_id: u64) -> Result<()> {
        self.global_state.ensure_not_paused()?;
        self.subscription_service.deactivate()?;

        msg!(
            "Subscription service #{} of provider {} deactivated ({} subscribers remain)",
            service_id,
            self.provider.key(),
            self.subscription_service.current_subscribers
        );
        emit!(SubscriptionServiceDeactivated {
            provider: self.provider.key(),
            service_id,
        });

        Ok(())
    }
}
