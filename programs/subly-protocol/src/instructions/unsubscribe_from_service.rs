use crate::{
    constants::*,
    error::ErrorCode,
    events::Unsubscribed,
    pda,
    state::*,
    utils::{burn_marker_token, lamports_to_sol},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
#[instruction(subscription_id: u64)]
pub struct UnsubscribeFromService<'info> {
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
        address = pda::user_subscription_address(&user.key(), subscription_id).0 @ ErrorCode::InvalidAddress,
        constraint = user_subscription.user == user.key() @ ErrorCode::UnauthorizedUser
    )]
    pub user_subscription: Box<Account<'info, UserSubscription>>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SERVICE_SEED.as_bytes(),
            user_subscription.provider.as_ref(),
            user_subscription.service_id.to_le_bytes().as_ref()
        ],
        bump = subscription_service.bump
    )]
    pub subscription_service: Box<Account<'info, SubscriptionService>>,

    #[account(
        mut,
        seeds = [PROVIDER_SEED.as_bytes(), user_subscription.provider.as_ref()],
        bump = provider_account.bump
    )]
    pub provider_account: Box<Account<'info, Provider>>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    // Present when the subscription carries a certificate
    #[account(mut)]
    pub certificate_mint: Option<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = certificate_mint,
        associated_token::authority = user,
    )]
    pub certificate_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> UnsubscribeFromService<'info> {
    /// Ends the subscription, returns its reserve to the available balance
    /// and burns its certificate.
    pub fn unsubscribe_from_service(&mut self, subscription_id: u64) -> Result<()> {
        self.global_state.ensure_not_paused()?;

        let now = Clock::get()?.unix_timestamp;
        let released_lamports = self.user_subscription.deactivate(now)?;
        self.user_account.release(released_lamports)?;

        if let Some(certificate) = self.user_subscription.certificate_mint {
            burn_marker_token(
                &certificate,
                &self.certificate_mint,
                &self.certificate_token_account,
                &self.user,
                &self.token_program,
            )?;
            msg!("Subscription certificate burned: {}", certificate);
        }

        self.subscription_service.remove_subscriber()?;
        self.provider_account.remove_subscriber()?;
        self.global_state.record_subscription_closed()?;

        msg!(
            "User {} unsubscribed from service '{}' of provider {}, released {} SOL",
            self.user.key(),
            self.subscription_service.name,
            self.user_subscription.provider,
            lamports_to_sol(released_lamports)
        );
        emit!(Unsubscribed {
            user: self.user.key(),
            subscription_id,
            released_lamports,
            unsubscribed_at: now,
        });

        Ok(())
    }
}
