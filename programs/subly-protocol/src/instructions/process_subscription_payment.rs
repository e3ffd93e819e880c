use crate::{
    constants::*,
    error::ErrorCode,
    events::SubscriptionPaymentProcessed,
    oracle,
    pda,
    state::*,
    utils::{can_receive, lamports_to_sol, transfer_from_vault},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(user: Pubkey, subscription_id: u64)]
pub struct ProcessSubscriptionPayment<'info> {
    /// Protocol authority running the billing crank
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump,
        has_one = authority @ ErrorCode::UnauthorizedAuthority
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(
        mut,
        seeds = [USER_SEED.as_bytes(), user.as_ref()],
        bump = user_account.bump,
        constraint = user_account.wallet == user @ ErrorCode::UnauthorizedUser
    )]
    pub user_account: Box<Account<'info, User>>,

    #[account(
        mut,
        address = pda::user_subscription_address(&user, subscription_id).0 @ ErrorCode::InvalidAddress,
        constraint = user_subscription.user == user @ ErrorCode::UnauthorizedUser
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

    /// Provider wallet receiving the provider share
    #[account(
        mut,
        address = user_subscription.provider @ ErrorCode::UnauthorizedProvider
    )]
    pub provider_wallet: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED.as_bytes(), user.as_ref()],
        bump,
    )]
    pub user_sol_vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    /// CHECK: Pyth SOL/USD price account, parsed by the oracle module
    #[account(address = global_state.sol_usd_price_feed @ ErrorCode::InvalidPriceFeed)]
    pub sol_usd_price_feed: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> ProcessSubscriptionPayment<'info> {
    /// Charges one billing period at the current SOL/USD price. The charge
    /// may consume the subscription's own reserve; the next period is
    /// reserved again when the remaining balance allows, otherwise the
    /// subscription lapses. A charge the balance cannot cover in full
    /// collects what it can and lapses.
    pub fn process_subscription_payment(
        &mut self,
        user: Pubkey,
        subscription_id: u64,
        bumps: &ProcessSubscriptionPaymentBumps,
    ) -> Result<()> {
        self.global_state.ensure_not_paused()?;

        let now = Clock::get()?.unix_timestamp;
        require!(
            self.user_subscription.is_payment_due(now),
            ErrorCode::PaymentNotDue
        );

        let sol_usd_price_cents = oracle::sol_usd_price_cents(&self.sol_usd_price_feed, now)?;
        let period_charge =
            oracle::usd_cents_to_lamports(self.subscription_service.fee_usd, sol_usd_price_cents)?;
        let billing_period = self.subscription_service.billing_period_seconds()?;

        let settlement = self
            .user_account
            .settle_charge(self.user_subscription.reserved_lamports, period_charge)?;
        let charged_lamports = settlement.paid;
        let protocol_fee_lamports = self.global_state.protocol_fee_for(charged_lamports)?;
        let provider_lamports = charged_lamports
            .checked_sub(protocol_fee_lamports)
            .ok_or(ErrorCode::Underflow)?;
        require!(
            can_receive(&Rent::get()?, self.provider_wallet.lamports(), provider_lamports),
            ErrorCode::ProviderWalletUnfunded
        );
        self.user_subscription
            .record_payment(now, billing_period, settlement.next_reserve)?;

        let renewed = settlement.next_reserve.is_some();
        if !renewed {
            self.subscription_service.remove_subscriber()?;
            self.provider_account.remove_subscriber()?;
            self.global_state.record_subscription_closed()?;
        }

        transfer_from_vault(
            &self.system_program,
            &self.user_sol_vault,
            self.provider_wallet.to_account_info(),
            &user,
            bumps.user_sol_vault,
            provider_lamports,
        )?;
        transfer_from_vault(
            &self.system_program,
            &self.user_sol_vault,
            self.treasury.to_account_info(),
            &user,
            bumps.user_sol_vault,
            protocol_fee_lamports,
        )?;

        msg!(
            "PAYMENT EXECUTED: User {} paid {} SOL (${:.2}) to provider {} for service {} | Protocol fee: {} SOL",
            user,
            lamports_to_sol(charged_lamports),
            self.subscription_service.fee_usd as f64 / 100.0,
            self.user_subscription.provider,
            self.user_subscription.service_id,
            lamports_to_sol(protocol_fee_lamports)
        );
        if charged_lamports < period_charge {
            msg!(
                "Partial payment: {} of {} SOL due",
                lamports_to_sol(charged_lamports),
                lamports_to_sol(period_charge)
            );
        }
        if renewed {
            msg!(
                "Subscription {} renewed, next payment due at {}",
                subscription_id,
                self.user_subscription.next_payment_due
            );
        } else {
            msg!(
                "Subscription {} lapsed: balance cannot cover the next period",
                subscription_id
            );
        }

        emit!(SubscriptionPaymentProcessed {
            user,
            provider: self.user_subscription.provider,
            subscription_id,
            charged_lamports,
            protocol_fee_lamports,
            renewed,
            next_payment_due: self.user_subscription.next_payment_due,
        });

        Ok(())
    }
}
