use crate::{constants::*, events::ProtocolInitialized, state::*, utils::rent_shortfall};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    // init_if_needed so a second call reports AlreadyInitialized
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + GlobalState::INIT_SPACE,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump
    )]
    pub global_state: Account<'info, GlobalState>,

    /// Receives the protocol's share of every subscription payment
    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        jito_stake_pool: Pubkey,
        jito_sol_mint: Pubkey,
        spl_stake_pool_program: Pubkey,
        sol_usd_price_feed: Pubkey,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        self.global_state.ensure_uninitialized()?;

        self.fund_treasury()?;

        self.global_state.set_inner(GlobalState {
            version: ACCOUNT_VERSION,
            authority: self.authority.key(),
            protocol_fee_bps: DEFAULT_PROTOCOL_FEE_BPS,
            is_paused: false,
            tokens_required: true,
            subscriber_caps_enforced: true,
            total_providers: 0,
            total_users: 0,
            total_subscription_services: 0,
            total_active_subscriptions: 0,
            jito_stake_pool,
            jito_sol_mint,
            spl_stake_pool_program,
            sol_usd_price_feed,
            bump: bumps.global_state,
        });

        msg!(
            "Subly protocol initialized by authority: {}",
            self.authority.key()
        );
        msg!(
            "Jito config - Pool: {}, Mint: {}, Program: {}",
            jito_stake_pool,
            jito_sol_mint,
            spl_stake_pool_program
        );
        msg!("Pyth SOL/USD price feed: {}", sol_usd_price_feed);

        emit!(ProtocolInitialized {
            authority: self.authority.key(),
            protocol_fee_bps: DEFAULT_PROTOCOL_FEE_BPS,
            jito_stake_pool,
            sol_usd_price_feed,
        });

        Ok(())
    }

    /// Tops the treasury up to the rent-exempt minimum so small fee
    /// transfers into it never fail the rent check.
    fn fund_treasury(&self) -> Result<()> {
        let shortfall = rent_shortfall(&Rent::get()?, self.treasury.lamports());
        if shortfall == 0 {
            return Ok(());
        }

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.authority.to_account_info(),
                to: self.treasury.to_account_info(),
            },
        );
        transfer(cpi_ctx, shortfall)
    }
}
