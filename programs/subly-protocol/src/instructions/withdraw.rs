use crate::{
    constants::*,
    error::ErrorCode,
    events::Withdrawn,
    state::*,
    utils::{lamports_to_sol, transfer_from_vault},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_SEED.as_bytes(), user.key().as_ref()],
        bump = user_account.bump,
        constraint = user_account.wallet == user.key() @ ErrorCode::UnauthorizedUser
    )]
    pub user_account: Account<'info, User>,

    #[account(
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED.as_bytes(), user.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    /// Only unreserved, unstaked lamports can leave the vault. Staked funds
    /// come back through `unstake_sol` first.
    pub fn withdraw(&mut self, amount: u64, bumps: &WithdrawBumps) -> Result<()> {
        self.global_state.ensure_not_paused()?;
        require!(amount > 0, ErrorCode::InvalidAmount);

        self.user_account.debit(amount)?;

        let user_key = self.user.key();
        transfer_from_vault(
            &self.system_program,
            &self.sol_vault,
            self.user.to_account_info(),
            &user_key,
            bumps.sol_vault,
            amount,
        )?;

        msg!(
            "User {} withdrew {} SOL (remaining: {} SOL, locked: {} SOL)",
            user_key,
            lamports_to_sol(amount),
            lamports_to_sol(self.user_account.deposited_sol),
            lamports_to_sol(self.user_account.locked_sol)
        );
        emit!(Withdrawn {
            user: user_key,
            amount,
            deposited_sol: self.user_account.deposited_sol,
        });

        Ok(())
    }
}
