use crate::{
    constants::*,
    error::ErrorCode,
    events::Deposited,
    state::*,
    utils::{lamports_to_sol, rent_shortfall},
};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + User::INIT_SPACE,
        seeds = [USER_SEED.as_bytes(), user.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, User>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    /// Holds the user's deposited lamports
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED.as_bytes(), user.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount: u64, bumps: &DepositBumps) -> Result<()> {
        let first_deposit = credit_deposit(
            &mut self.global_state,
            &mut self.user_account,
            self.user.key(),
            amount,
            Clock::get()?.unix_timestamp,
            bumps.user_account,
        )?;

        // The vault's rent reserve is paid on top and never credited
        let rent_reserve = rent_shortfall(&Rent::get()?, self.sol_vault.lamports());
        let lamports = amount
            .checked_add(rent_reserve)
            .ok_or(ErrorCode::Overflow)?;

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.user.to_account_info(),
                to: self.sol_vault.to_account_info(),
            },
        );
        transfer(cpi_ctx, lamports)?;

        msg!(
            "User {} deposited {} SOL (total: {} SOL)",
            self.user.key(),
            lamports_to_sol(amount),
            lamports_to_sol(self.user_account.deposited_sol)
        );
        emit!(Deposited {
            user: self.user.key(),
            amount,
            deposited_sol: self.user_account.deposited_sol,
            first_deposit,
        });

        Ok(())
    }
}

/// Credits a deposit, opening the user record on the first one. Returns
/// whether the record was opened.
pub fn credit_deposit(
    global_state: &mut GlobalState,
    user: &mut User,
    wallet: Pubkey,
    amount: u64,
    now: i64,
    bump: u8,
) -> Result<bool> {
    global_state.ensure_not_paused()?;
    require!(amount > 0, ErrorCode::InvalidAmount);

    let first_deposit = !user.is_registered();
    if first_deposit {
        *user = User {
            version: ACCOUNT_VERSION,
            wallet,
            deposited_sol: 0,
            locked_sol: 0,
            staked_sol: 0,
            subscription_count: 0,
            created_at: now,
            bump,
        };
        global_state.record_user()?;
    }
    user.credit(amount)?;
    Ok(first_deposit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_deposit_counts_a_user() {
        let mut global_state = GlobalState::default();
        let mut user = User::default();
        let wallet = Pubkey::new_unique();

        assert!(credit_deposit(&mut global_state, &mut user, wallet, 5_000, 100, 254).unwrap());
        assert!(!credit_deposit(&mut global_state, &mut user, wallet, 2_000, 200, 254).unwrap());

        assert_eq!(global_state.total_users, 1);
        assert_eq!(user.wallet, wallet);
        assert_eq!(user.deposited_sol, 7_000);
        assert_eq!(user.created_at, 100);
        assert_eq!(user.bump, 254);
    }

    #[test]
    fn zero_or_paused_deposits_are_rejected() {
        let mut global_state = GlobalState::default();
        let mut user = User::default();
        let wallet = Pubkey::new_unique();

        assert_eq!(
            credit_deposit(&mut global_state, &mut user, wallet, 0, 100, 254).unwrap_err(),
            ErrorCode::InvalidAmount.into()
        );

        global_state.set_paused(true);
        assert_eq!(
            credit_deposit(&mut global_state, &mut user, wallet, 1, 100, 254).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
        assert_eq!(global_state.total_users, 0);
        assert!(!user.is_registered());
    }
}
