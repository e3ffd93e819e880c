use crate::{
    constants::*,
    error::ErrorCode,
    events::SolUnstaked,
    state::*,
    utils::lamports_to_sol,
};
use anchor_lang::{
    prelude::*,
    solana_program::{program::invoke_signed, stake, sysvar},
};
use anchor_spl::token::{Mint, Token, TokenAccount};
use spl_stake_pool::instruction as spl_instruction;

#[derive(Accounts)]
pub struct UnstakeSol<'info> {
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
        mut,
        seeds = [STAKE_ACCOUNT_SEED.as_bytes(), user.key().as_ref()],
        bump = stake_account.bump,
        constraint = stake_account.user == user.key() @ ErrorCode::UnauthorizedUser
    )]
    pub stake_account: Account<'info, StakeAccount>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED.as_bytes(), user.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    #[account(
        mut,
        associated_token::mint = jito_sol_mint,
        associated_token::authority = jito_vault
    )]
    pub protocol_jito_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA owning the protocol's JitoSOL, signs the pool token burn
    #[account(
        seeds = [JITO_VAULT_SEED.as_bytes()],
        bump
    )]
    pub jito_vault: UncheckedAccount<'info>,

    // ===== Jito/SPL Stake Pool Accounts for Withdrawal =====
    /// CHECK: SPL Stake Pool program (read from GlobalState)
    #[account(address = global_state.spl_stake_pool_program @ ErrorCode::StakingNotAvailable)]
    pub stake_pool_program: UncheckedAccount<'info>,

    /// CHECK: Jito Stake Pool account (read from GlobalState)
    #[account(
        mut,
        address = global_state.jito_stake_pool @ ErrorCode::StakingNotAvailable
    )]
    pub jito_stake_pool: UncheckedAccount<'info>,

    /// CHECK: Stake pool withdraw authority, validated by the stake pool program
    pub stake_pool_withdraw_authority: UncheckedAccount<'info>,

    /// CHECK: Jito reserve stake account, validated by the stake pool program
    #[account(mut)]
    pub reserve_stake: UncheckedAccount<'info>,

    #[account(
        mut,
        address = global_state.jito_sol_mint @ ErrorCode::StakingNotAvailable
    )]
    pub jito_sol_mint: Account<'info, Mint>,

    /// CHECK: Jito manager fee account, validated by the stake pool program
    #[account(mut)]
    pub manager_fee_account: UncheckedAccount<'info>,

    pub clock: Sysvar<'info, Clock>,

    /// CHECK: Stake history sysvar
    #[account(address = sysvar::stake_history::ID)]
    pub stake_history: UncheckedAccount<'info>,

    /// CHECK: Stake program
    #[account(address = stake::program::ID)]
    pub stake_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> UnstakeSol<'info> {
    /// Redeems `derived_tokens` JitoSOL back into the user's vault. The
    /// user's principal is released pro rata and the lamports the pool
    /// actually paid out are credited, so any yield lands in the deposit.
    pub fn unstake_sol(&mut self, derived_tokens: u64, bumps: &UnstakeSolBumps) -> Result<()> {
        self.global_state.ensure_not_paused()?;
        require!(derived_tokens > 0, ErrorCode::InvalidAmount);

        let principal = self.stake_account.principal_for(derived_tokens)?;
        require!(
            principal <= self.user_account.staked_sol,
            ErrorCode::InsufficientStakedFunds
        );

        let signer_seeds: &[&[&[u8]]] = &[&[JITO_VAULT_SEED.as_bytes(), &[bumps.jito_vault]]];

        let withdraw_instruction = spl_instruction::withdraw_sol(
            &self.stake_pool_program.key(),
            &self.jito_stake_pool.key(),
            &self.stake_pool_withdraw_authority.key(),
            &self.jito_vault.key(),          // user transfer authority
            &self.protocol_jito_vault.key(), // pool tokens from
            &self.reserve_stake.key(),
            &self.sol_vault.key(), // lamports to
            &self.manager_fee_account.key(),
            &self.jito_sol_mint.key(),
            &self.token_program.key(),
            derived_tokens,
        );

        let lamports_before = self.sol_vault.lamports();
        invoke_signed(
            &withdraw_instruction,
            &[
                self.stake_pool_program.to_account_info(),
                self.jito_stake_pool.to_account_info(),
                self.stake_pool_withdraw_authority.to_account_info(),
                self.jito_vault.to_account_info(),
                self.protocol_jito_vault.to_account_info(),
                self.reserve_stake.to_account_info(),
                self.sol_vault.to_account_info(),
                self.manager_fee_account.to_account_info(),
                self.jito_sol_mint.to_account_info(),
                self.clock.to_account_info(),
                self.stake_history.to_account_info(),
                self.stake_program.to_account_info(),
                self.token_program.to_account_info(),
            ],
            signer_seeds,
        )?;

        let lamports_received = self
            .sol_vault
            .lamports()
            .checked_sub(lamports_before)
            .ok_or(ErrorCode::Underflow)?;

        let now = Clock::get()?.unix_timestamp;
        self.user_account
            .return_from_stake(principal, lamports_received)?;
        self.stake_account
            .record_unstake(derived_tokens, principal, now)?;

        msg!(
            "User {} unstaked {} JitoSOL via pool {}, received {} SOL (principal {} SOL)",
            self.user.key(),
            lamports_to_sol(derived_tokens),
            self.global_state.jito_stake_pool,
            lamports_to_sol(lamports_received),
            lamports_to_sol(principal)
        );
        emit!(SolUnstaked {
            user: self.user.key(),
            derived_tokens,
            principal,
            lamports_received,
        });

        Ok(())
    }
}
