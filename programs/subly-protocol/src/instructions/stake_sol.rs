use crate::{
    constants::*,
    error::ErrorCode,
    events::SolStaked,
    state::*,
    utils::lamports_to_sol,
};
use anchor_lang::{prelude::*, solana_program::program::invoke_signed};
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};
use spl_stake_pool::instruction as spl_instruction;

#[derive(Accounts)]
pub struct StakeSol<'info> {
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
        init_if_needed,
        payer = user,
        space = 8 + StakeAccount::INIT_SPACE,
        seeds = [STAKE_ACCOUNT_SEED.as_bytes(), user.key().as_ref()],
        bump
    )]
    pub stake_account: Account<'info, StakeAccount>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED.as_bytes(), user.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    /// Global state for reading Jito configuration
    #[account(
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Box<Account<'info, GlobalState>>,

    /// Protocol's JitoSOL vault (ATA owned by the jito_vault PDA)
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = jito_sol_mint,
        associated_token::authority = jito_vault
    )]
    pub protocol_jito_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA owning the protocol's JitoSOL, holds no data
    #[account(
        seeds = [JITO_VAULT_SEED.as_bytes()],
        bump
    )]
    pub jito_vault: UncheckedAccount<'info>,

    // ===== Jito/SPL Stake Pool Accounts =====
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

    /// CHECK: Referrer pool tokens (can be the protocol vault)
    #[account(mut)]
    pub referrer_pool_tokens: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> StakeSol<'info> {
    pub fn stake_sol(&mut self, amount: u64, bumps: &StakeSolBumps) -> Result<()> {
        self.global_state.ensure_not_paused()?;
        require!(amount > 0, ErrorCode::InvalidAmount);

        self.user_account.move_to_stake(amount)?;

        let user_key = self.user.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            SOL_VAULT_SEED.as_bytes(),
            user_key.as_ref(),
            &[bumps.sol_vault],
        ]];

        let deposit_instruction = spl_instruction::deposit_sol(
            &self.stake_pool_program.key(),
            &self.jito_stake_pool.key(),
            &self.stake_pool_withdraw_authority.key(),
            &self.reserve_stake.key(),
            &self.sol_vault.key(),           // lamports from
            &self.protocol_jito_vault.key(), // pool tokens to
            &self.manager_fee_account.key(),
            &self.referrer_pool_tokens.key(),
            &self.jito_sol_mint.key(),
            &self.token_program.key(),
            amount,
        );

        let tokens_before = self.protocol_jito_vault.amount;
        invoke_signed(
            &deposit_instruction,
            &[
                self.stake_pool_program.to_account_info(),
                self.jito_stake_pool.to_account_info(),
                self.stake_pool_withdraw_authority.to_account_info(),
                self.reserve_stake.to_account_info(),
                self.sol_vault.to_account_info(),
                self.protocol_jito_vault.to_account_info(),
                self.manager_fee_account.to_account_info(),
                self.referrer_pool_tokens.to_account_info(),
                self.jito_sol_mint.to_account_info(),
                self.token_program.to_account_info(),
                self.system_program.to_account_info(),
            ],
            signer_seeds,
        )?;

        // Credit the pool tokens actually minted, not an estimate
        self.protocol_jito_vault.reload()?;
        let derived_tokens = self
            .protocol_jito_vault
            .amount
            .checked_sub(tokens_before)
            .ok_or(ErrorCode::Underflow)?;
        require!(derived_tokens > 0, ErrorCode::StakingNotAvailable);

        if self.stake_account.user == Pubkey::default() {
            let stake_account = &mut self.stake_account;
            stake_account.version = ACCOUNT_VERSION;
            stake_account.user = user_key;
            stake_account.bump = bumps.stake_account;
        }
        let now = Clock::get()?.unix_timestamp;
        self.stake_account.record_stake(amount, derived_tokens, now)?;

        msg!(
            "User {} staked {} SOL via Jito SPL Stake Pool ({}), received {} JitoSOL",
            user_key,
            lamports_to_sol(amount),
            self.global_state.jito_stake_pool,
            lamports_to_sol(derived_tokens)
        );
        emit!(SolStaked {
            user: user_key,
            lamports: amount,
            derived_tokens,
            staked_sol: self.user_account.staked_sol,
        });

        Ok(())
    }
}
