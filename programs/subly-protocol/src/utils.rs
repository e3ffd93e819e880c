use crate::{constants::*, error::ErrorCode};
use anchor_lang::{
    prelude::*,
    system_program::{transfer, Transfer},
};
use anchor_spl::token::{burn, mint_to, Burn, Mint, MintTo, Token, TokenAccount};

pub fn check_text(value: &str, max_len: usize, error: ErrorCode) -> Result<()> {
    if value.len() > max_len {
        return Err(error.into());
    }
    Ok(())
}

/// Lamports a zero-data system account holding `lamports` still needs to be
/// rent exempt.
pub fn rent_shortfall(rent: &Rent, lamports: u64) -> u64 {
    rent.minimum_balance(0).saturating_sub(lamports)
}

/// Whether a zero-data system account holding `balance` can take `amount`
/// and stay valid under the rent rules.
pub fn can_receive(rent: &Rent, balance: u64, amount: u64) -> bool {
    amount == 0 || rent_shortfall(rent, balance.saturating_add(amount)) == 0
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Keeps the longest prefix of `items` whose Borsh encoding as a `Vec` fits
/// in the instruction return data.
pub fn fit_return_data<T: AnchorSerialize>(items: Vec<T>) -> Result<Vec<T>> {
    let mut size = 4; // Vec length prefix
    let mut fitted = Vec::with_capacity(items.len());
    for item in items {
        let mut encoded = Vec::new();
        item.serialize(&mut encoded)
            .map_err(|_| anchor_lang::error::ErrorCode::AccountDidNotSerialize)?;
        size += encoded.len();
        if size > MAX_RETURN_DATA {
            break;
        }
        fitted.push(item);
    }
    Ok(fitted)
}

/// Mints the single identity or certificate token when the caller supplied
/// the mint and its associated token account. Both or neither must be given,
/// and neither is only accepted while tokens are optional.
pub fn mint_marker_token<'info>(
    tokens_required: bool,
    mint: &Option<Account<'info, Mint>>,
    token_account: &Option<Account<'info, TokenAccount>>,
    authority: &Signer<'info>,
    token_program: &Program<'info, Token>,
) -> Result<Option<Pubkey>> {
    match (mint, token_account) {
        (Some(mint), Some(token_account)) => {
            let cpi_accounts = MintTo {
                mint: mint.to_account_info(),
                to: token_account.to_account_info(),
                authority: authority.to_account_info(),
            };
            let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
            mint_to(cpi_ctx, 1)?;
            Ok(Some(mint.key()))
        }
        (None, None) if !tokens_required => Ok(None),
        _ => err!(ErrorCode::TokenAccountsMissing),
    }
}

/// Burns the certificate recorded as `expected_mint` out of the holder's
/// associated token account.
pub fn burn_marker_token<'info>(
    expected_mint: &Pubkey,
    mint: &Option<Account<'info, Mint>>,
    token_account: &Option<Account<'info, TokenAccount>>,
    authority: &Signer<'info>,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    let (Some(mint), Some(token_account)) = (mint, token_account) else {
        return err!(ErrorCode::TokenAccountsMissing);
    };
    require_keys_eq!(mint.key(), *expected_mint, ErrorCode::InvalidCertificate);
    require!(token_account.amount >= 1, ErrorCode::InvalidCertificate);

    let cpi_accounts = Burn {
        mint: mint.to_account_info(),
        from: token_account.to_account_info(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    burn(cpi_ctx, 1)
}

/// Moves lamports out of a user's SOL vault, signing with the vault seeds.
pub fn transfer_from_vault<'info>(
    system_program: &Program<'info, System>,
    sol_vault: &SystemAccount<'info>,
    to: AccountInfo<'info>,
    vault_owner: &Pubkey,
    vault_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let signer_seeds: &[&[&[u8]]] = &[&[
        SOL_VAULT_SEED.as_bytes(),
        vault_owner.as_ref(),
        &[vault_bump],
    ]];
    let cpi_ctx = CpiContext::new_with_signer(
        system_program.to_account_info(),
        Transfer {
            from: sol_vault.to_account_info(),
            to,
        },
        signer_seeds,
    );
    transfer(cpi_ctx, amount)
}
