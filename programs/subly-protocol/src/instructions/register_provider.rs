use crate::{
    constants::*,
    error::ErrorCode,
    events::ProviderRegistered,
    state::*,
    utils::{check_text, mint_marker_token},
};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

#[derive(Accounts)]
pub struct RegisterProvider<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        init_if_needed,
        payer = provider,
        space = 8 + Provider::INIT_SPACE,
        seeds = [PROVIDER_SEED.as_bytes(), provider.key().as_ref()],
        bump
    )]
    pub provider_account: Box<Account<'info, Provider>>,

    // Provider identity token, required while tokens_required is set
    #[account(
        init,
        payer = provider,
        mint::decimals = 0,
        mint::authority = provider,
        mint::freeze_authority = provider,
    )]
    pub identity_mint: Option<Account<'info, Mint>>,

    #[account(
        init,
        payer = provider,
        associated_token::mint = identity_mint,
        associated_token::authority = provider,
    )]
    pub identity_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> RegisterProvider<'info> {
    pub fn register_provider(
        &mut self,
        name: String,
        description: String,
        website: String,
        bumps: &RegisterProviderBumps,
    ) -> Result<()> {
        check_provider_registration(
            &self.global_state,
            &self.provider_account,
            &name,
            &description,
            &website,
        )?;

        let identity_mint = mint_marker_token(
            self.global_state.tokens_required,
            &self.identity_mint,
            &self.identity_token_account,
            &self.provider,
            &self.token_program,
        )?;

        self.provider_account.set_inner(Provider {
            version: ACCOUNT_VERSION,
            wallet: self.provider.key(),
            name: name.clone(),
            description,
            website,
            service_count: 0,
            total_subscribers: 0,
            identity_mint,
            created_at: Clock::get()?.unix_timestamp,
            bump: bumps.provider_account,
        });
        self.global_state.record_provider()?;

        match identity_mint {
            Some(mint) => msg!("Provider '{}' registered with identity token: {}", name, mint),
            None => msg!("Provider '{}' registered without identity token", name),
        }
        emit!(ProviderRegistered {
            provider: self.provider.key(),
            identity_mint,
            total_providers: self.global_state.total_providers,
        });

        Ok(())
    }
}

/// Everything that must hold before a provider record is written.
pub fn check_provider_registration(
    global_state: &GlobalState,
    provider: &Provider,
    name: &str,
    description: &str,
    website: &str,
) -> Result<()> {
    global_state.ensure_not_paused()?;
    require!(!provider.is_registered(), ErrorCode::AlreadyExists);
    check_text(name, MAX_NAME_LENGTH, ErrorCode::NameTooLong)?;
    check_text(description, MAX_DESCRIPTION_LENGTH, ErrorCode::DescriptionTooLong)?;
    check_text(website, MAX_URL_LENGTH, ErrorCode::UrlTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(wallet: Pubkey) -> Provider {
        Provider {
            version: ACCOUNT_VERSION,
            wallet,
            name: "P".to_string(),
            service_count: 2,
            ..Default::default()
        }
    }

    #[test]
    fn reregistration_is_rejected_and_keeps_the_record() {
        let global_state = GlobalState::default();
        let wallet = Pubkey::new_unique();
        let provider = registered(wallet);

        assert_eq!(
            check_provider_registration(&global_state, &provider, "Q", "", "").unwrap_err(),
            ErrorCode::AlreadyExists.into()
        );
        assert_eq!(provider.wallet, wallet);
        assert_eq!(provider.name, "P");
        assert_eq!(provider.service_count, 2);
    }

    #[test]
    fn new_provider_passes_bounds_checks() {
        let global_state = GlobalState::default();
        let provider = Provider::default();
        assert!(check_provider_registration(&global_state, &provider, "P", "d", "https://p.io").is_ok());

        let long_url = "u".repeat(MAX_URL_LENGTH + 1);
        assert_eq!(
            check_provider_registration(&global_state, &provider, "P", "d", &long_url).unwrap_err(),
            ErrorCode::UrlTooLong.into()
        );
    }

    #[test]
    fn paused_protocol_rejects_registration() {
        let global_state = GlobalState {
            is_paused: true,
            ..Default::default()
        };
        assert_eq!(
            check_provider_registration(&global_state, &Provider::default(), "P", "", "").unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
    }
}
