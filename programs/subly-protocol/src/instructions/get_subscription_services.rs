use crate::{error::ErrorCode, pda, state::*, utils::fit_return_data};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct GetSubscriptionService<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub subscription_service: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetSubscriptionServices<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub provider_account: UncheckedAccount<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct SubscriptionServiceInfo {
    pub provider: Pubkey,
    pub service_id: u64,
    pub name: String,
    pub description: String,
    pub fee_usd: u64,
    pub billing_frequency_days: u64,
    pub image_url: String,
    pub max_subscribers: Option<u64>,
    pub current_subscribers: u64,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<SubscriptionService> for SubscriptionServiceInfo {
    fn from(service: SubscriptionService) -> Self {
        Self {
            provider: service.provider,
            service_id: service.service_id,
            name: service.name,
            description: service.description,
            fee_usd: service.fee_usd,
            billing_frequency_days: service.billing_frequency_days,
            image_url: service.image_url,
            max_subscribers: service.max_subscribers,
            current_subscribers: service.current_subscribers,
            is_active: service.is_active,
            created_at: service.created_at,
        }
    }
}

impl<'info> GetSubscriptionService<'info> {
    pub fn get_subscription_service(
        &self,
        provider: Pubkey,
        service_id: u64,
    ) -> Result<SubscriptionServiceInfo> {
        let (address, _) = pda::subscription_service_address(&provider, service_id);
        let service: SubscriptionService =
            load_account(&self.subscription_service.to_account_info(), &address)?;
        Ok(service.into())
    }
}

impl<'info> GetSubscriptionServices<'info> {
    /// Lists a provider's services starting at `start_id`, one per
    /// remaining account, in id order. The page ends early when the next
    /// service would not fit in the return data.
    pub fn get_subscription_services(
        ctx: Context<'_, '_, '_, 'info, GetSubscriptionServices<'info>>,
        provider: Pubkey,
        start_id: u64,
    ) -> Result<Vec<SubscriptionServiceInfo>> {
        let (address, _) = pda::provider_address(&provider);
        let provider_account: Provider =
            load_account(&ctx.accounts.provider_account.to_account_info(), &address)?;

        load_services(
            &provider,
            provider_account.service_count,
            start_id,
            ctx.remaining_accounts,
        )
    }
}

pub fn load_services(
    provider: &Pubkey,
    service_count: u64,
    start_id: u64,
    accounts: &[AccountInfo],
) -> Result<Vec<SubscriptionServiceInfo>> {
    let end_id = start_id
        .checked_add(accounts.len() as u64)
        .ok_or(ErrorCode::Overflow)?;
    require!(end_id <= service_count, ErrorCode::AccountListMismatch);

    let services = (start_id..end_id)
        .zip(accounts)
        .map(|(service_id, info)| {
            let (address, _) = pda::subscription_service_address(provider, service_id);
            load_account::<SubscriptionService>(info, &address).map(Into::into)
        })
        .collect::<Result<Vec<SubscriptionServiceInfo>>>()?;

    // The next page starts at start_id + services.len()
    fit_return_data(services)
}
