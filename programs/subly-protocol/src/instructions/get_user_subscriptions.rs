use crate::{error::ErrorCode, pda, state::*, utils::fit_return_data};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct GetUserSubscription<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub user_subscription: UncheckedAccount<'info>,

    /// CHECK: decoded and checked against its derivation by `load_account`
    pub subscription_service: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetUserSubscriptions<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub user_account: UncheckedAccount<'info>,
}

/// A subscription joined with the service it pays for.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct UserSubscriptionInfo {
    pub subscription_id: u64,
    pub provider: Pubkey,
    pub service_id: u64,
    pub service_name: String,
    pub fee_usd: u64,
    pub billing_frequency_days: u64,
    pub subscribed_at: i64,
    pub last_payment_at: Option<i64>,
    pub next_payment_due: i64,
    pub total_payments_made: u64,
    pub reserved_lamports: u64,
    pub certificate_mint: Option<Pubkey>,
    pub is_active: bool,
    pub unsubscribed_at: Option<i64>,
}

impl UserSubscriptionInfo {
    pub fn new(subscription: UserSubscription, service: SubscriptionService) -> Self {
        Self {
            subscription_id: subscription.subscription_id,
            provider: subscription.provider,
            service_id: subscription.service_id,
            service_name: service.name,
            fee_usd: service.fee_usd,
            billing_frequency_days: service.billing_frequency_days,
            subscribed_at: subscription.subscribed_at,
            last_payment_at: subscription.last_payment_at,
            next_payment_due: subscription.next_payment_due,
            total_payments_made: subscription.total_payments_made,
            reserved_lamports: subscription.reserved_lamports,
            certificate_mint: subscription.certificate_mint,
            is_active: subscription.is_active,
            unsubscribed_at: subscription.unsubscribed_at,
        }
    }
}

impl<'info> GetUserSubscription<'info> {
    pub fn get_user_subscription(
        &self,
        user: Pubkey,
        subscription_id: u64,
    ) -> Result<UserSubscriptionInfo> {
        load_subscription(
            &user,
            subscription_id,
            &self.user_subscription.to_account_info(),
            &self.subscription_service.to_account_info(),
        )
    }
}

impl<'info> GetUserSubscriptions<'info> {
    /// Lists a user's subscriptions starting at `start_id`. Remaining
    /// accounts are (subscription, service) pairs in id order. The page ends
    /// early when the next entry would not fit in the return data.
    pub fn get_user_subscriptions(
        ctx: Context<'_, '_, '_, 'info, GetUserSubscriptions<'info>>,
        user: Pubkey,
        start_id: u64,
    ) -> Result<Vec<UserSubscriptionInfo>> {
        let (address, _) = pda::user_address(&user);
        let user_account: User =
            load_account(&ctx.accounts.user_account.to_account_info(), &address)?;

        load_subscriptions(
            &user,
            user_account.subscription_count,
            start_id,
            ctx.remaining_accounts,
        )
    }
}

pub fn load_subscription(
    user: &Pubkey,
    subscription_id: u64,
    subscription_info: &AccountInfo,
    service_info: &AccountInfo,
) -> Result<UserSubscriptionInfo> {
    let (address, _) = pda::user_subscription_address(user, subscription_id);
    let subscription: UserSubscription = load_account(subscription_info, &address)?;

    let (address, _) =
        pda::subscription_service_address(&subscription.provider, subscription.service_id);
    let service: SubscriptionService = load_account(service_info, &address)?;

    Ok(UserSubscriptionInfo::new(subscription, service))
}

pub fn load_subscriptions(
    user: &Pubkey,
    subscription_count: u64,
    start_id: u64,
    accounts: &[AccountInfo],
) -> Result<Vec<UserSubscriptionInfo>> {
    require!(accounts.len() % 2 == 0, ErrorCode::AccountListMismatch);
    let end_id = start_id
        .checked_add((accounts.len() / 2) as u64)
        .ok_or(ErrorCode::Overflow)?;
    require!(end_id <= subscription_count, ErrorCode::AccountListMismatch);

    let subscriptions = (start_id..end_id)
        .zip(accounts.chunks_exact(2))
        .map(|(subscription_id, pair)| load_subscription(user, subscription_id, &pair[0], &pair[1]))
        .collect::<Result<Vec<UserSubscriptionInfo>>>()?;

    fit_return_data(subscriptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACCOUNT_VERSION;

    fn encode<T: AccountSerialize>(account: &T) -> Vec<u8> {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        data
    }

    fn fixtures(user: Pubkey, provider: Pubkey) -> (UserSubscription, SubscriptionService) {
        let subscription = UserSubscription {
            version: ACCOUNT_VERSION,
            user,
            provider,
            service_id: 0,
            subscription_id: 0,
            subscribed_at: 1_700_000_000,
            reserved_lamports: 100_000_000,
            next_payment_due: 1_700_000_000 + 30 * 86_400,
            is_active: true,
            ..Default::default()
        };
        let service = SubscriptionService {
            version: ACCOUNT_VERSION,
            provider,
            service_id: 0,
            name: "A".to_string(),
            fee_usd: 1599,
            billing_frequency_days: 30,
            is_active: true,
            ..Default::default()
        };
        (subscription, service)
    }

    #[test]
    fn joins_subscription_with_its_service() {
        let user = Pubkey::new_unique();
        let provider = Pubkey::new_unique();
        let (subscription, service) = fixtures(user, provider);
        let owner = crate::ID;

        let (subscription_address, _) = pda::user_subscription_address(&user, 0);
        let (service_address, _) = pda::subscription_service_address(&provider, 0);
        let mut subscription_data = encode(&subscription);
        let mut service_data = encode(&service);
        let (mut a, mut b) = (1_000_000, 1_000_000);
        let accounts = [
            AccountInfo::new(&subscription_address, false, false, &mut a, &mut subscription_data, &owner, false, 0),
            AccountInfo::new(&service_address, false, false, &mut b, &mut service_data, &owner, false, 0),
        ];

        let listed = load_subscriptions(&user, 1, 0, &accounts).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].service_name, "A");
        assert_eq!(listed[0].fee_usd, 1599);
        assert_eq!(listed[0].reserved_lamports, 100_000_000);
        assert!(listed[0].is_active);

        assert_eq!(
            load_subscriptions(&user, 1, 0, &accounts[..1]).unwrap_err(),
            ErrorCode::AccountListMismatch.into()
        );
    }

    #[test]
    fn missing_subscription_is_not_found() {
        let user = Pubkey::new_unique();
        let (subscription_address, _) = pda::user_subscription_address(&user, 5);
        let service_address = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let (mut empty_a, mut empty_b): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
        let (mut a, mut b) = (0, 0);
        let subscription_info =
            AccountInfo::new(&subscription_address, false, false, &mut a, &mut empty_a, &system, false, 0);
        let service_info =
            AccountInfo::new(&service_address, false, false, &mut b, &mut empty_b, &system, false, 0);

        assert_eq!(
            load_subscription(&user, 5, &subscription_info, &service_info).unwrap_err(),
            ErrorCode::NotFound.into()
        );
    }
}
