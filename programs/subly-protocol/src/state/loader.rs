use crate::{constants::ACCOUNT_VERSION, error::ErrorCode};
use anchor_lang::{prelude::*, Discriminator};

use super::{GlobalState, Provider, StakeAccount, SubscriptionService, User, UserSubscription};

/// Schema version stored in every protocol account.
pub trait Versioned {
    fn version(&self) -> u8;
}

macro_rules! versioned {
    ($($ty:ty),* $(,)?) => {
        $(impl Versioned for $ty {
            fn version(&self) -> u8 {
                self.version
            }
        })*
    };
}

versioned!(
    GlobalState,
    Provider,
    SubscriptionService,
    User,
    StakeAccount,
    UserSubscription,
);

/// Decodes a protocol account read outside of an `Accounts` context.
///
/// Fails closed: a wrong address is `InvalidAddress`, an address holding no
/// account is `NotFound`, and an account of another type or owner is
/// `InvalidDiscriminator`. Nothing is ever defaulted.
pub fn load_account<T>(info: &AccountInfo, expected: &Pubkey) -> Result<T>
where
    T: AccountDeserialize + Discriminator + Owner + Versioned,
{
    require_keys_eq!(*info.key, *expected, ErrorCode::InvalidAddress);
    if info.lamports() == 0 || info.data_is_empty() {
        return err!(ErrorCode::NotFound);
    }
    require_keys_eq!(*info.owner, T::owner(), ErrorCode::InvalidDiscriminator);

    let data = info.try_borrow_data()?;
    let discriminator = T::DISCRIMINATOR;
    require!(
        data.len() >= discriminator.len() && &data[..discriminator.len()] == discriminator,
        ErrorCode::InvalidDiscriminator
    );

    let account = T::try_deserialize_unchecked(&mut &data[..])
        .map_err(|_| error!(ErrorCode::InvalidDiscriminator))?;
    require!(
        account.version() == ACCOUNT_VERSION,
        ErrorCode::UnsupportedAccountVersion
    );

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pda;

    fn encode<T: AccountSerialize>(account: &T) -> Vec<u8> {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        data
    }

    fn service(provider: Pubkey, service_id: u64) -> SubscriptionService {
        SubscriptionService {
            version: ACCOUNT_VERSION,
            provider,
            service_id,
            name: "A".to_string(),
            fee_usd: 1599,
            billing_frequency_days: 30,
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn loads_a_stored_service() {
        let provider = Pubkey::new_unique();
        let (address, _) = pda::subscription_service_address(&provider, 0);
        let mut data = encode(&service(provider, 0));
        let mut lamports = 1_000_000;
        let owner = crate::ID;
        let info = AccountInfo::new(&address, false, false, &mut lamports, &mut data, &owner, false, 0);

        let loaded: SubscriptionService = load_account(&info, &address).unwrap();
        assert_eq!(loaded.fee_usd, 1599);
        assert_eq!(loaded.service_id, 0);
    }

    #[test]
    fn missing_account_is_not_found() {
        let provider = Pubkey::new_unique();
        let (address, _) = pda::subscription_service_address(&provider, 999);
        let mut data: Vec<u8> = Vec::new();
        let mut lamports = 0;
        let owner = anchor_lang::system_program::ID;
        let info = AccountInfo::new(&address, false, false, &mut lamports, &mut data, &owner, false, 0);

        let result = load_account::<SubscriptionService>(&info, &address);
        assert_eq!(result.unwrap_err(), ErrorCode::NotFound.into());
    }

    #[test]
    fn wrong_address_is_rejected() {
        let provider = Pubkey::new_unique();
        let (stored, _) = pda::subscription_service_address(&provider, 0);
        let (requested, _) = pda::subscription_service_address(&provider, 1);
        let mut data = encode(&service(provider, 0));
        let mut lamports = 1_000_000;
        let owner = crate::ID;
        let info = AccountInfo::new(&stored, false, false, &mut lamports, &mut data, &owner, false, 0);

        let result = load_account::<SubscriptionService>(&info, &requested);
        assert_eq!(result.unwrap_err(), ErrorCode::InvalidAddress.into());
    }

    #[test]
    fn other_account_type_is_rejected() {
        let wallet = Pubkey::new_unique();
        let (address, _) = pda::user_address(&wallet);
        let user = User {
            version: ACCOUNT_VERSION,
            wallet,
            deposited_sol: 5,
            ..Default::default()
        };
        let mut data = encode(&user);
        let mut lamports = 1_000_000;
        let owner = crate::ID;
        let info = AccountInfo::new(&address, false, false, &mut lamports, &mut data, &owner, false, 0);

        let result = load_account::<SubscriptionService>(&info, &address);
        assert_eq!(result.unwrap_err(), ErrorCode::InvalidDiscriminator.into());
    }

    #[test]
    fn foreign_owner_is_rejected() {
        let provider = Pubkey::new_unique();
        let (address, _) = pda::subscription_service_address(&provider, 0);
        let mut data = encode(&service(provider, 0));
        let mut lamports = 1_000_000;
        let owner = Pubkey::new_unique();
        let info = AccountInfo::new(&address, false, false, &mut lamports, &mut data, &owner, false, 0);

        let result = load_account::<SubscriptionService>(&info, &address);
        assert_eq!(result.unwrap_err(), ErrorCode::InvalidDiscriminator.into());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let provider = Pubkey::new_unique();
        let (address, _) = pda::subscription_service_address(&provider, 0);
        let mut stale = service(provider, 0);
        stale.version = ACCOUNT_VERSION + 1;
        let mut data = encode(&stale);
        let mut lamports = 1_000_000;
        let owner = crate::ID;
        let info = AccountInfo::new(&address, false, false, &mut lamports, &mut data, &owner, false, 0);

        let result = load_account::<SubscriptionService>(&info, &address);
        assert_eq!(result.unwrap_err(), ErrorCode::UnsupportedAccountVersion.into());
    }
}
