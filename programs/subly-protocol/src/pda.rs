//! Program-derived address helpers.
//!
//! These mirror the `seeds` used by the account constraints so views and
//! off-chain callers resolve exactly the addresses the instructions accept.
//! Counter ids are encoded as little-endian u64.

use crate::constants::*;
use anchor_lang::prelude::*;

pub fn derive(tag: &str, components: &[&[u8]]) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(components.len() + 1);
    seeds.push(tag.as_bytes());
    seeds.extend_from_slice(components);
    Pubkey::find_program_address(&seeds, &crate::ID)
}

pub fn global_state_address() -> (Pubkey, u8) {
    derive(GLOBAL_STATE_SEED, &[])
}

pub fn treasury_address() -> (Pubkey, u8) {
    derive(TREASURY_SEED, &[])
}

pub fn jito_vault_address() -> (Pubkey, u8) {
    derive(JITO_VAULT_SEED, &[])
}

pub fn provider_address(wallet: &Pubkey) -> (Pubkey, u8) {
    derive(PROVIDER_SEED, &[wallet.as_ref()])
}

pub fn subscription_service_address(provider: &Pubkey, service_id: u64) -> (Pubkey, u8) {
    derive(
        SUBSCRIPTION_SERVICE_SEED,
        &[provider.as_ref(), &service_id.to_le_bytes()],
    )
}

pub fn user_address(wallet: &Pubkey) -> (Pubkey, u8) {
    derive(USER_SEED, &[wallet.as_ref()])
}

pub fn sol_vault_address(wallet: &Pubkey) -> (Pubkey, u8) {
    derive(SOL_VAULT_SEED, &[wallet.as_ref()])
}

pub fn stake_account_address(wallet: &Pubkey) -> (Pubkey, u8) {
    derive(STAKE_ACCOUNT_SEED, &[wallet.as_ref()])
}

pub fn user_subscription_address(user: &Pubkey, subscription_id: u64) -> (Pubkey, u8) {
    derive(
        USER_SUBSCRIPTION_SEED,
        &[user.as_ref(), &subscription_id.to_le_bytes()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_raw_seed_derivation() {
        let provider = Pubkey::new_unique();
        let expected = Pubkey::find_program_address(
            &[
                b"subscription_service",
                provider.as_ref(),
                &7u64.to_le_bytes(),
            ],
            &crate::ID,
        );
        assert_eq!(subscription_service_address(&provider, 7), expected);

        let singleton = Pubkey::find_program_address(&[b"global_state"], &crate::ID);
        assert_eq!(global_state_address(), singleton);
    }

    #[test]
    fn derivation_is_deterministic() {
        let wallet = Pubkey::new_unique();
        assert_eq!(user_address(&wallet), user_address(&wallet));
        assert_eq!(jito_vault_address(), jito_vault_address());
        assert_ne!(treasury_address(), global_state_address());
        assert_ne!(treasury_address(), jito_vault_address());
    }

    #[test]
    fn tags_separate_address_spaces() {
        let wallet = Pubkey::new_unique();
        let addresses = [
            provider_address(&wallet).0,
            user_address(&wallet).0,
            sol_vault_address(&wallet).0,
            stake_account_address(&wallet).0,
            user_subscription_address(&wallet, 0).0,
            subscription_service_address(&wallet, 0).0,
        ];
        for (i, a) in addresses.iter().enumerate() {
            for b in &addresses[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn counter_ids_are_little_endian() {
        let user = Pubkey::new_unique();
        assert_ne!(
            user_subscription_address(&user, 1),
            user_subscription_address(&user, 1 << 56)
        );
        let (address, bump) = user_subscription_address(&user, 1);
        let recreated = Pubkey::create_program_address(
            &[b"user_subscription", user.as_ref(), &[1, 0, 0, 0, 0, 0, 0, 0], &[bump]],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(address, recreated);
    }

    #[test]
    fn owners_do_not_share_addresses() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(
            subscription_service_address(&a, 0),
            subscription_service_address(&b, 0)
        );
    }
}
