use crate::{pda, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct GetUserBalance<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub user_account: UncheckedAccount<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct UserBalanceInfo {
    pub wallet: Pubkey,
    pub deposited_sol: u64,
    pub locked_sol: u64,
    pub available_sol: u64,
    pub staked_sol: u64,
    pub subscription_count: u64,
}

impl From<&User> for UserBalanceInfo {
    fn from(user: &User) -> Self {
        Self {
            wallet: user.wallet,
            deposited_sol: user.deposited_sol,
            locked_sol: user.locked_sol,
            available_sol: user.available(),
            staked_sol: user.staked_sol,
            subscription_count: user.subscription_count,
        }
    }
}

impl<'info> GetUserBalance<'info> {
    pub fn get_user_balance(&self, user: Pubkey) -> Result<UserBalanceInfo> {
        let (address, _) = pda::user_address(&user);
        let user_account: User = load_account(&self.user_account.to_account_info(), &address)?;
        Ok(UserBalanceInfo::from(&user_account))
    }
}
