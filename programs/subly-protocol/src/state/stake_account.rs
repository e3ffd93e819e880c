use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct StakeAccount {
    pub version: u8,
    pub user: Pubkey,
    pub staked_amount: u64,        // principal in lamports
    pub derived_token_amount: u64, // JitoSOL held for this user
    pub stake_date: i64,
    pub last_update: i64,
    pub is_active: bool,
    pub bump: u8,
}

impl StakeAccount {
    pub fn record_stake(&mut self, lamports: u64, derived_tokens: u64, now: i64) -> Result<()> {
        let staked_amount = self
            .staked_amount
            .checked_add(lamports)
            .ok_or(ErrorCode::Overflow)?;
        let derived_token_amount = self
            .derived_token_amount
            .checked_add(derived_tokens)
            .ok_or(ErrorCode::Overflow)?;

        if !self.is_active {
            self.stake_date = now;
        }
        self.staked_amount = staked_amount;
        self.derived_token_amount = derived_token_amount;
        self.last_update = now;
        self.is_active = true;
        Ok(())
    }

    /// Principal attributable to `derived_tokens`, pro rata, rounded down.
    /// Redeeming the whole position releases the whole principal.
    pub fn principal_for(&self, derived_tokens: u64) -> Result<u64> {
        require!(self.is_active, ErrorCode::StakingNotAvailable);
        require!(
            derived_tokens > 0 && derived_tokens <= self.derived_token_amount,
            ErrorCode::InsufficientStakedFunds
        );
        if derived_tokens == self.derived_token_amount {
            return Ok(self.staked_amount);
        }

        let principal = (self.staked_amount as u128)
            .checked_mul(derived_tokens as u128)
            .ok_or(ErrorCode::Overflow)?
            / self.derived_token_amount as u128;

        Ok(u64::try_from(principal).map_err(|_| ErrorCode::Overflow)?)
    }

    pub fn record_unstake(&mut self, derived_tokens: u64, principal: u64, now: i64) -> Result<()> {
        let derived_token_amount = self
            .derived_token_amount
            .checked_sub(derived_tokens)
            .ok_or(ErrorCode::InsufficientStakedFunds)?;
        let staked_amount = self
            .staked_amount
            .checked_sub(principal)
            .ok_or(ErrorCode::InsufficientStakedFunds)?;

        self.derived_token_amount = derived_token_amount;
        self.staked_amount = staked_amount;
        self.last_update = now;
        if derived_token_amount == 0 {
            self.is_active = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stakes_accumulate() {
        let mut stake = StakeAccount::default();
        stake.record_stake(2_000_000_000, 1_960_000_000, 100).unwrap();
        stake.record_stake(1_000_000_000, 980_000_000, 200).unwrap();

        assert!(stake.is_active);
        assert_eq!(stake.stake_date, 100);
        assert_eq!(stake.last_update, 200);
        assert_eq!(stake.staked_amount, 3_000_000_000);
        assert_eq!(stake.derived_token_amount, 2_940_000_000);
    }

    #[test]
    fn partial_and_full_redemption() {
        let mut stake = StakeAccount::default();
        stake.record_stake(1_000, 900, 0).unwrap();

        let principal = stake.principal_for(300).unwrap();
        assert_eq!(principal, 333);
        stake.record_unstake(300, principal, 10).unwrap();
        assert!(stake.is_active);

        let rest = stake.principal_for(600).unwrap();
        assert_eq!(rest, 667);
        stake.record_unstake(600, rest, 20).unwrap();
        assert!(!stake.is_active);
        assert_eq!(stake.staked_amount, 0);
    }

    #[test]
    fn cannot_redeem_more_than_held() {
        let mut stake = StakeAccount::default();
        stake.record_stake(1_000, 900, 0).unwrap();
        assert_eq!(
            stake.principal_for(901).unwrap_err(),
            ErrorCode::InsufficientStakedFunds.into()
        );
        assert_eq!(
            stake.principal_for(0).unwrap_err(),
            ErrorCode::InsufficientStakedFunds.into()
        );
    }

    #[test]
    fn inactive_stake_cannot_be_redeemed() {
        assert_eq!(
            StakeAccount::default().principal_for(1).unwrap_err(),
            ErrorCode::StakingNotAvailable.into()
        );
    }
}
