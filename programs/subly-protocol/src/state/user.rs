use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct User {
    pub version: u8,
    pub wallet: Pubkey,
    pub deposited_sol: u64, // lamports
    pub locked_sol: u64,    // lamports reserved for active subscriptions
    pub staked_sol: u64,    // lamports staked for yield generation
    pub subscription_count: u64, // next subscription id, never reused
    pub created_at: i64,
    pub bump: u8,
}

impl User {
    pub fn is_registered(&self) -> bool {
        self.wallet != Pubkey::default()
    }

    /// Deposited lamports not reserved for subscriptions.
    pub fn available(&self) -> u64 {
        self.deposited_sol.saturating_sub(self.locked_sol)
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.deposited_sol = self
            .deposited_sol
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Removes unreserved lamports from the deposited balance.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.available(), ErrorCode::InsufficientBalance);
        self.deposited_sol = self
            .deposited_sol
            .checked_sub(amount)
            .ok_or(ErrorCode::Underflow)?;
        Ok(())
    }

    pub fn move_to_stake(&mut self, amount: u64) -> Result<()> {
        let staked_sol = self
            .staked_sol
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        self.debit(amount)?;
        self.staked_sol = staked_sol;
        Ok(())
    }

    /// Releases `principal` from the staked balance and credits the lamports
    /// the staking vault actually paid out.
    pub fn return_from_stake(&mut self, principal: u64, received: u64) -> Result<()> {
        let staked_sol = self
            .staked_sol
            .checked_sub(principal)
            .ok_or(ErrorCode::InsufficientBalance)?;
        let deposited_sol = self
            .deposited_sol
            .checked_add(received)
            .ok_or(ErrorCode::Overflow)?;
        self.staked_sol = staked_sol;
        self.deposited_sol = deposited_sol;
        Ok(())
    }

    pub fn reserve(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.available(), ErrorCode::InsufficientBalance);
        self.locked_sol = self
            .locked_sol
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn release(&mut self, amount: u64) -> Result<()> {
        self.locked_sol = self
            .locked_sol
            .checked_sub(amount)
            .ok_or(ErrorCode::Underflow)?;
        Ok(())
    }

    /// Hands out the next subscription id. `expected` must equal the live
    /// counter the client derived the subscription address from.
    pub fn claim_subscription_id(&mut self, expected: u64) -> Result<u64> {
        require!(expected == self.subscription_count, ErrorCode::StaleCounter);
        self.subscription_count = self
            .subscription_count
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(expected)
    }

    /// Pays `charge` out of the deposited balance for a subscription holding
    /// `reserved` lamports. The subscription's own reserve is spendable,
    /// other reserves are not. A charge the spendable balance cannot cover
    /// collects what is spendable and lapses the subscription.
    pub fn settle_charge(&mut self, reserved: u64, charge: u64) -> Result<Settlement> {
        let other_locked = self
            .locked_sol
            .checked_sub(reserved)
            .ok_or(ErrorCode::Underflow)?;
        let spendable = self
            .deposited_sol
            .checked_sub(other_locked)
            .ok_or(ErrorCode::Underflow)?;

        let paid = charge.min(spendable);
        let deposited_sol = self.deposited_sol - paid;
        let renewed = paid == charge && spendable - paid >= charge;
        let locked_sol = if renewed {
            other_locked.checked_add(charge).ok_or(ErrorCode::Overflow)?
        } else {
            other_locked
        };

        self.deposited_sol = deposited_sol;
        self.locked_sol = locked_sol;
        Ok(Settlement {
            paid,
            next_reserve: renewed.then_some(charge),
        })
    }
}

/// Outcome of a billing charge against a user's balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub paid: u64,
    /// Reserve held for the next period, `None` when the subscription lapses
    pub next_reserve: Option<u64>,
}
