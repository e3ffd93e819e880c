use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct UserSubscription {
    pub version: u8,
    pub user: Pubkey,
    pub provider: Pubkey,
    pub service_id: u64,
    pub subscription_id: u64, // User's subscription ID
    pub subscribed_at: i64,
    pub reserved_lamports: u64, // part of the user's locked_sol held for this subscription
    pub last_payment_at: Option<i64>,
    pub next_payment_due: i64,
    pub total_payments_made: u64,
    pub certificate_mint: Option<Pubkey>,
    pub is_active: bool,
    pub unsubscribed_at: Option<i64>,
    pub bump: u8,
}

impl UserSubscription {
    pub fn is_payment_due(&self, now: i64) -> bool {
        self.is_active && now >= self.next_payment_due
    }

    /// Deactivates the subscription and returns the reserve to release.
    pub fn deactivate(&mut self, now: i64) -> Result<u64> {
        require!(self.is_active, ErrorCode::AlreadyInactive);
        let released = self.reserved_lamports;
        self.is_active = false;
        self.unsubscribed_at = Some(now);
        self.reserved_lamports = 0;
        Ok(released)
    }

    /// Books a settled charge. With `next_reserve == None` the subscription
    /// lapses at `now`.
    pub fn record_payment(
        &mut self,
        now: i64,
        billing_period_seconds: i64,
        next_reserve: Option<u64>,
    ) -> Result<()> {
        require!(self.is_payment_due(now), ErrorCode::PaymentNotDue);
        let total_payments_made = self
            .total_payments_made
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        let next_payment_due = self
            .next_payment_due
            .checked_add(billing_period_seconds)
            .ok_or(ErrorCode::Overflow)?;

        self.total_payments_made = total_payments_made;
        self.last_payment_at = Some(now);
        self.next_payment_due = next_payment_due;
        match next_reserve {
            Some(reserve) => self.reserved_lamports = reserve,
            None => {
                self.reserved_lamports = 0;
                self.is_active = false;
                self.unsubscribed_at = Some(now);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(reserved_lamports: u64, next_payment_due: i64) -> UserSubscription {
        UserSubscription {
            user: Pubkey::new_unique(),
            provider: Pubkey::new_unique(),
            reserved_lamports,
            next_payment_due,
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn unsubscribe_is_not_idempotent() {
        let mut subscription = active(500, 1_000);
        assert_eq!(subscription.deactivate(42).unwrap(), 500);
        assert!(!subscription.is_active);
        assert_eq!(subscription.unsubscribed_at, Some(42));

        assert_eq!(
            subscription.deactivate(43).unwrap_err(),
            ErrorCode::AlreadyInactive.into()
        );
        assert_eq!(subscription.unsubscribed_at, Some(42));
    }

    #[test]
    fn payment_advances_the_due_date() {
        let mut subscription = active(500, 1_000);
        assert_eq!(
            subscription.record_payment(999, 100, Some(500)).unwrap_err(),
            ErrorCode::PaymentNotDue.into()
        );

        subscription.record_payment(1_050, 100, Some(520)).unwrap();
        assert_eq!(subscription.next_payment_due, 1_100);
        assert_eq!(subscription.last_payment_at, Some(1_050));
        assert_eq!(subscription.total_payments_made, 1);
        assert_eq!(subscription.reserved_lamports, 520);
        assert!(subscription.is_active);
    }

    #[test]
    fn unfunded_renewal_lapses() {
        let mut subscription = active(500, 1_000);
        subscription.record_payment(1_000, 100, None).unwrap();
        assert!(!subscription.is_active);
        assert_eq!(subscription.reserved_lamports, 0);
        assert_eq!(subscription.unsubscribed_at, Some(1_000));
        assert!(!subscription.is_payment_due(5_000));
    }
}
