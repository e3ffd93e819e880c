use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct SubscriptionService {
    pub version: u8,
    pub provider: Pubkey,
    pub service_id: u64,
    #[max_len(64)]
    pub name: String,
    #[max_len(200)]
    pub description: String,
    pub fee_usd: u64, // USD cents
    pub billing_frequency_days: u64,
    #[max_len(200)]
    pub image_url: String,
    pub max_subscribers: Option<u64>,
    pub current_subscribers: u64,
    pub is_active: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl SubscriptionService {
    pub fn exists(&self) -> bool {
        self.provider != Pubkey::default()
    }

    pub fn billing_period_seconds(&self) -> Result<i64> {
        let days = i64::try_from(self.billing_frequency_days).map_err(|_| ErrorCode::Overflow)?;
        Ok(days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(ErrorCode::Overflow)?)
    }

    /// Retires the service. The record is kept and existing subscriptions
    /// are unaffected.
    pub fn deactivate(&mut self) -> Result<()> {
        require!(self.is_active, ErrorCode::ServiceNotActive);
        self.is_active = false;
        Ok(())
    }

    pub fn add_subscriber(&mut self, enforce_cap: bool) -> Result<()> {
        require!(self.is_active, ErrorCode::ServiceNotActive);
        if let (true, Some(cap)) = (enforce_cap, self.max_subscribers) {
            require!(
                self.current_subscribers < cap,
                ErrorCode::SubscriberLimitReached
            );
        }
        self.current_subscribers = self
            .current_subscribers
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn remove_subscriber(&mut self) -> Result<()> {
        self.current_subscribers = self
            .current_subscribers
            .checked_sub(1)
            .ok_or(ErrorCode::Underflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(max_subscribers: Option<u64>) -> SubscriptionService {
        SubscriptionService {
            version: ACCOUNT_VERSION,
            provider: Pubkey::new_unique(),
            name: "A".to_string(),
            fee_usd: 1599,
            billing_frequency_days: 30,
            max_subscribers,
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn cap_applies_only_when_enforced() {
        let mut capped = service(Some(1));
        capped.add_subscriber(true).unwrap();
        assert_eq!(
            capped.add_subscriber(true).unwrap_err(),
            ErrorCode::SubscriberLimitReached.into()
        );
        assert_eq!(capped.current_subscribers, 1);

        capped.add_subscriber(false).unwrap();
        assert_eq!(capped.current_subscribers, 2);
    }

    #[test]
    fn inactive_service_takes_no_subscribers() {
        let mut retired = service(None);
        retired.deactivate().unwrap();
        assert_eq!(
            retired.deactivate().unwrap_err(),
            ErrorCode::ServiceNotActive.into()
        );
        assert_eq!(
            retired.add_subscriber(false).unwrap_err(),
            ErrorCode::ServiceNotActive.into()
        );
    }

    #[test]
    fn billing_period_in_seconds() {
        assert_eq!(service(None).billing_period_seconds().unwrap(), 30 * 86_400);

        let mut absurd = service(None);
        absurd.billing_frequency_days = u64::MAX;
        assert_eq!(
            absurd.billing_period_seconds().unwrap_err(),
            ErrorCode::Overflow.into()
        );
    }
}
