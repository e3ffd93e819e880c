use crate::error::ErrorCode;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Provider {
    pub version: u8,
    pub wallet: Pubkey,
    #[max_len(64)]
    pub name: String,
    #[max_len(200)]
    pub description: String,
    #[max_len(200)]
    pub website: String,
    pub service_count: u64, // next service id, never reused
    pub total_subscribers: u64,
    pub identity_mint: Option<Pubkey>,
    pub created_at: i64,
    pub bump: u8,
}

impl Provider {
    pub fn is_registered(&self) -> bool {
        self.wallet != Pubkey::default()
    }

    /// Hands out the next service id. `expected` is the id the client derived
    /// the service address from and must equal the live counter.
    pub fn claim_service_id(&mut self, expected: u64) -> Result<u64> {
        require!(expected == self.service_count, ErrorCode::StaleCounter);
        self.service_count = self
            .service_count
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(expected)
    }

    pub fn add_subscriber(&mut self) -> Result<()> {
        self.total_subscribers = self
            .total_subscribers
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn remove_subscriber(&mut self) -> Result<()> {
        self.total_subscribers = self
            .total_subscribers
            .checked_sub(1)
            .ok_or(ErrorCode::Underflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_ids_are_sequential_from_zero() {
        let mut provider = Provider {
            wallet: Pubkey::new_unique(),
            ..Default::default()
        };

        let ids: Vec<u64> = (0..4)
            .map(|id| provider.claim_service_id(id).unwrap())
            .collect();

        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(provider.service_count, 4);
    }

    #[test]
    fn stale_service_id_is_rejected_without_advancing() {
        let mut provider = Provider::default();
        provider.claim_service_id(0).unwrap();

        assert_eq!(
            provider.claim_service_id(0).unwrap_err(),
            ErrorCode::StaleCounter.into()
        );
        assert_eq!(
            provider.claim_service_id(5).unwrap_err(),
            ErrorCode::StaleCounter.into()
        );
        assert_eq!(provider.service_count, 1);
    }

    #[test]
    fn unregistered_provider_has_default_wallet() {
        assert!(!Provider::default().is_registered());
    }
}
