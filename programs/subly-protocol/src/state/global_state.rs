use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct GlobalState {
    pub version: u8,
    pub authority: Pubkey,
    pub protocol_fee_bps: u16, // Basis points (100 = 1%)
    pub is_paused: bool,
    // Capability flags
    pub tokens_required: bool, // identity and certificate tokens must be minted
    pub subscriber_caps_enforced: bool,
    // Aggregate counters
    pub total_providers: u64,
    pub total_users: u64,
    pub total_subscription_services: u64,
    pub total_active_subscriptions: u64,
    // Jito configuration - can be changed for different networks
    pub jito_stake_pool: Pubkey,
    pub jito_sol_mint: Pubkey,
    pub spl_stake_pool_program: Pubkey,
    // Pyth SOL/USD price feed account
    pub sol_usd_price_feed: Pubkey,
    pub bump: u8,
}

impl GlobalState {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn ensure_uninitialized(&self) -> Result<()> {
        require!(!self.is_initialized(), ErrorCode::AlreadyInitialized);
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, ErrorCode::ProtocolPaused);
        Ok(())
    }

    /// The one configuration change accepted while paused.
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn set_capabilities(
        &mut self,
        tokens_required: bool,
        subscriber_caps_enforced: bool,
    ) -> Result<()> {
        self.ensure_not_paused()?;
        self.tokens_required = tokens_required;
        self.subscriber_caps_enforced = subscriber_caps_enforced;
        Ok(())
    }

    pub fn record_provider(&mut self) -> Result<()> {
        self.total_providers = increment(self.total_providers)?;
        Ok(())
    }

    pub fn record_user(&mut self) -> Result<()> {
        self.total_users = increment(self.total_users)?;
        Ok(())
    }

    pub fn record_subscription_service(&mut self) -> Result<()> {
        self.total_subscription_services = increment(self.total_subscription_services)?;
        Ok(())
    }

    pub fn record_subscription_opened(&mut self) -> Result<()> {
        self.total_active_subscriptions = increment(self.total_active_subscriptions)?;
        Ok(())
    }

    pub fn record_subscription_closed(&mut self) -> Result<()> {
        self.total_active_subscriptions = self
            .total_active_subscriptions
            .checked_sub(1)
            .ok_or(ErrorCode::Underflow)?;
        Ok(())
    }

    pub fn set_protocol_fee(&mut self, protocol_fee_bps: u16) -> Result<()> {
        self.ensure_not_paused()?;
        require!(
            protocol_fee_bps <= MAX_PROTOCOL_FEE_BPS,
            ErrorCode::InvalidProtocolFee
        );
        self.protocol_fee_bps = protocol_fee_bps;
        Ok(())
    }

    /// Protocol share of `amount`, rounded down.
    pub fn protocol_fee_for(&self, amount: u64) -> Result<u64> {
        let fee = (amount as u128)
            .checked_mul(self.protocol_fee_bps as u128)
            .ok_or(ErrorCode::Overflow)?
            / BPS_DENOMINATOR as u128;

        Ok(u64::try_from(fee).map_err(|_| ErrorCode::Overflow)?)
    }
}

fn increment(counter: u64) -> Result<u64> {
    Ok(counter.checked_add(1).ok_or(ErrorCode::Overflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_state() -> GlobalState {
        GlobalState {
            version: ACCOUNT_VERSION,
            authority: Pubkey::new_unique(),
            protocol_fee_bps: DEFAULT_PROTOCOL_FEE_BPS,
            ..Default::default()
        }
    }

    #[test]
    fn paused_state_rejects_mutations() {
        let mut state = live_state();
        assert!(state.ensure_not_paused().is_ok());

        state.is_paused = true;
        assert_eq!(
            state.ensure_not_paused().unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
    }

    #[test]
    fn second_initialize_is_rejected() {
        assert!(GlobalState::default().ensure_uninitialized().is_ok());
        assert_eq!(
            live_state().ensure_uninitialized().unwrap_err(),
            ErrorCode::AlreadyInitialized.into()
        );
    }

    #[test]
    fn pause_blocks_configuration_but_not_unpausing() {
        let mut state = live_state();
        state.set_paused(true);
        assert_eq!(
            state.set_protocol_fee(50).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
        assert_eq!(
            state.set_capabilities(false, false).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );
        assert_eq!(state.protocol_fee_bps, DEFAULT_PROTOCOL_FEE_BPS);

        state.set_paused(false);
        state.set_capabilities(false, true).unwrap();
        assert!(!state.tokens_required);
        assert!(state.subscriber_caps_enforced);
    }

    #[test]
    fn closing_without_open_subscription_underflows() {
        let mut state = live_state();
        assert_eq!(
            state.record_subscription_closed().unwrap_err(),
            ErrorCode::Underflow.into()
        );
        assert_eq!(state.total_active_subscriptions, 0);

        state.record_subscription_opened().unwrap();
        state.record_subscription_opened().unwrap();
        state.record_subscription_closed().unwrap();
        assert_eq!(state.total_active_subscriptions, 1);
    }

    #[test]
    fn counters_trap_on_overflow() {
        let mut state = live_state();
        state.total_providers = u64::MAX;
        assert_eq!(
            state.record_provider().unwrap_err(),
            ErrorCode::Overflow.into()
        );
        assert_eq!(state.total_providers, u64::MAX);
    }

    #[test]
    fn protocol_fee_is_bounded() {
        let mut state = live_state();
        state.set_protocol_fee(MAX_PROTOCOL_FEE_BPS).unwrap();
        assert_eq!(
            state.set_protocol_fee(MAX_PROTOCOL_FEE_BPS + 1).unwrap_err(),
            ErrorCode::InvalidProtocolFee.into()
        );
        assert_eq!(state.protocol_fee_bps, MAX_PROTOCOL_FEE_BPS);
    }

    #[test]
    fn protocol_fee_rounds_down() {
        let state = live_state(); // 1%
        assert_eq!(state.protocol_fee_for(1_000_000_000).unwrap(), 10_000_000);
        assert_eq!(state.protocol_fee_for(99).unwrap(), 0);
        assert!(state.protocol_fee_for(u64::MAX).is_ok());
    }
}
