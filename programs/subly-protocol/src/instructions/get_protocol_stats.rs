use crate::{pda, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct GetProtocolStats<'info> {
    /// CHECK: decoded and checked against its derivation by `load_account`
    pub global_state: UncheckedAccount<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ProtocolStatsInfo {
    pub authority: Pubkey,
    pub protocol_fee_bps: u16,
    pub is_paused: bool,
    pub tokens_required: bool,
    pub subscriber_caps_enforced: bool,
    pub total_providers: u64,
    pub total_users: u64,
    pub total_subscription_services: u64,
    pub total_active_subscriptions: u64,
}

impl From<&GlobalState> for ProtocolStatsInfo {
    fn from(state: &GlobalState) -> Self {
        Self {
            authority: state.authority,
            protocol_fee_bps: state.protocol_fee_bps,
            is_paused: state.is_paused,
            tokens_required: state.tokens_required,
            subscriber_caps_enforced: state.subscriber_caps_enforced,
            total_providers: state.total_providers,
            total_users: state.total_users,
            total_subscription_services: state.total_subscription_services,
            total_active_subscriptions: state.total_active_subscriptions,
        }
    }
}

impl<'info> GetProtocolStats<'info> {
    pub fn get_protocol_stats(&self) -> Result<ProtocolStatsInfo> {
        let (address, _) = pda::global_state_address();
        let global_state: GlobalState =
            load_account(&self.global_state.to_account_info(), &address)?;
        Ok(ProtocolStatsInfo::from(&global_state))
    }
}
