use crate::{
    constants::*,
    error::ErrorCode,
    events::{CapabilitiesUpdated, ProtocolFeeUpdated, ProtocolPauseSet},
    state::*,
};
use anchor_lang::prelude::*;

/// Accounts shared by the authority-only configuration instructions.
#[derive(Accounts)]
pub struct UpdateGlobalState<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED.as_bytes()],
        bump = global_state.bump,
        has_one = authority @ ErrorCode::UnauthorizedAuthority
    )]
    pub global_state: Account<'info, GlobalState>,
}

impl<'info> UpdateGlobalState<'info> {
    /// Pausing and unpausing is the one mutation allowed while paused.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.global_state.set_paused(paused);

        msg!(
            "Protocol {} by authority {}",
            if paused { "paused" } else { "unpaused" },
            self.authority.key()
        );
        emit!(ProtocolPauseSet {
            authority: self.authority.key(),
            paused,
            slot: Clock::get()?.slot,
        });

        Ok(())
    }

    pub fn update_protocol_fee(&mut self, protocol_fee_bps: u16) -> Result<()> {
        self.global_state.set_protocol_fee(protocol_fee_bps)?;

        msg!(
            "Protocol fee set to {} bps ({:.2}%)",
            protocol_fee_bps,
            protocol_fee_bps as f64 / 100.0
        );
        emit!(ProtocolFeeUpdated {
            authority: self.authority.key(),
            protocol_fee_bps,
        });

        Ok(())
    }

    pub fn set_capabilities(
        &mut self,
        tokens_required: bool,
        subscriber_caps_enforced: bool,
    ) -> Result<()> {
        self.global_state
            .set_capabilities(tokens_required, subscriber_caps_enforced)?;

        msg!(
            "Capabilities updated: tokens_required={}, subscriber_caps_enforced={}",
            tokens_required,
            subscriber_caps_enforced
        );
        emit!(CapabilitiesUpdated {
            authority: self.authority.key(),
            tokens_required,
            subscriber_caps_enforced,
        });

        Ok(())
    }
}
