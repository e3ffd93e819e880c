use crate::{constants::*, error::ErrorCode};
use anchor_lang::prelude::*;
use pyth_sdk_solana::state::SolanaPriceAccount;

/// Reads the SOL/USD price in USD cents from a Pyth price account.
pub fn sol_usd_price_cents(price_feed_account: &AccountInfo, now: i64) -> Result<u64> {
    let price_feed = SolanaPriceAccount::account_info_to_feed(price_feed_account)
        .map_err(|_| ErrorCode::InvalidPriceFeed)?;

    let price = price_feed
        .get_price_no_older_than(now, MAX_PRICE_AGE_SECONDS)
        .ok_or(ErrorCode::PriceNotAvailable)?;

    msg!(
        "Pyth price data: price={}, conf={}, expo={}, timestamp={}",
        price.price,
        price.conf,
        price.expo,
        price.publish_time
    );

    price_to_cents(price.price, price.expo)
}

/// Scales a Pyth `price * 10^expo` quote to cents and checks it is sane.
pub fn price_to_cents(price: i64, expo: i32) -> Result<u64> {
    require!(price > 0, ErrorCode::InvalidPrice);
    let price = price as u64;

    let price_cents = if expo >= 0 {
        10_u64
            .checked_pow(expo as u32)
            .and_then(|scale| price.checked_mul(scale))
            .and_then(|usd| usd.checked_mul(100))
            .ok_or(ErrorCode::Overflow)?
    } else {
        let divisor = 10_u64
            .checked_pow(expo.unsigned_abs())
            .ok_or(ErrorCode::InvalidPrice)?;
        price.checked_mul(100).ok_or(ErrorCode::Overflow)? / divisor
    };

    require!(
        (MIN_SOL_PRICE_CENTS..=MAX_SOL_PRICE_CENTS).contains(&price_cents),
        ErrorCode::InvalidPrice
    );

    Ok(price_cents)
}

/// Lamports worth `usd_cents` at `sol_usd_cents` per SOL, rounded up so a
/// reserve never falls short of the fee.
pub fn usd_cents_to_lamports(usd_cents: u64, sol_usd_cents: u64) -> Result<u64> {
    require!(sol_usd_cents > 0, ErrorCode::InvalidPrice);
    let numerator = (usd_cents as u128)
        .checked_mul(LAMPORTS_PER_SOL as u128)
        .ok_or(ErrorCode::Overflow)?;
    let lamports = numerator.div_ceil(sol_usd_cents as u128);

    Ok(u64::try_from(lamports).map_err(|_| ErrorCode::Overflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_negative_exponent() {
        // $150.12345678 with expo -8
        assert_eq!(price_to_cents(15_012_345_678, -8).unwrap(), 15_012);
    }

    #[test]
    fn scales_positive_exponent() {
        assert_eq!(price_to_cents(15, 1).unwrap(), 15_000);
    }

    #[test]
    fn rejects_out_of_range_prices() {
        assert_eq!(
            price_to_cents(0, -8).unwrap_err(),
            ErrorCode::InvalidPrice.into()
        );
        assert_eq!(
            price_to_cents(-5, -8).unwrap_err(),
            ErrorCode::InvalidPrice.into()
        );
        // $5 and $5000
        assert_eq!(
            price_to_cents(500_000_000, -8).unwrap_err(),
            ErrorCode::InvalidPrice.into()
        );
        assert_eq!(
            price_to_cents(500_000_000_000, -8).unwrap_err(),
            ErrorCode::InvalidPrice.into()
        );
    }

    #[test]
    fn converts_fee_to_lamports() {
        // $15.99 at $159.90/SOL is 0.1 SOL
        assert_eq!(usd_cents_to_lamports(1599, 15_990).unwrap(), 100_000_000);
        // rounds up
        assert_eq!(usd_cents_to_lamports(1, 30_000).unwrap(), 33_334);
    }

    #[test]
    fn conversion_overflow_is_trapped() {
        assert_eq!(
            usd_cents_to_lamports(u64::MAX, 1_000).unwrap_err(),
            ErrorCode::Overflow.into()
        );
    }
}
