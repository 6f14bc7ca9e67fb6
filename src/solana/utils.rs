use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

// Constants for conversion
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)
}

/// Convert SOL to lamports without going through floating point
pub fn sol_to_lamports(sol: Decimal) -> Result<u64> {
    if sol.is_sign_negative() {
        return Err(anyhow!("SOL amount must not be negative: {}", sol));
    }

    sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| anyhow!("SOL amount out of range: {}", sol))?
        .trunc()
        .to_u64()
        .ok_or_else(|| anyhow!("SOL amount out of range: {}", sol))
}

/// Scale a whole-token supply to base units, `None` on overflow.
pub fn scale_supply(supply: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|factor| supply.checked_mul(factor))
}
