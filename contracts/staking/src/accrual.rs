//! Lazy per-record reward settlement.
//!
//! Rewards are never pushed to stakers on a schedule. Instead every action
//! that touches a record first calls [`settle`] with a comparison time, which
//! credits one `daily_reward` per whole day elapsed since `last_accrued`.
//! The sub-day remainder is carried over to the next settlement.

use crate::{cooldown::DAY, ContractError, StakerRecord};

/// `daily_rate` is a percentage with three decimals: 20 means 0.020 % per day.
pub const RATE_DENOMINATOR: i128 = 100_000;

/// Upper bound accepted for `daily_rate` (100 % per day).
pub const MAX_DAILY_RATE: u32 = 100_000;

/// Fixed reward per elapsed day for a stake of `amount` at `daily_rate`.
///
/// Multiplies before dividing so small stakes never truncate to zero unless
/// the product itself is below the denominator.
pub fn compute_daily_reward(amount: i128, daily_rate: u32) -> Result<i128, ContractError> {
    amount
        .checked_mul(i128::from(daily_rate))
        .map(|scaled| scaled / RATE_DENOMINATOR)
        .ok_or(ContractError::RewardOverflow)
}

/// Bring `record` up to date with `comparison_time`.
///
/// Returns the number of whole days credited. The record is left untouched
/// when fewer than one day has elapsed or when the reward would overflow.
pub fn settle(record: &mut StakerRecord, comparison_time: u64) -> Result<u64, ContractError> {
    let elapsed_days = comparison_time.saturating_sub(record.last_accrued) / DAY;
    if elapsed_days == 0 {
        return Ok(0);
    }

    let earned = record
        .daily_reward
        .checked_mul(i128::from(elapsed_days))
        .ok_or(ContractError::RewardOverflow)?;
    let accumulated = record
        .accumulated_reward
        .checked_add(earned)
        .ok_or(ContractError::RewardOverflow)?;

    record.accumulated_reward = accumulated;
    // elapsed_days * DAY never exceeds comparison_time - last_accrued.
    record.last_accrued += elapsed_days * DAY;

    Ok(elapsed_days)
}

/// Accumulated reward `record` would hold if settled at `comparison_time`.
pub fn project(record: &StakerRecord, comparison_time: u64) -> Result<i128, ContractError> {
    let mut preview = record.clone();
    settle(&mut preview, comparison_time)?;
    Ok(preview.accumulated_reward)
}
