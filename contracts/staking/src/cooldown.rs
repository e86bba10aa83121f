use soroban_sdk::contracttype;

use crate::StakerRecord;

// ── Timers ──────────────────────────────────────────────────────────────────

pub const DAY: u64 = 86_400;

/// Delay after staking before any staker action is accepted.
pub const MATURATION_PERIOD: u64 = DAY;

/// Delay between starting and finalizing either kind of withdrawal.
pub const COOLDOWN_PERIOD: u64 = 7 * DAY;

/// Minimum age of a stake before its withdrawal may be started.
pub const LOCKUP_PERIOD: u64 = 30 * DAY;

// ── Phases ──────────────────────────────────────────────────────────────────

/// Where a staker sits in the withdrawal lifecycle.
///
/// Derived from the record on every read; nothing here is stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum StakerPhase {
    /// No record for this address.
    NonExistent = 0,
    /// Staked less than [`MATURATION_PERIOD`] ago.
    Pending = 1,
    Active = 2,
    RewardCooldown = 3,
    StakeCooldown = 4,
}

pub fn phase_of(record: Option<&StakerRecord>, now: u64) -> StakerPhase {
    match record {
        None => StakerPhase::NonExistent,
        Some(rec) if !is_matured(rec, now) => StakerPhase::Pending,
        Some(rec) if rec.end_time != 0 => StakerPhase::StakeCooldown,
        Some(rec) if rec.cooldown_time != 0 => StakerPhase::RewardCooldown,
        Some(_) => StakerPhase::Active,
    }
}

// ── Predicates ──────────────────────────────────────────────────────────────

#[must_use]
pub fn is_matured(record: &StakerRecord, now: u64) -> bool {
    now >= record.start_time.saturating_add(MATURATION_PERIOD)
}

#[must_use]
pub fn lockup_elapsed(record: &StakerRecord, now: u64) -> bool {
    now >= record.start_time.saturating_add(LOCKUP_PERIOD)
}

/// `true` once a cooldown started at `started_at` may be finalized.
/// A zero start time means no cooldown is running.
#[must_use]
pub fn cooldown_elapsed(started_at: u64, now: u64) -> bool {
    started_at != 0 && now.saturating_sub(started_at) >= COOLDOWN_PERIOD
}
