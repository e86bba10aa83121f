use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{accrual::MAX_DAILY_RATE, ContractError};

// ── Storage key constants ───────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const DEACTIVATED_AT: Symbol = symbol_short!("DEACT_AT");

const LEDGERS_PER_DAY: u32 = 17_280;
const TTL_THRESHOLD: u32 = 30 * LEDGERS_PER_DAY;
const TTL_EXTEND_TO: u32 = 60 * LEDGERS_PER_DAY;

// ── Types ───────────────────────────────────────────────────────────────────

/// Pool-wide settings chosen at `initialize` and adjustable by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// SAC address of the staked (and rewarded) asset.
    pub token: Address,
    /// Smallest accepted deposit, inclusive.
    pub min_stake: i128,
    /// Largest accepted deposit, inclusive.
    pub max_stake: i128,
    /// Daily reward as a percentage with three decimals (20 = 0.020 %).
    pub daily_rate: u32,
}

// ── Validation ──────────────────────────────────────────────────────────────

pub fn validate_bounds(min_stake: i128, max_stake: i128) -> Result<(), ContractError> {
    if min_stake <= 0 || min_stake > max_stake {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_rate(daily_rate: u32) -> Result<(), ContractError> {
    if daily_rate > MAX_DAILY_RATE {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

// ── Storage helpers ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

/// Keep the instance entry (config, admin, counters, shutdown flag) live.
/// Every writer of instance storage calls this.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn save_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn get_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn set_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

// ── Deactivation ────────────────────────────────────────────────────────────

/// Timestamp at which the pool was shut down, if it has been.
///
/// Presence of the key is what marks the pool inactive, so a shutdown at
/// ledger time zero is still recorded.
pub fn deactivated_at(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DEACTIVATED_AT)
}

pub fn is_deactivated(env: &Env) -> bool {
    env.storage().instance().has(&DEACTIVATED_AT)
}

/// One-way switch. Callers must reject a second shutdown beforehand.
pub fn mark_deactivated(env: &Env, at: u64) {
    env.storage().instance().set(&DEACTIVATED_AT, &at);
    extend_instance_ttl(env);
}

/// Latest time rewards may be settled up to: `now`, capped at the shutdown.
pub fn accrual_horizon(env: &Env, now: u64) -> u64 {
    match deactivated_at(env) {
        Some(at) => now.min(at),
        None => now,
    }
}
