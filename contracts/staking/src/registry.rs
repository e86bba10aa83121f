use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::config::extend_instance_ttl;

// ── Storage keys ────────────────────────────────────────────────────────────

/// Per-staker persistent key prefix: `(STAKER, address)`.
const STAKER: Symbol = symbol_short!("STAKER");
const STAKER_COUNT: Symbol = symbol_short!("STK_CNT");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

const LEDGERS_PER_DAY: u32 = 17_280;
const TTL_THRESHOLD: u32 = 30 * LEDGERS_PER_DAY;
const TTL_EXTEND_TO: u32 = 60 * LEDGERS_PER_DAY;

// ── Types ───────────────────────────────────────────────────────────────────

/// Bookkeeping for a single staker. Exists from the first stake until the
/// stake is paid out, either by a finalized withdrawal or a forced settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerRecord {
    /// Ledger timestamp of the deposit.
    pub start_time: u64,
    /// Principal, fixed for the life of the record.
    pub amount: i128,
    /// Reward credited per whole elapsed day, fixed at stake time.
    pub daily_reward: i128,
    /// Settled reward not yet moved into a withdrawal cooldown.
    pub accumulated_reward: i128,
    /// Reward frozen by a running reward cooldown; zero otherwise.
    pub pending_reward: i128,
    /// Start of the running reward cooldown, or zero.
    pub cooldown_time: u64,
    /// Start of the running stake withdrawal, or zero.
    pub end_time: u64,
    /// Settled up to here; always `start_time` plus whole days.
    pub last_accrued: u64,
}

impl StakerRecord {
    pub fn new(start_time: u64, amount: i128, daily_reward: i128) -> Self {
        Self {
            start_time,
            amount,
            daily_reward,
            accumulated_reward: 0,
            pending_reward: 0,
            cooldown_time: 0,
            end_time: 0,
            last_accrued: start_time,
        }
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn staker_key(staker: &Address) -> (Symbol, Address) {
    (STAKER, staker.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn has_record(env: &Env, staker: &Address) -> bool {
    env.storage().persistent().has(&staker_key(staker))
}

pub fn get_record(env: &Env, staker: &Address) -> Option<StakerRecord> {
    let key = staker_key(staker);
    let record: Option<StakerRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        extend_ttl(env, &key);
    }
    record
}

/// Overwrite an existing record after a state transition.
pub fn store_record(env: &Env, staker: &Address, record: &StakerRecord) {
    let key = staker_key(staker);
    env.storage().persistent().set(&key, record);
    extend_ttl(env, &key);
}

/// Register a brand-new staker and bump the aggregate counters.
/// Callers must have checked `has_record` first.
pub fn insert_record(env: &Env, staker: &Address, record: &StakerRecord) {
    store_record(env, staker, record);

    let count = active_staker_count(env).saturating_add(1);
    env.storage().instance().set(&STAKER_COUNT, &count);

    let total = total_staked(env).saturating_add(record.amount);
    env.storage().instance().set(&TOTAL_STAKED, &total);
    extend_instance_ttl(env);
}

/// Delete a staker's record and release its share of the aggregates.
pub fn remove_record(env: &Env, staker: &Address, record: &StakerRecord) {
    env.storage().persistent().remove(&staker_key(staker));

    let count = active_staker_count(env).saturating_sub(1);
    env.storage().instance().set(&STAKER_COUNT, &count);

    let total = total_staked(env).saturating_sub(record.amount);
    env.storage().instance().set(&TOTAL_STAKED, &total);
    extend_instance_ttl(env);
}

pub fn active_staker_count(env: &Env) -> u32 {
    env.storage().instance().get(&STAKER_COUNT).unwrap_or(0)
}

/// Sum of the principal of every live record.
pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}
