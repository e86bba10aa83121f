#![allow(deprecated)] // events().publish, pending the #[contractevent] migration

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub daily_rate: u32,
    pub min_stake: i128,
    pub max_stake: i128,
    pub timestamp: u64,
}

/// Fired when a new staker deposits.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub daily_reward: i128,
    pub active_stakers: u32,
    pub timestamp: u64,
}

/// Fired when accrued reward is frozen into a reward cooldown.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWithdrawalStartedEvent {
    pub staker: Address,
    pub pending_reward: i128,
    pub release_at: u64,
    pub timestamp: u64,
}

/// Fired when a reward cooldown is finalized and paid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardWithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a staker starts unlocking their principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawalStartedEvent {
    pub staker: Address,
    pub accumulated_reward: i128,
    pub release_at: u64,
    pub after_shutdown: bool,
    pub timestamp: u64,
}

/// Fired when principal plus reward leaves the pool and the record is removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub active_stakers: u32,
    pub timestamp: u64,
}

/// Fired when the admin shuts the pool down.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeactivatedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when the admin pays out a staker, bypassing cooldowns.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForceSettledEvent {
    pub admin: Address,
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the rate applied to future stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DailyRateSetEvent {
    pub new_rate: u32,
    pub timestamp: u64,
}

/// Fired when the admin changes the accepted deposit range.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeBoundsSetEvent {
    pub min_stake: i128,
    pub max_stake: i128,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when the proposed admin accepts.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    daily_rate: u32,
    min_stake: i128,
    max_stake: i128,
) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        token,
        daily_rate,
        min_stake,
        max_stake,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    daily_reward: i128,
    active_stakers: u32,
) {
    let topics = (symbol_short!("STAKED"), staker.clone());
    let data = StakedEvent {
        staker,
        amount,
        daily_reward,
        active_stakers,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_reward_withdrawal_started(
    env: &Env,
    staker: Address,
    pending_reward: i128,
    release_at: u64,
) {
    let topics = (symbol_short!("RWD_REQ"), staker.clone());
    let data = RewardWithdrawalStartedEvent {
        staker,
        pending_reward,
        release_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_reward_withdrawn(env: &Env, staker: Address, amount: i128) {
    let topics = (symbol_short!("RWD_PAID"), staker.clone());
    let data = RewardWithdrawnEvent {
        staker,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_stake_withdrawal_started(
    env: &Env,
    staker: Address,
    accumulated_reward: i128,
    release_at: u64,
    after_shutdown: bool,
) {
    let topics = (symbol_short!("UNSTK_REQ"), staker.clone());
    let data = StakeWithdrawalStartedEvent {
        staker,
        accumulated_reward,
        release_at,
        after_shutdown,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_stake_withdrawn(
    env: &Env,
    staker: Address,
    principal: i128,
    reward: i128,
    active_stakers: u32,
) {
    let topics = (symbol_short!("UNSTK_PD"), staker.clone());
    let data = StakeWithdrawnEvent {
        staker,
        principal,
        reward,
        active_stakers,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_deactivated(env: &Env, admin: Address) {
    let topics = (symbol_short!("DEACT"),);
    let data = DeactivatedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_force_settled(
    env: &Env,
    admin: Address,
    staker: Address,
    principal: i128,
    reward: i128,
) {
    let topics = (symbol_short!("FORCED"), staker.clone());
    let data = ForceSettledEvent {
        admin,
        staker,
        principal,
        reward,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_daily_rate_set(env: &Env, new_rate: u32) {
    let topics = (symbol_short!("RATE_SET"),);
    let data = DailyRateSetEvent {
        new_rate,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_stake_bounds_set(env: &Env, min_stake: i128, max_stake: i128) {
    let topics = (symbol_short!("BOUNDS"),);
    let data = StakeBoundsSetEvent {
        min_stake,
        max_stake,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_transfer_proposed(
    env: &Env,
    current_admin: Address,
    proposed_admin: Address,
) {
    let topics = (symbol_short!("ADM_PROP"),);
    let data = AdminTransferProposedEvent {
        current_admin,
        proposed_admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    let topics = (symbol_short!("ADM_ACC"),);
    let data = AdminTransferAcceptedEvent {
        old_admin,
        new_admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_admin: Address) {
    let topics = (symbol_short!("ADM_CNCL"),);
    let data = AdminTransferCancelledEvent {
        admin,
        cancelled_admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
