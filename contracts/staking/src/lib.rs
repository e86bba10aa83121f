#![no_std]

pub mod accrual;
pub mod config;
pub mod cooldown;
pub mod events;
pub mod registry;
pub mod vault;

use soroban_sdk::{contract, contractimpl, Address, Env};

pub use config::StakingConfig;
pub use cooldown::{StakerPhase, COOLDOWN_PERIOD, DAY, LOCKUP_PERIOD, MATURATION_PERIOD};
pub use registry::StakerRecord;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,

    AlreadyStaking = 10,
    OutOfBounds = 11,
    SystemInactive = 12,
    SystemActive = 13,
    /// Unknown staker, or staked less than a day ago.
    NotActive = 14,
    UnknownStaker = 15,

    CooldownAlreadyRunning = 20,
    StakeWithdrawalInProgress = 21,
    RewardCooldownRunning = 22,
    LockupNotElapsed = 23,
    EndAlreadySet = 24,
    NoCooldownRunning = 25,
    NoWithdrawalStarted = 26,

    TransferFailed = 30,
    RewardOverflow = 31,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LockedStakingContract;

#[contractimpl]
impl LockedStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `token`      – SAC address of the asset that is staked and paid out.
    /// * `daily_rate` – reward per day as a percentage with three decimals.
    /// * `min_stake`, `max_stake` – inclusive deposit range.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        daily_rate: u32,
        min_stake: i128,
        max_stake: i128,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config::validate_bounds(min_stake, max_stake)?;
        config::validate_rate(daily_rate)?;

        config::set_admin(&env, &admin);
        config::save_config(
            &env,
            &StakingConfig {
                token: token.clone(),
                min_stake,
                max_stake,
                daily_rate,
            },
        );

        events::publish_initialized(&env, admin, token, daily_rate, min_stake, max_stake);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` and open a staker record.
    ///
    /// The daily reward is fixed here from the current rate and never
    /// recomputed, so later rate changes only affect new stakers.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = config::load_config(&env)?;
        staker.require_auth();

        if config::is_deactivated(&env) {
            return Err(ContractError::SystemInactive);
        }
        if registry::has_record(&env, &staker) {
            return Err(ContractError::AlreadyStaking);
        }
        if amount < config.min_stake || amount > config.max_stake {
            return Err(ContractError::OutOfBounds);
        }

        let now = env.ledger().timestamp();
        let daily_reward = accrual::compute_daily_reward(amount, config.daily_rate)?;

        vault::transfer_in(&env, &config.token, &staker, amount)?;

        let record = StakerRecord::new(now, amount, daily_reward);
        registry::insert_record(&env, &staker, &record);

        events::publish_staked(
            &env,
            staker,
            amount,
            daily_reward,
            registry::active_staker_count(&env),
        );

        Ok(())
    }

    // ── Reward withdrawal ───────────────────────────────────────────────────

    /// Freeze everything accrued so far into a reward cooldown.
    ///
    /// Returns the frozen amount, releasable by `finalize_reward_withdrawal`
    /// once [`COOLDOWN_PERIOD`] has passed.
    pub fn start_reward_withdrawal(env: Env, staker: Address) -> Result<i128, ContractError> {
        config::load_config(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut record = Self::load_matured_record(&env, &staker, now)?;

        if config::is_deactivated(&env) {
            return Err(ContractError::SystemInactive);
        }
        if record.cooldown_time != 0 {
            return Err(ContractError::CooldownAlreadyRunning);
        }
        if record.end_time != 0 {
            return Err(ContractError::StakeWithdrawalInProgress);
        }

        accrual::settle(&mut record, now)?;
        record.cooldown_time = now;
        record.pending_reward = record.accumulated_reward;
        record.accumulated_reward = 0;
        registry::store_record(&env, &staker, &record);

        events::publish_reward_withdrawal_started(
            &env,
            staker,
            record.pending_reward,
            now.saturating_add(COOLDOWN_PERIOD),
        );

        Ok(record.pending_reward)
    }

    /// Pay out the reward frozen by `start_reward_withdrawal`.
    ///
    /// Calling this before the cooldown has elapsed is not an error: nothing
    /// changes and `0` is returned, so the caller can simply retry later.
    pub fn finalize_reward_withdrawal(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = config::load_config(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut record = Self::load_matured_record(&env, &staker, now)?;

        if record.cooldown_time == 0 {
            return Err(ContractError::NoCooldownRunning);
        }
        if !cooldown::cooldown_elapsed(record.cooldown_time, now) {
            return Ok(0);
        }

        let payout = record.pending_reward;
        vault::transfer_out(&env, &config.token, &staker, payout)?;

        record.cooldown_time = 0;
        record.pending_reward = 0;
        registry::store_record(&env, &staker, &record);

        events::publish_reward_withdrawn(&env, staker, payout);

        Ok(payout)
    }

    // ── Stake withdrawal ────────────────────────────────────────────────────

    /// Start unlocking principal while the pool is active.
    ///
    /// Accrual stops at this point; the record is paid out by
    /// `finalize_stake_withdrawal`. Returns the earliest release time.
    pub fn start_stake_withdrawal(env: Env, staker: Address) -> Result<u64, ContractError> {
        config::load_config(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let record = Self::load_matured_record(&env, &staker, now)?;

        if config::is_deactivated(&env) {
            return Err(ContractError::SystemInactive);
        }

        Self::begin_stake_withdrawal(&env, staker, record, now, now, false)
    }

    /// Start unlocking principal after the pool has been deactivated.
    ///
    /// Same preconditions as `start_stake_withdrawal`, but rewards are only
    /// settled up to the deactivation time.
    pub fn start_shutdown_withdrawal(env: Env, staker: Address) -> Result<u64, ContractError> {
        config::load_config(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let record = Self::load_matured_record(&env, &staker, now)?;

        let deactivated_at = config::deactivated_at(&env).ok_or(ContractError::SystemActive)?;

        Self::begin_stake_withdrawal(&env, staker, record, now, deactivated_at, true)
    }

    /// Pay out principal plus settled reward and remove the record.
    ///
    /// Like reward finalization, an early call is a no-op returning `0`.
    pub fn finalize_stake_withdrawal(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = config::load_config(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let record = Self::load_matured_record(&env, &staker, now)?;

        if record.end_time == 0 {
            return Err(ContractError::NoWithdrawalStarted);
        }
        if !cooldown::cooldown_elapsed(record.end_time, now) {
            return Ok(0);
        }

        let payout = record
            .amount
            .checked_add(record.accumulated_reward)
            .ok_or(ContractError::RewardOverflow)?;
        vault::transfer_out(&env, &config.token, &staker, payout)?;

        registry::remove_record(&env, &staker, &record);

        events::publish_stake_withdrawn(
            &env,
            staker,
            record.amount,
            record.accumulated_reward,
            registry::active_staker_count(&env),
        );

        Ok(payout)
    }

    // ── Administrative override ─────────────────────────────────────────────

    /// Shut the pool down for good.
    ///
    /// New deposits and reward withdrawals are refused from here on, and no
    /// reward accrues past this timestamp.
    pub fn deactivate(env: Env, admin: Address) -> Result<(), ContractError> {
        config::load_config(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        if config::is_deactivated(&env) {
            return Err(ContractError::SystemInactive);
        }

        config::mark_deactivated(&env, env.ledger().timestamp());

        events::publish_deactivated(&env, admin);

        Ok(())
    }

    /// Pay a staker out immediately, ignoring every cooldown.
    ///
    /// Any reward frozen in a reward cooldown is folded back in, so the
    /// payout is principal plus all settled reward. Returns the payout.
    pub fn force_settle(env: Env, admin: Address, staker: Address) -> Result<i128, ContractError> {
        let config = config::load_config(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let mut record =
            registry::get_record(&env, &staker).ok_or(ContractError::UnknownStaker)?;

        let horizon = Self::settlement_horizon(&env, &record);
        accrual::settle(&mut record, horizon)?;

        let reward = record
            .accumulated_reward
            .checked_add(record.pending_reward)
            .ok_or(ContractError::RewardOverflow)?;
        let payout = record
            .amount
            .checked_add(reward)
            .ok_or(ContractError::RewardOverflow)?;

        vault::transfer_out(&env, &config.token, &staker, payout)?;

        registry::remove_record(&env, &staker, &record);

        events::publish_force_settled(&env, admin, staker, record.amount, reward);

        Ok(payout)
    }

    // ── Configuration ───────────────────────────────────────────────────────

    /// Change the rate used for stakes opened from now on.
    pub fn set_daily_rate(env: Env, admin: Address, new_rate: u32) -> Result<(), ContractError> {
        let mut config = config::load_config(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        config::validate_rate(new_rate)?;

        config.daily_rate = new_rate;
        config::save_config(&env, &config);

        events::publish_daily_rate_set(&env, new_rate);

        Ok(())
    }

    /// Change the inclusive deposit range. Existing records are unaffected.
    pub fn set_stake_bounds(
        env: Env,
        admin: Address,
        min_stake: i128,
        max_stake: i128,
    ) -> Result<(), ContractError> {
        let mut config = config::load_config(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        config::validate_bounds(min_stake, max_stake)?;

        config.min_stake = min_stake;
        config.max_stake = max_stake;
        config::save_config(&env, &config);

        events::publish_stake_bounds_set(&env, min_stake, max_stake);

        Ok(())
    }

    // ── Admin transfer (two-step) ───────────────────────────────────────────

    /// Propose a new admin. Takes effect once the proposed address accepts.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        config::load_config(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        config::set_pending_admin(&env, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        config::load_config(&env)?;
        new_admin.require_auth();

        let pending = config::get_pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = config::get_admin(&env)?;
        config::set_admin(&env, &new_admin);
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        config::load_config(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending = config::get_pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        config::get_pending_admin(&env)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Full record of a live staker.
    pub fn get_staker(env: Env, staker: Address) -> Result<StakerRecord, ContractError> {
        registry::get_record(&env, &staker).ok_or(ContractError::UnknownStaker)
    }

    pub fn is_staking(env: Env, staker: Address) -> bool {
        registry::has_record(&env, &staker)
    }

    pub fn get_staker_phase(env: Env, staker: Address) -> StakerPhase {
        let record = registry::get_record(&env, &staker);
        cooldown::phase_of(record.as_ref(), env.ledger().timestamp())
    }

    /// Reward the staker would hold after settling now, without mutating state.
    ///
    /// Excludes any amount already frozen in a reward cooldown.
    pub fn get_claimable_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let record = registry::get_record(&env, &staker).ok_or(ContractError::UnknownStaker)?;
        let horizon = Self::settlement_horizon(&env, &record);
        accrual::project(&record, horizon)
    }

    pub fn get_active_staker_count(env: Env) -> u32 {
        registry::active_staker_count(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        registry::total_staked(&env)
    }

    /// Deactivation timestamp, or `0` while the pool is active.
    pub fn get_deactivation_time(env: Env) -> u64 {
        config::deactivated_at(&env).unwrap_or(0)
    }

    pub fn is_active(env: Env) -> bool {
        !config::is_deactivated(&env)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        config::load_config(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        config::get_admin(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl LockedStakingContract {
    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin = config::get_admin(env)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Load a record that has passed its maturation delay.
    fn load_matured_record(
        env: &Env,
        staker: &Address,
        now: u64,
    ) -> Result<StakerRecord, ContractError> {
        let record = registry::get_record(env, staker).ok_or(ContractError::NotActive)?;
        if !cooldown::is_matured(&record, now) {
            return Err(ContractError::NotActive);
        }
        Ok(record)
    }

    /// Latest time `record` may be settled up to: now, capped at the pool
    /// shutdown and at the start of the record's own stake withdrawal.
    fn settlement_horizon(env: &Env, record: &StakerRecord) -> u64 {
        let horizon = config::accrual_horizon(env, env.ledger().timestamp());
        if record.end_time != 0 {
            horizon.min(record.end_time)
        } else {
            horizon
        }
    }

    /// Shared tail of both stake-withdrawal variants.
    fn begin_stake_withdrawal(
        env: &Env,
        staker: Address,
        mut record: StakerRecord,
        now: u64,
        settle_at: u64,
        after_shutdown: bool,
    ) -> Result<u64, ContractError> {
        if !cooldown::lockup_elapsed(&record, now) {
            return Err(ContractError::LockupNotElapsed);
        }
        if record.end_time != 0 {
            return Err(ContractError::EndAlreadySet);
        }
        if record.cooldown_time != 0 {
            return Err(ContractError::RewardCooldownRunning);
        }

        accrual::settle(&mut record, settle_at)?;
        record.end_time = now;
        registry::store_record(env, &staker, &record);

        let release_at = now.saturating_add(COOLDOWN_PERIOD);
        events::publish_stake_withdrawal_started(
            env,
            staker,
            record.accumulated_reward,
            release_at,
            after_shutdown,
        );

        Ok(release_at)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
