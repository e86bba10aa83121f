extern crate std;

use soroban_sdk::{
    testutils::{storage::Instance as _, Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{
    registry, ContractError, LockedStakingContract, LockedStakingContractClient, StakerRecord,
    DAY,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

const T0: u64 = 1_700_000_000;

fn setup() -> (Env, LockedStakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(LockedStakingContract, ());
    let client = LockedStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &20, &1_000, &1_000_000);

    StellarAssetClient::new(&env, &token)
        .mock_all_auths()
        .mint(&contract_id, &1_000_000_000i128);

    (env, client, admin, token)
}

fn new_staker(
    env: &Env,
    client: &LockedStakingContractClient<'_>,
    token: &Address,
    amount: i128,
) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, token).mint(&staker, &amount);
    client.stake(&staker, &amount);
    staker
}

fn at(env: &Env, offset: u64) {
    env.ledger().set_timestamp(T0 + offset);
}

const LEDGERS_PER_DAY: u32 = 17_280;

fn skip_days_of_ledgers(env: &Env, days: u32) {
    let sequence = env.ledger().sequence();
    env.ledger().set_sequence_number(sequence + days * LEDGERS_PER_DAY);
}

fn instance_ttl(env: &Env, client: &LockedStakingContractClient<'_>) -> u32 {
    env.as_contract(&client.address, || env.storage().instance().get_ttl())
}

// ── Deactivation ─────────────────────────────────────────────────────────────

#[test]
fn test_deactivate_by_admin() {
    let (env, client, admin, _token) = setup();

    at(&env, 3 * DAY);
    client.deactivate(&admin);

    assert!(!client.is_active());
    assert_eq!(client.get_deactivation_time(), T0 + 3 * DAY);
}

#[test]
fn test_deactivate_is_permanent() {
    let (env, client, admin, _token) = setup();

    at(&env, 3 * DAY);
    client.deactivate(&admin);

    at(&env, 9 * DAY);
    assert_eq!(
        client.try_deactivate(&admin),
        Err(Ok(ContractError::SystemInactive))
    );
    assert_eq!(client.get_deactivation_time(), T0 + 3 * DAY);
}

#[test]
fn test_deactivate_by_non_admin_fails() {
    let (env, client, _admin, _token) = setup();
    let intruder = Address::generate(&env);

    assert_eq!(
        client.try_deactivate(&intruder),
        Err(Ok(ContractError::Unauthorized))
    );
    assert!(client.is_active());
}

#[test]
fn test_no_stakes_after_deactivation() {
    let (env, client, admin, token) = setup();
    client.deactivate(&admin);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &10_000);
    assert_eq!(
        client.try_stake(&staker, &10_000),
        Err(Ok(ContractError::SystemInactive))
    );
}

#[test]
fn test_start_actions_reject_wrong_system_state() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 31 * DAY);
    assert_eq!(
        client.try_start_shutdown_withdrawal(&staker),
        Err(Ok(ContractError::SystemActive))
    );

    client.deactivate(&admin);
    assert_eq!(
        client.try_start_stake_withdrawal(&staker),
        Err(Ok(ContractError::SystemInactive))
    );
    assert_eq!(
        client.try_start_reward_withdrawal(&staker),
        Err(Ok(ContractError::SystemInactive))
    );
}

#[test]
fn test_shutdown_is_reported_before_record_conflicts() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 8 * DAY);
    client.start_reward_withdrawal(&staker);
    client.deactivate(&admin);

    assert_eq!(
        client.try_start_reward_withdrawal(&staker),
        Err(Ok(ContractError::SystemInactive))
    );
    assert_eq!(
        client.try_stake(&staker, &250_000),
        Err(Ok(ContractError::SystemInactive))
    );
}

#[test]
fn test_shutdown_withdrawal_caps_accrual() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 40 * DAY);
    client.deactivate(&admin);

    // Long after shutdown, only the 40 days before it are rewarded.
    at(&env, 100 * DAY);
    assert_eq!(client.get_claimable_reward(&staker), 2_000);
    assert_eq!(client.start_shutdown_withdrawal(&staker), T0 + 107 * DAY);

    let record = client.get_staker(&staker);
    assert_eq!(record.accumulated_reward, 2_000);
    assert_eq!(record.last_accrued, T0 + 40 * DAY);
    assert_eq!(record.end_time, T0 + 100 * DAY);

    at(&env, 107 * DAY);
    assert_eq!(client.finalize_stake_withdrawal(&staker), 252_000);
    assert_eq!(TokenClient::new(&env, &token).balance(&staker), 252_000);
    assert_eq!(client.get_active_staker_count(), 0);
}

#[test]
fn test_shutdown_withdrawal_still_requires_lockup() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 5 * DAY);
    client.deactivate(&admin);
    assert_eq!(
        client.try_start_shutdown_withdrawal(&staker),
        Err(Ok(ContractError::LockupNotElapsed))
    );
}

#[test]
fn test_reward_cooldown_can_finish_after_deactivation() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 8 * DAY);
    client.start_reward_withdrawal(&staker);
    at(&env, 9 * DAY);
    client.deactivate(&admin);

    at(&env, 15 * DAY);
    assert_eq!(client.finalize_reward_withdrawal(&staker), 400);
}

// ── Forced settlement ────────────────────────────────────────────────────────

#[test]
fn test_force_settle_folds_pending_reward() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 8 * DAY);
    assert_eq!(client.start_reward_withdrawal(&staker), 400);

    // Two more days accrue on top of the frozen 400.
    at(&env, 10 * DAY);
    let paid = client.force_settle(&admin, &staker);
    assert_eq!(paid, 250_000 + 100 + 400);
    assert_eq!(TokenClient::new(&env, &token).balance(&staker), 250_500);

    assert!(!client.is_staking(&staker));
    assert_eq!(client.get_active_staker_count(), 0);
    assert_eq!(client.get_total_staked(), 0);
}

#[test]
fn test_force_settle_caps_at_deactivation() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 10 * DAY);
    client.deactivate(&admin);

    at(&env, 50 * DAY);
    assert_eq!(client.force_settle(&admin, &staker), 250_500);
}

#[test]
fn test_force_settle_caps_at_stake_withdrawal_start() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 30 * DAY);
    client.start_stake_withdrawal(&staker);

    at(&env, 33 * DAY);
    assert_eq!(client.force_settle(&admin, &staker), 251_500);
}

#[test]
fn test_force_settle_ignores_maturation() {
    let (env, client, admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, DAY / 2);
    assert_eq!(client.force_settle(&admin, &staker), 250_000);
}

#[test]
fn test_force_settle_rolls_back_when_pool_is_short() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(LockedStakingContract, ());
    let client = LockedStakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &20, &1_000, &1_000_000);

    // No reserve: principal plus any reward exceeds what the pool holds.
    let staker = new_staker(&env, &client, &token, 250_000);

    at(&env, 8 * DAY);
    client.start_reward_withdrawal(&staker);
    let before = client.get_staker(&staker);

    at(&env, 10 * DAY);
    assert_eq!(
        client.try_force_settle(&admin, &staker),
        Err(Ok(ContractError::TransferFailed))
    );
    assert_eq!(client.get_staker(&staker), before);
    assert_eq!(client.get_active_staker_count(), 1);
    assert_eq!(client.get_total_staked(), 250_000);
    assert_eq!(TokenClient::new(&env, &token).balance(&contract_id), 250_000);
}

#[test]
fn test_force_settle_unknown_staker_fails() {
    let (env, client, admin, _token) = setup();

    assert_eq!(
        client.try_force_settle(&admin, &Address::generate(&env)),
        Err(Ok(ContractError::UnknownStaker))
    );
}

#[test]
fn test_force_settle_by_non_admin_fails() {
    let (env, client, _admin, token) = setup();
    let staker = new_staker(&env, &client, &token, 250_000);

    assert_eq!(
        client.try_force_settle(&staker, &staker),
        Err(Ok(ContractError::Unauthorized))
    );
    assert!(client.is_staking(&staker));
}

// ── Configuration ────────────────────────────────────────────────────────────

#[test]
fn test_set_daily_rate_applies_to_new_stakes_only() {
    let (env, client, admin, token) = setup();
    let early = new_staker(&env, &client, &token, 250_000);

    client.set_daily_rate(&admin, &40);
    assert_eq!(client.get_config().daily_rate, 40);

    let late = new_staker(&env, &client, &token, 250_000);
    assert_eq!(client.get_staker(&early).daily_reward, 50);
    assert_eq!(client.get_staker(&late).daily_reward, 100);
}

#[test]
fn test_set_daily_rate_validation_and_auth() {
    let (env, client, admin, _token) = setup();

    assert_eq!(
        client.try_set_daily_rate(&admin, &100_001),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        client.try_set_daily_rate(&Address::generate(&env), &10),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(client.get_config().daily_rate, 20);
}

#[test]
fn test_set_stake_bounds() {
    let (env, client, admin, token) = setup();

    client.set_stake_bounds(&admin, &5_000, &10_000);
    let config = client.get_config();
    assert_eq!(config.min_stake, 5_000);
    assert_eq!(config.max_stake, 10_000);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &20_000);
    assert_eq!(
        client.try_stake(&staker, &20_000),
        Err(Ok(ContractError::OutOfBounds))
    );
    client.stake(&staker, &10_000);

    assert_eq!(
        client.try_set_stake_bounds(&admin, &10_000, &5_000),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        client.try_set_stake_bounds(&staker, &1, &2),
        Err(Ok(ContractError::Unauthorized))
    );
}

// ── Admin transfer ───────────────────────────────────────────────────────────

#[test]
fn test_admin_transfer_two_step() {
    let (env, client, admin, _token) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));
    assert_eq!(client.get_admin(), admin);

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);

    // The old admin has lost its privileges.
    assert_eq!(
        client.try_deactivate(&admin),
        Err(Ok(ContractError::Unauthorized))
    );
    client.deactivate(&successor);
}

#[test]
fn test_accept_admin_by_wrong_address_fails() {
    let (env, client, admin, _token) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(
        client.try_accept_admin(&Address::generate(&env)),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(client.get_admin(), admin);
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin, _token) = setup();
    let successor = Address::generate(&env);

    assert_eq!(
        client.try_cancel_admin_transfer(&admin),
        Err(Ok(ContractError::InvalidInput))
    );

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);
    assert_eq!(
        client.try_accept_admin(&successor),
        Err(Ok(ContractError::InvalidInput))
    );
}

// ── Storage lifetime ─────────────────────────────────────────────────────────

#[test]
fn test_instance_writes_extend_instance_ttl() {
    let (env, client, admin, _token) = setup();
    let full = 60 * LEDGERS_PER_DAY;
    let threshold = 30 * LEDGERS_PER_DAY;
    assert_eq!(instance_ttl(&env, &client), full);

    let staker = Address::generate(&env);
    let record = StakerRecord::new(T0, 250_000, 50);

    skip_days_of_ledgers(&env, 45);
    assert!(instance_ttl(&env, &client) < threshold);
    env.as_contract(&client.address, || registry::insert_record(&env, &staker, &record));
    assert_eq!(instance_ttl(&env, &client), full);

    skip_days_of_ledgers(&env, 45);
    assert!(instance_ttl(&env, &client) < threshold);
    env.as_contract(&client.address, || registry::remove_record(&env, &staker, &record));
    assert_eq!(instance_ttl(&env, &client), full);
    assert_eq!(client.get_active_staker_count(), 0);

    skip_days_of_ledgers(&env, 45);
    assert!(instance_ttl(&env, &client) < threshold);
    client.deactivate(&admin);
    assert_eq!(instance_ttl(&env, &client), full);
}
