//! Token movements between stakers and the pool.
//!
//! Transfers go through the fallible `try_transfer` so a refused transfer
//! (missing balance or allowance) surfaces as [`ContractError::TransferFailed`]
//! before the calling action has written any state.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Pull `amount` from `from` into the pool.
pub fn transfer_in(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    move_funds(env, token, from, &env.current_contract_address(), amount)
}

/// Pay `amount` out of the pool to `to`.
pub fn transfer_out(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    move_funds(env, token, &env.current_contract_address(), to, amount)
}

fn move_funds(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
