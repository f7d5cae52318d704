//! # Fee Calculator
//!
//! The fee schedule lives in an external contract; the pool only consumes
//! it, and only once — at payout time. The interface is a single quote
//! call, reached through a generated client.

use soroban_sdk::{contractclient, panic_with_error, Address, Env};

use crate::Error;

/// Interface of the external fee schedule provider.
#[contractclient(name = "FeeManagerClient")]
pub trait FeeManager {
    /// Quote the protocol fee owed on a committed pool total.
    fn compute_fee(env: Env, pool_total: i128) -> i128;
}

/// Query the fee manager and validate the quote. The quote crosses a
/// trust boundary, so the pool refuses anything outside `[0, pool_total)`
/// rather than paying out a nonsensical amount.
pub fn assess(env: &Env, fee_manager: &Address, pool_total: i128) -> i128 {
    let fee = FeeManagerClient::new(env, fee_manager).compute_fee(&pool_total);
    if fee < 0 || fee >= pool_total {
        panic_with_error!(env, Error::InvalidFee);
    }
    fee
}
