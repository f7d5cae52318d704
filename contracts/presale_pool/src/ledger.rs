//! # Contribution Ledger
//!
//! The accounting core: every rule that decides how much of a
//! contributor's held balance is committed (`contribution`) versus
//! refundable (`remaining`), and what each contributor can take out in
//! each lifecycle state.
//!
//! ## Capping rules
//!
//! A contributor's committed balance is
//! `min(held, max_contribution, pool headroom)`, zeroed when the result
//! falls below `min_contribution` or the address is excluded by an active
//! whitelist. The min-contribution check applies *after* clipping, so a
//! contributor squeezed under the minimum by the pool cap is disqualified
//! entirely.
//!
//! Two re-partition entry points exist:
//!
//! - [`repartition_one`] — after a deposit or a whitelist change for a
//!   single address. Headroom is whatever the rest of the pool leaves.
//! - [`repartition_all`] — after a settings change. Walks the registry in
//!   registration order, accumulating the new pool total as it goes;
//!   later registrants get whatever headroom is left, possibly zero.
//!
//! All mutations here touch only the pool's own ledger entries. Outbound
//! transfers are the caller's job and happen strictly after these commits.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::types::{ContributionSettings, PoolState};
use crate::Error;

/// Whether `address` may hold a committed balance under the current
/// whitelist configuration.
pub fn permitted(env: &Env, address: &Address) -> bool {
    !storage::is_whitelist_only(env) || storage::is_whitelisted(env, address)
}

/// Clip a held balance to the per-contributor cap and the given pool
/// headroom, then apply the minimum-contribution disqualification.
fn clip(held: i128, settings: &ContributionSettings, headroom: i128) -> i128 {
    let mut committed = held.min(settings.max_contribution).min(headroom.max(0));
    if committed < settings.min_contribution {
        committed = 0;
    }
    committed
}

/// Re-partition a single contributor against the current settings,
/// whitelist, and the headroom left by everyone else. Updates the stored
/// balance and the pool total.
pub fn repartition_one(env: &Env, contributor: &Address) {
    let settings = storage::get_settings(env);
    let mut balance = storage::get_balance(env, contributor);
    let total = storage::get_total_contribution(env);

    let others = total - balance.contribution;
    let held = balance.held();
    let committed = if permitted(env, contributor) {
        clip(held, &settings, settings.max_pool_balance - others)
    } else {
        0
    };

    balance.contribution = committed;
    balance.remaining = held - committed;
    storage::set_balance(env, contributor, &balance);
    storage::set_total_contribution(env, others + committed);
}

/// Re-partition every contributor under the current settings, in
/// registration order, accumulating the pool total as the walk proceeds.
pub fn repartition_all(env: &Env) {
    let settings = storage::get_settings(env);
    let mut running_total: i128 = 0;

    for contributor in storage::contributors(env).iter() {
        let mut balance = storage::get_balance(env, &contributor);
        let held = balance.held();
        let committed = if permitted(env, &contributor) {
            clip(held, &settings, settings.max_pool_balance - running_total)
        } else {
            0
        };

        balance.contribution = committed;
        balance.remaining = held - committed;
        storage::set_balance(env, &contributor, &balance);
        running_total += committed;
    }

    storage::set_total_contribution(env, running_total);
}

/// Credit a deposit to the contributor's held balance, register the
/// address on first contact, and re-partition. Returns nothing; the
/// caller reads back the balance for event emission.
pub fn record_deposit(env: &Env, contributor: &Address, amount: i128) {
    let mut balance = storage::get_balance(env, contributor);
    balance.remaining = match balance.remaining.checked_add(amount) {
        Some(v) => v,
        None => panic_with_error!(env, Error::Overflow),
    };
    storage::set_balance(env, contributor, &balance);
    storage::register_contributor(env, contributor);
    repartition_one(env, contributor);
}

/// In `Failed` state no payout will ever occur, so the committed portion
/// is refundable too. Fold it back into `remaining` and deduct it from
/// the pool total.
fn reclassify_failed(env: &Env, contributor: &Address) {
    let mut balance = storage::get_balance(env, contributor);
    if balance.contribution > 0 {
        let total = storage::get_total_contribution(env);
        storage::set_total_contribution(env, total - balance.contribution);
        balance.remaining += balance.contribution;
        balance.contribution = 0;
        storage::set_balance(env, contributor, &balance);
    }
}

/// Deduct a partial withdrawal from `remaining`. Legal only while `Open`
/// or `Failed`; the state gate is the caller's job, this enforces the
/// balance rule. Returns the amount to transfer.
pub fn withdraw_partial(
    env: &Env,
    contributor: &Address,
    amount: i128,
    state: &PoolState,
) -> i128 {
    if *state == PoolState::Failed {
        reclassify_failed(env, contributor);
    }

    let mut balance = storage::get_balance(env, contributor);
    if amount > balance.remaining {
        panic_with_error!(env, Error::InvalidOperation);
    }
    balance.remaining -= amount;
    storage::set_balance(env, contributor, &balance);
    amount
}

/// Zero the contributor's entire entitlement under `state` and return the
/// amount to transfer. Idempotent per contributor: a second call finds
/// zeroed buckets and returns 0.
///
/// - `Open`: the refundable `remaining` only.
/// - `Failed`: `contribution + remaining`.
/// - `Paid`: `remaining` plus the pro-rata share of whatever the payout
///   recipient has returned: `contribution * refund_total / pool_total`
///   (integer-truncated; dust stays with the pool).
pub fn drain(env: &Env, contributor: &Address, state: &PoolState) -> i128 {
    match state {
        PoolState::Open => {
            let mut balance = storage::get_balance(env, contributor);
            let payable = balance.remaining;
            balance.remaining = 0;
            storage::set_balance(env, contributor, &balance);
            payable
        }
        PoolState::Failed => {
            reclassify_failed(env, contributor);
            let mut balance = storage::get_balance(env, contributor);
            let payable = balance.remaining;
            balance.remaining = 0;
            storage::set_balance(env, contributor, &balance);
            payable
        }
        PoolState::Paid => {
            let mut balance = storage::get_balance(env, contributor);
            let share = refund_share(env, balance.contribution);
            let payable = balance.remaining + share;

            let total = storage::get_total_contribution(env);
            storage::set_total_contribution(env, total - balance.contribution);
            balance.contribution = 0;
            balance.remaining = 0;
            storage::set_balance(env, contributor, &balance);
            payable
        }
    }
}

/// Pro-rata share of the returned funds for a committed balance of
/// `contribution`, against the pool total recorded at payout.
fn refund_share(env: &Env, contribution: i128) -> i128 {
    if contribution == 0 {
        return 0;
    }
    let refund_total = storage::get_refund_total(env);
    if refund_total == 0 {
        return 0;
    }
    // Present whenever state is Paid.
    let payout = match storage::get_payout(env) {
        Some(p) => p,
        None => panic_with_error!(env, Error::InvalidState),
    };
    match contribution.checked_mul(refund_total) {
        Some(product) => product / payout.pool_total(),
        None => panic_with_error!(env, Error::Overflow),
    }
}
