//! # Presale Pool Contract
//!
//! Pooled-contribution escrow: many contributors deposit one token into a
//! shared pool; the designated operator caps and gates participation and
//! ultimately routes the committed total to a single presale address in
//! one irreversible payout, minus a fee quoted by an external fee-manager
//! contract. The single contract `PresalePool` exposes the full lifecycle:
//!
//! | Phase         | Entry Point(s)                                      |
//! |---------------|-----------------------------------------------------|
//! | Bootstrap     | [`PresalePool::init`]                               |
//! | Configuration | `set_contribution_settings`, `modify_whitelist`     |
//! | Funding       | [`PresalePool::deposit`]                            |
//! | Resolution    | `fail`, [`PresalePool::pay_to_presale`], `refund`   |
//! | Withdrawal    | `withdraw`, `withdraw_all`, `withdraw_all_for_many` |
//! | Queries       | `state`, `balance_of`, `total_contribution`, …      |
//!
//! ## Architecture
//!
//! Accounting rules are fully delegated to [`ledger`]. Storage access is
//! fully delegated to [`storage`]. This file contains **only** the public
//! entry points, the auth/state gates, outbound transfers, and event
//! emissions — no balance arithmetic lives here directly.
//!
//! Every entry point is one host transaction: a `panic_with_error!`
//! anywhere aborts the invocation and rolls back all storage writes.
//! Ledger state is still committed strictly before any outbound transfer,
//! so a callee can never observe stale balances.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

pub mod events;
pub mod fee;
mod ledger;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use types::{ContributionSettings, ContributorBalance, PayoutRecord, PoolState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidState = 4,
    InvalidAmount = 5,
    InvalidSettings = 6,
    EmptyPool = 7,
    BelowMinimum = 8,
    InvalidFee = 9,
    TransferFailed = 10,
    InvalidOperation = 11,
    Overflow = 12,
}

#[contract]
pub struct PresalePool;

#[contractimpl]
impl PresalePool {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the pool and set its designated operator.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    ///
    /// - `operator` is the only address allowed to change settings,
    ///   modify the whitelist, fail the pool, or trigger the payout.
    ///   Must sign the transaction.
    /// - `token` is the asset contract deposits are denominated in.
    /// - `fee_manager` is the external fee schedule, consulted only at
    ///   payout time; it also receives the fee.
    /// - The caps must satisfy `0 <= min <= max <= pool_max`, otherwise
    ///   `Error::InvalidSettings`.
    pub fn init(
        env: Env,
        operator: Address,
        token: Address,
        fee_manager: Address,
        min_contribution: i128,
        max_contribution: i128,
        max_pool_balance: i128,
    ) {
        operator.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        let settings =
            Self::checked_settings(&env, min_contribution, max_contribution, max_pool_balance);

        storage::set_operator(&env, &operator);
        storage::set_token(&env, &token);
        storage::set_fee_manager(&env, &fee_manager);
        storage::set_settings(&env, &settings);
        storage::set_state(&env, &PoolState::Open);
    }

    // ─────────────────────────────────────────────────────────
    // Configuration (operator only, Open only)
    // ─────────────────────────────────────────────────────────

    /// Replace the contribution caps and re-partition every contributor.
    ///
    /// The re-walk runs in registration order, accumulating the new pool
    /// total as it goes — contributors registered after the aggregate cap
    /// fills up keep their funds entirely in `remaining`.
    ///
    /// `whitelist_add` inserts addresses into the allowed set without
    /// toggling whitelist enforcement on or off.
    pub fn set_contribution_settings(
        env: Env,
        caller: Address,
        min_contribution: i128,
        max_contribution: i128,
        max_pool_balance: i128,
        whitelist_add: Vec<Address>,
    ) {
        Self::require_operator(&env, &caller);
        Self::require_open(&env);
        let settings =
            Self::checked_settings(&env, min_contribution, max_contribution, max_pool_balance);

        for address in whitelist_add.iter() {
            storage::add_whitelisted(&env, &address);
        }
        storage::set_settings(&env, &settings);
        ledger::repartition_all(&env);

        events::emit_settings_changed(
            &env,
            min_contribution,
            max_contribution,
            max_pool_balance,
            storage::get_total_contribution(&env),
        );
    }

    /// Add and remove addresses from the whitelist.
    ///
    /// The first call turns whitelist enforcement on; every contributor
    /// registered up to that point is grandfathered into the allowed set,
    /// so enabling the gate is never a mass eviction — eviction is always
    /// explicit, via `remove`.
    ///
    /// Removed addresses immediately stop counting toward the pool total:
    /// their committed balance is forced back to `remaining`, withdrawable
    /// at will. Added addresses are re-partitioned upward under the
    /// current caps.
    pub fn modify_whitelist(env: Env, caller: Address, add: Vec<Address>, remove: Vec<Address>) {
        Self::require_operator(&env, &caller);
        Self::require_open(&env);

        if !storage::is_whitelist_only(&env) {
            storage::set_whitelist_only(&env, true);
            for contributor in storage::contributors(&env).iter() {
                storage::add_whitelisted(&env, &contributor);
            }
        }

        for address in add.iter() {
            storage::add_whitelisted(&env, &address);
            ledger::repartition_one(&env, &address);
        }
        for address in remove.iter() {
            storage::remove_whitelisted(&env, &address);
            ledger::repartition_one(&env, &address);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool token.
    ///
    /// Legal only while `Open`; when whitelist enforcement is on the
    /// contributor must be in the allowed set (`Error::Unauthorized`).
    /// The deposit is pulled from the contributor, then the ledger
    /// re-partitions their balance under the current caps. Nothing is
    /// ever bounced for exceeding a cap — the excess parks in `remaining`.
    pub fn deposit(env: Env, contributor: Address, amount: i128) {
        contributor.require_auth();
        Self::require_open(&env);
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if !ledger::permitted(&env, &contributor) {
            panic_with_error!(&env, Error::Unauthorized);
        }

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        ledger::record_deposit(&env, &contributor, amount);

        let balance = storage::get_balance(&env, &contributor);
        events::emit_deposited(
            &env,
            contributor,
            amount,
            balance.contribution,
            balance.remaining,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────

    /// Abort the pool. Terminal: every contributor's full balance becomes
    /// refundable and no payout can ever occur.
    pub fn fail(env: Env, caller: Address) {
        Self::require_operator(&env, &caller);
        Self::require_open(&env);
        storage::set_state(&env, &PoolState::Failed);
        events::emit_pool_failed(&env, storage::get_total_contribution(&env));
    }

    /// Pay the committed pool total, minus the fee, to `payout_address`.
    ///
    /// Fail-fast gates, each a distinct error: the pool must be `Open`
    /// (`InvalidState`), non-empty (`EmptyPool`), and at least
    /// `min_pool_total` (`BelowMinimum`) — the floor lets the operator
    /// guarantee a minimum before committing to the counterpart.
    ///
    /// The state transition to `Paid` and the payout record are committed
    /// before either outbound transfer. Both transfers are
    /// failure-observing: a recipient that rejects payment or exhausts
    /// its budget aborts the whole operation with `TransferFailed`, the
    /// host rolls the ledger back to `Open`, and the call may be retried.
    ///
    /// Single-shot by construction — a second call finds the pool no
    /// longer `Open` and fails with `InvalidState`.
    pub fn pay_to_presale(env: Env, caller: Address, payout_address: Address, min_pool_total: i128) {
        Self::require_operator(&env, &caller);
        Self::require_open(&env);

        let total = storage::get_total_contribution(&env);
        if total == 0 {
            panic_with_error!(&env, Error::EmptyPool);
        }
        if total < min_pool_total {
            panic_with_error!(&env, Error::BelowMinimum);
        }

        let fee_manager = storage::get_fee_manager(&env);
        let fee = fee::assess(&env, &fee_manager, total);
        let net = total - fee;

        storage::set_state(&env, &PoolState::Paid);
        storage::set_payout(
            &env,
            &PayoutRecord {
                recipient: payout_address.clone(),
                amount: net,
                fee,
            },
        );

        Self::pay_out(&env, &payout_address, net);
        Self::pay_out(&env, &fee_manager, fee);

        events::emit_pool_paid(&env, payout_address, net, fee);
    }

    /// Return funds to the pool after the payout, for pro-rata
    /// distribution to contributors via `withdraw_all`.
    ///
    /// Only the recorded payout recipient may refund, and only while
    /// `Paid`.
    pub fn refund(env: Env, from: Address, amount: i128) {
        from.require_auth();
        if storage::get_state(&env) != PoolState::Paid {
            panic_with_error!(&env, Error::InvalidState);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let payout = match storage::get_payout(&env) {
            Some(p) => p,
            None => panic_with_error!(&env, Error::InvalidState),
        };
        if from != payout.recipient {
            panic_with_error!(&env, Error::Unauthorized);
        }

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&from, &env.current_contract_address(), &amount);

        let refund_total = match storage::get_refund_total(&env).checked_add(amount) {
            Some(v) => v,
            None => panic_with_error!(&env, Error::Overflow),
        };
        storage::set_refund_total(&env, refund_total);
        events::emit_refunded(&env, from, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Withdrawal
    // ─────────────────────────────────────────────────────────

    /// Withdraw part of the refundable balance.
    ///
    /// Legal while `Open` or `Failed`; in `Failed` the committed portion
    /// is reclassified as refundable first. Partial withdrawal while
    /// `Paid` is disallowed (`InvalidOperation`) — use `withdraw_all`.
    pub fn withdraw(env: Env, contributor: Address, amount: i128) {
        contributor.require_auth();
        let state = storage::get_state(&env);
        if state == PoolState::Paid {
            panic_with_error!(&env, Error::InvalidOperation);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let payable = ledger::withdraw_partial(&env, &contributor, amount, &state);
        Self::pay_out(&env, &contributor, payable);
        events::emit_withdrew(&env, contributor, payable);
    }

    /// Withdraw the contributor's entire current entitlement.
    ///
    /// - `Open`: the refundable `remaining`.
    /// - `Failed`: `contribution + remaining`.
    /// - `Paid`: `remaining` plus the pro-rata share of any returned
    ///   funds.
    ///
    /// Idempotent per contributor: once drained, a repeat call pays zero
    /// and succeeds.
    pub fn withdraw_all(env: Env, contributor: Address) {
        contributor.require_auth();
        Self::drain_to(&env, &contributor);
    }

    /// Run `withdraw_all` on behalf of each listed address, crediting the
    /// funds to that address — anyone may call this, so contributors who
    /// cannot or will not call the contract themselves can still be paid.
    ///
    /// One failed transfer aborts the whole batch; no partial batch
    /// effects survive.
    pub fn withdraw_all_for_many(env: Env, addresses: Vec<Address>) {
        for address in addresses.iter() {
            Self::drain_to(&env, &address);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn state(env: Env) -> PoolState {
        storage::get_state(&env)
    }

    pub fn settings(env: Env) -> ContributionSettings {
        storage::get_settings(&env)
    }

    /// A contributor's current committed/refundable partition. Addresses
    /// that never deposited read as zero.
    pub fn balance_of(env: Env, contributor: Address) -> ContributorBalance {
        storage::get_balance(&env, &contributor)
    }

    pub fn total_contribution(env: Env) -> i128 {
        storage::get_total_contribution(&env)
    }

    pub fn whitelist_only(env: Env) -> bool {
        storage::is_whitelist_only(&env)
    }

    pub fn is_whitelisted(env: Env, address: Address) -> bool {
        storage::is_whitelisted(&env, &address)
    }

    /// All contributor addresses, in registration order.
    pub fn contributors(env: Env) -> Vec<Address> {
        storage::contributors(&env)
    }

    /// The payout record, present once `Paid`.
    pub fn payout(env: Env) -> Option<PayoutRecord> {
        storage::get_payout(&env)
    }

    pub fn refund_total(env: Env) -> i128 {
        storage::get_refund_total(&env)
    }

    pub fn operator(env: Env) -> Address {
        storage::get_operator(&env)
    }

    pub fn token(env: Env) -> Address {
        storage::get_token(&env)
    }

    pub fn fee_manager(env: Env) -> Address {
        storage::get_fee_manager(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    /// Require `caller` to sign and to be the designated operator.
    fn require_operator(env: &Env, caller: &Address) {
        caller.require_auth();
        if *caller != storage::get_operator(env) {
            panic_with_error!(env, Error::Unauthorized);
        }
    }

    fn require_open(env: &Env) {
        if storage::get_state(env) != PoolState::Open {
            panic_with_error!(env, Error::InvalidState);
        }
    }

    fn checked_settings(
        env: &Env,
        min_contribution: i128,
        max_contribution: i128,
        max_pool_balance: i128,
    ) -> ContributionSettings {
        if min_contribution < 0
            || min_contribution > max_contribution
            || max_contribution > max_pool_balance
        {
            panic_with_error!(env, Error::InvalidSettings);
        }
        ContributionSettings {
            min_contribution,
            max_contribution,
            max_pool_balance,
        }
    }

    /// Failure-observing outbound transfer. The host meters the
    /// sub-invocation; a recipient that rejects the payment or exhausts
    /// its budget surfaces as `Err`, never as an unhandled trap.
    fn pay_out(env: &Env, to: &Address, amount: i128) {
        if amount == 0 {
            return;
        }
        let token_client = token::Client::new(env, &storage::get_token(env));
        match token_client.try_transfer(&env.current_contract_address(), to, &amount) {
            Ok(Ok(())) => {}
            _ => panic_with_error!(env, Error::TransferFailed),
        }
    }

    /// Drain one contributor's entitlement under the current state and
    /// transfer it to them. Ledger state is committed before the
    /// transfer; a zero entitlement is a successful no-op.
    fn drain_to(env: &Env, contributor: &Address) {
        let state = storage::get_state(env);
        let payable = ledger::drain(env, contributor, &state);
        if payable > 0 {
            Self::pay_out(env, contributor, payable);
            events::emit_withdrew(env, contributor.clone(), payable);
        }
    }
}
