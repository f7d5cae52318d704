//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the pool:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                 | Type                   | Description                     |
//! |---------------------|------------------------|---------------------------------|
//! | `Operator`          | `Address`              | The pool creator                |
//! | `Token`             | `Address`              | Deposit asset contract          |
//! | `FeeManager`        | `Address`              | External fee schedule contract  |
//! | `State`             | `PoolState`            | Lifecycle state                 |
//! | `Settings`          | `ContributionSettings` | Current caps                    |
//! | `WhitelistOnly`     | `bool`                 | Whether deposit gating is on    |
//! | `TotalContribution` | `i128`                 | Sum of committed balances       |
//! | `Payout`            | `PayoutRecord`         | Written once, at payout         |
//! | `RefundTotal`       | `i128`                 | Funds returned after payout     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type                 | Description                     |
//! |----------------------|----------------------|---------------------------------|
//! | `Balance(addr)`      | `ContributorBalance` | Per-contributor partition       |
//! | `Contributors`       | `Vec<Address>`       | Registration-order registry     |
//! | `Whitelisted(addr)`  | `()`                 | Membership in the allowed set   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! The registry is append-only and is the canonical walk order for the
//! full re-partition in [`crate::ledger::repartition_all`].

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{ContributionSettings, ContributorBalance, PayoutRecord, PoolState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// The only address allowed to change settings, fail, or pay out (Instance).
    Operator,
    /// The asset contract deposits are denominated in (Instance).
    Token,
    /// The external fee schedule contract (Instance).
    FeeManager,
    /// Lifecycle state (Instance).
    State,
    /// Current contribution caps (Instance).
    Settings,
    /// Whether only whitelisted addresses may deposit (Instance).
    WhitelistOnly,
    /// Sum of all committed balances (Instance).
    TotalContribution,
    /// The single payout record, present once `Paid` (Instance).
    Payout,
    /// Cumulative funds returned by the payout recipient (Instance).
    RefundTotal,
    /// Per-contributor balance partition (Persistent).
    Balance(Address),
    /// Contributor addresses in registration order (Persistent).
    Contributors,
    /// Allowed-set membership marker (Persistent).
    Whitelisted(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Read an instance entry that must exist on an initialised pool.
fn get_instance_or_uninit<T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> T {
    bump_instance(env);
    match env.storage().instance().get(key) {
        Some(v) => v,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Operator)
}

pub fn set_operator(env: &Env, operator: &Address) {
    env.storage().instance().set(&DataKey::Operator, operator);
    bump_instance(env);
}

pub fn get_operator(env: &Env) -> Address {
    get_instance_or_uninit(env, &DataKey::Operator)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn get_token(env: &Env) -> Address {
    get_instance_or_uninit(env, &DataKey::Token)
}

pub fn set_fee_manager(env: &Env, fee_manager: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::FeeManager, fee_manager);
    bump_instance(env);
}

pub fn get_fee_manager(env: &Env) -> Address {
    get_instance_or_uninit(env, &DataKey::FeeManager)
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

pub fn get_state(env: &Env) -> PoolState {
    get_instance_or_uninit(env, &DataKey::State)
}

pub fn set_settings(env: &Env, settings: &ContributionSettings) {
    env.storage().instance().set(&DataKey::Settings, settings);
    bump_instance(env);
}

pub fn get_settings(env: &Env) -> ContributionSettings {
    get_instance_or_uninit(env, &DataKey::Settings)
}

pub fn set_whitelist_only(env: &Env, enabled: bool) {
    env.storage()
        .instance()
        .set(&DataKey::WhitelistOnly, &enabled);
    bump_instance(env);
}

pub fn is_whitelist_only(env: &Env) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::WhitelistOnly)
        .unwrap_or(false)
}

pub fn set_total_contribution(env: &Env, total: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalContribution, &total);
    bump_instance(env);
}

pub fn get_total_contribution(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalContribution)
        .unwrap_or(0)
}

/// Write the payout record. Written exactly once, by `pay_to_presale`.
pub fn set_payout(env: &Env, payout: &PayoutRecord) {
    env.storage().instance().set(&DataKey::Payout, payout);
    bump_instance(env);
}

pub fn get_payout(env: &Env) -> Option<PayoutRecord> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Payout)
}

pub fn set_refund_total(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::RefundTotal, &total);
    bump_instance(env);
}

pub fn get_refund_total(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::RefundTotal)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read a contributor's balance partition; addresses that never deposited
/// read as zero.
pub fn get_balance(env: &Env, contributor: &Address) -> ContributorBalance {
    let key = DataKey::Balance(contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(balance) => {
            bump_persistent(env, &key);
            balance
        }
        None => ContributorBalance::zero(),
    }
}

pub fn set_balance(env: &Env, contributor: &Address, balance: &ContributorBalance) {
    let key = DataKey::Balance(contributor.clone());
    env.storage().persistent().set(&key, balance);
    bump_persistent(env, &key);
}

/// The contributor registry, in registration order.
pub fn contributors(env: &Env) -> Vec<Address> {
    let key = DataKey::Contributors;
    match env.storage().persistent().get(&key) {
        Some(list) => {
            bump_persistent(env, &key);
            list
        }
        None => Vec::new(env),
    }
}

/// Append `contributor` to the registry if not already present.
pub fn register_contributor(env: &Env, contributor: &Address) {
    let mut list = contributors(env);
    if !list.contains(contributor) {
        list.push_back(contributor.clone());
        let key = DataKey::Contributors;
        env.storage().persistent().set(&key, &list);
        bump_persistent(env, &key);
    }
}

pub fn add_whitelisted(env: &Env, address: &Address) {
    let key = DataKey::Whitelisted(address.clone());
    env.storage().persistent().set(&key, &());
    bump_persistent(env, &key);
}

pub fn remove_whitelisted(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(address.clone()));
}

pub fn is_whitelisted(env: &Env, address: &Address) -> bool {
    let key = DataKey::Whitelisted(address.clone());
    if env.storage().persistent().has(&key) {
        bump_persistent(env, &key);
        true
    } else {
        false
    }
}
