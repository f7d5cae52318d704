//! # Types
//!
//! Shared data structures used across all modules of the presale pool.
//!
//! ## Design decisions
//!
//! ### Lifecycle as a Finite-State Machine
//!
//! [`PoolState`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Open ──► Paid
//!   └────► Failed
//! ```
//!
//! `Paid` and `Failed` are terminal. There is no transition out of either,
//! and every mutating entry point declares the states in which it is legal.
//!
//! ### Committed vs. remaining
//!
//! A contributor's held balance is partitioned into two buckets:
//!
//! - `contribution` — counted toward the pool total and the eventual payout.
//! - `remaining` — held but not committed: the part above a cap, below the
//!   minimum, or belonging to an evicted address. Refundable at will before
//!   the pool is `Paid`.
//!
//! The partition is recomputed by the [`crate::ledger`] module whenever the
//! contributor deposits, the operator changes settings, or the whitelist
//! changes. Funds are never bounced for exceeding a cap; the excess simply
//! parks in `remaining`.

use soroban_sdk::{contracttype, Address};

/// Current lifecycle state of the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolState {
    /// Accepting deposits, settings changes, and refunds of `remaining`.
    Open,
    /// Operator aborted the pool; every balance is refundable in full.
    Failed,
    /// Committed funds were paid out; only full withdrawals remain.
    Paid,
}

/// Caps applied to contributions, replaceable by the operator while `Open`.
///
/// Invariant (checked on every write): `0 <= min_contribution <=
/// max_contribution <= max_pool_balance`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionSettings {
    /// A committed balance below this is disqualified entirely.
    pub min_contribution: i128,
    /// Per-contributor ceiling on the committed balance.
    pub max_contribution: i128,
    /// Aggregate ceiling on the sum of all committed balances.
    pub max_pool_balance: i128,
}

/// Per-contributor ledger entry. Created lazily on first deposit, never
/// deleted, only zeroed by that contributor's own withdrawals.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributorBalance {
    /// Portion committed toward the pool total and the payout.
    pub contribution: i128,
    /// Portion held but not committed; refundable.
    pub remaining: i128,
}

impl ContributorBalance {
    pub fn zero() -> Self {
        ContributorBalance {
            contribution: 0,
            remaining: 0,
        }
    }

    /// Total funds the pool holds for this contributor.
    pub fn held(&self) -> i128 {
        self.contribution + self.remaining
    }
}

/// Record of the single payout, written exactly once when the pool
/// transitions to `Paid`. Immutable thereafter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutRecord {
    /// Address the net payout was sent to.
    pub recipient: Address,
    /// Net amount forwarded (pool total minus fee).
    pub amount: i128,
    /// Fee forwarded to the fee manager.
    pub fee: i128,
}

impl PayoutRecord {
    /// The committed pool total at the moment of payout. Denominator for
    /// pro-rata refund shares.
    pub fn pool_total(&self) -> i128 {
        self.amount + self.fee
    }
}
