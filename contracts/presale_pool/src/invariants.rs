#![allow(dead_code)]

extern crate std;

use soroban_sdk::{token, Address};

use crate::types::PoolState;
use crate::PresalePoolClient;

/// INV-1: the pool total always equals the sum of committed balances.
pub fn assert_committed_matches_total(client: &PresalePoolClient) {
    let mut sum: i128 = 0;
    for contributor in client.contributors().iter() {
        sum += client.balance_of(&contributor).contribution;
    }
    let total = client.total_contribution();
    assert_eq!(
        sum, total,
        "INV-1 violated: committed balances sum to {} but pool total is {}",
        sum, total
    );
}

/// INV-2: every partition respects the caps — buckets are non-negative,
/// no committed balance exceeds the per-contributor cap, a non-zero
/// committed balance is at least the minimum, and the pool total stays
/// under the aggregate cap.
pub fn assert_caps_respected(client: &PresalePoolClient) {
    let settings = client.settings();
    for contributor in client.contributors().iter() {
        let balance = client.balance_of(&contributor);
        assert!(
            balance.contribution >= 0 && balance.remaining >= 0,
            "INV-2 violated: negative bucket for {:?}",
            contributor
        );
        assert!(
            balance.contribution <= settings.max_contribution,
            "INV-2 violated: contribution {} above cap {}",
            balance.contribution,
            settings.max_contribution
        );
        assert!(
            balance.contribution == 0 || balance.contribution >= settings.min_contribution,
            "INV-2 violated: contribution {} below minimum {}",
            balance.contribution,
            settings.min_contribution
        );
    }
    assert!(
        client.total_contribution() <= settings.max_pool_balance,
        "INV-2 violated: pool total {} above aggregate cap {}",
        client.total_contribution(),
        settings.max_pool_balance
    );
}

/// INV-3: before any funds leave the pool, the token balance it holds
/// equals the sum of all held balances. Only meaningful while no payout,
/// fee, or withdrawal transfer has been made.
pub fn assert_funds_conserved(client: &PresalePoolClient, token: &token::Client, pool: &Address) {
    let mut held: i128 = 0;
    for contributor in client.contributors().iter() {
        let balance = client.balance_of(&contributor);
        held += balance.contribution + balance.remaining;
    }
    assert_eq!(
        held,
        token.balance(pool),
        "INV-3 violated: ledger holds {} but the pool's token balance is {}",
        held,
        token.balance(pool)
    );
}

/// INV-4: lifecycle transition validity. `Open` may move to `Failed` or
/// `Paid`; both are terminal.
pub fn assert_valid_transition(from: &PoolState, to: &PoolState) {
    let valid = from == to
        || matches!(
            (from, to),
            (PoolState::Open, PoolState::Failed) | (PoolState::Open, PoolState::Paid)
        );
    assert!(
        valid,
        "INV-4 violated: invalid state transition from {:?} to {:?}",
        from, to
    );
}

/// Run the stateless pool invariants.
pub fn assert_all_pool_invariants(client: &PresalePoolClient) {
    assert_committed_matches_total(client);
    assert_caps_respected(client);
}
