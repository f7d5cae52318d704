use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposited {
    pub contributor: Address,
    pub amount: i128,
    pub contribution: i128,
    pub remaining: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsChanged {
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub max_pool_balance: i128,
    pub total_contribution: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFailed {
    pub total_contribution: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolPaid {
    pub recipient: Address,
    pub amount: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrew {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub from: Address,
    pub amount: i128,
}

pub fn emit_deposited(
    env: &Env,
    contributor: Address,
    amount: i128,
    contribution: i128,
    remaining: i128,
) {
    let topics = (symbol_short!("deposit"), contributor.clone());
    let data = Deposited {
        contributor,
        amount,
        contribution,
        remaining,
    };
    env.events().publish(topics, data);
}

pub fn emit_settings_changed(
    env: &Env,
    min_contribution: i128,
    max_contribution: i128,
    max_pool_balance: i128,
    total_contribution: i128,
) {
    let topics = (symbol_short!("settings"),);
    let data = SettingsChanged {
        min_contribution,
        max_contribution,
        max_pool_balance,
        total_contribution,
    };
    env.events().publish(topics, data);
}

pub fn emit_pool_failed(env: &Env, total_contribution: i128) {
    let topics = (symbol_short!("failed"),);
    let data = PoolFailed { total_contribution };
    env.events().publish(topics, data);
}

pub fn emit_pool_paid(env: &Env, recipient: Address, amount: i128, fee: i128) {
    let topics = (symbol_short!("paid"), recipient.clone());
    let data = PoolPaid {
        recipient,
        amount,
        fee,
    };
    env.events().publish(topics, data);
}

pub fn emit_withdrew(env: &Env, contributor: Address, amount: i128) {
    let topics = (symbol_short!("withdraw"), contributor.clone());
    let data = Withdrew {
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_refunded(env: &Env, from: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), from.clone());
    let data = Refunded { from, amount };
    env.events().publish(topics, data);
}
