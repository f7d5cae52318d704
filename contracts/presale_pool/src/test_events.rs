extern crate std;

use soroban_sdk::{
    symbol_short, testutils::{Address as _, Events}, vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{Deposited, PoolPaid, Withdrew};
use crate::test::{buyer, setup, UNIT};

#[test]
fn test_deposit_event() {
    let (env, client, _operator, _token, asset, _fee_manager) = setup();
    let buyer1 = buyer(&env, &asset, 5 * UNIT);

    client.deposit(&buyer1, &(5 * UNIT));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events found");

    // Topic: (symbol_short!("deposit"), contributor)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("deposit").into_val(&env),
        buyer1.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: the post-partition balance travels with the event.
    let event_data: Deposited = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Deposited {
            contributor: buyer1.clone(),
            amount: 5 * UNIT,
            contribution: 5 * UNIT,
            remaining: 0,
        }
    );
}

#[test]
fn test_pool_paid_event() {
    let (env, client, operator, _token, asset, _fee_manager) = setup();
    let buyer1 = buyer(&env, &asset, 5 * UNIT);
    client.deposit(&buyer1, &(5 * UNIT));

    let payout_address = Address::generate(&env);
    client.pay_to_presale(&operator, &payout_address, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events found");

    // Topic: (symbol_short!("paid"), recipient)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("paid").into_val(&env),
        payout_address.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let fee = 5 * UNIT / 200;
    let event_data: PoolPaid = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PoolPaid {
            recipient: payout_address.clone(),
            amount: 5 * UNIT - fee,
            fee,
        }
    );
}

#[test]
fn test_withdrew_event() {
    let (env, client, operator, _token, asset, _fee_manager) = setup();
    let buyer1 = buyer(&env, &asset, 5 * UNIT);
    client.deposit(&buyer1, &(5 * UNIT));
    client.set_contribution_settings(&operator, &0, &(2 * UNIT), &(50 * UNIT), &vec![&env]);

    client.withdraw(&buyer1, &(3 * UNIT));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events found");

    // Topic: (symbol_short!("withdraw"), contributor)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("withdraw").into_val(&env),
        buyer1.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Withdrew = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Withdrew {
            contributor: buyer1.clone(),
            amount: 3 * UNIT,
        }
    );
}
