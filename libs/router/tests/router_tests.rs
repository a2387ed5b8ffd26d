//! End-to-end routing tests: allocation across real pool sets and
//! materialization of successor scripts through the codec.

use codec::{build_script, parse_script};
use router::{RouteError, TradeRouter};
use std::collections::HashMap;
use types::{
    OutPoint, OwnerHash, Pool, PoolState, SwapDirection, SwapRequest, TokenRef, DUST_LIMIT,
};

fn pool(n: u8, rxd: i64, token: i64) -> Pool {
    Pool::new(
        OutPoint::new([n; 32], 0),
        PoolState::new(rxd, token).unwrap(),
        OwnerHash::new([n; 20]),
        None,
    )
}

fn buy(amount_in: i64, min_out: i64) -> SwapRequest {
    SwapRequest {
        direction: SwapDirection::RxdToToken,
        amount_in,
        min_amount_out: min_out,
        recipient: OwnerHash::new([0xEE; 20]),
    }
}

fn sell(amount_in: i64, min_out: i64) -> SwapRequest {
    SwapRequest {
        direction: SwapDirection::TokenToRxd,
        amount_in,
        min_amount_out: min_out,
        recipient: OwnerHash::new([0xEE; 20]),
    }
}

#[test]
fn single_pool_buy_reference_case() {
    let pools = [pool(1, 10_000, 1_000)];
    let route = TradeRouter::route(&buy(1_000, 0), &pools).unwrap();

    assert_eq!(route.steps.len(), 1);
    let step = &route.steps[0];
    assert_eq!(step.amount_in, 1_000);
    assert_eq!(step.fee, 3);
    assert_eq!(step.amount_out, 90);
    assert_eq!(step.state_after.rxd_reserve(), 11_000);
    assert_eq!(step.state_after.token_reserve(), 910);
    assert_eq!(route.total_out, 90);
    assert_eq!(route.total_fee, 3);
}

#[test]
fn single_pool_sell_reference_case() {
    let pools = [pool(1, 10_000, 1_000)];
    let route = TradeRouter::route(&sell(100, 0), &pools).unwrap();

    let step = &route.steps[0];
    assert_eq!(step.fee, 2);
    assert_eq!(step.amount_out, 908);
    assert_eq!(step.state_after.rxd_reserve(), 9_092);
    assert_eq!(step.state_after.token_reserve(), 1_100);
}

#[test]
fn oversized_buy_spills_into_the_second_pool() {
    // Equal prices (10 RXD per token), so the caller-supplied order decides.
    let pools = [pool(1, 10_000, 1_000), pool(2, 5_000, 500)];
    let amount = 11_000_000;
    let route = TradeRouter::route(&buy(amount, 0), &pools).unwrap();

    assert_eq!(route.steps.len(), 2);
    assert_eq!(route.steps[0].pool, pools[0].outpoint);
    assert_eq!(route.steps[1].pool, pools[1].outpoint);
    // The first pool is drained to its 1-token residual before the second
    // pool sees any of the input.
    assert_eq!(route.steps[0].amount_out, 999);
    assert_eq!(route.steps[0].state_after.token_reserve(), 1);
    assert!(route.steps[1].state_after.token_reserve() >= 1);
    assert_eq!(route.total_in, amount);
    assert_eq!(
        route.total_out,
        route.steps[0].amount_out + route.steps[1].amount_out
    );
    assert!(route.average_price > rust_decimal::Decimal::ZERO);
}

#[test]
fn routing_is_deterministic() {
    let pools = [pool(1, 10_000, 1_000), pool(2, 5_000, 500), pool(3, 30_000, 1_000)];
    let a = TradeRouter::route(&buy(2_000_000, 0), &pools).unwrap();
    let b = TradeRouter::route(&buy(2_000_000, 0), &pools).unwrap();
    assert_eq!(a, b);
}

#[test]
fn sell_routes_walk_pools_in_descending_price_order() {
    let pools = [pool(1, 10_000, 1_000), pool(2, 30_000, 1_000)];
    // Larger than the richer pool's token capacity, so the sell spills over.
    let route = TradeRouter::route(&sell(30_500_000, 0), &pools).unwrap();

    assert!(route.steps.len() >= 2);
    assert_eq!(route.steps[0].pool, pools[1].outpoint);
    assert_eq!(route.steps[1].pool, pools[0].outpoint);
    for step in &route.steps {
        assert!(step.state_after.rxd_reserve() >= 1);
    }
}

#[test]
fn leftover_input_is_not_an_error_once_a_step_exists() {
    // One shallow pool; a huge buy fills it and the residue is simply
    // unspent. Partial fills are reported through total_in, not an error.
    let pools = [pool(1, 10_000, 1_000)];
    let amount = 1_000_000_000;
    let route = TradeRouter::route(&buy(amount, 0), &pools).unwrap();
    assert_eq!(route.steps.len(), 1);
    assert!(route.total_in < amount);
    assert_eq!(route.steps[0].amount_out, 999);
}

#[test]
fn slippage_gate_applies_to_the_route_total() {
    let pools = [pool(1, 10_000, 1_000), pool(2, 5_000, 500)];
    let err = TradeRouter::route(&buy(11_000_000, i64::MAX / 2), &pools).unwrap_err();
    assert!(matches!(err, RouteError::SlippageExceeded { .. }));
}

#[test]
fn output_scripts_rebuild_every_successor() {
    let owner = OwnerHash::new([0x11; 20]);
    let token_ref = TokenRef::new([0x22; 32]);
    let script_a = build_script(&owner, Some(&token_ref), 1_000).unwrap();
    let script_b = build_script(&owner, None, 500).unwrap();

    let parsed_a = parse_script(&script_a).unwrap();
    let parsed_b = parse_script(&script_b).unwrap();
    let pools = [
        Pool::new(
            OutPoint::new([0xA1; 32], 0),
            PoolState::new(10_000, parsed_a.token_reserve).unwrap(),
            parsed_a.owner_hash,
            parsed_a.token_ref,
        ),
        Pool::new(
            OutPoint::new([0xB2; 32], 1),
            PoolState::new(5_000, parsed_b.token_reserve).unwrap(),
            parsed_b.owner_hash,
            parsed_b.token_ref,
        ),
    ];

    let route = TradeRouter::route(&buy(11_000_000, 0), &pools).unwrap();
    assert_eq!(route.steps.len(), 2);

    let mut scripts = HashMap::new();
    scripts.insert(pools[0].outpoint, script_a.clone());
    scripts.insert(pools[1].outpoint, script_b.clone());
    let outputs = TradeRouter::output_scripts(&route, &scripts).unwrap();
    assert_eq!(outputs.len(), route.steps.len());

    for (step, output) in route.steps.iter().zip(&outputs) {
        let reparsed = parse_script(output).unwrap();
        assert_eq!(reparsed.token_reserve, step.state_after.token_reserve());
        assert_eq!(reparsed.owner_hash, owner);
    }
    // Code portions survive byte for byte; only the trailing state changed.
    let (code_a, _) = codec::split_script(&script_a).unwrap();
    let (code_a_after, _) = codec::split_script(&outputs[0]).unwrap();
    assert_eq!(code_a, code_a_after);
}

#[test]
fn output_scripts_require_a_script_per_step() {
    let pools = [pool(1, 10_000, 1_000)];
    let route = TradeRouter::route(&buy(1_000, 0), &pools).unwrap();
    let err = TradeRouter::output_scripts(&route, &HashMap::new()).unwrap_err();
    assert_eq!(
        err,
        RouteError::MissingPoolScript {
            pool: pools[0].outpoint
        }
    );
}

#[test]
fn dust_sized_spill_is_left_with_the_first_pool() {
    // The remainder after draining pool 1 falls below the dust limit, so
    // pool 2 contributes no step.
    let pools = [pool(1, 10_000, 1_000), pool(2, 5_000, 500)];
    let cap = {
        let route = TradeRouter::route(&buy(i64::MAX / 4, 0), &pools).unwrap();
        route.steps[0].amount_in
    };
    let route = TradeRouter::route(&buy(cap + DUST_LIMIT - 1, 0), &pools).unwrap();
    assert_eq!(route.steps.len(), 1);
    assert_eq!(route.total_in, cap);
}
