//! Unit tests for hop-program construction.
//!
//! These cover the builder's decision tree: direct deposits, forwarding
//! wrappers (reserve vs teleport), bridge legs with correlation topics,
//! and the estimate/commit differences in amounts and filters.

use xcm_transfer_engine::{
    build_custom_program, refund_appendix, resolve_context, AssetFilter, ChainId, Error,
    Instruction, Location, Phase, Registry, RegistryConfig, TransferContext, TransferFees,
    TransferOptions, WildAsset,
};

#[path = "helpers.rs"]
mod test_helpers;
use test_helpers::{
    ether_asset, hub_asset_from_sibling, local_hub_asset, relay_asset, test_handle, ALICE, BOB,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Resolves a context for the given route with a fresh scripted handle.
async fn context_for(
    origin: ChainId,
    dest: ChainId,
    asset: xcm_transfer_engine::AssetInfo,
    sender: Option<&str>,
) -> TransferContext {
    let (_state, handle) = test_handle();
    let mut options = TransferOptions::new(handle, asset, dest, ALICE);
    options.sender_address = sender.map(str::to_string);
    resolve_context(origin, &Registry::new(), options).await.unwrap()
}

fn find_forwarding(program: &[Instruction]) -> Option<&Instruction> {
    program.iter().find(|i| {
        matches!(i, Instruction::DepositReserveAsset { .. } | Instruction::InitiateTeleport { .. })
    })
}

fn wrapper_parts(instruction: &Instruction) -> (&AssetFilter, &Location, &[Instruction]) {
    match instruction {
        Instruction::DepositReserveAsset { assets, dest, xcm }
        | Instruction::InitiateTeleport { assets, dest, xcm } => (assets, dest, xcm),
        other => panic!("not a forwarding instruction: {other:?}"),
    }
}

// ============================================================================
// FORWARDING WRAPPER TESTS
// ============================================================================

/// Test that a genuine three-party hop emits a forwarding wrapper with the
/// refund appendix prepended ahead of it
/// Why: the refund net must run on the hop chain itself, never inside the
/// forwarded program
#[tokio::test]
async fn test_three_party_hop_wraps_and_prepends_refund() {
    let ctx =
        context_for(ChainId::Acala, ChainId::Hydration, hub_asset_from_sibling(1_000_000), Some(BOB))
            .await;
    assert_eq!(ctx.reserve.chain, ChainId::AssetHubPolkadot);

    let registry = Registry::new();
    let refund = refund_appendix(&ctx, 2).unwrap().expect("sender present");
    let program = build_custom_program(
        &ctx,
        &registry,
        2,
        &Phase::Commit(TransferFees { hop_fees: 100, dest_fee: 200 }),
        300,
        Some(&refund),
    )
    .unwrap();

    assert_eq!(program.len(), 2);
    match &program[0] {
        Instruction::SetAppendix(appendix) => {
            assert_eq!(appendix.len(), 1);
            match &appendix[0] {
                Instruction::DepositAsset { assets, .. } => {
                    assert_eq!(*assets, AssetFilter::Wild(WildAsset::AllCounted(2)));
                }
                other => panic!("expected refund deposit, got {other:?}"),
            }
        }
        other => panic!("expected SetAppendix, got {other:?}"),
    }
    let (_, _, inner) = wrapper_parts(&program[1]);
    assert_eq!(inner.len(), 2);
    assert!(matches!(inner[0], Instruction::BuyExecution { .. }));
    assert!(matches!(inner[1], Instruction::DepositAsset { .. }));
}

/// Test that the estimation phase filters with Wild(All) while the commit
/// phase lists the exact assets localized to the reserve chain
#[tokio::test]
async fn test_wrapper_filter_by_phase() {
    let ctx = context_for(ChainId::Acala, ChainId::Hydration, hub_asset_from_sibling(1_000_000), None)
        .await;
    let registry = Registry::new();

    let estimated =
        build_custom_program(&ctx, &registry, 2, &Phase::Estimate, 1_000_000, None).unwrap();
    let (filter, _, _) = wrapper_parts(find_forwarding(&estimated).unwrap());
    assert_eq!(*filter, AssetFilter::Wild(WildAsset::All));

    let committed = build_custom_program(
        &ctx,
        &registry,
        2,
        &Phase::Commit(TransferFees { hop_fees: 100, dest_fee: 200 }),
        300,
        None,
    )
    .unwrap();
    let (filter, _, _) = wrapper_parts(find_forwarding(&committed).unwrap());
    match filter {
        AssetFilter::Definite(assets) => {
            assert_eq!(assets.len(), 2);
            // Relay-native fee entry sized at hop + destination fees.
            assert_eq!(assets[0].amount(), 300);
            assert_eq!(assets[0].id, Location::new(1, vec![]));
            // The transferred asset at full amount, in the reserve's frame.
            assert_eq!(assets[1].amount(), 1_000_000);
            assert_eq!(assets[1].id.parents, 0);
        }
        other => panic!("expected definite filter, got {other:?}"),
    }
}

/// Test the committed buy-execution amounts
/// What is tested: a relay-native asset funds execution with its own amount
/// minus the hop fees; any other asset funds it with the destination fee
#[tokio::test]
async fn test_buy_execution_amounts() {
    let registry = Registry::new();

    let relay_ctx =
        context_for(ChainId::AssetHubPolkadot, ChainId::Acala, relay_asset(1_000_000), None).await;
    assert_eq!(relay_ctx.reserve.chain, ChainId::Polkadot);
    let program = build_custom_program(
        &relay_ctx,
        &registry,
        1,
        &Phase::Commit(TransferFees { hop_fees: 400, dest_fee: 200 }),
        600,
        None,
    )
    .unwrap();
    let (_, _, inner) = wrapper_parts(find_forwarding(&program).unwrap());
    match &inner[0] {
        Instruction::BuyExecution { fees, .. } => assert_eq!(fees.amount(), 1_000_000 - 400),
        other => panic!("expected BuyExecution, got {other:?}"),
    }

    let other_ctx =
        context_for(ChainId::Acala, ChainId::Hydration, hub_asset_from_sibling(1_000_000), None)
            .await;
    let program = build_custom_program(
        &other_ctx,
        &registry,
        2,
        &Phase::Commit(TransferFees { hop_fees: 400, dest_fee: 200 }),
        600,
        None,
    )
    .unwrap();
    let (_, _, inner) = wrapper_parts(find_forwarding(&program).unwrap());
    match &inner[0] {
        Instruction::BuyExecution { fees, .. } => assert_eq!(fees.amount(), 200),
        other => panic!("expected BuyExecution, got {other:?}"),
    }
}

/// Test that an amount below the hop fees fails only when committing
/// Why: estimation runs with probe values and must tolerate any amount;
/// a committed amount that cannot cover its own forwarding fee is fatal
#[tokio::test]
async fn test_negative_amount_guard_commit_only() {
    let ctx = context_for(ChainId::AssetHubPolkadot, ChainId::Acala, relay_asset(20), None).await;
    let registry = Registry::new();
    let fees = TransferFees { hop_fees: 150, dest_fee: 200 };

    let err = build_custom_program(&ctx, &registry, 1, &Phase::Commit(fees), 350, None)
        .unwrap_err();
    assert!(matches!(err, Error::AmountTooLow { amount: 20, required: 150 }));

    build_custom_program(&ctx, &registry, 1, &Phase::Estimate, 350, None)
        .expect("estimation tolerates low amounts");
}

/// Test that trusting the reserve/destination pair flips the wrapper from
/// DepositReserveAsset to InitiateTeleport with no other structural change
#[tokio::test]
async fn test_trust_flips_wrapper_kind_only() {
    let ctx = context_for(ChainId::Acala, ChainId::Hydration, hub_asset_from_sibling(1_000_000), None)
        .await;
    let fees = Phase::Commit(TransferFees { hop_fees: 100, dest_fee: 200 });

    let base = Registry::new();
    let base_program = build_custom_program(&ctx, &base, 2, &fees, 300, None).unwrap();
    let reserve_node = find_forwarding(&base_program).unwrap();
    assert!(matches!(reserve_node, Instruction::DepositReserveAsset { .. }));

    let trusted = Registry::with_config(
        RegistryConfig::from_toml_str(
            r#"
            [[chains]]
            chain = "Hydration"
            system = true
            "#,
        )
        .unwrap(),
    );
    let trusted_program = build_custom_program(&ctx, &trusted, 2, &fees, 300, None).unwrap();
    let teleport_node = find_forwarding(&trusted_program).unwrap();
    assert!(matches!(teleport_node, Instruction::InitiateTeleport { .. }));

    assert_eq!(wrapper_parts(reserve_node), wrapper_parts(teleport_node));
}

// ============================================================================
// DIRECT DEPOSIT AND BRIDGE LEG TESTS
// ============================================================================

/// Test that a local-reserve leg is a bare deposit with no refund wrapper
/// Why: a direct same-chain deposit never needs forwarding, so wrapping it
/// would only burn weight on the destination
#[tokio::test]
async fn test_local_reserve_is_bare_deposit() {
    let ctx =
        context_for(ChainId::AssetHubPolkadot, ChainId::Acala, local_hub_asset(1_000), Some(BOB))
            .await;
    assert_eq!(ctx.reserve.chain, ChainId::AssetHubPolkadot);

    let registry = Registry::new();
    let program = build_custom_program(&ctx, &registry, 2, &Phase::Estimate, 1_000, None).unwrap();
    assert_eq!(program.len(), 1);
    assert!(matches!(program[0], Instruction::DepositAsset { .. }));
}

/// Test that a bridge leg appends a deterministic correlation topic
/// What is tested: program shape [DepositAsset, SetTopic]; the topic is
/// stable for identical inputs and changes with the amount
#[tokio::test]
async fn test_bridge_leg_topic() {
    let ctx =
        context_for(ChainId::AssetHubPolkadot, ChainId::Ethereum, ether_asset(5_000), Some(BOB))
            .await;
    let registry = Registry::new();

    let program = build_custom_program(&ctx, &registry, 2, &Phase::Estimate, 1_000, None).unwrap();
    assert_eq!(program.len(), 2);
    assert!(matches!(program[0], Instruction::DepositAsset { .. }));
    let topic = match &program[1] {
        Instruction::SetTopic(topic) => *topic,
        other => panic!("expected SetTopic, got {other:?}"),
    };

    let again = build_custom_program(&ctx, &registry, 2, &Phase::Estimate, 1_000, None).unwrap();
    match &again[1] {
        Instruction::SetTopic(repeat) => assert_eq!(*repeat, topic),
        other => panic!("expected SetTopic, got {other:?}"),
    }

    let different = ctx.with_amount(6_000);
    let changed = build_custom_program(&different, &registry, 2, &Phase::Estimate, 1_000, None)
        .unwrap();
    match &changed[1] {
        Instruction::SetTopic(other_topic) => assert_ne!(*other_topic, topic),
        other => panic!("expected SetTopic, got {other:?}"),
    }
}

/// Test that sub-bridge legs wrap even with a local reserve and carry no
/// refund appendix
/// Why: the bridge consumes everything it is given; a refund net on the
/// origin side would trap assets
#[tokio::test]
async fn test_sub_bridge_wraps_without_refund() {
    let (_state, handle) = test_handle();
    let mut options =
        TransferOptions::new(handle, relay_asset(1_000_000), ChainId::AssetHubKusama, ALICE);
    options.sender_address = Some(BOB.to_string());
    options.reserve_override = Some(ChainId::AssetHubPolkadot);
    let ctx = resolve_context(ChainId::AssetHubPolkadot, &Registry::new(), options).await.unwrap();
    assert!(ctx.is_sub_bridge);
    assert_eq!(ctx.reserve.chain, ChainId::AssetHubPolkadot);

    assert!(refund_appendix(&ctx, 1).unwrap().is_none());

    let registry = Registry::new();
    let program = build_custom_program(
        &ctx,
        &registry,
        1,
        &Phase::Commit(TransferFees { hop_fees: 100, dest_fee: 200 }),
        300,
        None,
    )
    .unwrap();
    assert_eq!(program.len(), 1);
    assert!(matches!(program[0], Instruction::DepositReserveAsset { .. }));
}
