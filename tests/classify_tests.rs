//! Unit tests for transfer-type classification.
//!
//! The classifier is pure over the (origin, reserve) pair: equality means
//! LocalReserve, mutual teleport trust means Teleport, everything else is
//! DestinationReserve.

use xcm_transfer_engine::{classify, ChainId, Registry, RegistryConfig, TransferType};

/// All chains exercised by the pair sweep below.
const CHAINS: &[ChainId] = &[
    ChainId::Polkadot,
    ChainId::Kusama,
    ChainId::AssetHubPolkadot,
    ChainId::AssetHubKusama,
    ChainId::BridgeHubPolkadot,
    ChainId::Acala,
    ChainId::Hydration,
    ChainId::Astar,
];

/// Test that classification matches the defining equations for every pair
/// What is tested: LocalReserve iff origin == reserve; Teleport iff the
/// trusted-pair predicate holds; DestinationReserve otherwise
/// Why: the transfer-type tag drives which call the receiving chain accepts
#[test]
fn test_classification_matches_trust_predicate() {
    let registry = Registry::new();

    for &origin in CHAINS {
        for &reserve in CHAINS {
            let classified = classify(&registry, origin, reserve);
            if origin == reserve {
                assert_eq!(classified, TransferType::LocalReserve, "{origin}/{reserve}");
            } else if registry.is_teleport_trusted(origin, reserve) {
                assert_eq!(classified, TransferType::Teleport, "{origin}/{reserve}");
            } else {
                assert_eq!(classified, TransferType::DestinationReserve, "{origin}/{reserve}");
            }
        }
    }
}

/// Test that system parachains of the same network classify as Teleport
#[test]
fn test_same_network_system_chains_teleport() {
    let registry = Registry::new();
    assert_eq!(
        classify(&registry, ChainId::AssetHubPolkadot, ChainId::BridgeHubPolkadot),
        TransferType::Teleport
    );
}

/// Test that a relay reserve never classifies as Teleport
/// Why: the relay is not a member of the trusted system-chain set, so a
/// parachain sending through the relay must use DestinationReserve
#[test]
fn test_relay_reserve_is_destination_reserve() {
    let registry = Registry::new();
    assert_eq!(
        classify(&registry, ChainId::AssetHubPolkadot, ChainId::Polkadot),
        TransferType::DestinationReserve
    );
}

/// Test that trust can be granted through a registry override
/// Why: deployments can extend the trusted set from config without a
/// rebuild, and the classifier must pick the change up
#[test]
fn test_trust_override_flips_classification() {
    let registry = Registry::new();
    assert_eq!(
        classify(&registry, ChainId::AssetHubPolkadot, ChainId::Hydration),
        TransferType::DestinationReserve
    );

    let config = RegistryConfig::from_toml_str(
        r#"
        [[chains]]
        chain = "Hydration"
        system = true
        "#,
    )
    .unwrap();
    let overridden = Registry::with_config(config);
    assert_eq!(
        classify(&overridden, ChainId::AssetHubPolkadot, ChainId::Hydration),
        TransferType::Teleport
    );
}
