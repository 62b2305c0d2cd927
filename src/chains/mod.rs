//! Chain identities and the knowledge the engine holds about them.

mod registry;

pub use registry::{NativeAsset, Registry};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chain the engine can route transfers between.
///
/// Closed set: relays, their system parachains, the common-good and
/// ecosystem parachains the engine knows reserves for, and the bridged
/// Ethereum network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    // Relay chains
    Polkadot,
    Kusama,
    Paseo,
    Westend,
    // System parachains
    AssetHubPolkadot,
    AssetHubKusama,
    AssetHubPaseo,
    AssetHubWestend,
    BridgeHubPolkadot,
    BridgeHubKusama,
    CollectivesPolkadot,
    CoretimePolkadot,
    PeoplePolkadot,
    // Parachains
    Acala,
    Astar,
    Hydration,
    Moonbeam,
    Interlay,
    Crust,
    Karura,
    Basilisk,
    Moonriver,
    HydrationPaseo,
    // Bridged external network
    Ethereum,
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
