//! Chain registry: routing knowledge per chain.
//!
//! The built-in tables cover the supported chain set; deployments can
//! override individual entries through [`RegistryConfig`](crate::config::RegistryConfig)
//! (fresh para ids, capability flags, fee-padding margins) without a rebuild.

use std::collections::HashMap;

use crate::chains::ChainId;
use crate::config::{ChainOverride, RegistryConfig};
use crate::location::{Location, NetworkId};

/// Default padding applied to fee quotes, in percent.
const DEFAULT_FEE_PAD_PERCENT: u32 = 20;
/// Hydration under-quotes its execution fees; pad heavily.
const HYDRATION_FEE_PAD_PERCENT: u32 = 500;
/// Ethereum-bridged assets landing on an Asset Hub need extra headroom.
const ETH_ASSET_FEE_PAD_PERCENT: u32 = 100;

/// Native asset metadata of a chain, used to denominate fees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAsset {
    pub symbol: String,
    pub decimals: u32,
}

impl NativeAsset {
    fn new(symbol: &str, decimals: u32) -> Self {
        Self { symbol: symbol.to_string(), decimals }
    }
}

/// Routing knowledge for the supported chain set.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    overrides: HashMap<ChainId, ChainOverride>,
}

impl Registry {
    /// Registry with built-in knowledge only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with per-chain overrides applied on top of the built-ins.
    pub fn with_config(config: RegistryConfig) -> Self {
        let overrides = config.chains.into_iter().map(|c| (c.chain, c)).collect();
        Self { overrides }
    }

    fn override_for(&self, chain: ChainId) -> Option<&ChainOverride> {
        self.overrides.get(&chain)
    }

    pub fn is_relay_chain(&self, chain: ChainId) -> bool {
        matches!(chain, ChainId::Polkadot | ChainId::Kusama | ChainId::Paseo | ChainId::Westend)
    }

    /// System parachains of a relay. The relay itself is not a member.
    pub fn is_system_chain(&self, chain: ChainId) -> bool {
        if let Some(flag) = self.override_for(chain).and_then(|o| o.system) {
            return flag;
        }
        matches!(
            chain,
            ChainId::AssetHubPolkadot
                | ChainId::AssetHubKusama
                | ChainId::AssetHubPaseo
                | ChainId::AssetHubWestend
                | ChainId::BridgeHubPolkadot
                | ChainId::BridgeHubKusama
                | ChainId::CollectivesPolkadot
                | ChainId::CoretimePolkadot
                | ChainId::PeoplePolkadot
        )
    }

    pub fn is_asset_hub(&self, chain: ChainId) -> bool {
        matches!(
            chain,
            ChainId::AssetHubPolkadot
                | ChainId::AssetHubKusama
                | ChainId::AssetHubPaseo
                | ChainId::AssetHubWestend
        )
    }

    /// External consensus reached over a bridge rather than the relay.
    pub fn is_bridged_network(&self, chain: ChainId) -> bool {
        chain == ChainId::Ethereum
    }

    /// Chains of the Paseo ecosystem resolve reserves through the lookup
    /// even for relay destinations: their relay-native reserves migrated to
    /// the Asset Hub.
    pub fn is_migrated_ecosystem(&self, chain: ChainId) -> bool {
        self.relay_chain_of(chain) == Some(ChainId::Paseo)
    }

    /// The relay a chain settles under. `None` for bridged networks.
    pub fn relay_chain_of(&self, chain: ChainId) -> Option<ChainId> {
        use ChainId::*;
        let relay = match chain {
            Polkadot | AssetHubPolkadot | BridgeHubPolkadot | CollectivesPolkadot
            | CoretimePolkadot | PeoplePolkadot | Acala | Astar | Hydration | Moonbeam
            | Interlay | Crust => Polkadot,
            Kusama | AssetHubKusama | BridgeHubKusama | Karura | Basilisk | Moonriver => Kusama,
            Paseo | AssetHubPaseo | HydrationPaseo => Paseo,
            Westend | AssetHubWestend => Westend,
            Ethereum => return None,
        };
        Some(relay)
    }

    /// Parachain id within the chain's relay network; 0 for relays and
    /// bridged networks.
    pub fn para_id(&self, chain: ChainId) -> u32 {
        if let Some(id) = self.override_for(chain).and_then(|o| o.para_id) {
            return id;
        }
        use ChainId::*;
        match chain {
            AssetHubPolkadot | AssetHubKusama | AssetHubPaseo | AssetHubWestend => 1000,
            CollectivesPolkadot => 1001,
            BridgeHubPolkadot | BridgeHubKusama => 1002,
            PeoplePolkadot => 1004,
            CoretimePolkadot => 1005,
            Acala | Karura => 2000,
            Moonbeam => 2004,
            Astar => 2006,
            Crust => 2008,
            Moonriver => 2023,
            Interlay => 2032,
            Hydration | HydrationPaseo => 2034,
            Basilisk => 2090,
            Polkadot | Kusama | Paseo | Westend | Ethereum => 0,
        }
    }

    pub fn chain_by_para_id(&self, relay: ChainId, para_id: u32) -> Option<ChainId> {
        all_chains()
            .iter()
            .copied()
            .find(|&c| {
                !self.is_relay_chain(c)
                    && self.relay_chain_of(c) == Some(relay)
                    && self.para_id(c) == para_id
            })
    }

    /// The Asset Hub of a relay's network.
    pub fn asset_hub_of(&self, relay: ChainId) -> ChainId {
        match relay {
            ChainId::Kusama => ChainId::AssetHubKusama,
            ChainId::Paseo => ChainId::AssetHubPaseo,
            ChainId::Westend => ChainId::AssetHubWestend,
            _ => ChainId::AssetHubPolkadot,
        }
    }

    /// Mutual teleport trust: two distinct system parachains of the same
    /// relay network recognize each other's issuance.
    pub fn is_teleport_trusted(&self, a: ChainId, b: ChainId) -> bool {
        a != b
            && self.is_system_chain(a)
            && self.is_system_chain(b)
            && self.relay_chain_of(a).is_some()
            && self.relay_chain_of(a) == self.relay_chain_of(b)
    }

    /// Whether the chain's runtime exposes the XCM payment API used for
    /// fee quoting.
    pub fn has_xcm_payment_api(&self, chain: ChainId) -> bool {
        if let Some(flag) = self.override_for(chain).and_then(|o| o.xcm_payment_api) {
            return flag;
        }
        // Older runtimes predate the payment API.
        !matches!(chain, ChainId::Crust | ChainId::Interlay | ChainId::Ethereum)
    }

    pub fn native_asset(&self, chain: ChainId) -> NativeAsset {
        use ChainId::*;
        match chain {
            Polkadot | AssetHubPolkadot | BridgeHubPolkadot | CollectivesPolkadot
            | CoretimePolkadot | PeoplePolkadot => NativeAsset::new("DOT", 10),
            Kusama | AssetHubKusama | BridgeHubKusama => NativeAsset::new("KSM", 12),
            Paseo | AssetHubPaseo => NativeAsset::new("PAS", 10),
            Westend | AssetHubWestend => NativeAsset::new("WND", 12),
            Acala => NativeAsset::new("ACA", 12),
            Astar => NativeAsset::new("ASTR", 18),
            Hydration | HydrationPaseo => NativeAsset::new("HDX", 12),
            Moonbeam => NativeAsset::new("GLMR", 18),
            Interlay => NativeAsset::new("INTR", 10),
            Crust => NativeAsset::new("CRU", 12),
            Karura => NativeAsset::new("KAR", 12),
            Basilisk => NativeAsset::new("BSX", 12),
            Moonriver => NativeAsset::new("MOVR", 18),
            Ethereum => NativeAsset::new("ETH", 18),
        }
    }

    /// Padding margin for fee quotes issued while `reserve` mediates a
    /// transfer landing on `dest`.
    pub fn fee_pad_percent(&self, reserve: ChainId, dest: ChainId, asset: &Location) -> u32 {
        if let Some(pad) = self.override_for(reserve).and_then(|o| o.fee_pad_percent) {
            return pad;
        }
        if matches!(reserve, ChainId::Hydration | ChainId::HydrationPaseo) {
            return HYDRATION_FEE_PAD_PERCENT;
        }
        if self.is_asset_hub(dest)
            && asset.has_global_consensus(|n| matches!(n, NetworkId::Ethereum { .. }))
        {
            return ETH_ASSET_FEE_PAD_PERCENT;
        }
        DEFAULT_FEE_PAD_PERCENT
    }

    /// Which chain's reserve backs `location`, from `origin`'s view.
    ///
    /// Ethereum-bridged assets reserve on the network's Asset Hub.
    /// Relay-native assets reserve on the relay, except in migrated
    /// ecosystems where the Asset Hub took the reserve over. A leading
    /// `Parachain` junction points at the backing sibling chain; a
    /// chain-local path stays with the origin.
    pub fn reserve_chain_of(&self, origin: ChainId, location: &Location) -> ChainId {
        let relay = match self.relay_chain_of(origin) {
            Some(relay) => relay,
            None => return origin,
        };
        if location.has_global_consensus(|n| matches!(n, NetworkId::Ethereum { .. })) {
            return self.asset_hub_of(relay);
        }
        if location.interior_eq(&crate::location::relay_location()) {
            if self.is_migrated_ecosystem(origin) {
                return self.asset_hub_of(relay);
            }
            return relay;
        }
        if location.parents >= 1 {
            if let Some(crate::location::Junction::Parachain(id)) = location.interior.first() {
                if let Some(chain) = self.chain_by_para_id(relay, *id) {
                    return chain;
                }
            }
        }
        origin
    }
}

fn all_chains() -> &'static [ChainId] {
    use ChainId::*;
    &[
        Polkadot,
        Kusama,
        Paseo,
        Westend,
        AssetHubPolkadot,
        AssetHubKusama,
        AssetHubPaseo,
        AssetHubWestend,
        BridgeHubPolkadot,
        BridgeHubKusama,
        CollectivesPolkadot,
        CoretimePolkadot,
        PeoplePolkadot,
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
        Ethereum,
    ]
}
