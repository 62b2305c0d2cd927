//! Asset and account locations.
//!
//! A [`Location`] is a structural, chain-relative path: `parents` levels up
//! the consensus hierarchy, then a sequence of junctions down. Locations are
//! compared structurally, never by string.

use serde::{Deserialize, Serialize};

use crate::chains::{ChainId, Registry};
use crate::errors::{Error, Result};
use crate::instruction::XcmVersion;

/// Consensus-system qualifier carried by account and bridge junctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkId {
    Polkadot,
    Kusama,
    Westend,
    Paseo,
    Ethereum { chain_id: u64 },
}

/// One step of an interior path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Junction {
    Parachain(u32),
    PalletInstance(u8),
    GeneralIndex(u128),
    GeneralKey { length: u8, data: [u8; 32] },
    AccountId32 { network: Option<NetworkId>, id: [u8; 32] },
    AccountKey20 { network: Option<NetworkId>, key: [u8; 20] },
    GlobalConsensus(NetworkId),
}

impl Junction {
    /// Copy of this junction with network qualifiers stripped. Account
    /// junctions route identically regardless of their network tag.
    fn without_network(&self) -> Junction {
        match self {
            Junction::AccountId32 { id, .. } => Junction::AccountId32 { network: None, id: *id },
            Junction::AccountKey20 { key, .. } => {
                Junction::AccountKey20 { network: None, key: *key }
            }
            other => other.clone(),
        }
    }
}

/// A chain-relative path identifying an asset or account.
///
/// An empty `interior` is the "Here" location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub parents: u8,
    pub interior: Vec<Junction>,
}

/// Canonical location of the relay chain's native asset, as seen from any
/// parachain: one hop up, no interior path.
pub const fn relay_location() -> Location {
    Location { parents: 1, interior: Vec::new() }
}

impl Location {
    pub fn new(parents: u8, interior: Vec<Junction>) -> Self {
        Self { parents, interior }
    }

    /// The "Here" location at the current chain.
    pub const fn here() -> Self {
        Self { parents: 0, interior: Vec::new() }
    }

    pub fn is_here(&self) -> bool {
        self.interior.is_empty()
    }

    /// Structural equality modulo network qualifiers on account junctions.
    pub fn interior_eq(&self, other: &Location) -> bool {
        self.parents == other.parents
            && self.interior.len() == other.interior.len()
            && self
                .interior
                .iter()
                .zip(other.interior.iter())
                .all(|(a, b)| a.without_network() == b.without_network())
    }

    /// Whether any junction anchors this location under the given global
    /// consensus network (e.g. an Ethereum-bridged asset).
    pub fn has_global_consensus(&self, matches: impl Fn(&NetworkId) -> bool) -> bool {
        self.interior.iter().any(|j| match j {
            Junction::GlobalConsensus(network) => matches(network),
            _ => false,
        })
    }

    fn leading_parachain(&self) -> Option<u32> {
        match self.interior.first() {
            Some(Junction::Parachain(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Re-anchors a location into `chain`'s own frame of reference.
///
/// A relay chain sees the relay-native location as plain "Here"; a parachain
/// drops its own leading `Parachain` junction. Anything else is already
/// expressed correctly and passes through unchanged.
pub fn localize_location(registry: &Registry, chain: ChainId, location: &Location) -> Location {
    if location.is_here() {
        if registry.is_relay_chain(chain) {
            return Location::here();
        }
        return location.clone();
    }
    if let Some(id) = location.leading_parachain() {
        if !registry.is_relay_chain(chain) && registry.para_id(chain) == id {
            return Location::new(0, location.interior[1..].to_vec());
        }
    }
    location.clone()
}

/// Location of `to` as seen from `from`, used as the `dest` of a hop.
pub fn destination_location(
    registry: &Registry,
    from: ChainId,
    to: ChainId,
    para_id_override: Option<u32>,
) -> Location {
    if registry.is_relay_chain(to) {
        return relay_location();
    }
    if registry.is_bridged_network(to) {
        return Location::new(
            2,
            vec![Junction::GlobalConsensus(NetworkId::Ethereum { chain_id: 1 })],
        );
    }
    let parents = if registry.is_relay_chain(from) { 0 } else { 1 };
    let para_id = para_id_override.unwrap_or_else(|| registry.para_id(to));
    Location::new(parents, vec![Junction::Parachain(para_id)])
}

/// Encodes a hex account address as a beneficiary location on the executing
/// chain: 32-byte payloads become `AccountId32`, 20-byte payloads become
/// `AccountKey20`.
pub fn beneficiary_location(address: &str, _version: XcmVersion) -> Result<Location> {
    let stripped = address.strip_prefix("0x").unwrap_or(address);
    let bytes = hex::decode(stripped)
        .map_err(|_| Error::InvalidAddress(format!("not a hex account key: {address}")))?;
    let junction = match bytes.len() {
        32 => {
            let mut id = [0u8; 32];
            id.copy_from_slice(&bytes);
            Junction::AccountId32 { network: None, id }
        }
        20 => {
            let mut key = [0u8; 20];
            key.copy_from_slice(&bytes);
            Junction::AccountKey20 { network: None, key }
        }
        len => {
            return Err(Error::InvalidAddress(format!(
                "account key must be 20 or 32 bytes, got {len}"
            )))
        }
    };
    Ok(Location::new(0, vec![junction]))
}
