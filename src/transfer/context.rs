//! Transfer context resolution.
//!
//! Determines which chain acts as the reserve for the requested asset,
//! opens execution handles for the destination and reserve roles, and
//! bundles everything one transfer attempt needs. A context is built fresh
//! per attempt and never mutated afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::asset::AssetInfo;
use crate::chains::{ChainId, NativeAsset, Registry};
use crate::client::ExecutionHandle;
use crate::errors::{Error, Result};
use crate::location::relay_location;
use crate::transfer::TransferOptions;

/// One chain role of a transfer: its identity plus the handle that talks
/// to it.
#[derive(Clone)]
pub struct ChainRef {
    pub chain: ChainId,
    pub handle: Arc<dyn ExecutionHandle>,
}

impl ChainRef {
    fn new(chain: ChainId, handle: Arc<dyn ExecutionHandle>) -> Self {
        Self { chain, handle }
    }
}

impl std::fmt::Debug for ChainRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainRef").field("chain", &self.chain).finish_non_exhaustive()
    }
}

/// Everything one transfer attempt needs, resolved up front.
#[derive(Debug, Clone)]
pub struct TransferContext {
    pub origin: ChainRef,
    pub dest: ChainRef,
    pub reserve: ChainRef,
    pub asset: AssetInfo,
    /// Native asset of the reserve chain, used to denominate fees when the
    /// transferred asset is not fee-payable.
    pub system_asset: NativeAsset,
    pub is_relay_asset: bool,
    pub is_sub_bridge: bool,
    pub is_snowbridge: bool,
    pub options: TransferOptions,
}

impl TransferContext {
    /// Copy of this context with the asset amount substituted, for dry-run
    /// probes. The original context is left untouched.
    pub fn with_amount(&self, amount: u128) -> TransferContext {
        let mut probed = self.clone();
        probed.asset.amount = amount;
        probed
    }
}

/// Resolves the chain roles of a transfer and opens their handles.
///
/// The reserve is the requested destination when that destination is a
/// relay chain; otherwise (and always for migrated-ecosystem origins) it is
/// derived from the asset's location. Handles are initialized sequentially,
/// destination first, since the reserve may reuse the destination's handle.
pub async fn resolve_context(
    origin: ChainId,
    registry: &Registry,
    options: TransferOptions,
) -> Result<TransferContext> {
    let dest_chain = options.dest_chain.ok_or(Error::MissingDestination)?;

    if options.para_id_to.is_some() && registry.is_relay_chain(dest_chain) {
        return Err(Error::InvalidConfiguration(
            "destination para id cannot be overridden for a relay-chain destination".to_string(),
        ));
    }

    let asset = options.asset.clone();

    let reserve_chain = match options.reserve_override {
        Some(reserve) => reserve,
        None => {
            if registry.is_relay_chain(dest_chain) && !registry.is_migrated_ecosystem(origin) {
                dest_chain
            } else {
                registry.reserve_chain_of(origin, &asset.location)
            }
        }
    };

    debug!("resolved transfer roles: origin={} dest={} reserve={}", origin, dest_chain, reserve_chain);

    let dest_handle = options.handle.clone_handle();
    dest_handle
        .init(dest_chain)
        .await
        .map_err(|e| Error::HandleInit { chain: dest_chain, source: e })?;

    let reserve_handle = if reserve_chain == origin {
        options.handle.clone()
    } else if reserve_chain == dest_chain {
        dest_handle.clone()
    } else {
        let handle = options.handle.clone_handle();
        handle
            .init(reserve_chain)
            .await
            .map_err(|e| Error::HandleInit { chain: reserve_chain, source: e })?;
        handle
    };

    let is_relay_asset = asset.location.interior_eq(&relay_location());
    let is_snowbridge = registry.is_bridged_network(dest_chain);
    let is_sub_bridge = !is_snowbridge
        && match (registry.relay_chain_of(origin), registry.relay_chain_of(dest_chain)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        };

    if is_snowbridge && options.sender_address.is_none() {
        return Err(Error::InvalidConfiguration(
            "sender address is required for bridge transfers".to_string(),
        ));
    }

    let system_asset = registry.native_asset(reserve_chain);

    Ok(TransferContext {
        origin: ChainRef::new(origin, options.handle.clone()),
        dest: ChainRef::new(dest_chain, dest_handle),
        reserve: ChainRef::new(reserve_chain, reserve_handle),
        asset,
        system_asset,
        is_relay_asset,
        is_sub_bridge,
        is_snowbridge,
        options,
    })
}
