//! Final call assembly.
//!
//! Serializes chain, asset list, transfer-type tags, and the hop program
//! into one versioned extrinsic description ready for submission through
//! the origin chain's own path.

use serde::Serialize;

use crate::asset::{Asset, AssetOrdering, CanonicalAssetOrdering};
use crate::chains::Registry;
use crate::errors::Result;
use crate::instruction::{Instruction, Versioned, WeightLimit};
use crate::location::{destination_location, localize_location, relay_location, Location};
use crate::transfer::classify::{classify, TransferType};
use crate::transfer::context::TransferContext;
use crate::transfer::AssetOverride;

/// Pallet name for calls dispatched from a relay chain.
const RELAY_PALLET: &str = "XcmPallet";
/// Pallet name for calls dispatched from a parachain.
const PARACHAIN_PALLET: &str = "PolkadotXcm";

const TRANSFER_METHOD: &str = "transfer_assets_using_type_and_then";

/// Ordered parameters of `transfer_assets_using_type_and_then`.
///
/// Field order is the call's parameter order; serialization preserves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAndThenParams {
    pub dest: Versioned<Location>,
    pub assets: Versioned<Vec<Asset>>,
    pub assets_transfer_type: TransferType,
    pub remote_fees_id: Versioned<Location>,
    pub fees_transfer_type: TransferType,
    pub custom_xcm_on_dest: Versioned<Vec<Instruction>>,
    pub weight_limit: WeightLimit,
}

/// A fully assembled extrinsic description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalCall {
    pub module: String,
    pub method: String,
    pub params: TypeAndThenParams,
}

/// Builds the asset-list parameter.
///
/// A caller-supplied override replaces the computed list verbatim, with no
/// sorting or localization applied. Otherwise the list carries an optional
/// relay-native fee entry followed by the transferred asset in the
/// origin's frame, stable-sorted by the injected ordering.
pub fn build_assets(ctx: &TransferContext, registry: &Registry, fee_amount: u128) -> Vec<Asset> {
    if let Some(override_) = &ctx.options.overridden_asset {
        return match override_ {
            AssetOverride::Assets(assets) => assets.clone(),
            AssetOverride::Location(location) => {
                vec![Asset::new(ctx.asset.amount, location.clone())]
            }
        };
    }

    let mut assets = Vec::with_capacity(2);
    if !ctx.is_relay_asset {
        assets.push(Asset::new(fee_amount, relay_location()));
    }
    assets.push(Asset::new(
        ctx.asset.amount,
        localize_location(registry, ctx.origin.chain, &ctx.asset.location),
    ));

    let default_ordering = CanonicalAssetOrdering;
    let ordering: &dyn AssetOrdering = match &ctx.options.asset_ordering {
        Some(ordering) => ordering.as_ref(),
        None => &default_ordering,
    };
    assets.sort_by(|a, b| ordering.compare(a, b));
    assets
}

/// Assembles the final call from an already-built program and asset list.
pub fn build_final_call(
    ctx: &TransferContext,
    registry: &Registry,
    program: Vec<Instruction>,
    assets: Vec<Asset>,
) -> Result<FinalCall> {
    let version = ctx.options.version;
    let transfer_type = classify(registry, ctx.origin.chain, ctx.reserve.chain);

    // The call's dest is the first hop's target: the reserve when it
    // mediates, otherwise the destination itself.
    let hop_target = if ctx.origin.chain == ctx.reserve.chain {
        ctx.dest.chain
    } else {
        ctx.reserve.chain
    };
    let dest = destination_location(registry, ctx.origin.chain, hop_target, None);

    let remote_fees_id = if ctx.is_relay_asset {
        localize_location(registry, ctx.origin.chain, &ctx.asset.location)
    } else {
        relay_location()
    };

    let module = ctx.options.pallet.clone().unwrap_or_else(|| {
        if registry.is_relay_chain(ctx.origin.chain) {
            RELAY_PALLET.to_string()
        } else {
            PARACHAIN_PALLET.to_string()
        }
    });
    let method = ctx.options.method.clone().unwrap_or_else(|| TRANSFER_METHOD.to_string());

    Ok(FinalCall {
        module,
        method,
        params: TypeAndThenParams {
            dest: Versioned::new(version, dest),
            assets: Versioned::new(version, assets),
            assets_transfer_type: transfer_type,
            remote_fees_id: Versioned::new(version, remote_fees_id),
            fees_transfer_type: transfer_type,
            custom_xcm_on_dest: Versioned::new(version, program),
            weight_limit: WeightLimit::Unlimited,
        },
    })
}
