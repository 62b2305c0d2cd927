//! Transfer construction.
//!
//! Entry point for building one outbound cross-chain transfer call:
//! resolve chain roles, guard against a halted bridge, compute fees in two
//! phases, and assemble the final extrinsic description.
//!
//! Flow:
//! 1. **Resolve context**: reserve lookup, handle cloning/initialization
//! 2. **Bridge guard**: abort before any fee work if the bridge is halted
//! 3. **Phase 1**: provisional program, sequential fee quotes, one dry run
//! 4. **Phase 2**: final program and call with the committed fees

pub mod call;
pub mod classify;
pub mod context;
pub mod fees;
pub mod program;

pub use call::{build_assets, build_final_call, FinalCall, TypeAndThenParams};
pub use classify::{classify, TransferType};
pub use context::{resolve_context, ChainRef, TransferContext};
pub use fees::{
    compute_all_fees, one_unit, pad_fee_by, AmountAdjustment, DryRunProbe, Phase, TransferFees,
};
pub use program::{bridge_topic_id, build_custom_program, refund_appendix};

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::asset::{AssetInfo, AssetOrdering};
use crate::chains::{ChainId, Registry};
use crate::client::{BridgeStatus, ExecutionHandle};
use crate::errors::{Error, Result};
use crate::instruction::XcmVersion;
use crate::location::Location;

/// Caller-supplied replacement for the computed asset list.
#[derive(Debug, Clone)]
pub enum AssetOverride {
    /// Full asset list, used verbatim.
    Assets(Vec<crate::asset::Asset>),
    /// Single location, wrapped with the full transfer amount.
    Location(Location),
}

/// Caller options for one transfer attempt.
#[derive(Clone)]
pub struct TransferOptions {
    /// Handle connected to the origin chain.
    pub handle: Arc<dyn ExecutionHandle>,
    pub asset: AssetInfo,
    /// Required; a missing destination is a configuration error.
    pub dest_chain: Option<ChainId>,
    /// Recipient address on the destination chain.
    pub address: String,
    /// Enables the refund appendix and bridge-leg correlation.
    pub sender_address: Option<String>,
    /// Pins the destination para id instead of deriving it.
    pub para_id_to: Option<u32>,
    pub version: XcmVersion,
    /// Forces the reserve chain instead of deriving it.
    pub reserve_override: Option<ChainId>,
    pub overridden_asset: Option<AssetOverride>,
    /// Pallet name override for the final call.
    pub pallet: Option<String>,
    /// Method name override for the final call.
    pub method: Option<String>,
    /// Asset-list ordering override.
    pub asset_ordering: Option<Arc<dyn AssetOrdering>>,
}

impl TransferOptions {
    pub fn new(
        handle: Arc<dyn ExecutionHandle>,
        asset: AssetInfo,
        dest_chain: ChainId,
        address: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            asset,
            dest_chain: Some(dest_chain),
            address: address.into(),
            sender_address: None,
            para_id_to: None,
            version: XcmVersion::default(),
            reserve_override: None,
            overridden_asset: None,
            pallet: None,
            method: None,
            asset_ordering: None,
        }
    }
}

impl fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferOptions")
            .field("asset", &self.asset)
            .field("dest_chain", &self.dest_chain)
            .field("address", &self.address)
            .field("sender_address", &self.sender_address)
            .field("para_id_to", &self.para_id_to)
            .field("version", &self.version)
            .field("reserve_override", &self.reserve_override)
            .field("overridden_asset", &self.overridden_asset)
            .finish_non_exhaustive()
    }
}

/// Builds the full call for a context in the given fee phase.
///
/// Both phases run through here: estimation with probe values, commitment
/// with the real fees.
pub fn construct_call(
    ctx: &TransferContext,
    registry: &Registry,
    phase: Phase,
) -> Result<FinalCall> {
    let asset_count = if ctx.is_relay_asset { 1 } else { 2 };
    let refund = refund_appendix(ctx, asset_count)?;
    let system_asset_amount = match phase {
        Phase::Estimate => one_unit(ctx.system_asset.decimals),
        Phase::Commit(fees) => fees.dest_fee + fees.hop_fees,
    };
    let program =
        build_custom_program(ctx, registry, asset_count, &phase, system_asset_amount, refund.as_ref())?;
    let assets = build_assets(ctx, registry, system_asset_amount);
    build_final_call(ctx, registry, program, assets)
}

/// The dry-run substitution probe for a resolved context.
///
/// Substitutes the adjusted amount into a fresh context, rebuilds the full
/// call, and has the origin handle execute it as a dry run. The original
/// context is never mutated, so a later build still sees the caller's true
/// amount.
pub fn amount_probe<'a>(ctx: &'a TransferContext, registry: &'a Registry) -> DryRunProbe<'a> {
    Box::new(move |adjustment| -> futures::future::BoxFuture<'a, Result<crate::client::DryRunResult>> {
        Box::pin(async move {
            let amount = match adjustment {
                None => ctx.asset.amount,
                Some(adj) if adj.relative => ctx.asset.amount + adj.delta,
                Some(adj) => adj.delta,
            };
            let probed = ctx.with_amount(amount);
            let call = construct_call(&probed, registry, Phase::Estimate)?;
            probed
                .origin
                .handle
                .deserialize_extrinsics(&call)
                .await
                .map_err(|e| Error::DryRunFailed { reason: e.to_string() })
        })
    })
}

/// Constructs one outbound transfer call end to end.
///
/// # Arguments
///
/// * `origin` - Chain the sender's funds live on
/// * `registry` - Routing knowledge for the supported chain set
/// * `options` - Caller options; the handle must be connected to `origin`
///
/// # Returns
///
/// * `Ok(FinalCall)` - Fully assembled call ready for submission
/// * `Err(Error)` - First failure from resolution, guarding, quoting, or
///   assembly, surfaced undecorated
pub async fn create_transfer(
    origin: ChainId,
    registry: &Registry,
    options: TransferOptions,
) -> Result<FinalCall> {
    let ctx = resolve_context(origin, registry, options).await?;

    if ctx.is_snowbridge {
        let guard = ctx.origin.handle.clone_handle();
        let status = guard.bridge_status().await.map_err(Error::BridgeStatusQuery)?;
        if status == BridgeStatus::Halted {
            return Err(Error::BridgeHalted);
        }
    }

    let probe = amount_probe(&ctx, registry);
    let fees = compute_all_fees(&ctx, registry, &probe).await?;

    let call = construct_call(&ctx, registry, Phase::Commit(fees))?;
    info!(
        "constructed transfer call: origin={} dest={} reserve={} type={:?}",
        ctx.origin.chain, ctx.dest.chain, ctx.reserve.chain, call.params.assets_transfer_type
    );
    Ok(call)
}
