//! Two-phase fee computation.
//!
//! Phase 1 builds a provisional hop program with probe amounts and draws
//! real fee quotes from the chains that will execute each piece; Phase 2 is
//! the final construction with those fees committed. Quote calls are issued
//! strictly sequentially: later calls are conditioned on the shape the
//! earlier ones were quoted for.

use futures::future::BoxFuture;
use tracing::debug;

use crate::chains::Registry;
use crate::client::DryRunResult;
use crate::errors::{Error, Result};
use crate::instruction::{Instruction, Versioned};
use crate::location::relay_location;
use crate::transfer::context::{ChainRef, TransferContext};
use crate::transfer::program::{build_custom_program, refund_appendix};

/// Committed per-hop fees of one transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferFees {
    /// Fees consumed on the intermediate hop: forwarding plus refund net.
    pub hop_fees: u128,
    /// Fee bought on the final destination.
    pub dest_fee: u128,
}

/// Which fee phase a construction runs in. Estimation tolerates rough
/// probe values; committed fees are final and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Estimate,
    Commit(TransferFees),
}

impl Phase {
    pub fn is_estimate(&self) -> bool {
        matches!(self, Phase::Estimate)
    }

    /// Committed fees, or the zero value while estimating.
    pub fn fees(&self) -> TransferFees {
        match self {
            Phase::Estimate => TransferFees::default(),
            Phase::Commit(fees) => *fees,
        }
    }
}

/// Caller-adjustable amount for a dry-run probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountAdjustment {
    pub delta: u128,
    /// Add `delta` to the original amount instead of replacing it.
    pub relative: bool,
}

/// Injected dry-run strategy: rebuilds the whole call with an optionally
/// adjusted amount and executes it against the origin chain.
pub type DryRunProbe<'a> =
    Box<dyn Fn(Option<AmountAdjustment>) -> BoxFuture<'a, Result<DryRunResult>> + Send + Sync + 'a>;

/// One whole unit of an asset with the given decimals.
pub fn one_unit(decimals: u32) -> u128 {
    10u128.pow(decimals)
}

/// Pads a quoted fee by a percentage margin.
pub fn pad_fee_by(fee: u128, percent: u32) -> u128 {
    fee + fee * u128::from(percent) / 100
}

async fn padded_quote(
    target: &ChainRef,
    program: Vec<Instruction>,
    ctx: &TransferContext,
    pad_percent: u32,
) -> Result<u128> {
    let versioned = Versioned::new(ctx.options.version, program);
    let fee = target
        .handle
        .execution_fee_quote(target.chain, &versioned, &relay_location(), true)
        .await
        .map_err(|e| Error::FeeQuote { chain: target.chain, source: e })?;
    Ok(pad_fee_by(fee, pad_percent))
}

/// Prefers the first chain that exposes the XCM payment API.
fn quoting_target<'a>(
    registry: &Registry,
    preferred: &'a ChainRef,
    fallback: &'a ChainRef,
) -> &'a ChainRef {
    if registry.has_xcm_payment_api(preferred.chain) {
        preferred
    } else {
        fallback
    }
}

/// Phase 1: derives the committed fees for a transfer.
///
/// Builds the provisional program, quotes each piece against the chain
/// that will execute it, and validates the construction with one dry run
/// through `probe` whenever any quote was issued. Relay-native single-hop
/// transfers are fee-free from this engine's perspective and issue no
/// calls at all.
pub async fn compute_all_fees(
    ctx: &TransferContext,
    registry: &Registry,
    probe: &DryRunProbe<'_>,
) -> Result<TransferFees> {
    let asset_count = if ctx.is_relay_asset { 1 } else { 2 };
    let refund = refund_appendix(ctx, asset_count)?;
    let provisional_amount = one_unit(ctx.system_asset.decimals);
    let program = build_custom_program(
        ctx,
        registry,
        asset_count,
        &Phase::Estimate,
        provisional_amount,
        refund.as_ref(),
    )?;

    let pad = registry.fee_pad_percent(ctx.reserve.chain, ctx.dest.chain, &ctx.asset.location);

    let forwarding = program.iter().find(|i| i.forwarded_program().is_some());

    let (reserve_fee, refund_fee, dest_fee) = if let Some(wrapper) = forwarding {
        let inner = wrapper.forwarded_program().unwrap_or_default().to_vec();
        let reserve_fee = padded_quote(&ctx.reserve, vec![wrapper.clone()], ctx, pad).await?;
        let refund_fee = match &refund {
            Some(refund) => padded_quote(&ctx.reserve, vec![refund.clone()], ctx, pad).await?,
            None => 0,
        };
        let target = quoting_target(registry, &ctx.dest, &ctx.reserve);
        let dest_fee = padded_quote(target, inner, ctx, pad).await?;
        (reserve_fee, refund_fee, dest_fee)
    } else if !ctx.is_relay_asset {
        let dest_target = quoting_target(registry, &ctx.dest, &ctx.reserve);
        let dest_fee = padded_quote(dest_target, program.clone(), ctx, pad).await?;
        let refund_fee = match &refund {
            Some(refund) => {
                let target = quoting_target(registry, &ctx.reserve, &ctx.dest);
                padded_quote(target, vec![refund.clone()], ctx, pad).await?
            }
            None => 0,
        };
        (0, refund_fee, dest_fee)
    } else {
        debug!("relay-native single-hop transfer, no fee computation needed");
        return Ok(TransferFees::default());
    };

    let dry_run = probe(None).await?;
    if !dry_run.success {
        return Err(Error::DryRunFailed {
            reason: dry_run.failure_reason.unwrap_or_else(|| "unspecified".to_string()),
        });
    }

    let fees = TransferFees { hop_fees: reserve_fee + refund_fee, dest_fee };
    debug!(
        "computed transfer fees: hop_fees={} dest_fee={} (pad {}%)",
        fees.hop_fees, fees.dest_fee, pad
    );
    Ok(fees)
}
