//! Hop-program construction.
//!
//! Builds the nested instruction tree executed on the first hop target:
//! either a bare deposit, a deposit plus bridge topic, or a forwarding
//! wrapper (reserve-backed or teleport) whose inner program buys execution
//! and deposits on the final destination. The same builder serves both fee
//! phases; [`Phase`] decides between probe values and committed fees.

use sha2::{Digest, Sha256};

use crate::asset::Asset;
use crate::chains::Registry;
use crate::errors::{Error, Result};
use crate::instruction::{
    AssetFilter, Instruction, TopicId, WeightLimit, WildAsset, WildFungibility,
};
use crate::location::{destination_location, localize_location, relay_location, Location};
use crate::transfer::context::TransferContext;
use crate::transfer::fees::Phase;

/// The refund appendix attached when a sender address is known: leftovers
/// on the hop chain go back to the sender instead of being trapped.
///
/// Sub-bridge legs get no appendix; the bridge consumes every asset it is
/// given.
pub fn refund_appendix(ctx: &TransferContext, asset_count: u32) -> Result<Option<Instruction>> {
    if ctx.is_sub_bridge {
        return Ok(None);
    }
    let sender = match &ctx.options.sender_address {
        Some(sender) => sender,
        None => return Ok(None),
    };
    let beneficiary = ctx
        .origin
        .handle
        .encode_beneficiary(sender, ctx.options.version)
        .map_err(|e| Error::InvalidAddress(e.to_string()))?;
    Ok(Some(Instruction::SetAppendix(vec![Instruction::DepositAsset {
        assets: AssetFilter::Wild(WildAsset::AllCounted(asset_count)),
        beneficiary,
    }])))
}

/// Deterministic correlation id for a bridge leg, stable across retries of
/// the same logical transfer.
pub fn bridge_topic_id(
    sender: &str,
    origin_para_id: u32,
    asset_location: &Location,
    dest_address: &str,
    amount: u128,
) -> Result<TopicId> {
    let location_json = serde_json::to_string(asset_location)
        .map_err(|e| Error::InvalidConfiguration(format!("asset location: {e}")))?;
    let address_json = serde_json::to_string(dest_address)
        .map_err(|e| Error::InvalidConfiguration(format!("destination address: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(sender.as_bytes());
    hasher.update(origin_para_id.to_le_bytes());
    hasher.update(location_json.as_bytes());
    hasher.update(address_json.as_bytes());
    hasher.update(amount.to_le_bytes());
    Ok(TopicId(hasher.finalize().into()))
}

/// Builds the hop program for one transfer attempt.
///
/// `asset_count` is 1 when only the transferred asset travels, 2 when a
/// separate relay-native fee asset accompanies it. `system_asset_amount`
/// funds buy-execution probes while estimating and carries the committed
/// fee total afterwards. A supplied refund instruction is prepended ahead
/// of the forwarding wrapper, never inside it.
pub fn build_custom_program(
    ctx: &TransferContext,
    registry: &Registry,
    asset_count: u32,
    phase: &Phase,
    system_asset_amount: u128,
    refund: Option<&Instruction>,
) -> Result<Vec<Instruction>> {
    let fee_asset_location = if ctx.is_relay_asset {
        ctx.asset.location.clone()
    } else {
        relay_location()
    };

    // Sub-bridge deposits land on the origin-side hop, which addresses
    // accounts the way the destination network does.
    let beneficiary_handle = if ctx.is_sub_bridge { &ctx.dest.handle } else { &ctx.origin.handle };
    let beneficiary = beneficiary_handle
        .encode_beneficiary(&ctx.options.address, ctx.options.version)
        .map_err(|e| Error::InvalidAddress(e.to_string()))?;

    let deposit_filter = if asset_count == 1 {
        AssetFilter::Wild(WildAsset::AllOf {
            id: localize_location(registry, ctx.dest.chain, &ctx.asset.location),
            fun: WildFungibility::Fungible,
        })
    } else {
        AssetFilter::Wild(WildAsset::AllCounted(asset_count))
    };
    let deposit = Instruction::DepositAsset { assets: deposit_filter, beneficiary };

    let three_party_hop =
        ctx.origin.chain != ctx.reserve.chain && ctx.dest.chain != ctx.reserve.chain;

    if ctx.is_sub_bridge || three_party_hop {
        let buy_amount = match phase {
            // A rough probe: half of what travels is enough to draw a real
            // quote without being rejected outright.
            Phase::Estimate => {
                if ctx.is_relay_asset {
                    ctx.asset.amount / 2
                } else {
                    system_asset_amount / 2
                }
            }
            Phase::Commit(fees) => {
                if ctx.is_relay_asset {
                    ctx.asset.amount.checked_sub(fees.hop_fees).ok_or(Error::AmountTooLow {
                        amount: ctx.asset.amount,
                        required: fees.hop_fees,
                    })?
                } else {
                    fees.dest_fee
                }
            }
        };

        let buy_execution = Instruction::BuyExecution {
            fees: Asset::new(
                buy_amount,
                localize_location(registry, ctx.dest.chain, &fee_asset_location),
            ),
            weight_limit: WeightLimit::Unlimited,
        };

        let filter = if phase.is_estimate() {
            AssetFilter::Wild(WildAsset::All)
        } else {
            let fees = phase.fees();
            let mut assets = Vec::with_capacity(2);
            if !ctx.is_relay_asset {
                assets.push(Asset::new(
                    fees.hop_fees + fees.dest_fee,
                    localize_location(registry, ctx.reserve.chain, &relay_location()),
                ));
            }
            assets.push(Asset::new(
                ctx.asset.amount,
                localize_location(registry, ctx.reserve.chain, &ctx.asset.location),
            ));
            AssetFilter::Definite(assets)
        };

        let dest = destination_location(
            registry,
            ctx.reserve.chain,
            ctx.dest.chain,
            ctx.options.para_id_to,
        );
        let inner = vec![buy_execution, deposit];

        let forward = if registry.is_teleport_trusted(ctx.reserve.chain, ctx.dest.chain) {
            Instruction::InitiateTeleport { assets: filter, dest, xcm: inner }
        } else {
            Instruction::DepositReserveAsset { assets: filter, dest, xcm: inner }
        };

        let mut program = Vec::with_capacity(2);
        if let Some(refund) = refund {
            program.push(refund.clone());
        }
        program.push(forward);
        return Ok(program);
    }

    if ctx.is_snowbridge {
        // Bridge leg without a reserve hop: the deposit is correlated with
        // a topic so the bridge can deduplicate redeliveries.
        let sender = ctx.options.sender_address.as_deref().ok_or_else(|| {
            Error::InvalidConfiguration("sender address is required for bridge transfers".into())
        })?;
        let topic = bridge_topic_id(
            sender,
            registry.para_id(ctx.origin.chain),
            &ctx.asset.location,
            &ctx.options.address,
            ctx.asset.amount,
        )?;
        return Ok(vec![deposit, Instruction::SetTopic(topic)]);
    }

    // Origin, destination, and reserve coincide pairwise: a direct deposit
    // needs no forwarding and no refund net.
    Ok(vec![deposit])
}
