//! Cross-chain transfer construction engine.
//!
//! Builds outbound asset-transfer calls for a multi-chain network where
//! assets hop through a reserve chain: classifies the transfer, computes
//! per-hop fees through an estimate-then-commit loop, and assembles the
//! nested hop program with refund and bridge-halt guards. Chain access is
//! injected through the [`client::ExecutionHandle`] trait; the engine is a
//! pure transformation library with no connection management of its own.

pub mod asset;
pub mod chains;
pub mod client;
pub mod config;
pub mod errors;
pub mod instruction;
pub mod location;
pub mod transfer;

// Re-export commonly used types
pub use asset::{Asset, AssetInfo, AssetOrdering, CanonicalAssetOrdering, Fungibility};
pub use chains::{ChainId, NativeAsset, Registry};
pub use client::{BridgeStatus, DryRunResult, ExecutionHandle};
pub use config::{ChainOverride, RegistryConfig};
pub use errors::{Error, Result};
pub use instruction::{
    AssetFilter, Instruction, TopicId, Versioned, WeightLimit, WildAsset, WildFungibility,
    XcmVersion,
};
pub use location::{
    beneficiary_location, destination_location, localize_location, relay_location, Junction,
    Location, NetworkId,
};
pub use transfer::{
    amount_probe, build_custom_program, classify, compute_all_fees, construct_call,
    create_transfer, refund_appendix, resolve_context, AmountAdjustment, AssetOverride, ChainRef,
    DryRunProbe, FinalCall, Phase, TransferContext, TransferFees, TransferOptions, TransferType,
    TypeAndThenParams,
};
