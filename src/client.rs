//! Execution-handle abstraction.
//!
//! One handle per chain role. The engine never manages connections itself:
//! opening, dry-running, and fee-quoting all go through this trait, and
//! callers inject whatever implementation talks to their infrastructure.
//! Timeouts, retries, and connection-level cancellation are the
//! implementation's responsibility.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chains::ChainId;
use crate::instruction::{Instruction, Versioned, XcmVersion};
use crate::location::{beneficiary_location, Location};
use crate::transfer::FinalCall;

/// Reported state of a bridge between consensus systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    Normal,
    Halted,
}

/// Outcome of executing a constructed call against a chain without
/// submitting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunResult {
    pub success: bool,
    /// Execution fee the origin chain reported consuming.
    pub fee: u128,
    pub failure_reason: Option<String>,
}

/// A connection to one chain's execution environment.
///
/// Handles are independently owned per chain role; a handle may be shared
/// by reference when two roles coincide, and is cloned-and-initialized
/// fresh otherwise. Implementations must tolerate `init` being called once
/// per clone.
#[async_trait]
pub trait ExecutionHandle: Send + Sync {
    /// Connect this handle to `chain`. Must complete before any other call.
    async fn init(&self, chain: ChainId) -> anyhow::Result<()>;

    /// An independent, lazily-initializable copy of this handle.
    fn clone_handle(&self) -> Arc<dyn ExecutionHandle>;

    /// Deserialize the call and execute it as a dry run on this chain.
    async fn deserialize_extrinsics(&self, call: &FinalCall) -> anyhow::Result<DryRunResult>;

    /// Quote the execution fee of `program` on `chain`, denominated in
    /// `fee_asset`.
    async fn execution_fee_quote(
        &self,
        chain: ChainId,
        program: &Versioned<Vec<Instruction>>,
        fee_asset: &Location,
        include_fee: bool,
    ) -> anyhow::Result<u128>;

    /// Current status of the bridge this handle's chain fronts.
    async fn bridge_status(&self) -> anyhow::Result<BridgeStatus>;

    /// Encode a beneficiary address in this chain's addressing scheme.
    ///
    /// The default accepts hex-encoded 32-byte or 20-byte account keys;
    /// chains with bespoke account schemes override this.
    fn encode_beneficiary(&self, address: &str, version: XcmVersion) -> anyhow::Result<Location> {
        beneficiary_location(address, version).map_err(anyhow::Error::from)
    }
}
