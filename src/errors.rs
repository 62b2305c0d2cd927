//! Error definitions for transfer construction.
//!
//! Every failure surfaces to the caller as one of these kinds; the engine
//! never retries a collaborator call or substitutes a fallback value.

use thiserror::Error;

use crate::chains::ChainId;

#[derive(Debug, Error)]
pub enum Error {
    /// A destination chain was not supplied in the transfer options.
    #[error("destination chain must be specified for a type-and-then transfer")]
    MissingDestination,

    /// The caller supplied options the protocol forbids for this route.
    #[error("invalid transfer configuration: {0}")]
    InvalidConfiguration(String),

    /// The committed amount cannot cover its own forwarding fee.
    #[error("amount {amount} cannot cover forwarding fees of {required}")]
    AmountTooLow { amount: u128, required: u128 },

    /// The bridge reported a halted status; no transfer is possible.
    #[error("bridge is halted, transfers are suspended")]
    BridgeHalted,

    /// Initializing an execution handle for a chain failed.
    #[error("failed to initialize execution handle for {chain}")]
    HandleInit {
        chain: ChainId,
        #[source]
        source: anyhow::Error,
    },

    /// A fee-quote call against a chain failed.
    #[error("fee quote failed on {chain}")]
    FeeQuote {
        chain: ChainId,
        #[source]
        source: anyhow::Error,
    },

    /// Querying the bridge status collaborator failed.
    #[error("failed to query bridge status")]
    BridgeStatusQuery(#[source] anyhow::Error),

    /// The origin chain rejected the constructed call in a dry run.
    #[error("dry run rejected the constructed call: {reason}")]
    DryRunFailed { reason: String },

    /// A beneficiary address could not be encoded as an account junction.
    #[error("invalid beneficiary address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, Error>;
