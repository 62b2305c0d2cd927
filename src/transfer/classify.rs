//! Transfer-type classification.

use serde::Serialize;

use crate::chains::{ChainId, Registry};

/// How a transfer leg moves value between origin and reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferType {
    /// The origin holds the reserve itself.
    LocalReserve,
    /// The reserve sits on the destination side of the leg.
    DestinationReserve,
    /// Origin and reserve mutually trust each other's issuance.
    Teleport,
}

/// Classifies the leg between `origin` and `reserve`.
///
/// Pure over the chain pair: equality means a local reserve, mutual
/// teleport trust means a teleport, anything else is mediated by the
/// destination-side reserve.
pub fn classify(registry: &Registry, origin: ChainId, reserve: ChainId) -> TransferType {
    if origin == reserve {
        TransferType::LocalReserve
    } else if registry.is_teleport_trusted(origin, reserve) {
        TransferType::Teleport
    } else {
        TransferType::DestinationReserve
    }
}
