//! The instruction vocabulary of hop programs.
//!
//! A program is an ordered sequence of [`Instruction`]s; ordering is
//! semantically significant and is preserved exactly as constructed.
//! Nested forwarding instructions carry the program the next chain runs.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::asset::Asset;
use crate::location::Location;

/// Supported message format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XcmVersion {
    V3,
    V4,
    V5,
}

impl Default for XcmVersion {
    fn default() -> Self {
        XcmVersion::V4
    }
}

impl fmt::Display for XcmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A value wrapped with its format version, serialized as `{"V4": value}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: XcmVersion,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: XcmVersion, value: T) -> Self {
        Self { version, value }
    }
}

impl<T: Serialize> Serialize for Versioned<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.version, &self.value)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightLimit {
    Unlimited,
    Limited { ref_time: u64, proof_size: u64 },
}

/// Wildcard fungibility marker used by `AllOf` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildFungibility {
    Fungible,
    NonFungible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildAsset {
    All,
    AllCounted(u32),
    AllOf { id: Location, fun: WildFungibility },
}

/// Which assets an instruction operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetFilter {
    Wild(WildAsset),
    Definite(Vec<Asset>),
}

/// Correlation marker attached to bridge legs, serialized as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicId(pub [u8; 32]);

impl Serialize for TopicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// One step of a hop program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instruction {
    /// Terminal hop: put the filtered assets into the beneficiary account.
    DepositAsset { assets: AssetFilter, beneficiary: Location },
    /// Earmark assets to pay for executing the remaining instructions.
    BuyExecution { fees: Asset, weight_limit: WeightLimit },
    /// Move reserve-backed assets onward and run `xcm` on the target.
    DepositReserveAsset { assets: AssetFilter, dest: Location, xcm: Vec<Instruction> },
    /// Teleport assets onward and run `xcm` on the target.
    InitiateTeleport { assets: AssetFilter, dest: Location, xcm: Vec<Instruction> },
    /// Safety net run after the main program, refunding leftovers.
    SetAppendix(Vec<Instruction>),
    /// Idempotency/correlation marker for bridge legs.
    SetTopic(TopicId),
}

impl Instruction {
    /// The nested forwarding program, if this is a forwarding instruction.
    pub fn forwarded_program(&self) -> Option<&[Instruction]> {
        match self {
            Instruction::DepositReserveAsset { xcm, .. }
            | Instruction::InitiateTeleport { xcm, .. } => Some(xcm),
            _ => None,
        }
    }
}
