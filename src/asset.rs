//! Asset values and asset ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// The asset being moved, as the caller describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub amount: u128,
    pub location: Location,
    pub decimals: u32,
    pub symbol: String,
}

/// Fungibility of an asset entry in a call parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fungibility {
    Fungible(u128),
}

/// An asset entry as it appears in call parameters and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Location,
    pub fun: Fungibility,
}

impl Asset {
    pub fn new(amount: u128, id: Location) -> Self {
        Self { id, fun: Fungibility::Fungible(amount) }
    }

    pub fn amount(&self) -> u128 {
        let Fungibility::Fungible(amount) = self.fun;
        amount
    }
}

/// Total order over asset entries, injected into call assembly.
///
/// Only stability and determinism are relied upon; the concrete order is a
/// collaborator concern.
pub trait AssetOrdering: Send + Sync {
    fn compare(&self, a: &Asset, b: &Asset) -> Ordering;
}

/// Canonical structural order: by parents, then by the serialized interior
/// path. Deterministic across runs and platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalAssetOrdering;

impl AssetOrdering for CanonicalAssetOrdering {
    fn compare(&self, a: &Asset, b: &Asset) -> Ordering {
        a.id.parents.cmp(&b.id.parents).then_with(|| {
            let left = serde_json::to_string(&a.id.interior).unwrap_or_default();
            let right = serde_json::to_string(&b.id.interior).unwrap_or_default();
            left.cmp(&right)
        })
    }
}
