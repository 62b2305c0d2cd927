//! File-driven registry overrides.
//!
//! The built-in chain tables are correct for the supported networks today;
//! deployments tracking runtime upgrades can override individual entries
//! from a TOML document instead of waiting for a release.
//!
//! ```toml
//! [[chains]]
//! chain = "Hydration"
//! xcm_payment_api = false
//! fee_pad_percent = 300
//! ```

use serde::Deserialize;

use crate::chains::ChainId;
use crate::errors::{Error, Result};

/// Per-chain override entry. Absent fields keep the built-in value.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainOverride {
    pub chain: ChainId,
    #[serde(default)]
    pub para_id: Option<u32>,
    /// Treat the chain as a system parachain (affects teleport trust).
    #[serde(default)]
    pub system: Option<bool>,
    /// Whether the runtime exposes the XCM payment API.
    #[serde(default)]
    pub xcm_payment_api: Option<bool>,
    /// Quote padding margin when this chain is the reserve, in percent.
    #[serde(default)]
    pub fee_pad_percent: Option<u32>,
}

/// Root of the registry override document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub chains: Vec<ChainOverride>,
}

impl RegistryConfig {
    /// Parse overrides from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::InvalidConfiguration(format!("registry overrides: {e}")))
    }
}
