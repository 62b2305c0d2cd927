//! Shared test helpers: a scripted execution handle and common fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use xcm_transfer_engine::{
    AssetInfo, BridgeStatus, ChainId, DryRunResult, ExecutionHandle, FinalCall, Instruction,
    Junction, Location, Versioned,
};

/// 32-byte hex account key used as the default recipient.
pub const ALICE: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";
/// 32-byte hex account key used as the default sender.
pub const BOB: &str = "0x0202020202020202020202020202020202020202020202020202020202020202";
/// 20-byte hex account key for EVM-addressed chains.
pub const EVM_RECIPIENT: &str = "0x0303030303030303030303030303030303030303";

/// One recorded fee-quote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub chain: ChainId,
    pub program_len: usize,
}

/// Shared recorder behind every clone of a [`MockHandle`].
///
/// Cloned handles write into the same state so tests can assert on the
/// combined call sequence across all chain roles.
pub struct MockState {
    pub quote_fee: Mutex<u128>,
    pub quote_calls: Mutex<Vec<QuoteRecord>>,
    pub init_calls: Mutex<Vec<ChainId>>,
    pub clone_count: Mutex<u32>,
    pub dry_run_calls: Mutex<Vec<FinalCall>>,
    pub bridge_status: Mutex<BridgeStatus>,
    pub dry_run_result: Mutex<DryRunResult>,
    pub fail_quotes: Mutex<bool>,
    pub fail_init_on: Mutex<Option<ChainId>>,
}

impl MockState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            quote_fee: Mutex::new(1000),
            quote_calls: Mutex::new(Vec::new()),
            init_calls: Mutex::new(Vec::new()),
            clone_count: Mutex::new(0),
            dry_run_calls: Mutex::new(Vec::new()),
            bridge_status: Mutex::new(BridgeStatus::Normal),
            dry_run_result: Mutex::new(DryRunResult {
                success: true,
                fee: 500,
                failure_reason: None,
            }),
            fail_quotes: Mutex::new(false),
            fail_init_on: Mutex::new(None),
        })
    }

    pub fn quote_call_count(&self) -> usize {
        self.quote_calls.lock().unwrap().len()
    }

    pub fn quoted_chains(&self) -> Vec<ChainId> {
        self.quote_calls.lock().unwrap().iter().map(|r| r.chain).collect()
    }
}

/// Execution handle whose responses are scripted through [`MockState`].
pub struct MockHandle {
    pub state: Arc<MockState>,
}

#[async_trait]
impl ExecutionHandle for MockHandle {
    async fn init(&self, chain: ChainId) -> anyhow::Result<()> {
        if *self.state.fail_init_on.lock().unwrap() == Some(chain) {
            anyhow::bail!("endpoint unreachable for {chain}");
        }
        self.state.init_calls.lock().unwrap().push(chain);
        Ok(())
    }

    fn clone_handle(&self) -> Arc<dyn ExecutionHandle> {
        *self.state.clone_count.lock().unwrap() += 1;
        Arc::new(MockHandle { state: Arc::clone(&self.state) })
    }

    async fn deserialize_extrinsics(&self, call: &FinalCall) -> anyhow::Result<DryRunResult> {
        self.state.dry_run_calls.lock().unwrap().push(call.clone());
        Ok(self.state.dry_run_result.lock().unwrap().clone())
    }

    async fn execution_fee_quote(
        &self,
        chain: ChainId,
        program: &Versioned<Vec<Instruction>>,
        _fee_asset: &Location,
        _include_fee: bool,
    ) -> anyhow::Result<u128> {
        if *self.state.fail_quotes.lock().unwrap() {
            anyhow::bail!("payment api unavailable");
        }
        self.state
            .quote_calls
            .lock()
            .unwrap()
            .push(QuoteRecord { chain, program_len: program.value.len() });
        Ok(*self.state.quote_fee.lock().unwrap())
    }

    async fn bridge_status(&self) -> anyhow::Result<BridgeStatus> {
        Ok(*self.state.bridge_status.lock().unwrap())
    }
}

/// A scripted handle plus its shared recorder.
pub fn test_handle() -> (Arc<MockState>, Arc<dyn ExecutionHandle>) {
    let state = MockState::new();
    let handle: Arc<dyn ExecutionHandle> = Arc::new(MockHandle { state: Arc::clone(&state) });
    (state, handle)
}

/// Relay-native asset (DOT) with the given amount.
pub fn relay_asset(amount: u128) -> AssetInfo {
    AssetInfo {
        amount,
        location: Location::new(1, vec![]),
        decimals: 10,
        symbol: "DOT".to_string(),
    }
}

/// An Asset Hub asset as seen from a sibling parachain.
pub fn hub_asset_from_sibling(amount: u128) -> AssetInfo {
    AssetInfo {
        amount,
        location: Location::new(
            1,
            vec![Junction::Parachain(1000), Junction::PalletInstance(50), Junction::GeneralIndex(1984)],
        ),
        decimals: 6,
        symbol: "USDT".to_string(),
    }
}

/// A chain-local asset as seen from its own chain.
pub fn local_hub_asset(amount: u128) -> AssetInfo {
    AssetInfo {
        amount,
        location: Location::new(
            0,
            vec![Junction::PalletInstance(50), Junction::GeneralIndex(1984)],
        ),
        decimals: 6,
        symbol: "USDT".to_string(),
    }
}

/// An Ethereum-bridged asset as seen from an Asset Hub.
pub fn ether_asset(amount: u128) -> AssetInfo {
    AssetInfo {
        amount,
        location: Location::new(
            2,
            vec![Junction::GlobalConsensus(xcm_transfer_engine::NetworkId::Ethereum {
                chain_id: 1,
            })],
        ),
        decimals: 18,
        symbol: "WETH".to_string(),
    }
}
