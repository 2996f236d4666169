//! Minimal Solana JSON-RPC client: block lookup and token account scans.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lottery_primitives::constants::{CLASSIC_ACCOUNT_LEN, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::RpcError;

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct BlockInfo {
    blockhash: Option<String>,
}

#[derive(Deserialize)]
struct ProgramAccount {
    account: AccountInfo,
}

#[derive(Deserialize)]
struct AccountInfo {
    /// `[data, encoding]`
    data: Vec<String>,
}

pub struct RpcClient {
    url: String,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(settings: &Settings) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { url: settings.rpc_url.clone(), http })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<Option<T>, RpcError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let body: RpcResponse<T> = resp.json().await?;
        if let Some(err) = body.error {
            return Err(RpcError::Node { method, detail: err.to_string() });
        }
        Ok(body.result)
    }

    /// Current finalized slot.
    pub async fn get_slot(&self) -> Result<u64, RpcError> {
        self.call("getSlot", json!([{ "commitment": "finalized" }]))
            .await?
            .ok_or(RpcError::EmptyResult { method: "getSlot" })
    }

    /// Unix timestamp of `slot`.
    pub async fn get_block_time(&self, slot: u64) -> Result<i64, RpcError> {
        self.call("getBlockTime", json!([slot]))
            .await?
            .ok_or(RpcError::MissingBlockTime { slot })
    }

    /// Blockhash of the finalized block at `slot`.
    pub async fn get_blockhash_for_slot(&self, slot: u64) -> Result<String, RpcError> {
        let params = json!([
            slot,
            {
                "encoding": "json",
                "transactionDetails": "none",
                "rewards": false,
                "commitment": "finalized",
            }
        ]);
        let block: Option<BlockInfo> = self.call("getBlock", params).await?;
        block
            .and_then(|b| b.blockhash)
            .filter(|h| !h.is_empty())
            .ok_or(RpcError::MissingBlockhash { slot })
    }

    /// Raw data of every token account of `mint` owned by `program_id`.
    ///
    /// Classic token accounts are filtered to their fixed size; Token-2022
    /// accounts vary with extensions.
    pub async fn get_program_accounts(
        &self,
        program_id: &str,
        mint: &str,
        classic_token_program: bool,
    ) -> Result<Vec<Vec<u8>>, RpcError> {
        let mut filters = vec![json!({ "memcmp": { "offset": 0, "bytes": mint } })];
        if classic_token_program {
            filters.push(json!({ "dataSize": CLASSIC_ACCOUNT_LEN }));
        }
        let params = json!([program_id, { "encoding": "base64", "filters": filters }]);
        let accounts: Vec<ProgramAccount> = self
            .call("getProgramAccounts", params)
            .await?
            .unwrap_or_default();
        Ok(decode_base64_accounts(
            accounts
                .into_iter()
                .filter_map(|a| a.account.data.into_iter().next()),
        ))
    }

    /// Accounts of `mint` under both token programs, classic first.
    pub async fn get_token_accounts(&self, mint: &str) -> Result<Vec<Vec<u8>>, RpcError> {
        info!("scanning classic SPL Token program");
        let mut blobs = self.get_program_accounts(TOKEN_PROGRAM_ID, mint, true).await?;
        info!("scanning Token-2022 program");
        blobs.extend(self.get_program_accounts(TOKEN_2022_PROGRAM_ID, mint, false).await?);
        Ok(blobs)
    }
}

/// Decode base64 account payloads; undecodable entries are dropped.
pub fn decode_base64_accounts<I>(encoded: I) -> Vec<Vec<u8>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut skipped = 0usize;
    let blobs: Vec<Vec<u8>> = encoded
        .into_iter()
        .filter_map(|s| {
            let decoded = STANDARD.decode(s.as_ref()).ok();
            if decoded.is_none() {
                skipped += 1;
            }
            decoded
        })
        .collect();
    if skipped > 0 {
        debug!(skipped, "dropped account data that was not valid base64");
    }
    blobs
}
