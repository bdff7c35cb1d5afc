use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::transaction::Transaction;

/* ---------- Chain API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Body of a pushed chain (`PUT /chain/`) and of `POST /chain/validate/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainRequest {
    pub chain: Vec<Block>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateChainResponse {
    pub replaced: bool,
    pub length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MineResponse {
    pub block: Block,
    pub hash: String,
    pub length: usize,
}

/* ---------- TX API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Peer API Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPeerRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeersResponse {
    pub peers: Vec<String>,
}
