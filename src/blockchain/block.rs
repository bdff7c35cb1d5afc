use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{DIFFICULTY_PREFIX, TIMESTAMP_FORMAT};
use crate::transaction::Transaction;

/// A single block in the chain holding the transactions it commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Height in the chain, starting at 1.
    pub number: u64,
    /// Hash of the preceding block, or `"0"` for the first block.
    pub previous_hash: String,
    pub timestamp: String,
    /// Proof-of-Work nonce.
    pub proof: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Search for the first `proof` (counting up from 0) whose block hash
    /// satisfies the difficulty prefix.
    ///
    /// CPU-bound and unbounded: the call only returns once a valid proof is
    /// found. The result is a pure function of the arguments.
    pub fn mine(
        number: u64,
        previous_hash: String,
        timestamp: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut block = Self {
            number,
            previous_hash,
            timestamp,
            proof: 0,
            transactions,
        };
        while !block.has_valid_proof() {
            block.proof += 1;
        }
        block
    }

    /// SHA-256 over the canonical JSON form of the block, hex encoded.
    ///
    /// `serde_json::Value` objects keep their keys in a sorted map, so the
    /// block's fields and every transaction's fields are rendered in key
    /// order while the transaction list keeps its own order.
    pub fn hash(&self) -> String {
        let canonical = serde_json::to_value(self).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn has_valid_proof(&self) -> bool {
        meets_difficulty(&self.hash())
    }
}

pub fn meets_difficulty(hash: &str) -> bool {
    hash.starts_with(DIFFICULTY_PREFIX)
}

/// Current wall-clock time in the block timestamp format.
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
