use log::{info, warn};
use thiserror::Error;

use super::{Block, GENESIS_PREVIOUS_HASH, block::meets_difficulty};

/// First rule a candidate chain breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("expected block number {expected}, found {found}")]
    UnexpectedNumber { expected: u64, found: u64 },
    #[error("block {number} does not link to the hash of its predecessor")]
    BrokenLink { number: u64 },
    #[error("block {number} hash {hash} does not satisfy the proof-of-work target")]
    InsufficientWork { number: u64, hash: String },
}

/// Simple in-memory blockchain with Proof-of-Work.
#[derive(Debug, Default, Clone)]
pub struct Blockchain {
    chain: Vec<Block>,
}

impl Blockchain {
    /// An empty chain; the node mines (or fetches) its first block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap blocks obtained elsewhere without checking them.
    pub fn from_blocks(chain: Vec<Block>) -> Self {
        Self { chain }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    /// Number and `previous_hash` for the block that would extend the chain.
    pub fn next_link(&self) -> (u64, String) {
        match self.last_block() {
            Some(tail) => (tail.number + 1, tail.hash()),
            None => (1, GENESIS_PREVIOUS_HASH.to_string()),
        }
    }

    /// Append a freshly mined block. Only the miner calls this, after it has
    /// built the block on top of `next_link()`.
    pub fn append(&mut self, block: Block) {
        self.chain.push(block);
    }

    /// Check numbering, hash linkage and proof-of-work of every block,
    /// stopping at the first violation.
    pub fn verify(chain: &[Block]) -> Result<(), ChainError> {
        let mut previous_hash = GENESIS_PREVIOUS_HASH.to_string();
        for (expected, block) in (1u64..).zip(chain) {
            if block.number != expected {
                return Err(ChainError::UnexpectedNumber {
                    expected,
                    found: block.number,
                });
            }
            if block.previous_hash != previous_hash {
                return Err(ChainError::BrokenLink {
                    number: block.number,
                });
            }
            let hash = block.hash();
            if !meets_difficulty(&hash) {
                return Err(ChainError::InsufficientWork {
                    number: block.number,
                    hash,
                });
            }
            previous_hash = hash;
        }
        Ok(())
    }

    /// Pure check of a candidate chain; does not look at local state.
    pub fn validate(chain: &[Block]) -> bool {
        match Self::verify(chain) {
            Ok(()) => true,
            Err(e) => {
                warn!("rejected chain of {} blocks: {e}", chain.len());
                false
            }
        }
    }

    /// Longest-chain rule for a candidate that already passed
    /// [`Blockchain::validate`]: adopt it only if strictly longer. Returns
    /// whether the local chain was replaced.
    ///
    /// The caller owns clearing the transaction pool in the same critical
    /// section when this returns `true`.
    pub fn adopt_if_longer(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() <= self.len() {
            info!(
                "valid chain of {} blocks is not longer than local {}, keeping local",
                candidate.len(),
                self.len()
            );
            return false;
        }
        info!(
            "adopting longer chain: {} -> {} blocks",
            self.len(),
            candidate.len()
        );
        self.chain = candidate;
        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}
