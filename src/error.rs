use thiserror::Error;

use crate::blockchain::ChainError;

pub type Result<T> = std::result::Result<T, NodeError>;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("peer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("peer {peer} answered with status {status}")]
    PeerStatus { peer: String, status: u16 },
    #[error("seed node served an invalid chain: {0}")]
    InvalidSeedChain(#[from] ChainError),
    #[error("mining worker failed: {0}")]
    Mining(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
