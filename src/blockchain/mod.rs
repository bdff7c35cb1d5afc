pub mod block;
pub mod model;

pub use block::Block;
pub use model::{Blockchain, ChainError};

/// Proof-of-Work target: a block hash must start with this hex prefix.
pub const DIFFICULTY_PREFIX: &str = "000";

/// `previous_hash` carried by the first block of every chain.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Render format of block timestamps (UTC, microsecond precision).
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %H:%M:%S%.6f";
