use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value transfer awaiting (or committed to) a block.
///
/// No signature or balance checks are applied; peers are trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

impl Transaction {
    /// Build a locally submitted transaction with a fresh UUID v4 id.
    pub fn new(sender: String, receiver: String, amount: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), sender, receiver, amount)
    }

    /// Build a transaction that keeps the id assigned by its originating node.
    pub fn with_id(id: String, sender: String, receiver: String, amount: f64) -> Self {
        Self {
            id,
            sender,
            receiver,
            amount,
        }
    }
}
