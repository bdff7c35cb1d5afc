use super::Transaction;

/// Pending transactions in insertion order.
#[derive(Debug, Default, Clone)]
pub struct TransactionPool {
    transactions: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a pool fetched from a seed node.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Append a transaction. Ids are not checked for duplicates.
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Copy of the current contents; the pool itself is left untouched.
    pub fn drain(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Drop the first `count` transactions, i.e. the ones a just-sealed
    /// block was built from. Later submissions stay pending.
    pub fn remove_committed(&mut self, count: usize) {
        let count = count.min(self.transactions.len());
        self.transactions.drain(..count);
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
