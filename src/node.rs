use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::blockchain::block::timestamp_now;
use crate::blockchain::{Block, Blockchain, ChainError};
use crate::error::{NodeError, Result};
use crate::network::{Gossip, Notification, PeerRegistry, PeerTransport};
use crate::transaction::{Transaction, TransactionPool};

/// Everything a node mutates, guarded as a single unit so that chain
/// replacement and pool clearing are never observed half-done.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Blockchain,
    pub pool: TransactionPool,
    pub peers: PeerRegistry,
}

/// Tail and pool as seen when a nonce search starts.
struct Snapshot {
    number: u64,
    previous_hash: String,
    transactions: Vec<Transaction>,
}

impl Snapshot {
    fn mine(&self, timestamp: String) -> Block {
        Block::mine(
            self.number,
            self.previous_hash.clone(),
            timestamp,
            self.transactions.clone(),
        )
    }
}

/// A ledger participant: local state plus the gossip notifier that
/// forwards local changes to the other known peers.
pub struct Node {
    ledger: Mutex<Ledger>,
    // At most one nonce search in flight.
    mining: tokio::sync::Mutex<()>,
    gossip: Gossip,
}

impl Node {
    pub fn new(ledger: Ledger, gossip: Gossip) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            mining: tokio::sync::Mutex::new(()),
            gossip,
        }
    }

    /// Build the node's starting state.
    ///
    /// Without a seed the node starts its own network by mining a genesis
    /// block. With a seed it adopts the seed's chain, pool and peer list,
    /// registers itself and announces its address. Any failure to sync from
    /// the seed is returned; the node never starts from partial state.
    pub async fn bootstrap(
        self_address: String,
        seed: Option<&str>,
        transport: Arc<dyn PeerTransport>,
    ) -> Result<Self> {
        let gossip = Gossip::new(transport);
        let Some(seed) = seed else {
            let node = Self::new(
                Ledger {
                    chain: Blockchain::new(),
                    pool: TransactionPool::new(),
                    peers: PeerRegistry::new(self_address),
                },
                gossip,
            );
            let genesis = node.seal_block().await?;
            info!("started new network, genesis hash={}", genesis.hash());
            return Ok(node);
        };

        let transport = gossip.transport();
        let chain = transport.fetch_chain(seed).await?;
        Blockchain::verify(&chain).map_err(NodeError::InvalidSeedChain)?;
        let pool = transport.fetch_pool(seed).await?;
        let peers = transport.fetch_peers(seed).await?;
        info!(
            "synced from seed {seed}: {} blocks, {} pending transactions, {} peers",
            chain.len(),
            pool.len(),
            peers.len()
        );

        let registry = PeerRegistry::from_seed(self_address.clone(), peers);
        let others = registry.others();
        let node = Self::new(
            Ledger {
                chain: Blockchain::from_blocks(chain),
                pool: TransactionPool::from_transactions(pool),
                peers: registry,
            },
            gossip,
        );
        node.broadcast(
            others,
            Notification::PeerJoined {
                address: self_address,
            },
        );
        Ok(node)
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("mutex poisoned")
    }

    fn broadcast(&self, peers: Vec<String>, notification: Notification) {
        debug!(
            "broadcasting {} to {} peer(s)",
            notification.kind(),
            peers.len()
        );
        // Outcomes are logged by the notifier; nothing waits on them.
        let _ = self.gossip.dispatch(peers, notification);
    }

    /* ---------- read-only snapshots ---------- */

    pub fn chain(&self) -> Vec<Block> {
        self.lock().chain.blocks().to_vec()
    }

    pub fn pool(&self) -> Vec<Transaction> {
        self.lock().pool.transactions().to_vec()
    }

    pub fn peers(&self) -> Vec<String> {
        self.lock().peers.addresses().to_vec()
    }

    pub fn self_address(&self) -> String {
        self.lock().peers.self_address().to_string()
    }

    /* ---------- local mutations (gossiped) ---------- */

    /// Mine the next block from the current pool, append it and push the
    /// resulting chain to every peer.
    pub async fn mine_block(&self) -> Result<Block> {
        let block = self.seal_block().await?;
        let (peers, chain) = {
            let ledger = self.lock();
            (ledger.peers.others(), ledger.chain.blocks().to_vec())
        };
        self.broadcast(peers, Notification::ChainUpdated(chain));
        Ok(block)
    }

    /// Nonce search plus atomic append, without gossip.
    ///
    /// The ledger lock is held only to snapshot the tail and pool and to
    /// commit; the search itself runs on a blocking worker. Transactions
    /// submitted mid-search stay pooled for the next block. If the chain was
    /// replaced mid-search the block no longer links and the search restarts.
    async fn seal_block(&self) -> Result<Block> {
        let _mining = self.mining.lock().await;
        loop {
            let snapshot = self.snapshot();
            let timestamp = timestamp_now();
            let (snapshot, block) = tokio::task::spawn_blocking(move || {
                let block = snapshot.mine(timestamp);
                (snapshot, block)
            })
            .await
            .map_err(|e| NodeError::Mining(e.to_string()))?;

            if let Some(block) = self.commit(&snapshot, block) {
                return Ok(block);
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        let ledger = self.lock();
        let (number, previous_hash) = ledger.chain.next_link();
        Snapshot {
            number,
            previous_hash,
            transactions: ledger.pool.drain(),
        }
    }

    /// Append `block` if the chain still ends where `snapshot` saw it, and
    /// drop the snapshotted transactions from the pool. `None` means the
    /// block went stale.
    fn commit(&self, snapshot: &Snapshot, block: Block) -> Option<Block> {
        let mut ledger = self.lock();
        if ledger.chain.next_link() != (snapshot.number, snapshot.previous_hash.clone()) {
            warn!(
                "chain changed while mining block #{}, restarting search",
                block.number
            );
            return None;
        }
        ledger.chain.append(block.clone());
        ledger.pool.remove_committed(snapshot.transactions.len());
        info!(
            "MINER - sealed block #{} (proof={}, txs={}, height={}, pending={})",
            block.number,
            block.proof,
            block.transactions.len(),
            ledger.chain.len(),
            ledger.pool.len()
        );
        Some(block)
    }

    /// Pool a new transaction under a fresh id and push it to every peer.
    pub fn submit_transaction(&self, sender: String, receiver: String, amount: f64) -> Transaction {
        let tx = Transaction::new(sender, receiver, amount);
        let peers = {
            let mut ledger = self.lock();
            ledger.pool.push(tx.clone());
            debug!("pooled tx {} (pool size {})", tx.id, ledger.pool.len());
            ledger.peers.others()
        };
        self.broadcast(peers, Notification::TransactionAdded(tx.clone()));
        tx
    }

    /* ---------- peer pushes (never re-broadcast) ---------- */

    /// Pool a transaction relayed by a peer, keeping its original id.
    pub fn receive_transaction(&self, tx: Transaction) {
        let mut ledger = self.lock();
        debug!("pooled tx {} from peer", tx.id);
        ledger.pool.push(tx);
    }

    /// Register an announced peer; returns the updated peer list.
    pub fn add_peer(&self, address: String) -> Vec<String> {
        let mut ledger = self.lock();
        if ledger.peers.add(address.clone()) {
            info!("registered peer {address}");
        }
        ledger.peers.addresses().to_vec()
    }

    /// Longest-chain rule: adopt `chain` if valid and strictly longer,
    /// clearing the pool in the same critical section.
    ///
    /// Validation hashes every block, so it runs before the ledger lock is
    /// taken; only the length check and the swap happen under it.
    pub fn replace_chain(&self, chain: Vec<Block>) -> bool {
        if !Blockchain::validate(&chain) {
            return false;
        }
        let mut ledger = self.lock();
        let replaced = ledger.chain.adopt_if_longer(chain);
        if replaced {
            ledger.pool.clear();
        }
        replaced
    }

    /// Check an arbitrary chain against the validation rules.
    pub fn validate_chain(chain: &[Block]) -> std::result::Result<(), ChainError> {
        Blockchain::verify(chain)
    }
}
