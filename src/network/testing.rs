//! In-process stand-in for the HTTP transport: pushes and fetches are
//! served directly by registered `Node`s.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::{Gossip, Notification, PeerRegistry, PeerTransport};
use crate::blockchain::{Block, Blockchain};
use crate::error::{NodeError, Result};
use crate::node::{Ledger, Node};
use crate::transaction::{Transaction, TransactionPool};

/// A push that reached its target and was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub peer: String,
    pub kind: &'static str,
}

pub struct InProcessNetwork {
    nodes: Mutex<HashMap<String, Arc<Node>>>,
    delivered_tx: UnboundedSender<Delivery>,
    delivered_rx: tokio::sync::Mutex<UnboundedReceiver<Delivery>>,
}

impl InProcessNetwork {
    pub fn new() -> Arc<Self> {
        let (delivered_tx, delivered_rx) = unbounded_channel();
        Arc::new(Self {
            nodes: Mutex::new(HashMap::new()),
            delivered_tx,
            delivered_rx: tokio::sync::Mutex::new(delivered_rx),
        })
    }

    pub fn register(&self, address: &str, node: Arc<Node>) {
        self.nodes
            .lock()
            .unwrap()
            .insert(address.to_string(), node);
    }

    /// A node that serves `chain` as-is, bypassing mining and validation.
    pub fn node_with_chain(self: &Arc<Self>, address: &str, chain: Vec<Block>) -> Node {
        Node::new(
            Ledger {
                chain: Blockchain::from_blocks(chain),
                pool: TransactionPool::new(),
                peers: PeerRegistry::new(address.to_string()),
            },
            Gossip::new(self.clone()),
        )
    }

    pub async fn next_delivery(&self) -> Delivery {
        self.delivered_rx
            .lock()
            .await
            .recv()
            .await
            .expect("delivery channel closed")
    }

    pub fn try_next_delivery(&self) -> Option<Delivery> {
        self.delivered_rx.try_lock().ok()?.try_recv().ok()
    }

    fn node(&self, peer: &str) -> Result<Arc<Node>> {
        self.nodes
            .lock()
            .unwrap()
            .get(peer)
            .cloned()
            .ok_or_else(|| NodeError::PeerStatus {
                peer: peer.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl PeerTransport for InProcessNetwork {
    async fn push(&self, peer: &str, notification: &Notification) -> Result<()> {
        let node = self.node(peer)?;
        match notification {
            Notification::PeerJoined { address } => {
                node.add_peer(address.clone());
            }
            Notification::TransactionAdded(tx) => node.receive_transaction(tx.clone()),
            Notification::ChainUpdated(chain) => {
                node.replace_chain(chain.clone());
            }
        }
        let _ = self.delivered_tx.send(Delivery {
            peer: peer.to_string(),
            kind: notification.kind(),
        });
        Ok(())
    }

    async fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>> {
        Ok(self.node(peer)?.chain())
    }

    async fn fetch_pool(&self, peer: &str) -> Result<Vec<Transaction>> {
        Ok(self.node(peer)?.pool())
    }

    async fn fetch_peers(&self, peer: &str) -> Result<Vec<String>> {
        Ok(self.node(peer)?.peers())
    }
}
