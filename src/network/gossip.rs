use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::task::{JoinHandle, JoinSet};

use crate::blockchain::Block;
use crate::error::Result;
use crate::transaction::Transaction;

/// A local state change pushed to every other known peer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A node joined; receivers add it to their registry.
    PeerJoined { address: String },
    /// A locally submitted transaction; receivers pool it without relaying.
    TransactionAdded(Transaction),
    /// The full chain after a block was mined; receivers try to adopt it.
    ChainUpdated(Vec<Block>),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::PeerJoined { .. } => "peer-joined",
            Notification::TransactionAdded(_) => "transaction-added",
            Notification::ChainUpdated(_) => "chain-updated",
        }
    }
}

/// Outbound side of the node-to-node protocol.
///
/// Implementations must give up on a peer after a short attempt rather than
/// block the caller indefinitely.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn push(&self, peer: &str, notification: &Notification) -> Result<()>;
    async fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>>;
    async fn fetch_pool(&self, peer: &str) -> Result<Vec<Transaction>>;
    async fn fetch_peers(&self, peer: &str) -> Result<Vec<String>>;
}

/// Result of delivering one notification to one peer.
#[derive(Debug)]
pub struct PushOutcome {
    pub peer: String,
    pub result: Result<()>,
}

/// Best-effort fan-out of notifications: no retries, no acknowledgements.
#[derive(Clone)]
pub struct Gossip {
    transport: Arc<dyn PeerTransport>,
}

impl Gossip {
    pub fn new(transport: Arc<dyn PeerTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &dyn PeerTransport {
        self.transport.as_ref()
    }

    /// Push `notification` to every peer concurrently and collect one
    /// outcome per peer. A failing peer is logged and does not affect the
    /// others.
    pub async fn notify(&self, peers: Vec<String>, notification: Notification) -> Vec<PushOutcome> {
        let notification = Arc::new(notification);
        let mut pushes = JoinSet::new();
        for peer in peers {
            let transport = Arc::clone(&self.transport);
            let notification = Arc::clone(&notification);
            pushes.spawn(async move {
                let result = transport.push(&peer, &notification).await;
                match &result {
                    Ok(()) => debug!("gossip {} -> {peer} delivered", notification.kind()),
                    Err(e) => warn!("gossip {} -> {peer} failed: {e}", notification.kind()),
                }
                PushOutcome { peer, result }
            });
        }

        let mut outcomes = Vec::with_capacity(pushes.len());
        while let Some(joined) = pushes.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("gossip push task aborted: {e}"),
            }
        }
        let unreachable: Vec<&str> = outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.peer.as_str())
            .collect();
        debug!(
            "gossip {}: {} delivered, unreachable {unreachable:?}",
            notification.kind(),
            outcomes.len() - unreachable.len()
        );
        outcomes
    }

    /// Fire-and-forget variant of [`Gossip::notify`]: runs in the background
    /// and hands back the task in case a caller wants the outcomes.
    pub fn dispatch(
        &self,
        peers: Vec<String>,
        notification: Notification,
    ) -> Option<JoinHandle<Vec<PushOutcome>>> {
        if peers.is_empty() {
            return None;
        }
        let gossip = self.clone();
        Some(tokio::spawn(async move {
            gossip.notify(peers, notification).await
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{Gossip, Notification};
    use crate::network::testing::InProcessNetwork;
    use crate::node::Node;
    use std::sync::Arc;

    #[actix_web::test]
    async fn unreachable_peer_does_not_block_the_rest() {
        let net = InProcessNetwork::new();
        let b = Arc::new(Node::bootstrap("b:2".into(), None, net.clone()).await.unwrap());
        net.register("b:2", b.clone());

        let gossip = Gossip::new(net.clone());
        let outcomes = gossip
            .notify(
                vec!["gone:9".into(), "b:2".into()],
                Notification::PeerJoined {
                    address: "c:3".into(),
                },
            )
            .await;

        assert_eq!(outcomes.len(), 2);
        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].peer, "gone:9");
        assert_eq!(b.peers(), ["b:2", "c:3"]);
    }

    #[actix_web::test]
    async fn dispatch_without_peers_is_a_no_op() {
        let gossip = Gossip::new(InProcessNetwork::new());
        let handle = gossip.dispatch(
            Vec::new(),
            Notification::PeerJoined {
                address: "x:1".into(),
            },
        );
        assert!(handle.is_none());
    }

    #[test]
    fn kinds_are_tagged() {
        let n = Notification::ChainUpdated(Vec::new());
        assert_eq!(n.kind(), "chain-updated");
    }
}
