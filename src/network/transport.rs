use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{Notification, PeerTransport};
use crate::api::models::{AddPeerRequest, ChainRequest, ChainResponse, PeersResponse, PoolResponse};
use crate::api::API_PREFIX;
use crate::blockchain::Block;
use crate::error::{NodeError, Result};
use crate::transaction::Transaction;

const CHAIN_PATH: &str = "/chain/";
const TRANSACTIONS_PATH: &str = "/transactions/";
const PEER_TRANSACTIONS_PATH: &str = "/transactions/peer/";
const PEERS_PATH: &str = "/peers/";

/// [`PeerTransport`] speaking JSON over HTTP to other nodes' `/api/v1` scope.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Every request (push or fetch) is abandoned after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn send(&self, peer: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::PeerStatus {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, peer: &str, path: &str) -> Result<T> {
        let url = endpoint(peer, path);
        debug!("GET {url}");
        let response = self.send(peer, self.client.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PeerTransport for HttpTransport {
    async fn push(&self, peer: &str, notification: &Notification) -> Result<()> {
        let request = match notification {
            Notification::PeerJoined { address } => self
                .client
                .post(endpoint(peer, PEERS_PATH))
                .json(&AddPeerRequest {
                    address: address.clone(),
                }),
            Notification::TransactionAdded(tx) => self
                .client
                .post(endpoint(peer, PEER_TRANSACTIONS_PATH))
                .json(tx),
            Notification::ChainUpdated(chain) => self
                .client
                .put(endpoint(peer, CHAIN_PATH))
                .json(&ChainRequest {
                    chain: chain.clone(),
                }),
        };
        self.send(peer, request).await?;
        Ok(())
    }

    async fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>> {
        let body: ChainResponse = self.get(peer, CHAIN_PATH).await?;
        Ok(body.chain)
    }

    async fn fetch_pool(&self, peer: &str) -> Result<Vec<Transaction>> {
        let body: PoolResponse = self.get(peer, TRANSACTIONS_PATH).await?;
        Ok(body.transactions)
    }

    async fn fetch_peers(&self, peer: &str) -> Result<Vec<String>> {
        let body: PeersResponse = self.get(peer, PEERS_PATH).await?;
        Ok(body.peers)
    }
}

/// URL of `path` on `peer`. Peers are usually registered as `host:port`;
/// an explicit scheme is kept as given.
fn endpoint(peer: &str, path: &str) -> String {
    let base = peer.trim_end_matches('/');
    if base.contains("://") {
        format!("{base}{API_PREFIX}{path}")
    } else {
        format!("http://{base}{API_PREFIX}{path}")
    }
}
