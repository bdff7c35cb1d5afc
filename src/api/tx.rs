use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info};

use super::models::{NewTxRequest, PoolResponse};
use crate::node::Node;
use crate::transaction::Transaction;

/// Uncommitted transactions, in submission order.
#[get("/transactions/")]
pub async fn get_pool(node: web::Data<Node>) -> impl Responder {
    let transactions = node.pool();
    HttpResponse::Ok().json(PoolResponse {
        size: transactions.len(),
        transactions,
    })
}

/// Submit a new transaction; it is pooled here and relayed to every peer.
#[post("/transactions/")]
pub async fn post_transaction(
    node: web::Data<Node>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        receiver,
        amount,
    } = body.into_inner();
    let tx = node.submit_transaction(sender, receiver, amount);
    info!("POST /transactions/ - id={} accepted", tx.id);
    HttpResponse::Ok().json(tx)
}

/// A transaction relayed by the node it was submitted to.
#[post("/transactions/peer/")]
pub async fn post_peer_transaction(
    node: web::Data<Node>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    debug!("POST /transactions/peer/ - id={}", tx.id);
    node.receive_transaction(tx);
    HttpResponse::Ok().finish()
}
