use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{AddPeerRequest, PeersResponse};
use crate::node::Node;

#[get("/peers/")]
pub async fn get_peers(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(PeersResponse {
        peers: node.peers(),
    })
}

/// Announcement of a node that just joined the network.
#[post("/peers/")]
pub async fn add_peer(node: web::Data<Node>, body: web::Json<AddPeerRequest>) -> impl Responder {
    let peers = node.add_peer(body.into_inner().address);
    HttpResponse::Ok().json(PeersResponse { peers })
}
