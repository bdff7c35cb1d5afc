use actix_web::{HttpResponse, Responder, get, post, put, web};
use log::{error, info, warn};

use super::models::{ChainRequest, ChainResponse, MineResponse, UpdateChainResponse, ValidateResponse};
use crate::node::Node;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(node: web::Data<Node>) -> impl Responder {
    let chain = node.chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// A peer pushes its chain after mining; adopt it if it is valid and longer.
#[put("/chain/")]
pub async fn update_chain(node: web::Data<Node>, body: web::Json<ChainRequest>) -> impl Responder {
    let offered = body.chain.len();
    let replaced = node.replace_chain(body.into_inner().chain);
    if replaced {
        info!("PUT /chain/ - adopted pushed chain of {offered} blocks");
    }
    HttpResponse::Ok().json(UpdateChainResponse {
        replaced,
        length: node.chain().len(),
    })
}

/// Validate an arbitrary chain without touching local state.
#[post("/chain/validate/")]
pub async fn validate_chain(body: web::Json<ChainRequest>) -> impl Responder {
    let verdict = Node::validate_chain(&body.chain);
    if let Err(e) = &verdict {
        warn!("POST /chain/validate/ - invalid: {e}");
    }
    HttpResponse::Ok().json(ValidateResponse {
        valid: verdict.is_ok(),
        length: body.chain.len(),
        reason: verdict.err().map(|e| e.to_string()),
    })
}

/// Mine a new block from the current pool and gossip the resulting chain.
#[post("/mine/")]
pub async fn mine_block(node: web::Data<Node>) -> impl Responder {
    match node.mine_block().await {
        Ok(block) => HttpResponse::Ok().json(MineResponse {
            hash: block.hash(),
            length: node.chain().len(),
            block,
        }),
        Err(e) => {
            error!("POST /mine/ - {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use std::sync::Arc;

    use crate::api::init_routes;
    use crate::api::models::{ChainRequest, ChainResponse, MineResponse, UpdateChainResponse, ValidateResponse};
    use crate::blockchain::model::tests::mined_chain;
    use crate::network::testing::InProcessNetwork;
    use crate::node::Node;

    async fn genesis_node() -> Arc<Node> {
        Arc::new(Node::bootstrap("a:1".into(), None, InProcessNetwork::new()).await.unwrap())
    }

    #[actix_web::test]
    async fn mine_then_get_chain() {
        let node = genesis_node().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(node.clone()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let mined: MineResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mined.length, 2);
        assert_eq!(mined.block.number, 2);
        assert!(mined.hash.starts_with("000"));

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let chain: ChainResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(chain.length, 2);
        assert_eq!(chain.chain, node.chain());
    }

    #[actix_web::test]
    async fn validate_reports_reason() {
        let node = genesis_node().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(node))
                .configure(init_routes),
        )
        .await;

        let mut chain = mined_chain(2);
        let req = test::TestRequest::post()
            .uri("/api/v1/chain/validate/")
            .set_json(ChainRequest {
                chain: chain.clone(),
            })
            .to_request();
        let ok: ValidateResponse = test::call_and_read_body_json(&app, req).await;
        assert!(ok.valid);
        assert!(ok.reason.is_none());

        chain[1].previous_hash = "nope".into();
        let req = test::TestRequest::post()
            .uri("/api/v1/chain/validate/")
            .set_json(ChainRequest { chain })
            .to_request();
        let bad: ValidateResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!bad.valid);
        assert_eq!(bad.length, 2);
        assert!(bad.reason.unwrap().contains("block 2"));
    }

    #[actix_web::test]
    async fn pushed_chain_adopted_only_when_longer() {
        let node = genesis_node().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(node.clone()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/v1/chain/")
            .set_json(ChainRequest {
                chain: mined_chain(1),
            })
            .to_request();
        let same: UpdateChainResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!same.replaced);
        assert_eq!(same.length, 1);

        let longer = mined_chain(2);
        let req = test::TestRequest::put()
            .uri("/api/v1/chain/")
            .set_json(ChainRequest {
                chain: longer.clone(),
            })
            .to_request();
        let adopted: UpdateChainResponse = test::call_and_read_body_json(&app, req).await;
        assert!(adopted.replaced);
        assert_eq!(adopted.length, 2);
        assert_eq!(node.chain(), longer);
    }
}
