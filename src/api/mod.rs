mod chain;
mod health;
pub mod models;
mod peers;
mod tx;

use actix_web::web::{self, ServiceConfig};

/// Scope every node endpoint lives under; peers address each other with it.
pub const API_PREFIX: &str = "/api/v1";

/// Pushed chains grow with the ledger; allow bodies well beyond the default.
const JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT_BYTES))
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::update_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(tx::get_pool)
            .service(tx::post_transaction)
            .service(tx::post_peer_transaction)
            .service(peers::get_peers)
            .service(peers::add_peer),
    );
}
