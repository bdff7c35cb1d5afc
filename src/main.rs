mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod node;
mod transaction;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use config::Settings;
use error::NodeError;
use network::HttpTransport;
use node::Node;

#[actix_web::main]
async fn main() -> Result<(), NodeError> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let transport = Arc::new(HttpTransport::new(settings.push_timeout)?);

    // A node that cannot sync from its seed refuses to start.
    let node = Node::bootstrap(
        settings.node_address.clone(),
        settings.seed_node.as_deref(),
        transport,
    )
    .await?;

    info!(
        "⛓️ node {} serving at http://{}:{} (chain={} blocks, peers={:?})",
        node.self_address(),
        settings.host,
        settings.port,
        node.chain().len(),
        node.peers()
    );

    let state = web::Data::new(node);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;
    Ok(())
}
