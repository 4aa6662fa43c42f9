use std::sync::Arc;

use dark_kitchen::config::DbConfig;
use dark_kitchen::db::ConnectionProvider;
use dark_kitchen::entities::setup_schema;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let config = DbConfig::from_env();
    info!("{}", config.connection_info());

    let provider = Arc::new(ConnectionProvider::new(config));

    // reachability check off the main task, the way the UI shell runs it
    match provider.clone().probe().await {
        Ok(true) => info!("database reachable"),
        _ => {
            error!("database unreachable, check the connection settings");
            std::process::exit(1);
        }
    }

    let db = provider
        .acquire()
        .await
        .expect("database went away after probe");
    setup_schema(&db).await.expect("failed to create schema");
    info!("schema ready");

    provider.close().await;
}
