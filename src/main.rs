use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use zkonnect_server::chain::ContractWriter;
use zkonnect_server::config::Config;
use zkonnect_server::routes::create_routes;
use zkonnect_server::state::{spawn_session_sweeper, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let contract_address = config
        .contract_address
        .clone()
        .expect("CONTRACT_ADDRESS must be set");
    let writer = ContractWriter::connect(&config.rpc_url, &contract_address)
        .expect("Failed to set up the event registry writer");

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .expect("LISTEN_ADDR must be a socket address");

    let state = Arc::new(AppState::new(config, writer));
    let _sweeper = spawn_session_sweeper(state.clone(), Duration::from_secs(60));
    let app: Router = create_routes(state);

    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
