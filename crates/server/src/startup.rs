use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::peers::PeerClient;
use configs::ServiceConfig;
use service::{
    storage::{CacheHandle, RedisCache},
    stores::{PollStore, VoteStore, VoterStore},
    validator::VoteValidator,
};

use crate::routes::{self, polls::PollState, voters::VoterState, votes::VoteState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn connect_cache(cfg: &ServiceConfig) -> anyhow::Result<CacheHandle> {
    let cache = RedisCache::connect(&cfg.cache_url).await?;
    Ok(Arc::new(cache))
}

/// Voter service: voter CRUD plus vote-history sub-entity routes.
pub async fn run_voter(cfg: ServiceConfig) -> anyhow::Result<()> {
    let cache = connect_cache(&cfg).await?;
    let state = VoterState { store: VoterStore::new(cache) };
    let app = routes::build_router(routes::voters::router(state), build_cors());
    serve("voter-api", &cfg, app).await
}

/// Poll service: poll CRUD plus option sub-entity routes.
pub async fn run_poll(cfg: ServiceConfig) -> anyhow::Result<()> {
    let cache = connect_cache(&cfg).await?;
    let state = PollState { store: PollStore::new(cache) };
    let app = routes::build_router(routes::polls::router(state), build_cors());
    serve("poll-api", &cfg, app).await
}

/// Vote service: vote CRUD with cross-service validation against the voter
/// and poll services.
pub async fn run_vote(cfg: ServiceConfig) -> anyhow::Result<()> {
    let cache = connect_cache(&cfg).await?;
    let peers = PeerClient::new(cfg.voter_api_url.clone(), cfg.poll_api_url.clone());
    let state = VoteState {
        store: VoteStore::new(cache),
        validator: VoteValidator::new(peers),
    };
    let app = routes::build_router(routes::votes::router(state), build_cors());
    serve("vote-api", &cfg, app).await
}

async fn serve(name: &'static str, cfg: &ServiceConfig, app: Router) -> anyhow::Result<()> {
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(service = name, %addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(service = name, "shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
