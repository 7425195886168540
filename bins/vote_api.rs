use configs::{ServiceConfig, VOTE_API};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = ServiceConfig::load(VOTE_API);
    server::run_vote(cfg).await
}
