use configs::{ServiceConfig, VOTER_API};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = ServiceConfig::load(VOTER_API);
    server::run_voter(cfg).await
}
