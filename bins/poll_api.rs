use configs::{ServiceConfig, POLL_API};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = ServiceConfig::load(POLL_API);
    server::run_poll(cfg).await
}
