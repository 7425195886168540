//! Per-service configuration.
//!
//! Every knob is a command-line flag with a default, and each flag has a
//! matching environment variable that takes precedence when set. Host and
//! port variables are namespaced per service (`VOTERAPI_HOST`, `POLLAPI_PORT`,
//! ...); the cache and peer URLs are shared names (`REDIS_URL`,
//! `VOTER_API_URL`, `POLL_API_URL`).

use clap::Parser;
use tracing::warn;

pub const VOTER_API: Service = Service { env_prefix: "VOTERAPI", default_port: 1080 };
pub const POLL_API: Service = Service { env_prefix: "POLLAPI", default_port: 2080 };
pub const VOTE_API: Service = Service { env_prefix: "VOTEAPI", default_port: 3080 };

/// Identity of one of the three services: its env-var namespace and the
/// port it listens on when neither flag nor env var says otherwise.
#[derive(Clone, Copy, Debug)]
pub struct Service {
    pub env_prefix: &'static str,
    pub default_port: u16,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct ServiceArgs {
    /// Interface to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on. Defaults to the service's well-known port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Cache connection URL.
    #[arg(long, default_value = "redis://127.0.0.1:6379")]
    pub cache_url: String,

    /// Base URL of the voter service (used by the vote service only).
    #[arg(long, default_value = "http://127.0.0.1:1080")]
    pub voter_api_url: String,

    /// Base URL of the poll service (used by the vote service only).
    #[arg(long, default_value = "http://127.0.0.1:2080")]
    pub poll_api_url: String,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub cache_url: String,
    pub voter_api_url: String,
    pub poll_api_url: String,
}

impl ServiceConfig {
    /// Parse command-line flags, then apply environment overrides.
    pub fn load(service: Service) -> Self {
        Self::from_args(ServiceArgs::parse(), service)
    }

    pub fn from_args(args: ServiceArgs, service: Service) -> Self {
        let port = match env_var(&format!("{}_PORT", service.env_prefix)) {
            Some(raw) => match raw.parse() {
                Ok(port) => port,
                Err(_) => {
                    warn!(value = %raw, "ignoring malformed port environment variable");
                    args.port.unwrap_or(service.default_port)
                }
            },
            None => args.port.unwrap_or(service.default_port),
        };

        Self {
            host: env_var(&format!("{}_HOST", service.env_prefix)).unwrap_or(args.host),
            port,
            cache_url: env_var("REDIS_URL").unwrap_or(args.cache_url),
            voter_api_url: env_var("VOTER_API_URL").unwrap_or(args.voter_api_url),
            poll_api_url: env_var("POLL_API_URL").unwrap_or(args.poll_api_url),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
