// HTTP client utilities
use crate::domain::error::NlqError;
use crate::infrastructure::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Create the HTTP client used for every submission
///
/// No request timeout unless `timeout_secs` is configured.
pub fn create_client(config: &Config) -> Result<Client, NlqError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .user_agent(config.user_agent.as_str());

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
