use crate::application::submit::{QuerySubmitter, ResponseOrdering};
use crate::domain::error::NlqError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::HttpBackend;
use crate::infrastructure::network::http::create_client;
use crate::presentation::region::TerminalRegion;
use crate::presentation::render::Renderer;
use crate::presentation::theme::Theme;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub submitter: Arc<QuerySubmitter<HttpBackend>>,
    pub region: Arc<TerminalRegion>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, NlqError> {
        let http_client = create_client(&config)?;
        let backend = HttpBackend::new(http_client, config.endpoint.clone());

        let theme = Theme::from_name(&config.theme);
        let renderer = Renderer::new(config.format, theme);

        let ordering = if config.latest_only {
            ResponseOrdering::LatestOnly
        } else {
            ResponseOrdering::LastArrival
        };

        Ok(Self {
            submitter: Arc::new(QuerySubmitter::new(backend, renderer).with_ordering(ordering)),
            region: Arc::new(TerminalRegion::new(config.clear_screen)),
            config: Arc::new(config),
        })
    }
}
