use crate::domain::error::NlqError;
use crate::domain::model::{QueryRequest, QueryResponse};
use crate::domain::traits::QueryBackend;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Backend reached over `POST <endpoint>` with a JSON body
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn submit(&self, request: &QueryRequest) -> Result<QueryResponse, NlqError> {
        debug!(endpoint = %self.endpoint, query = request.query(), "sending query");

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        // Status is not checked: error bodies from 4xx/5xx are still answers
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "received response");

        QueryResponse::from_slice(&body)
    }
}
