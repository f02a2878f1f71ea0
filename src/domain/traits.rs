use crate::domain::error::NlqError;
use crate::domain::model::{QueryRequest, QueryResponse};
use async_trait::async_trait;

/// Trait for the service that turns a query into SQL and runs it
///
/// `Err` means the exchange itself failed (transport, decoding). A backend that
/// answered with an error message returns `Ok(QueryResponse::Error { .. })`.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn submit(&self, request: &QueryRequest) -> Result<QueryResponse, NlqError>;
}

/// The single area a submission writes its outcome into
pub trait OutputRegion: Send + Sync {
    /// Replace the whole content of the region
    fn replace(&self, content: String);
}
