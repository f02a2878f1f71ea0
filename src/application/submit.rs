use crate::domain::error::NlqError;
use crate::domain::model::{Outcome, QueryRequest};
use crate::domain::traits::{OutputRegion, QueryBackend};
use crate::presentation::render::Renderer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// How overlapping submissions share the output region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Every response is rendered when it arrives; the last to arrive wins.
    #[default]
    LastArrival,
    /// Responses from superseded submissions are dropped unrendered.
    LatestOnly,
}

/// Result of one `submit_query` call
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub outcome: Outcome,
    /// False when a newer submission superseded this one under `LatestOnly`.
    pub rendered: bool,
}

pub struct QuerySubmitter<B> {
    backend: B,
    renderer: Renderer,
    ordering: ResponseOrdering,
    generation: AtomicU64,
    // Held across the staleness check and the region write
    render_lock: Mutex<()>,
}

impl<B: QueryBackend> QuerySubmitter<B> {
    pub fn new(backend: B, renderer: Renderer) -> Self {
        Self {
            backend,
            renderer,
            ordering: ResponseOrdering::default(),
            generation: AtomicU64::new(0),
            render_lock: Mutex::new(()),
        }
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Validate `input`, send it, and render the outcome into `region`.
    ///
    /// Blank input renders the validation message without touching the network.
    pub async fn submit_query<R>(&self, input: &str, region: &R) -> Submission
    where
        R: OutputRegion + ?Sized,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let request = match QueryRequest::new(input) {
            Ok(request) => request,
            Err(_) => {
                debug!(generation, "blank query, nothing sent");
                return self.finish(generation, Outcome::invalid_input(), region);
            }
        };

        let outcome = match self.backend.submit(&request).await {
            Ok(response) => Outcome::from(response),
            Err(e) => {
                warn!(generation, error = %e, "query request failed");
                Outcome::Failed {
                    detail: transport_detail(&e),
                }
            }
        };

        self.finish(generation, outcome, region)
    }

    fn finish<R>(&self, generation: u64, outcome: Outcome, region: &R) -> Submission
    where
        R: OutputRegion + ?Sized,
    {
        let _guard = self.render_lock.lock().unwrap_or_else(|e| e.into_inner());

        let latest = self.generation.load(Ordering::SeqCst);
        if self.ordering == ResponseOrdering::LatestOnly && generation != latest {
            info!(generation, latest, "dropping stale response");
            return Submission {
                generation,
                outcome,
                rendered: false,
            };
        }

        region.replace(self.renderer.render(&outcome));
        Submission {
            generation,
            outcome,
            rendered: true,
        }
    }
}

// reqwest hides the root cause (e.g. "Connection refused") behind its source chain
fn transport_detail(error: &NlqError) -> String {
    let mut detail = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}
