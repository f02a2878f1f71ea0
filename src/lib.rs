//! Command-line client for a natural-language SQL backend.
//!
//! A query is validated locally, sent as `{"query": ...}` to the backend, and
//! the backend's SQL translation and result (or its error) are rendered into an
//! [`OutputRegion`](domain::traits::OutputRegion).
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
