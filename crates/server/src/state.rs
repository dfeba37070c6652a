//! Shared application state.

use data_loader::DataIndex;
use recommender::Recommender;
use std::sync::Arc;
use svd_model::Scorer;

/// State shared across request handlers.
///
/// Tables and model are loaded once at startup and immutable afterwards,
/// so handlers share them as plain `Arc`s; no locking is required.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<DataIndex>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Build the state from loaded tables and a scoring model
    pub fn new(index: Arc<DataIndex>, model: Arc<dyn Scorer>) -> Self {
        let recommender = Arc::new(Recommender::new(index.clone(), model));
        Self { index, recommender }
    }
}
