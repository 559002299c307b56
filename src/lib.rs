//! # pinguinos
//!
//! Penguin sighting classifier web demo:
//! - Feature extraction from a photo URL via a hosted vision-language model
//! - Species classification over a pre-trained ONNX artifact
//! - Cosmetic enrichment (nickname + plausible habitat coordinate)
//! - Append-only community store with a bounded recent listing
//!
//! The binary is a thin wrapper around [`AppState`] and [`build_router`];
//! integration tests drive the same router with stubbed collaborators.

use axum::routing::{get, post};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod classifier;
pub mod config;
pub mod db;
pub mod enricher;
pub mod error;
pub mod models;
pub mod vision;

pub use error::{Error, Result};

use classifier::SpeciesClassifier;
use vision::VisionClient;

/// Number of entries served by the community listing
pub const RECENT_LIMIT: i64 = 50;

/// Application state shared across HTTP handlers.
///
/// Built once at startup and injected via axum `State`; there are no
/// process-wide singletons. `classifier` and `db` are `None` in the
/// respective degraded modes.
#[derive(Clone)]
pub struct AppState {
    pub vision: VisionClient,
    pub classifier: Option<Arc<SpeciesClassifier>>,
    pub db: Option<SqlitePool>,
    /// Enrichment random source; seedable for deterministic runs.
    /// Locked only for the sampling instant.
    pub rng: Arc<Mutex<StdRng>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        vision: VisionClient,
        classifier: Option<SpeciesClassifier>,
        db: Option<SqlitePool>,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            vision,
            classifier: classifier.map(Arc::new),
            db,
            rng: Arc::new(Mutex::new(rng)),
            started_at: Instant::now(),
        }
    }

    /// The loaded classifier, or [`Error::ModelUnavailable`] when the
    /// artifact failed to load at startup
    pub fn require_classifier(&self) -> Result<&SpeciesClassifier> {
        self.classifier.as_deref().ok_or(Error::ModelUnavailable)
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::ui::landing_page))
        .route("/inicio", get(api::ui::submit_form_page).post(api::submit::submit))
        .route("/navidad", post(api::submit::navidad))
        .route("/presentacion", get(api::ui::presentacion_page))
        .route("/api/community", get(api::community::community_entries))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classifier::SpeciesModel;
    use std::time::Duration;

    struct FixedModel(i64);

    impl SpeciesModel for FixedModel {
        fn predict_class(&self, _row: [f32; 5]) -> anyhow::Result<i64> {
            Ok(self.0)
        }
    }

    fn test_vision() -> VisionClient {
        VisionClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:1".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn missing_classifier_is_model_unavailable() {
        let state = AppState::new(test_vision(), None, None, Some(1));
        assert!(matches!(
            state.require_classifier(),
            Err(Error::ModelUnavailable)
        ));
    }

    #[test]
    fn loaded_classifier_is_returned() {
        let classifier = SpeciesClassifier::from_model(Box::new(FixedModel(0)));
        let state = AppState::new(test_vision(), Some(classifier), None, Some(1));
        assert!(state.require_classifier().is_ok());
    }
}
