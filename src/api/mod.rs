pub mod error;
pub mod transport;
pub mod update;

pub use error::{handle_panic, internal_error, invalid_endpoint, ErrorResponse};

use axum::routing::{get, post};
use axum::Router;

use crate::prediction::Predictor;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub predictor: Predictor,
}

pub fn router(store: SqliteStore, predictor: Predictor) -> Router {
    let state = AppState { store, predictor };

    // Method fallbacks keep wrong-method requests on a known path in the
    // same 400 envelope as unknown paths.
    Router::new()
        .route(
            "/transport",
            get(transport::list_transport).fallback(error::invalid_endpoint),
        )
        .route(
            "/update",
            post(update::refresh_transport).fallback(error::invalid_endpoint),
        )
        .fallback(error::invalid_endpoint)
        .with_state(state)
}
