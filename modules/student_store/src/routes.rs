use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, put},
    Extension, Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::StudentStoreConfig;
use crate::handlers;
use crate::repo::StudentRepo;

/// Build the store's router with CORS and request tracing applied.
pub fn router(repo: Arc<StudentRepo>, cfg: &StudentStoreConfig) -> anyhow::Result<Router> {
    let router = Router::new()
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/students/{id}",
            put(handlers::update_student).delete(handlers::delete_student),
        )
        .layer(Extension(repo))
        .layer(cors_layer(cfg)?)
        .layer(TraceLayer::new_for_http());
    Ok(router)
}

/// Credentials rule out the `*` wildcards, so methods and headers mirror the
/// preflight request instead.
fn cors_layer(cfg: &StudentStoreConfig) -> anyhow::Result<CorsLayer> {
    let origins = cfg
        .cors_allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
