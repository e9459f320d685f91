//! In-memory student record store served over REST/JSON.
//!
//! `GET|POST /students`, `PUT|DELETE /students/{id}`; the wire model is
//! the `student_records` contract.

pub mod config;
pub mod error;
pub mod handlers;
pub mod repo;
pub mod routes;

pub use config::StudentStoreConfig;
pub use repo::StudentRepo;
pub use routes::router;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

/// Serve the store on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    cfg: &StudentStoreConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let repo = Arc::new(StudentRepo::from_config(cfg));
    let app = router(repo, cfg)?;

    info!(addr = %listener.local_addr()?, "student store listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("student store stopped");
    Ok(())
}
