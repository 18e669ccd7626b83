pub mod config;
mod response;
mod routes;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use anyhow::Result;
use textile_service::ReadingService;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, service: ReadingService) -> Result<()> {
    let app = routes::build_router(service);
    axum::serve(listener, app).await?;
    Ok(())
}
