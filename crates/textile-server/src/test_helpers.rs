use axum::Router;
use textile_db::Db;
use textile_service::ReadingService;
use textile_store::UploadStore;
use tokio::net::TcpListener;

/// Build a test router with in-memory SQLite and a temp upload dir.
pub fn test_router() -> Router {
    let db = Db::open_in_memory().unwrap();
    let upload_dir = tempfile::tempdir().unwrap().keep();
    let store = UploadStore::new(upload_dir);
    let service = ReadingService::new(db, store, "http://localhost:8080/files");
    crate::routes::build_router(service)
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an axum test server on a random port. Returns the TestServer
/// with the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = test_router();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
