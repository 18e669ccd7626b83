//! Integration tests exercising the full HTTP surface against a real
//! server: in-process axum on 127.0.0.1:0 with in-memory SQLite and a
//! temp upload directory.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

async fn spawn_server() -> String {
    let server = textile_server::test_helpers::spawn_test_server().await;
    server.base_url
}

async fn upload(base: &str, user_id: &str, file_name: &str, content: Vec<u8>) -> reqwest::Response {
    let form = Form::new()
        .text("user_id", user_id.to_string())
        .part("file", Part::bytes(content).file_name(file_name.to_string()));
    reqwest::Client::new()
        .post(format!("{base}/api/reading/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let base = spawn_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn end_to_end_upload_status_download() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // Upload report.txt (10 bytes) for user 42.
    let resp = upload(&base, "42", "report.txt", b"ten bytes!".to_vec()).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 200);
    let data = &body["data"];
    let task_id = data["task_id"].as_i64().unwrap();
    assert!(task_id > 0);
    assert_eq!(data["file_name"], "report.txt");
    let file_url = data["file_url"].as_str().unwrap();
    assert!(file_url.contains("/files/report_"));
    assert!(file_url.ends_with(".txt"));

    // Fresh task is pending.
    let resp = client
        .get(format!("{base}/api/reading/task/{task_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["user_id"], 42);

    // Transition to completed and read it back.
    let resp = client
        .put(format!("{base}/api/reading/task/{task_id}/status"))
        .body(r#"{"status":"completed"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 200);
    assert!(body.get("data").is_none() || body["data"].is_null());

    let resp = client
        .get(format!("{base}/api/reading/task/{task_id}"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "completed");

    // Download via the generated storage name.
    let storage_name = file_url.rsplit('/').next().unwrap();
    let resp = client
        .get(format!("{base}/files/{storage_name}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(storage_name));
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"ten bytes!");
}

#[tokio::test]
async fn user_task_listing_is_newest_first() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for name in ["a.txt", "b.txt", "c.txt"] {
        let resp = upload(&base, "7", name, b"x".to_vec()).await;
        let body: Value = resp.json().await.unwrap();
        ids.push(body["data"]["task_id"].as_i64().unwrap());
    }

    let resp = client
        .get(format!("{base}/api/reading/tasks/user/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let tasks = body["data"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    let listed: Vec<i64> = tasks.iter().map(|t| t["task_id"].as_i64().unwrap()).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);

    // A user with no tasks gets an empty list, not an error.
    let resp = client
        .get(format!("{base}/api/reading/tasks/user/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn upload_validation_failures() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // Missing user_id.
    let form = Form::new().part("file", Part::bytes(b"x".to_vec()).file_name("f.txt"));
    let resp = client
        .post(format!("{base}/api/reading/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Non-numeric user_id.
    let resp = upload(&base, "forty-two", "f.txt", b"x".to_vec()).await;
    assert_eq!(resp.status(), 400);

    // Missing file.
    let form = Form::new().text("user_id", "1");
    let resp = client
        .post(format!("{base}/api/reading/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let base = spawn_server().await;
    let resp = upload(&base, "1", "big.bin", vec![0u8; 50 * 1024 * 1024 + 1]).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn task_lookup_errors() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/reading/task/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/api/reading/task/123456"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .get(format!("{base}/api/reading/tasks/user/not-a-number"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn status_update_errors() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = upload(&base, "1", "f.txt", b"x".to_vec()).await;
    let body: Value = resp.json().await.unwrap();
    let task_id = body["data"]["task_id"].as_i64().unwrap();

    // Malformed body.
    let resp = client
        .put(format!("{base}/api/reading/task/{task_id}/status"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Unknown status value.
    let resp = client
        .put(format!("{base}/api/reading/task/{task_id}/status"))
        .body(r#"{"status":"done"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Unknown task.
    let resp = client
        .put(format!("{base}/api/reading/task/987654/status"))
        .body(r#"{"status":"failed"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn download_traversal_is_contained() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // The encoded traversal reduces to the base name `passwd`, which
    // does not exist under the upload dir.
    let resp = client
        .get(format!("{base}/files/..%2F..%2Fetc%2Fpasswd"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .get(format!("{base}/files/no-such-file.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
