//! In-process tests for every route and the documentation endpoints.

use std::time::Duration;

use axum::http::{Method, Request, StatusCode};
use axum::body::Body;
use futures_util::StreamExt;
use tower::ServiceExt;

mod common;

use common::{body_string, build_server, content_type, get, sse_values, test_config, wait_until};

#[tokio::test]
async fn test_letters_route() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/letters")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let letters: Vec<String> = serde_json::from_str(&body_string(response).await).unwrap();
    let expected: Vec<String> = ('a'..='z').map(String::from).collect();
    assert_eq!(letters, expected);
}

#[tokio::test]
async fn test_letters_are_identical_across_requests() {
    let server = build_server(test_config());
    let first = body_string(server.router().oneshot(get("/letters")).await.unwrap()).await;
    let second = body_string(server.router().oneshot(get("/letters")).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_data_route() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/api/data")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!([
            {"id": 1323, "name": "John", "lastname": "Doe"},
            {"id": 2323, "name": "Mia", "lastname": "Turner"},
        ])
    );
}

#[tokio::test]
async fn test_emojis_route() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/api/emojis")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));
    assert_eq!(body_string(response).await, "😆∑π");
}

#[tokio::test(start_paused = true)]
async fn test_numbers_route_streams_all_values() {
    let server = build_server(test_config());
    let start = tokio::time::Instant::now();
    let response = server.router().oneshot(get("/numbers")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/event-stream");

    let body = body_string(response).await;
    assert_eq!(sse_values(&body), (1..=10).collect::<Vec<u32>>());
    assert!(start.elapsed() >= Duration::from_millis(3000));

    let stats = server.app().sequence.stats();
    assert_eq!(stats.completed(), 1);
    assert_eq!(stats.cancelled(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_open_stream_does_not_block_other_requests() {
    let server = build_server(test_config());
    let router = server.router();
    let stats = server.app().sequence.stats();

    let (first_event_tx, first_event_rx) = tokio::sync::oneshot::channel();
    let reader = tokio::spawn({
        let router = router.clone();
        async move {
            let response = router.oneshot(get("/numbers")).await.unwrap();
            let mut body = response.into_body().into_data_stream();
            let mut buffer = String::new();
            let mut first_event_tx = Some(first_event_tx);

            while sse_values(&buffer).len() < 3 {
                let chunk = body.next().await.unwrap().unwrap();
                buffer.push_str(std::str::from_utf8(&chunk).unwrap());
                if !sse_values(&buffer).is_empty() {
                    if let Some(tx) = first_event_tx.take() {
                        let _ = tx.send(());
                    }
                }
            }
            sse_values(&buffer)
        }
    });

    // The stream is open and being consumed while the data request runs.
    first_event_rx.await.unwrap();
    assert_eq!(stats.active(), 1);

    let start = std::time::Instant::now();
    let data = router.oneshot(get("/api/data")).await.unwrap();
    assert_eq!(data.status(), StatusCode::OK);
    assert!(body_string(data).await.contains("Turner"));
    let elapsed = start.elapsed();
    assert!(elapsed < Duration::from_millis(300), "data request waited {elapsed:?}");
    assert_eq!(stats.active(), 1);

    let values = reader.await.unwrap();
    assert_eq!(values, vec![1, 2, 3]);
    assert!(wait_until(Duration::from_secs(2), || stats.active() == 0).await);
    assert_eq!(stats.cancelled(), 1);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "no route for GET /nope");
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let server = build_server(test_config());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/letters")
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unnested_child_path_is_not_found() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_assigned_and_propagated() {
    let server = build_server(test_config());

    let response = server.router().oneshot(get("/letters")).await.unwrap();
    let assigned = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(assigned.len(), 36);

    let request = Request::builder()
        .uri("/letters")
        .header("x-request-id", "client-42")
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "client-42");
}

#[tokio::test]
async fn test_health() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_swagger_config_lists_both_groups() {
    let server = build_server(test_config());
    let response = server
        .router()
        .oneshot(get("/v3/api-docs/swagger-config"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let names: Vec<&str> = body["urls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["api", "ROOT"]);
}

#[tokio::test]
async fn test_group_documents_partition_routes() {
    let server = build_server(test_config());

    let api = server.router().oneshot(get("/v3/api-docs/api")).await.unwrap();
    let api: serde_json::Value = serde_json::from_str(&body_string(api).await).unwrap();
    let mut api_paths: Vec<&String> = api["paths"].as_object().unwrap().keys().collect();
    api_paths.sort();
    assert_eq!(api_paths, vec!["/api/data", "/api/emojis"]);
    assert_eq!(api["paths"]["/api/emojis"]["get"]["operationId"], "getEmojis");
    assert_eq!(api["paths"]["/api/emojis"]["get"]["tags"][0], "ApiHandler");

    let root = server.router().oneshot(get("/v3/api-docs/ROOT")).await.unwrap();
    let root: serde_json::Value = serde_json::from_str(&body_string(root).await).unwrap();
    let mut root_paths: Vec<&String> = root["paths"].as_object().unwrap().keys().collect();
    root_paths.sort();
    assert_eq!(root_paths, vec!["/letters", "/numbers"]);
    assert!(root["paths"]["/numbers"]["get"]["responses"]["200"]["content"]
        .get("text/event-stream")
        .is_some());
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let server = build_server(test_config());
    let response = server.router().oneshot(get("/v3/api-docs/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
