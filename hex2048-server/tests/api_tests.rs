//! Integration tests for hex2048-server API

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use hex2048_core::{Cube, Grid, TileRecord};
use hex2048_server::{create_router, create_state, ServerConfig, MAX_SIDE};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig {
        seed: Some(11),
        ..Default::default()
    };
    let state = create_state(&config).unwrap();
    create_router(&config, state)
}

fn spawn_request(side: u32, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/spawn/{side}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "rust");
    assert_eq!(json["requests"], 0);
}

#[tokio::test]
async fn test_board_endpoint() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/board/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["radius"], 2);
    assert_eq!(json["cells"], 19);
    assert_eq!(json["hexes"].as_array().unwrap().len(), 19);
    assert_eq!(json["directions"].as_array().unwrap().len(), 6);
    assert_eq!(json["direction_names"][0], "n");
}

#[tokio::test]
async fn test_board_zero_side_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/board/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn board_request(side: u32) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/board/{side}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_board_oversized_side_rejected() {
    for side in [MAX_SIDE + 1, 100_000, u32::MAX] {
        let response = test_app().oneshot(board_request(side)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "side {side}");

        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("larger than"));
    }
}

#[tokio::test]
async fn test_board_largest_side_served() {
    let response = test_app().oneshot(board_request(MAX_SIDE)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let radius = u64::from(MAX_SIDE - 1);
    assert_eq!(json["cells"], 3 * radius * radius + 3 * radius + 1);
}

#[tokio::test]
async fn test_opening_spawn() {
    let app = test_app();

    let response = app.oneshot(spawn_request(3, "[]".to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let tiles: Vec<TileRecord> = serde_json::from_value(json).unwrap();
    assert_eq!(tiles.len(), 3);
    assert!(tiles.iter().all(|t| t.position().is_within(2)));
}

#[tokio::test]
async fn test_spawn_accepts_encoded_tiles() {
    let app = test_app();

    // The client may post the encoded string from Grid::non_empty_tiles as-is
    let grid = Grid::from_records(1, &[TileRecord::new(Cube::ORIGIN, 2)]);
    let encoded = grid.non_empty_tiles().unwrap();
    let body = serde_json::to_string(&encoded).unwrap();

    let response = app.oneshot(spawn_request(2, body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tiles: Vec<TileRecord> = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(tiles.len(), 1);
    assert_ne!(tiles[0].position(), Cube::ORIGIN);
}

#[tokio::test]
async fn test_full_board_returns_null() {
    let app = test_app();

    let body = json!([{"x": 0, "y": 0, "z": 0, "value": 2}]).to_string();
    let response = app.oneshot(spawn_request(1, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, Value::Null);
}

#[tokio::test]
async fn test_off_board_tile_rejected() {
    let app = test_app();

    let body = json!([{"x": 2, "y": 0, "z": -2, "value": 2}]).to_string();
    let response = app.oneshot(spawn_request(2, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("not on a board"));
}

#[tokio::test]
async fn test_zero_side_spawn_rejected() {
    let app = test_app();

    let response = app.oneshot(spawn_request(0, "[]".to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_side_spawn_rejected() {
    for side in [MAX_SIDE + 1, u32::MAX] {
        let response = test_app().oneshot(spawn_request(side, "[]".to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "side {side}");
    }
}

#[tokio::test]
async fn test_seeded_servers_agree() {
    let first = json_body(test_app().oneshot(spawn_request(4, "[]".to_string())).await.unwrap()).await;
    let second = json_body(test_app().oneshot(spawn_request(4, "[]".to_string())).await.unwrap()).await;
    assert_eq!(first, second);
}
