mod utils;

use axum::http::StatusCode;
use leaderboard::PlayerRepository;
use std::net::SocketAddr;

use utils::{udid, TestAppBuilder};

#[tokio::test]
async fn test_submitted_game_appears_in_time_ranking_with_duration() {
    let app = TestAppBuilder::new().build();

    let status = app.submit_game("A", 42, 300, &udid('a')).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app.get("/game/ranking").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["msg"], "success");

    let entry = &json["timeDataList"][0];
    assert_eq!(entry["name"], "A");
    assert_eq!(entry["moveCount"], 42);
    assert_eq!(entry["duration"], 300);
    assert_eq!(entry["createdTime"], "2024-01-01 10:00:00.000");
    assert_eq!(entry["overTime"], "2024-01-01 10:05:00.000");
}

#[tokio::test]
async fn test_rankings_are_ordered_and_capped_at_twenty() {
    let app = TestAppBuilder::new().build();

    for i in 0..25u32 {
        let moves = (100 - i * 3) as i32;
        let seconds = 60 + (i * 7919) % 600;
        app.submit_game(&format!("p{}", i), moves, seconds, &udid('b'))
            .await;
    }
    assert_eq!(app.records.record_count(), 25);

    let (_, json) = app.get("/game/ranking").await;
    let moves = json["moveDataList"].as_array().unwrap();
    let times = json["timeDataList"].as_array().unwrap();

    assert_eq!(moves.len(), 20);
    assert_eq!(times.len(), 20);
    assert!(moves
        .windows(2)
        .all(|w| w[0]["moveCount"].as_i64() <= w[1]["moveCount"].as_i64()));
    assert!(times
        .windows(2)
        .all(|w| w[0]["duration"].as_i64() <= w[1]["duration"].as_i64()));
}

#[tokio::test]
async fn test_invalid_games_are_acknowledged_but_not_stored() {
    let app = TestAppBuilder::new().build();

    let bodies = [
        // finished before it started
        r#"{"name":"x","moveCount":1,"createdTime":"2024-01-01 10:05:00.000","overTime":"2024-01-01 10:00:00.000","udid":"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}"#,
        // missing timestamps
        r#"{"name":"x","moveCount":1,"udid":"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}"#,
        // short device id
        r#"{"name":"x","moveCount":1,"createdTime":"2024-01-01 10:00:00.000","overTime":"2024-01-01 10:05:00.000","udid":"abc"}"#,
    ];

    for body in bodies {
        let (status, json) = app.post_json("/game/adddata", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["msg"], "success");
    }

    assert_eq!(app.records.record_count(), 0);
    let (_, json) = app.get("/game/ranking").await;
    assert_eq!(json["timeDataList"], serde_json::json!([]));
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = TestAppBuilder::new().build();

    let (status, json) = app.post_json("/game/adddata", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["msg"], "invalid request body");

    let (status, _) = app.post_json("/game/init", r#"{"playCount":"lots"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_init_twice_increments_play_count_by_one() {
    let peer = SocketAddr::from(([203, 0, 113, 50], 1234));
    let app = TestAppBuilder::new().with_peer(peer).build();
    let device = udid('c');

    let first = format!(r#"{{"name":"carol","playCount":3,"udid":"{}"}}"#, device);
    let (status, json) = app.post_json("/game/init", &first).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "");

    let second = format!(r#"{{"name":"renamed","playCount":40,"udid":"{}"}}"#, device);
    let (_, json) = app.post_json("/game/init", &second).await;
    assert_eq!(json["error"], "");

    let stored = app.players.get_player(&device).await.unwrap().unwrap();
    assert_eq!(stored.play_count, 4);
    assert_eq!(stored.name, "carol");
    assert_eq!(stored.last_ip, "203.0.113.50");
}

#[tokio::test]
async fn test_init_with_bad_device_id_reports_error_without_mutation() {
    let app = TestAppBuilder::new().build();

    let (status, json) = app
        .post_json("/game/init", r#"{"name":"dan","playCount":1,"udid":"tooshort"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["msg"], "success");
    assert_ne!(json["error"], "");
    assert_eq!(app.players.player_count(), 0);
}

#[tokio::test]
async fn test_root_echoes_client_ip() {
    let app = TestAppBuilder::new()
        .with_peer(SocketAddr::from(([192, 0, 2, 33], 8080)))
        .build();

    let (status, json) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["clientIP"], "192.0.2.33");
}

#[tokio::test]
async fn test_root_uses_forwarded_for_behind_trusted_proxy() {
    let app = TestAppBuilder::new().trusting_proxy_headers().build();

    let request = axum::http::Request::builder()
        .uri("/")
        .header("x-forwarded-for", "203.0.113.77")
        .body(axum::body::Body::empty())
        .unwrap();
    let (_, json) = app.send(request).await;

    assert_eq!(json["clientIP"], "203.0.113.77");
}

#[tokio::test]
async fn test_health() {
    let app = TestAppBuilder::new().build();

    let (status, json) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestAppBuilder::new().build();

    let request = axum::http::Request::builder()
        .uri("/game/ranking")
        .header("origin", "https://game.example")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
