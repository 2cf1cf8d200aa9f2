mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use mood_diary::models::DiaryEntry;
use serde_json::json;

#[tokio::test]
async fn create_trims_and_returns_created() {
    let app = TestApp::new().await;
    let resp = app
        .post_json("/diary", json!({"title": "  Rainy day ", "content": " Stayed in.  "}))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let entry = body_json(resp).await;
    assert_eq!(entry["title"], "Rainy day");
    assert_eq!(entry["content"], "Stayed in.");
    assert!(entry["id"].as_str().unwrap().parse::<i64>().is_ok());
    assert_eq!(entry["createdAt"], entry["updatedAt"]);

    let id = entry["id"].as_str().unwrap();
    let resp = app.get(&format!("/diary/{id}")).await;
    assert_eq!(body_json(resp).await, entry);
}

#[tokio::test]
async fn create_with_empty_fields_is_rejected() {
    let app = TestApp::new().await;
    let resp = app
        .post_json("/diary", json!({"title": "   ", "content": ""}))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(resp).await;
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains("Title is required"));
    assert!(message.contains("Content is required"));

    assert!(app.store.diary_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_keeps_created_at_and_restamps() {
    let app = TestApp::new().await;
    let original = DiaryEntry {
        id: "1704103200000".into(),
        title: "Draft".into(),
        content: "First words".into(),
        created_at: "2024-01-01T10:00:00Z".into(),
        updated_at: "2024-01-01T10:00:00Z".into(),
    };
    app.store.save_diary_entry(original.clone()).await.unwrap();

    let resp = app
        .put_json(
            "/diary/1704103200000",
            json!({"title": "Final", "content": "Last words"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let entries = app.store.diary_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Final");
    assert_eq!(entries[0].content, "Last words");
    assert_eq!(entries[0].created_at, original.created_at);
    assert_ne!(entries[0].updated_at, original.updated_at);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let app = TestApp::new().await;
    let resp = app
        .put_json("/diary/42", json!({"title": "T", "content": "C"}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(app.store.diary_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = TestApp::new().await;
    for (id, created_at) in [
        ("1", "2024-01-01T10:00:00.000Z"),
        ("3", "2024-03-01T10:00:00.000Z"),
        ("2", "2024-02-01T10:00:00.000Z"),
    ] {
        app.store
            .save_diary_entry(DiaryEntry {
                id: id.into(),
                title: format!("Entry {id}"),
                content: "c".into(),
                created_at: created_at.into(),
                updated_at: created_at.into(),
            })
            .await
            .unwrap();
    }

    let json = body_json(app.get("/diary").await).await;
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = TestApp::new().await;
    let resp = app
        .post_json("/diary", json!({"title": "Gone", "content": "soon"}))
        .await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app.delete(&format!("/diary/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = app.get(&format!("/diary/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.delete(&format!("/diary/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn rapid_creates_are_all_stored() {
    let app = TestApp::new().await;
    let mut ids = Vec::new();
    for i in 0..50 {
        let resp = app
            .post_json("/diary", json!({"title": format!("Note {i}"), "content": "quick"}))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        ids.push(body_json(resp).await["id"].as_str().unwrap().to_string());
    }

    let entries = app.store.diary_entries().await.unwrap();
    assert_eq!(entries.len(), 50);

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
async fn update_after_delete_does_not_resurrect() {
    let app = TestApp::new().await;
    let resp = app
        .post_json("/diary", json!({"title": "Short-lived", "content": "bye"}))
        .await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    app.delete(&format!("/diary/{id}")).await;
    let resp = app
        .put_json(&format!("/diary/{id}"), json!({"title": "Back", "content": "again"}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(app.store.diary_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_field_gets_json_error_body() {
    let app = TestApp::new().await;
    let resp = app.post_json("/diary", json!({"title": "only title"})).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let json = body_json(resp).await;
    assert_eq!(json["error"]["code"], 422);
    assert!(json["error"]["message"].as_str().unwrap().contains("content"));
}

#[tokio::test]
async fn malformed_json_gets_json_error_body() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .uri("/diary")
        .method("POST")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let resp = app.request(req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["code"], 422);
}
