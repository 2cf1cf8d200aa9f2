#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use mood_diary::store::DiaryStore;
use serde_json::Value;
use sqlx::SqlitePool;

pub struct TestApp {
    pub router: Router,
    pub store: DiaryStore,
    pub db: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = mood_diary::db::memory_pool()
            .await
            .expect("Failed to create in-memory SQLite pool");

        let store = mood_diary::sqlite_store(pool.clone());
        let router = mood_diary::build_app(store.clone());

        Self {
            router,
            store,
            db: pool,
        }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    /// Send a JSON body with the given method.
    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response {
        self.send_json("PUT", uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    /// Overwrite a raw stored value, bypassing the store.
    pub async fn put_raw(&self, key: &str, value: &str) {
        sqlx::query("INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind("2024-01-01T00:00:00Z")
            .execute(&self.db)
            .await
            .expect("Failed to write raw value");
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}
