//! End-to-end tests for the contact form, admin message listings and stats.

use axum::{body::Body, http::Request};
use folio_node::api::{create_router, AppState};
use folio_node::config::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_app() -> axum::Router {
    let settings = Settings {
        log_dir: String::new(),
        ..Settings::default()
    };
    create_router(AppState::from_settings(settings))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn login_cookie(app: &axum::Router) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "password": "secret123" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);
    response.headers()["set-cookie"]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn contact(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn submit(app: &axum::Router, name: &str) {
    let response = app
        .clone()
        .oneshot(contact(json!({
            "name": name,
            "email": "visitor@example.com",
            "message": "Hello!"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

// ==================== Submission ====================

#[tokio::test]
async fn test_contact_validation_and_escaped_read() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(contact(json!({
            "name": "Eve",
            "email": "bad",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["error"], "Invalid email address");

    let response = app
        .clone()
        .oneshot(contact(json!({
            "name": "<script>alert(1)</script>",
            "email": "  eve@example.com ",
            "message": "  Nice site & \"great\" work  "
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["status"], "success");

    let cookie = login_cookie(&app).await;
    let response = app
        .oneshot(admin_get("/api/contact/messages", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let messages = json_body(response).await["messages"].clone();
    assert_eq!(messages.as_array().unwrap().len(), 1);
    let message = &messages[0];
    assert_eq!(message["id"], 1);
    assert_eq!(message["name"], "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;");
    assert_eq!(message["email"], "eve@example.com");
    assert_eq!(message["subject"], "No Subject");
    assert_eq!(message["message"], "Nice site &amp; &quot;great&quot; work");
    assert!(message["timestamp"].is_string());
}

#[tokio::test]
async fn test_contact_missing_fields() {
    let app = create_test_app();

    let bodies = [
        json!({ "email": "a@b.com", "message": "hi" }),
        json!({ "name": "A", "message": "hi" }),
        json!({ "name": "A", "email": "a@b.com" }),
        json!({ "name": "  ", "email": "a@b.com", "message": "hi" }),
        json!({ "name": "A", "email": "bad", "message": "" }),
    ];

    for body in bodies {
        let response = app.clone().oneshot(contact(body)).await.unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(json_body(response).await["error"], "Missing required fields");
    }

    let cookie = login_cookie(&app).await;
    let response = app
        .oneshot(admin_get("/api/contact/messages", Some(&cookie)))
        .await
        .unwrap();
    assert!(json_body(response).await["messages"]
        .as_array()
        .unwrap()
        .is_empty());
}

// ==================== Admin reads ====================

#[tokio::test]
async fn test_message_listings_require_admin() {
    let app = create_test_app();
    submit(&app, "Ada").await;

    for uri in ["/api/contact/messages", "/api/contact/all-messages", "/api/stats"] {
        let response = app.clone().oneshot(admin_get(uri, None)).await.unwrap();
        assert_eq!(response.status(), 401, "{}", uri);
        assert_eq!(json_body(response).await["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_message_ordering() {
    let app = create_test_app();
    for name in ["first", "second", "third"] {
        submit(&app, name).await;
    }
    let cookie = login_cookie(&app).await;

    let names = |body: Value| -> Vec<String> {
        body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect()
    };

    let response = app
        .clone()
        .oneshot(admin_get("/api/contact/messages", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(names(json_body(response).await), ["first", "second", "third"]);

    let response = app
        .oneshot(admin_get("/api/contact/all-messages", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(names(json_body(response).await), ["third", "second", "first"]);
}

// ==================== Stats ====================

#[tokio::test]
async fn test_stats() {
    let app = create_test_app();
    for name in ["a", "b", "c", "d"] {
        submit(&app, name).await;
    }
    let cookie = login_cookie(&app).await;

    let response = app
        .oneshot(admin_get("/api/stats", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let stats = json_body(response).await;
    assert_eq!(stats["blog_count"], 2);
    assert_eq!(stats["message_count"], 4);
    assert_eq!(stats["total_blog_views"], 2140);
    assert_eq!(stats["total_likes"], 73);
    assert_eq!(stats["engagement_rate"], 100.0);

    let recent = stats["recent_messages"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["name"], "d");
    assert_eq!(recent[2]["name"], "b");
}

#[tokio::test]
async fn test_stats_without_seed() {
    let settings = Settings {
        log_dir: String::new(),
        seed_posts: false,
        ..Settings::default()
    };
    let app = create_router(AppState::from_settings(settings));
    let cookie = login_cookie(&app).await;

    let response = app
        .oneshot(admin_get("/api/stats", Some(&cookie)))
        .await
        .unwrap();
    let stats = json_body(response).await;
    assert_eq!(stats["blog_count"], 0);
    assert_eq!(stats["engagement_rate"], 0.0);
}

// ==================== Audit log ====================

#[tokio::test]
async fn test_audit_log_written() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        log_dir: dir.path().display().to_string(),
        ..Settings::default()
    };
    let app = create_router(AppState::from_settings(settings));

    submit(&app, "Ada").await;
    login_cookie(&app).await;

    let contact_log = std::fs::read_to_string(dir.path().join("contact_log.json")).unwrap();
    let entry: Value = serde_json::from_str(contact_log.lines().next().unwrap()).unwrap();
    assert_eq!(entry["name"], "Ada");

    let activity = std::fs::read_to_string(dir.path().join("activity.log")).unwrap();
    let entry: Value = serde_json::from_str(activity.lines().next().unwrap()).unwrap();
    assert_eq!(entry["action"], "login");
}
