//! API routes configuration module

use crate::api::handlers::{
    create_user, delete_user, get_user, list_users, method_not_allowed, route_not_found, status,
    update_user, SharedStore,
};
use crate::api::middleware::{log_requests, server_header};
use axum::{middleware, routing::get, Extension, Router};

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `store` - User store shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/status", get(status))
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn(server_header))
        .layer(middleware::from_fn(log_requests))
        .layer(Extension(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::SERVER_NAME;
    use crate::store::{InMemoryStore, RelationalStore};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn crud_scenario(app: Router) {
        let (code, body) = send(&app, "POST", "/users", Some(json!({"name": "Ann", "email": "a@x.com"}))).await;
        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "name": "Ann", "email": "a@x.com"}));

        let (code, body) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Ann", "email": "a@x.com"}));

        let (code, body) = send(
            &app,
            "PUT",
            "/users/1",
            Some(json!({"id": 5, "name": "Ann B", "email": "a@x.com"})),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Ann B", "email": "a@x.com"}));

        let (code, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "name": "Ann B", "email": "a@x.com"}]));

        let (code, body) = send(&app, "DELETE", "/users/1", None).await;
        assert_eq!(code, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (code, body) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);

        let (code, _) = send(&app, "DELETE", "/users/1", None).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    fn memory_app() -> Router {
        app(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn crud_scenario_in_memory() {
        crud_scenario(memory_app()).await;
    }

    #[tokio::test]
    async fn crud_scenario_sqlite() {
        let path = std::env::temp_dir().join(format!("user-registry-{}.db", uuid::Uuid::new_v4()));
        let store = RelationalStore::open(path.to_str().unwrap()).unwrap();
        crud_scenario(app(Arc::new(store))).await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn create_missing_field_is_bad_request_and_stores_nothing() {
        let app = memory_app();
        let (code, body) = send(&app, "POST", "/users", Some(json!({"name": "Ann"}))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (code, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn type_mismatch_and_blank_fields_are_bad_request() {
        let app = memory_app();
        let (code, _) = send(&app, "POST", "/users", Some(json!({"name": 3, "email": "a@x.com"}))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);

        let (code, _) = send(&app, "POST", "/users", Some(json!({"name": "  ", "email": "a@x.com"}))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .body(Body::from("name=Ann"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_with_bad_body_leaves_record_untouched() {
        let app = memory_app();
        send(&app, "POST", "/users", Some(json!({"name": "Ann", "email": "a@x.com"}))).await;

        let (code, _) = send(&app, "PUT", "/users/1", Some(json!({"email": "b@x.com"}))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(body, json!({"id": 1, "name": "Ann", "email": "a@x.com"}));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (code, body) = send(&memory_app(), "GET", "/users/abc", None).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid user ID");
    }

    #[tokio::test]
    async fn unsupported_verbs_are_method_not_allowed() {
        let app = memory_app();
        let (code, body) = send(&app, "PATCH", "/users", None).await;
        assert_eq!(code, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["code"], 405);

        let (code, _) = send(&app, "POST", "/users/1", None).await;
        assert_eq!(code, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn status_and_server_header() {
        let response = memory_app()
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::SERVER], SERVER_NAME);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (code, body) = send(&memory_app(), "GET", "/nowhere", None).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
    }
}
