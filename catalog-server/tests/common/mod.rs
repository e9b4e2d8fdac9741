#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use catalog_server::{Config, ServerState, build_router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    router: Router,
    pub admin_token: String,
    pub user_token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let state = ServerState::new(Config::for_tests());
        let router = build_router(state.clone());
        let admin_token = state
            .jwt_service()
            .generate_token("admin-1", "Admin", "admin")
            .unwrap();
        let user_token = state
            .jwt_service()
            .generate_token("user-1", "Shopper", "user")
            .unwrap();
        Self {
            state,
            router,
            admin_token,
            user_token,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn admin_post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&self.admin_token), Some(body))
            .await
    }

    pub async fn admin_put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&self.admin_token), Some(body))
            .await
    }

    pub async fn admin_delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(&self.admin_token), None)
            .await
    }

    /// Create a category and return its id
    pub async fn category(&self, name: &str, parent: Option<&str>) -> String {
        let (status, body) = self
            .admin_post(
                "/api/categories/create",
                serde_json::json!({ "name": name, "parent_category": parent }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a subcategory and return its id
    pub async fn subcategory(&self, name: &str, category: &str) -> String {
        let (status, body) = self
            .admin_post(
                "/api/subcategories/create",
                serde_json::json!({ "name": name, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a product and return its id
    pub async fn product(&self, name: &str, subcategory: &str, original: f64, discount: f64) -> String {
        let (status, body) = self
            .admin_post(
                "/api/products/create",
                serde_json::json!({
                    "name": name,
                    "subcategory": subcategory,
                    "original_price": original,
                    "discount_price": discount,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}
