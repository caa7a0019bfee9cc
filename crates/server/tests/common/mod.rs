//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, AppState, ServerConfig};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const LOGIN: &str = "222@a.ru";
pub const PASSWORD: &str = "1";
pub const JWT_SECRET: &str = "integration-secret";

/// Router over a fresh in-memory store; the temp dir holds uploads.
pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Like [`TestApp::new`], with a hook to adjust the configuration.
    pub fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let uploads = TempDir::new().unwrap();
        let mut config = ServerConfig::default();
        config.jwt_secret = Some(JWT_SECRET.into());
        config.bcrypt_cost = 4;
        config.upload_dir = uploads.path().to_path_buf();
        adjust(&mut config);

        let state = Arc::new(AppState::new(config).unwrap());
        Self {
            router: build_router(state),
            uploads,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.json(Method::GET, uri, token, None).await
    }

    /// Register the default account and return a fresh access token.
    pub async fn token(&self) -> String {
        let creds = json!({ "login": LOGIN, "password": PASSWORD });
        let (status, _) = self
            .json(Method::POST, "/auth/register", None, Some(creds.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .json(Method::POST, "/auth/login", None, Some(creds))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["acces_token"].as_str().unwrap().to_string()
    }
}

pub fn product_payload() -> Value {
    json!({
        "image": "1.png",
        "title": "Мой продукт",
        "price": 100,
        "oldPrice": 120,
        "credit": 10,
        "description": "Описание продукта",
        "advantages": "Преимущества продукта",
        "disAdvantages": "Недостатки продукта",
        "categories": ["Product"],
        "tags": ["тег1"],
        "characteristics": [
            { "name": "Характеристика 1", "value": "1" },
            { "name": "Характеристика 2", "value": "2" }
        ]
    })
}

pub fn review_payload(product_id: &str) -> Value {
    json!({
        "name": "Тест",
        "title": "Заголовок",
        "description": "Описание тестовое",
        "rating": 5,
        "productId": product_id,
    })
}

pub fn top_page_payload(alias: &str, second_category: &str) -> Value {
    json!({
        "firstCategory": 0,
        "secondCategory": second_category,
        "alias": alias,
        "title": format!("Курсы {alias}"),
        "category": alias,
        "hh": { "count": 10, "juniorSalary": 1000, "middleSalary": 2000, "seniorSalary": 3000 },
        "advantages": [{ "title": "Быстро", "description": "Учитесь быстро" }],
        "seoText": format!("Лучшие курсы по {alias}"),
        "tagsTitle": "Теги",
        "tags": [alias],
    })
}

/// Syntactically valid id that no document carries.
pub const UNKNOWN_ID: &str = "65a1b2c3d4e5f60718293a4b";
