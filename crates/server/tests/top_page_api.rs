//! Top-page CRUD, alias lookup and search.

mod common;

use axum::http::{Method, StatusCode};
use common::{top_page_payload, TestApp, UNKNOWN_ID};
use serde_json::json;

async fn create_page(app: &TestApp, token: &str, alias: &str, second: &str) -> String {
    let (status, body) = app
        .json(
            Method::POST,
            "/top-page/create",
            Some(token),
            Some(top_page_payload(alias, second)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_requires_token() {
    let app = TestApp::new();
    let (status, _) = app
        .json(
            Method::POST,
            "/top-page/create",
            None,
            Some(top_page_payload("typescript", "Программирование")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lookup_by_id_and_alias() {
    let app = TestApp::new();
    let token = app.token().await;
    let id = create_page(&app, &token, "typescript", "Программирование").await;

    let (status, body) = app.get(&format!("/top-page/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alias"], "typescript");
    assert_eq!(body["firstCategory"], 0);

    let (status, body) = app.get("/top-page/byAlias/typescript", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id.as_str());

    let (status, body) = app.get("/top-page/byAlias/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "statusCode": 404,
            "message": "Страница с таким alias не найдена",
            "error": "Not Found",
        })
    );

    let (status, body) = app.get(&format!("/top-page/{UNKNOWN_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Страница с таким id не найдена");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = TestApp::new();
    let token = app.token().await;

    let (status, body) = app.get("/top-page/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Неверный формат id");

    let (status, _) = app
        .json(Method::DELETE, "/top-page/xyz", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_alias_is_rejected() {
    let app = TestApp::new();
    let token = app.token().await;
    create_page(&app, &token, "typescript", "Программирование").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/top-page/create",
            Some(&token),
            Some(top_page_payload("typescript", "Другое")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Страница с таким alias уже существует");
}

#[tokio::test]
async fn patch_and_delete_are_guarded() {
    let app = TestApp::new();
    let token = app.token().await;
    let id = create_page(&app, &token, "typescript", "Программирование").await;
    let uri = format!("/top-page/{id}");

    let (status, _) = app
        .json(Method::PATCH, &uri, None, Some(json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .json(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "title": "Курсы по TypeScript" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Курсы по TypeScript");
    assert_eq!(body["alias"], "typescript");

    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Страница с таким id не найдена");
}

#[tokio::test]
async fn find_groups_by_second_category() {
    let app = TestApp::new();
    let token = app.token().await;
    create_page(&app, &token, "typescript", "Программирование").await;
    create_page(&app, &token, "photoshop", "Дизайн").await;
    create_page(&app, &token, "rust", "Программирование").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/top-page/find",
            None,
            Some(json!({ "firstCategory": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "_id": { "secondCategory": "Программирование" },
                "pages": [
                    { "alias": "typescript", "title": "Курсы typescript" },
                    { "alias": "rust", "title": "Курсы rust" }
                ]
            },
            {
                "_id": { "secondCategory": "Дизайн" },
                "pages": [{ "alias": "photoshop", "title": "Курсы photoshop" }]
            }
        ])
    );

    let (status, body) = app
        .json(
            Method::POST,
            "/top-page/find",
            None,
            Some(json!({ "firstCategory": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app
        .json(
            Method::POST,
            "/top-page/find",
            None,
            Some(json!({ "firstCategory": 9 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn text_search_matches_words() {
    let app = TestApp::new();
    let token = app.token().await;
    create_page(&app, &token, "typescript", "Программирование").await;
    create_page(&app, &token, "photoshop", "Дизайн").await;

    let (status, body) = app.get("/top-page/textSearch/photoshop", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["alias"], "photoshop");

    let (status, body) = app.get("/top-page/textSearch/golang", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
