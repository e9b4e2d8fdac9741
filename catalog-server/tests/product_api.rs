mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_derives_category_and_percentage() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;

    let (status, body) = app
        .admin_post(
            "/api/products/create",
            json!({
                "name": "Tee",
                "subcategory": shirts,
                "original_price": 8.0,
                "discount_price": 7.0,
                "stock": 5,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["category"], fashion.as_str());
    assert_eq!(body["data"]["discount_percentage"], 13);
    assert_eq!(body["data"]["stock"], 5);
}

#[tokio::test]
async fn test_invalid_prices_rejected() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;

    for (original, discount) in [(10.0, 10.0), (10.0, 12.0), (0.0, 0.0)] {
        let (status, body) = app
            .admin_post(
                "/api/products/create",
                json!({
                    "name": "Tee",
                    "subcategory": shirts,
                    "original_price": original,
                    "discount_price": discount,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{original} / {discount}");
        assert_eq!(body["code"], 5002);
    }
}

#[tokio::test]
async fn test_unknown_subcategory() {
    let app = TestApp::new();
    let (status, body) = app
        .admin_post(
            "/api/products/create",
            json!({
                "name": "Tee",
                "subcategory": "missing",
                "original_price": 10.0,
                "discount_price": 5.0,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_update_recomputes_percentage() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    let id = app.product("Tee", &shirts, 100.0, 90.0).await;

    let (status, body) = app
        .admin_put(
            &format!("/api/products/update/{id}"),
            json!({ "discount_price": 60.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["discount_percentage"], 40);

    let (status, _) = app
        .admin_put(
            &format!("/api/products/update/{id}"),
            json!({ "original_price": 50.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_and_sort() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    app.product("Cheap", &shirts, 10.0, 5.0).await;
    app.product("Middle", &shirts, 50.0, 40.0).await;
    app.product("Pricey", &shirts, 200.0, 150.0).await;

    let (status, body) = app
        .get("/api/products/list?min_price=10&max_price=100&sort_by=-price")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["name"], "Middle");

    let (_, body) = app.get("/api/products/list?sort_by=price").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Cheap", "Middle", "Pricey"]);

    let (status, _) = app.get("/api/products/list?min_price=10&max_price=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/products/list?sort_by=rating").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_best_deals_skip_inactive() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    app.product("Ten", &shirts, 100.0, 90.0).await;
    app.product("Fifty", &shirts, 100.0, 50.0).await;
    let hidden = app.product("Ninety", &shirts, 100.0, 10.0).await;
    app.admin_put(
        &format!("/api/products/update/{hidden}"),
        json!({ "status": "Inactive" }),
    )
    .await;

    let (status, body) = app.get("/api/products/best-deals?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    let deals = body.as_array().unwrap();
    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0]["name"], "Fifty");
    assert_eq!(deals[1]["name"], "Ten");
}

#[tokio::test]
async fn test_missing_product() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/products/single/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);
}
