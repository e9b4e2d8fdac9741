mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_under_unknown_category() {
    let app = TestApp::new();
    let (status, body) = app
        .admin_post(
            "/api/subcategories/create",
            json!({ "name": "Shirts", "category": "missing" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_active_subcategory_needs_active_category() {
    let app = TestApp::new();
    let category = app.category("Fashion", None).await;
    app.admin_put(
        &format!("/api/categories/update/{category}"),
        json!({ "status": "Inactive" }),
    )
    .await;

    let (status, body) = app
        .admin_post(
            "/api/subcategories/create",
            json!({ "name": "Shirts", "category": category }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, body) = app
        .admin_post(
            "/api/subcategories/create",
            json!({ "name": "Shirts", "category": category, "status": "Inactive" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Inactive");
}

#[tokio::test]
async fn test_duplicate_name_within_category() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let sport = app.category("Sport", None).await;
    app.subcategory("Shirts", &fashion).await;

    let (status, body) = app
        .admin_post(
            "/api/subcategories/create",
            json!({ "name": "shirts", "category": fashion }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    app.subcategory("Shirts", &sport).await;
}

#[tokio::test]
async fn test_move_repoints_products() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let sport = app.category("Sport", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    let product = app.product("Tee", &shirts, 20.0, 15.0).await;

    let (status, body) = app
        .admin_put(
            &format!("/api/subcategories/update/{shirts}"),
            json!({ "category": sport }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["category"], sport.as_str());

    let (_, product) = app.get(&format!("/api/products/single/{product}")).await;
    assert_eq!(product["category"], sport.as_str());
    assert_eq!(product["subcategory"], shirts.as_str());
}

#[tokio::test]
async fn test_delete_blocked_by_products() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    let product = app.product("Tee", &shirts, 20.0, 15.0).await;

    let (status, body) = app
        .admin_delete(&format!("/api/subcategories/delete/{shirts}"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    app.admin_delete(&format!("/api/products/delete/{product}"))
        .await;
    let (status, _) = app
        .admin_delete(&format!("/api/subcategories/delete/{shirts}"))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_listing_and_detail() {
    let app = TestApp::new();
    let fashion = app.category("Fashion", None).await;
    let sport = app.category("Sport", None).await;
    let shirts = app.subcategory("Shirts", &fashion).await;
    app.subcategory("Shoes", &fashion).await;
    app.subcategory("Balls", &sport).await;
    app.product("Tee", &shirts, 20.0, 15.0).await;

    let (status, body) = app
        .get(&format!("/api/subcategories?category={fashion}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["category_name"], "Fashion");

    let (status, body) = app.get(&format!("/api/subcategories/{shirts}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subcategory"]["name"], "Shirts");
    assert_eq!(body["products"].as_array().unwrap().len(), 1);

    // Empty listing is not an error
    let (status, body) = app.get("/api/subcategories?name=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}
