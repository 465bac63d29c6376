use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use ecommerce_api::{
    build_app,
    infrastructure::{config::DatabaseConfig, database::DatabaseManager},
    AppState,
};
use serde_json::{json, Value};

async fn create_test_server() -> TestServer {
    let database = DatabaseManager::new(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    let app = build_app(AppState::new(database), Duration::from_secs(30));
    TestServer::new(app).unwrap()
}

async fn create_customer(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/customers")
        .json(&json!({ "name": name, "email": "a@x.com", "address": "1 Main St" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn create_product(server: &TestServer, name: &str, price: f64) -> i64 {
    let response = server
        .post("/products")
        .json(&json!({ "product_name": name, "price": price }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn create_order(server: &TestServer, customer_id: i64) -> i64 {
    let response = server
        .post("/orders")
        .json(&json!({ "customers_id": customer_id, "order_date": "2024-01-01" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_create_and_get_customer() {
    let server = create_test_server().await;

    let response = server
        .post("/customers")
        .json(&json!({ "name": "Ann", "email": "a@x.com", "address": "1 Main St" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({
        "id": 1,
        "name": "Ann",
        "email": "a@x.com",
        "address": "1 Main St"
    }));

    let response = server.get("/customers/1").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "id": 1,
        "name": "Ann",
        "email": "a@x.com",
        "address": "1 Main St"
    }));
}

#[tokio::test]
async fn test_list_customers() {
    let server = create_test_server().await;

    let response = server.get("/customers").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));

    create_customer(&server, "Ann").await;
    create_customer(&server, "Bob").await;

    let body: Vec<Value> = server.get("/customers").await.json();
    let names: Vec<&str> = body.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn test_missing_required_fields_are_reported() {
    let server = create_test_server().await;

    let response = server
        .post("/customers")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "name": ["Missing data for required field."] }));

    let response = server.post("/products").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "price": ["Missing data for required field."],
        "product_name": ["Missing data for required field."]
    }));

    let response = server
        .post("/orders")
        .json(&json!({ "customers_id": 1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "order_date": ["Missing data for required field."] }));

    // 校验失败时不写入任何数据
    server.get("/customers").await.assert_json(&json!([]));
}

#[tokio::test]
async fn test_wrong_types_and_long_text_are_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/products")
        .json(&json!({ "product_name": "Pen", "price": "cheap" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "price": ["Not a valid number."] }));

    let response = server
        .post("/customers")
        .json(&json!({ "name": "x".repeat(226) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "name": ["Longer than maximum length 225."] }));
}

#[tokio::test]
async fn test_length_and_unknown_field_errors_are_reported_together() {
    let server = create_test_server().await;

    let response = server
        .post("/customers")
        .json(&json!({ "name": "A", "email": "x".repeat(300), "bogus": 1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "bogus": ["Unknown field."],
        "email": ["Longer than maximum length 225."]
    }));
}

#[tokio::test]
async fn test_non_numeric_id_is_json_bad_request() {
    let server = create_test_server().await;

    let response = server.get("/customers/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["message"].is_string());

    let response = server.delete("/orders/1/remove_product/pen").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let server = create_test_server().await;

    let response = server.post("/customers").text("name=Ann").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_customer_is_not_found() {
    let server = create_test_server().await;

    let response = server.get("/customers/42").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "message": "Customer 42 not found" }));
}

#[tokio::test]
async fn test_update_customer() {
    let server = create_test_server().await;
    let id = create_customer(&server, "Ann").await;

    let response = server
        .put(&format!("/customers/{}", id))
        .json(&json!({ "name": "Anne", "email": "anne@x.com", "address": "2 Side St" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "id": id,
        "name": "Anne",
        "email": "anne@x.com",
        "address": "2 Side St"
    }));

    // 整体替换: 未提供的可选字段被清空
    let response = server
        .put(&format!("/customers/{}", id))
        .json(&json!({ "name": "Anne" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], Value::Null);
}

#[tokio::test]
async fn test_update_checks_id_before_body() {
    let server = create_test_server().await;

    let response = server.put("/customers/9").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid customer id" }));

    let id = create_customer(&server, "Ann").await;
    let response = server
        .put(&format!("/customers/{}", id))
        .json(&json!({ "email": "a@x.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "name": ["Missing data for required field."] }));

    let body: Value = server.get(&format!("/customers/{}", id)).await.json();
    assert_eq!(body["name"], "Ann");
}

#[tokio::test]
async fn test_delete_then_get_never_returns_data() {
    let server = create_test_server().await;
    let id = create_product(&server, "Pen", 1.5).await;

    let response = server.delete(&format!("/products/{}", id)).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": format!("successfully deleted product {}", id) }));

    server
        .get(&format!("/products/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server.delete(&format!("/products/{}", id)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid product id" }));

    // 自增主键不会复用
    let next = create_product(&server, "Cup", 3.0).await;
    assert_ne!(next, id);
}

#[tokio::test]
async fn test_product_crud() {
    let server = create_test_server().await;

    let response = server
        .post("/products")
        .json(&json!({ "product_name": "Pen", "price": 1.25 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "id": 1, "product_name": "Pen", "price": 1.25 }));

    let response = server
        .put("/products/1")
        .json(&json!({ "product_name": "Fountain pen", "price": "19.5" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "id": 1, "product_name": "Fountain pen", "price": 19.5 }));

    let body: Vec<Value> = server.get("/products").await.json();
    assert_eq!(body.len(), 1);
}

#[tokio::test]
async fn test_order_requires_existing_customer() {
    let server = create_test_server().await;

    let response = server
        .post("/orders")
        .json(&json!({ "customers_id": 1, "order_date": "2024-01-01" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid customer id" }));
}

#[tokio::test]
async fn test_create_order_persists_date() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;

    let response = server
        .post("/orders")
        .json(&json!({ "customers_id": customer_id, "order_date": "2024-03-15" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let order: Value = response.json();

    let fetched: Value = server
        .get(&format!("/orders/{}", order["id"]))
        .await
        .json();
    assert_eq!(fetched["order_date"], "2024-03-15");
    assert_eq!(fetched["customers_id"], customer_id);
}

#[tokio::test]
async fn test_add_product_to_order() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;
    let product_id = create_product(&server, "Pen", 1.5).await;

    let path = format!("/orders/{}/add_product/{}", order_id, product_id);
    let response = server.get(&path).await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": format!("Product {} added to order {}", product_id, order_id)
    }));

    let response = server.post(&path).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Product already in order" }));

    let products: Vec<Value> = server
        .get(&format!("/orders/{}/products", order_id))
        .await
        .json();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], product_id);
}

#[tokio::test]
async fn test_add_product_distinguishes_missing_sides() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;

    let response = server
        .get(&format!("/orders/{}/add_product/5", order_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid product id" }));

    let product_id = create_product(&server, "Pen", 1.5).await;
    let response = server
        .post(&format!("/orders/99/add_product/{}", product_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid order id" }));
}

#[tokio::test]
async fn test_remove_product_from_order() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;
    let pen = create_product(&server, "Pen", 1.5).await;
    let cup = create_product(&server, "Cup", 3.0).await;

    let remove_pen = format!("/orders/{}/remove_product/{}", order_id, pen);
    let response = server.delete(&remove_pen).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Product not in order" }));

    server
        .post(&format!("/orders/{}/add_product/{}", order_id, pen))
        .await
        .assert_status_ok();
    server
        .post(&format!("/orders/{}/add_product/{}", order_id, cup))
        .await
        .assert_status_ok();

    let response = server.delete(&remove_pen).await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": format!("Product {} removed from order {}", pen, order_id)
    }));

    let products: Vec<Value> = server
        .get(&format!("/orders/{}/products", order_id))
        .await
        .json();
    let ids: Vec<i64> = products.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![cup]);
}

#[tokio::test]
async fn test_remove_product_distinguishes_missing_sides() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;
    let product_id = create_product(&server, "Pen", 1.5).await;

    let response = server
        .delete(&format!("/orders/99/remove_product/{}", product_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid order id" }));

    let response = server
        .delete(&format!("/orders/{}/remove_product/42", order_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid product id" }));
}

#[tokio::test]
async fn test_list_customer_orders() {
    let server = create_test_server().await;
    let ann = create_customer(&server, "Ann").await;
    let bob = create_customer(&server, "Bob").await;
    let first = create_order(&server, ann).await;
    create_order(&server, bob).await;
    let second = create_order(&server, ann).await;

    let orders: Vec<Value> = server
        .get(&format!("/customers/{}/orders", ann))
        .await
        .json();
    let ids: Vec<i64> = orders.iter().map(|o| o["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![first, second]);

    let response = server.get("/customers/77/orders").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid customer id" }));
}

#[tokio::test]
async fn test_list_products_for_unknown_order() {
    let server = create_test_server().await;

    let response = server.get("/orders/3/products").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid order id" }));
}

#[tokio::test]
async fn test_customer_with_orders_cannot_be_deleted() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;

    let response = server.delete(&format!("/customers/{}", customer_id)).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    server
        .delete(&format!("/orders/{}", order_id))
        .await
        .assert_status_ok();
    let response = server.delete(&format!("/customers/{}", customer_id)).await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": format!("successfully deleted customer {}", customer_id)
    }));
}

#[tokio::test]
async fn test_deleting_product_unlinks_it_from_orders() {
    let server = create_test_server().await;
    let customer_id = create_customer(&server, "Ann").await;
    let order_id = create_order(&server, customer_id).await;
    let product_id = create_product(&server, "Pen", 1.5).await;

    server
        .post(&format!("/orders/{}/add_product/{}", order_id, product_id))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/products/{}", product_id))
        .await
        .assert_status_ok();

    server
        .get(&format!("/orders/{}/products", order_id))
        .await
        .assert_json(&json!([]));
}

#[tokio::test]
async fn test_update_order() {
    let server = create_test_server().await;
    let ann = create_customer(&server, "Ann").await;
    let bob = create_customer(&server, "Bob").await;
    let order_id = create_order(&server, ann).await;

    let response = server
        .put(&format!("/orders/{}", order_id))
        .json(&json!({ "customers_id": bob, "order_date": "2024-06-30" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "id": order_id,
        "order_date": "2024-06-30",
        "customers_id": bob
    }));

    let response = server
        .put(&format!("/orders/{}", order_id))
        .json(&json!({ "customers_id": 404, "order_date": "2024-06-30" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Invalid customer id" }));

    let orders: Vec<Value> = server.get("/orders").await.json();
    assert_eq!(orders[0]["customers_id"], bob);
}
