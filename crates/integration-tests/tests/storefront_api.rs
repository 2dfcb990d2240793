//! JSON API tests against a running storefront.
//!
//! Requires a migrated and seeded database and the storefront running
//! (`cargo run -p aurelia-storefront`).

use aurelia_integration_tests::{PASSWORD, client, unique_email, url};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_product_list_shape() {
    let client = client().expect("client");
    let resp = client
        .get(url("/api/products?limit=5&sort=lh"))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");

    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert!(body["total"].as_i64().is_some());
    assert!(body["totalPages"].as_i64().is_some());

    let items = body["products"].as_array().expect("products array");
    assert!(items.len() <= 5);
    let prices: Vec<f64> = items.iter().filter_map(|p| p["price"].as_f64()).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]), "prices ascending: {prices:?}");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_product_list_category_filter() {
    let client = client().expect("client");
    let body: Value = client
        .get(url("/api/products?category=rings,bracelets&limit=100"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse JSON");

    let items = body["products"].as_array().expect("products array");
    assert!(
        items
            .iter()
            .all(|p| p["category"] == "rings" || p["category"] == "bracelets")
    );
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_product_is_404() {
    let client = client().expect("client");
    let resp = client
        .get(url("/api/products/no-such-piece"))
        .send()
        .await
        .expect("Failed to fetch product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_signup_me_logout_login() {
    let client = client().expect("client");
    let email = unique_email();

    let me: Value = client
        .get(url("/api/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("me JSON");
    assert_eq!(me, json!({ "loggedIn": false }));

    let resp = client
        .post(url("/api/signup"))
        .json(&json!({ "name": "Iris Vale", "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("signup");
    assert_eq!(resp.status(), StatusCode::OK);

    let me: Value = client
        .get(url("/api/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("me JSON");
    assert_eq!(me["loggedIn"], true);
    assert_eq!(me["name"], "Iris Vale");
    assert_eq!(me["email"], email.as_str());

    let resp = client.post(url("/api/logout")).send().await.expect("logout");
    assert_eq!(resp.status(), StatusCode::OK);

    let me: Value = client
        .get(url("/api/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("me JSON");
    assert_eq!(me["loggedIn"], false);

    let resp = client
        .post(url("/api/login"))
        .json(&json!({ "email": email.to_uppercase(), "password": PASSWORD }))
        .send()
        .await
        .expect("login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_signup_rejects_missing_fields() {
    let client = client().expect("client");
    let resp = client
        .post(url("/api/signup"))
        .json(&json!({ "email": unique_email() }))
        .send()
        .await
        .expect("signup");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "All fields are required");
}
