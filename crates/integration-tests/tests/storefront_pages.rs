//! Server-rendered page flows against a running storefront.
//!
//! Requires a migrated and seeded database and the storefront running
//! (`cargo run -p aurelia-storefront`).

use aurelia_integration_tests::{PASSWORD, client, location, unique_email, url};
use reqwest::{Client, StatusCode};

async fn sign_up(client: &Client, name: &str, return_to: &str) -> reqwest::Response {
    let email = unique_email();
    client
        .post(url("/signup"))
        .form(&[
            ("name", name),
            ("email", email.as_str()),
            ("password", PASSWORD),
            ("returnTo", return_to),
        ])
        .send()
        .await
        .expect("Failed to sign up")
}

async fn page(client: &Client, path: &str) -> String {
    client
        .get(url(path))
        .send()
        .await
        .expect("Failed to fetch page")
        .text()
        .await
        .expect("Failed to read page")
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health() {
    let client = client().expect("client");
    let resp = client.get(url("/health")).send().await.expect("health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get(url("/health/ready")).send().await.expect("ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_listing_filters_by_category() {
    let client = client().expect("client");
    let resp = client
        .get(url("/products?category=rings&sort=lh"))
        .send()
        .await
        .expect("listing");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert!(body.contains("Ethereal Halo Ring"));
    assert!(!body.contains("Aurora Tennis Necklace"));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_account_requires_sign_in() {
    let client = client().expect("client");
    let resp = client.get(url("/account")).send().await.expect("account");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/login?returnTo=%2Faccount"));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_wrong_password_rerenders_login() {
    let client = client().expect("client");
    let resp = client
        .post(url("/login"))
        .form(&[("email", unique_email().as_str()), ("password", "not-the-one")])
        .send()
        .await
        .expect("login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Invalid credentials"));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_cart_checkout_and_confirmation() {
    let client = client().expect("client");

    let resp = sign_up(&client, "Celeste", "/products/ethereal-halo-ring").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/products/ethereal-halo-ring"));

    for qty in ["1", "2"] {
        let resp = client
            .post(url("/cart/add"))
            .form(&[("id", "r1"), ("qty", qty)])
            .send()
            .await
            .expect("add to cart");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&resp).as_deref(),
            Some("/products/ethereal-halo-ring?added=1")
        );
    }

    let cart = page(&client, "/cart").await;
    assert!(cart.contains("data-line=\"r1\""));
    assert!(cart.contains("Subtotal (3 items)"));

    let resp = client.post(url("/checkout")).send().await.expect("checkout");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/order/success"));

    let confirmation = page(&client, "/order/success").await;
    assert!(confirmation.contains("Thank you, Celeste"));
    assert!(confirmation.contains("Subtotal (3 items)"));

    let again = page(&client, "/order/success").await;
    assert!(again.contains("No items found for this order."));

    let cart = page(&client, "/cart").await;
    assert!(cart.contains("Your cart is empty."));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_wishlist_toggle_shows_on_account() {
    let client = client().expect("client");

    let resp = sign_up(&client, "Mira", "").await;
    assert_eq!(location(&resp).as_deref(), Some("/account"));

    let resp = client
        .post(url("/wishlist/toggle"))
        .form(&[("id", "b2")])
        .send()
        .await
        .expect("toggle");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let account = page(&client, "/account").await;
    assert!(account.contains("Gilded Curb Chain"));

    client
        .post(url("/wishlist/toggle"))
        .form(&[("id", "b2")])
        .send()
        .await
        .expect("toggle");

    let account = page(&client, "/account").await;
    assert!(!account.contains("Gilded Curb Chain"));
}
