//! Integration tests for the restaurant storefront
//!
//! These tests drive the full router (locale gateway, page handlers and
//! backend client) with in-process requests and a mocked backend.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;
use wiremock::{
    matchers::{header as header_matcher, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use restaurant_storefront::backend::BackendClient;
use restaurant_storefront::i18n::{LocaleSettings, Messages};
use restaurant_storefront::server::{router, AppState};

// ==================== Test Helpers ====================

/// Router without a backend (API_URL unset)
fn app_without_backend() -> Router {
    router(AppState::new(LocaleSettings::default(), Messages::load(), None))
}

/// Router talking to a mock backend
fn app_with_backend(mock_server: &MockServer) -> Router {
    let backend = BackendClient::new(&mock_server.uri()).expect("Valid mock URL");
    router(AppState::new(
        LocaleSettings::default(),
        Messages::load(),
        Some(backend),
    ))
}

fn get(uri: &str, accept_language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        builder = builder.header(header::ACCEPT_LANGUAGE, value);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

fn products_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "p1",
            "name": "Brown Sugar Milk Tea",
            "description": "Fresh milk with brown sugar pearls",
            "price": 5.9,
            "category": "milk_tea",
            "bestSeller": true
        },
        {
            "id": "p2",
            "name": "Iced Latte",
            "description": null,
            "price": 4.5,
            "category": "coffee",
            "bestSeller": false
        }
    ])
}

// ==================== Root Entry Tests ====================

#[tokio::test]
async fn test_root_redirects_english_browser() {
    let response = app_without_backend()
        .oneshot(get("/", Some("en-US,en;q=0.9")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en"));
}

#[tokio::test]
async fn test_root_redirects_unsupported_browser_to_default() {
    let response = app_without_backend()
        .oneshot(get("/", Some("fr-FR")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de"));
}

#[tokio::test]
async fn test_root_redirects_without_header_to_default() {
    let response = app_without_backend().oneshot(get("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de"));
}

// ==================== Middleware Redirect Tests ====================

#[tokio::test]
async fn test_unprefixed_path_redirects_with_query() {
    let response = app_without_backend()
        .oneshot(get("/menu?category=coffee", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en/menu?category=coffee"));
}

#[tokio::test]
async fn test_unprefixed_path_without_detection_uses_default() {
    let settings = LocaleSettings::new(&["de", "en"], "de", false).unwrap();
    let app = router(AppState::new(settings, Messages::load(), None));

    let response = app.oneshot(get("/checkout", Some("en-US"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de/checkout"));
}

// ==================== Exclusion Tests ====================

#[tokio::test]
async fn test_api_route_bypasses_gateway() {
    let response = app_without_backend()
        .oneshot(get("/api/health", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_api_products_is_not_redirected() {
    let response = app_without_backend()
        .oneshot(get("/api/products", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_static_file_is_not_redirected() {
    let response = app_without_backend()
        .oneshot(get("/favicon.ico", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

// ==================== Path-Prefixed Entry Tests ====================

#[tokio::test]
async fn test_unsupported_locale_is_not_found() {
    let response = app_without_backend()
        .oneshot(get("/xx/menu", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_uppercase_locale_is_not_found() {
    let response = app_without_backend()
        .oneshot(get("/EN/checkout", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_binds_locale() {
    let response = app_without_backend()
        .oneshot(get("/en/checkout", Some("de")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["locale"], "en");
    assert_eq!(body["title"], "Checkout");
    assert_eq!(body["action"], "/en/checkout");
    assert_eq!(body["back"]["href"], "/en/menu");
    assert_eq!(body["payment_methods"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_region_qualified_locale_is_canonicalized() {
    let response = app_without_backend()
        .oneshot(get("/de-DE/checkout", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(location(&response).is_none());
    let body = json_body(response).await;
    assert_eq!(body["locale"], "de");
    assert_eq!(body["title"], "Kasse");
    // Links use the canonical locale
    assert_eq!(body["back"]["href"], "/de/menu");
}

#[tokio::test]
async fn test_unknown_page_under_locale_is_not_found() {
    let response = app_without_backend()
        .oneshot(get("/en/impressum/extra", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== Menu Page Tests ====================

#[tokio::test]
async fn test_menu_without_backend_config_fails_page_only() {
    let app = app_without_backend();

    let response = app.clone().oneshot(get("/en/menu", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "API_URL is not defined");

    // Locale resolution is unaffected
    let response = app.oneshot(get("/", Some("en"))).await.unwrap();
    assert_eq!(location(&response), Some("/en"));
}

#[tokio::test]
async fn test_menu_renders_localized_products() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header_matcher("accept-language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/en/menu", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Menu");
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["products"][0]["best_seller"], "Best seller");
    assert!(body["products"][1]["best_seller"].is_null());
    assert_eq!(body["tabs"][0]["href"], "/en/menu");
    assert_eq!(body["tabs"][0]["active"], true);
    assert!(body["empty"].is_null());
}

#[tokio::test]
async fn test_menu_category_and_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "coffee"))
        .and(header_matcher("accept-language", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/de/menu?category=Coffee&q=%20LATTE%20", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Iced Latte");
    assert_eq!(body["search"]["category"], "coffee");

    let active: Vec<_> = body["tabs"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["active"] == true)
        .map(|t| t["href"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(active, vec!["/de/menu?category=coffee".to_string()]);
}

#[tokio::test]
async fn test_menu_empty_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/de/menu?q=pizza", None))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["products"].as_array().unwrap().is_empty());
    assert_eq!(body["empty"]["title"], "Keine Produkte gefunden");
    assert_eq!(body["empty"]["reset"]["href"], "/de/menu");
}

#[tokio::test]
async fn test_menu_backend_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/en/menu", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// ==================== Home Page Tests ====================

#[tokio::test]
async fn test_home_lists_best_sellers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/best"))
        .and(header_matcher("accept-language", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            products_json()[0].clone()
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/de", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["locale"], "de");
    assert_eq!(body["best_sellers"][0]["best_seller"], "Beliebt");
    assert_eq!(body["menu"]["href"], "/de/menu");
    assert_eq!(body["categories"][1]["href"], "/de/menu?category=coffee");
}

#[tokio::test]
async fn test_home_renders_without_backend_config() {
    let response = app_without_backend()
        .oneshot(get("/de", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["hero_title2"], "frisch auf Bestellung");
    assert_eq!(body["popular"]["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["perks"].as_array().unwrap().len(), 3);
    assert!(body["best_sellers"].as_array().unwrap().is_empty());

    // Locale switcher: one entry per supported locale, current one active
    assert_eq!(body["locales"][0]["href"], "/de");
    assert_eq!(body["locales"][0]["label"], "Deutsch");
    assert_eq!(body["locales"][0]["active"], true);
    assert_eq!(body["locales"][1]["href"], "/en");
    assert_eq!(body["locales"][1]["active"], false);
}

#[tokio::test]
async fn test_home_survives_backend_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/best"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(get("/en", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["best_sellers"].as_array().unwrap().is_empty());
    assert_eq!(body["locales"][1]["active"], true);
    assert_eq!(body["popular"]["title"], "Popular today");
}

// ==================== Trailing Slash Tests ====================

#[tokio::test]
async fn test_trailing_slash_redirects_to_canonical_path() {
    let app = app_without_backend();

    let response = app.clone().oneshot(get("/en/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en"));

    let response = app
        .clone()
        .oneshot(get("/de/checkout/", None))
        .await
        .unwrap();
    assert_eq!(location(&response), Some("/de/checkout"));

    let response = app.oneshot(get("/en", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_short_unprefixed_page_is_not_found() {
    let response = app_without_backend()
        .oneshot(get("/tea", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

// ==================== Checkout Tests ====================

fn order_body() -> serde_json::Value {
    serde_json::json!({
        "customerName": "Anna",
        "phone": "0301234567",
        "address": "Hauptstr. 1, Berlin",
        "paymentMethod": "COD",
        "items": [{"productId": "p1", "quantity": 2}]
    })
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_place_order_forwards_to_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(header_matcher("accept-language", "en"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "o1",
            "totalPrice": 11.8,
            "paymentMethod": "COD",
            "paymentStatus": "PENDING",
            "orderStatus": "NEW",
            "createdAt": "2026-10-18T12:00:00",
            "items": [
                {"productId": "p1", "productName": "Brown Sugar Milk Tea", "quantity": 2, "price": 5.9}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app_with_backend(&mock_server)
        .oneshot(post_json("/en/checkout", &order_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], "o1");
    assert_eq!(body["orderStatus"], "NEW");
}

#[tokio::test]
async fn test_place_order_rejects_invalid_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut body = order_body();
    body["items"] = serde_json::json!([]);

    let response = app_with_backend(&mock_server)
        .oneshot(post_json("/de/checkout", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ==================== Concurrency Tests ====================

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let app = app_without_backend();

    let cases = [
        ("en-US,en;q=0.9", "/en/menu"),
        ("fr-FR", "/de/menu"),
        ("de-AT", "/de/menu"),
        ("en", "/en/menu"),
    ];

    let mut handles = Vec::new();
    for i in 0..64 {
        let (header, expected) = cases[i % cases.len()];
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let response = app.oneshot(get("/menu", Some(header))).await.unwrap();
            let actual = location(&response).map(str::to_string);
            (expected, actual)
        }));
    }

    for handle in handles {
        let (expected, actual) = handle.await.unwrap();
        assert_eq!(actual.as_deref(), Some(expected));
    }
}

#[tokio::test]
async fn test_concurrent_bound_locales_are_per_request() {
    let app = app_without_backend();

    let mut handles = Vec::new();
    for i in 0..32 {
        let (uri, expected) = if i % 2 == 0 {
            ("/en/checkout", "en")
        } else {
            ("/de-CH/checkout", "de")
        };
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let response = app.oneshot(get(uri, None)).await.unwrap();
            (expected, json_body(response).await)
        }));
    }

    for handle in handles {
        let (expected, body) = handle.await.unwrap();
        assert_eq!(body["locale"], expected);
    }
}
