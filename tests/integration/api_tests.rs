//! API integration tests
//!
//! These run against a live server seeded with an `admin`/`admin` staff
//! account. Start the server, then: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a staff token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_and_me() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": "reader42",
            "password": "s3cretpw"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let login: Value = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "reader42",
            "password": "s3cretpw"
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let token = login["token"].as_str().expect("No token");

    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(me["username"], "reader42");
    assert_eq!(me["is_staff"], false);
}

#[tokio::test]
#[ignore]
async fn test_list_books_is_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_staff() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Unauthorized Book",
            "description": "Should not be created",
            "author_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_catalog_crud() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Author
    let author: Value = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula",
            "middle_name": "K.",
            "last_name": "Le Guin"
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let author_id = author["id"].as_i64().expect("No author id");

    // Category
    let category: Value = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Science Fiction" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let category_id = category["id"].as_i64().expect("No category id");

    // Book
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "The Dispossessed",
            "description": "An ambiguous utopia",
            "author_id": author_id,
            "category_ids": [category_id]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book id");

    // Detail view carries the author and category
    let detail: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(detail["title"], "The Dispossessed");
    assert_eq!(detail["author"]["last_name"], "Le Guin");
    assert_eq!(detail["rating"], Value::Null);

    // Duplicate title is rejected
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "The Dispossessed",
            "description": "Duplicate",
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_borrow_session_rules() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // A session with no books is rejected with the full violation list
    let response = client
        .post(format!("{}/sessions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_ids": [],
            "library_id": 1,
            "start_date": "2020-01-02",
            "end_date": "2020-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    let message = body["message"].as_str().expect("No message");
    assert!(message.contains("No books requested"));
    assert!(message.contains("Start date"));
}

#[tokio::test]
#[ignore]
async fn test_session_review_is_monotonic() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let sessions: Value = client
        .get(format!("{}/manage/sessions?is_closed=false", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let Some(session) = sessions["items"].as_array().and_then(|s| s.first()) else {
        return;
    };
    let id = session["id"].as_i64().expect("No session id");

    // Accept, then attempt to revoke
    let response = client
        .put(format!("{}/manage/sessions/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_accepted": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/manage/sessions/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "is_accepted": false }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_offer_validation() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/offers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "library_id": 1,
            "quantity": 0,
            "books_description": "A box of paperbacks"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_rate_and_bookmark_book() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let books: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let Some(book) = books["items"].as_array().and_then(|b| b.first()) else {
        return;
    };
    let id = book["id"].as_i64().expect("No book id");

    let relation: Value = client
        .put(format!("{}/books/{}/relation", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "rate": 4, "in_bookmarks": true }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(relation["rate"], 4);
    assert_eq!(relation["in_bookmarks"], true);

    // Out-of-range rate is rejected
    let response = client
        .put(format!("{}/books/{}/relation", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "rate": 6 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // The book now shows up among bookmarks
    let bookmarks: Value = client
        .get(format!("{}/bookmarks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids: Vec<i64> = bookmarks["items"]
        .as_array()
        .expect("No items array")
        .iter()
        .map(|b| b["id"].as_i64().expect("No id"))
        .collect();
    assert!(ids.contains(&id));
}
