mod common;

use axum::http::StatusCode;
use common::TestApp;
use contact_service::repositories::CredentialStore;
use serde_json::json;

#[tokio::test]
async fn directory_lists_every_user_with_search() {
    let app = TestApp::new();
    let (_, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;
    app.register("Grace Hopper", "grace@example.com").await;
    app.register("Alan Turing", "alan@example.org").await;

    let all = app.get("/users", &token).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["message"], "Users retrieved successfully");
    assert_eq!(all.body["data"]["total"], 3);
    assert!(all.body["data"]["data"][0].get("password_hash").is_none());

    let second_page = app.get("/users?page=2&limit=2", &token).await;
    assert_eq!(second_page.status, StatusCode::OK);
    assert_eq!(second_page.body["data"]["total_pages"], 2);
    assert_eq!(second_page.body["data"]["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(second_page.body["data"]["data"][0]["name"], "Alan Turing");

    let past_end = app.get("/users?page=3&limit=2", &token).await;
    assert_eq!(past_end.status, StatusCode::OK);
    assert_eq!(past_end.body["data"]["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(past_end.body["data"]["total"], 3);

    let found = app.get("/users?search=example.org", &token).await;
    assert_eq!(found.body["data"]["total"], 1);
    assert_eq!(found.body["data"]["data"][0]["name"], "Alan Turing");
}

#[tokio::test]
async fn create_user_hashes_the_password() {
    let app = TestApp::new();
    let (_, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;

    let created = app
        .post(
            "/users",
            &token,
            json!({ "name": "Grace Hopper", "email": "Grace@Example.com", "password": "cobol1959" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["email"], "grace@example.com");

    let stored = app
        .store
        .find_by_email("grace@example.com")
        .await
        .expect("lookup")
        .expect("stored");
    assert_ne!(stored.password_hash, "cobol1959");

    let login = app.login("grace@example.com", "cobol1959").await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;

    let response = app.get("/users/9999", &token).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "user not found");
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;

    let response = app.get("/users/abc", &token).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid id");
}

#[tokio::test]
async fn update_keeps_omitted_fields() {
    let app = TestApp::new();
    let (id, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;

    let updated = app
        .put(&format!("/users/{}", id), &token, json!({ "name": "Ada King" }))
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Ada King");
    assert_eq!(updated.body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn update_to_a_taken_email_conflicts() {
    let app = TestApp::new();
    let (id, token) = app.signed_in("Ada Lovelace", "ada@example.com").await;
    app.register("Grace Hopper", "grace@example.com").await;

    let response = app
        .put(
            &format!("/users/{}", id),
            &token,
            json!({ "email": "grace@example.com" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "email already in use");

    let same = app
        .put(
            &format!("/users/{}", id),
            &token,
            json!({ "email": "ADA@example.com" }),
        )
        .await;
    assert_eq!(same.status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_a_user_removes_their_contacts_and_session() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in("Ada Lovelace", "ada@example.com").await;
    let (grace_id, grace) = app.signed_in("Grace Hopper", "grace@example.com").await;
    let contact_id = app
        .create_contact(
            &grace,
            json!({ "first_name": "Howard", "email": "aiken@example.com" }),
        )
        .await;
    app.create_address(
        &grace,
        json!({ "contact_id": contact_id, "country": "US" }),
    )
    .await;

    let deleted = app.delete(&format!("/users/{}", grace_id), &admin).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["id"], grace_id);

    assert_eq!(app.get("/me", &grace).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.get(&format!("/users/{}", grace_id), &admin).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.delete(&format!("/users/{}", grace_id), &admin).await.status,
        StatusCode::NOT_FOUND
    );
}
