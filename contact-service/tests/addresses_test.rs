mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn owner_with_contact(app: &TestApp, name: &str, email: &str) -> (String, i64) {
    let (_, token) = app.signed_in(name, email).await;
    let contact_id = app
        .create_contact(&token, json!({ "first_name": "Charles", "email": "cb@example.com" }))
        .await;
    (token, contact_id)
}

#[tokio::test]
async fn create_and_read_an_address() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;

    let created = app
        .post(
            "/addresses",
            &token,
            json!({
                "contact_id": contact_id,
                "street": "1 Infinite Loop",
                "city": "Cupertino",
                "state": "CA",
                "postal_code": "95014",
                "country": "US"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Address created successfully");
    assert_eq!(created.body["data"]["contact_id"], contact_id);

    let id = created.body["data"]["id"].as_i64().expect("address id");
    let read = app.get(&format!("/addresses/{}", id), &token).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["city"], "Cupertino");
}

#[tokio::test]
async fn cannot_attach_to_someone_elses_contact() {
    let app = TestApp::new();
    let (_, foreign_contact) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let (grace, _) = owner_with_contact(&app, "Grace Hopper", "grace@example.com").await;

    let response = app
        .post(
            "/addresses",
            &grace,
            json!({ "contact_id": foreign_contact, "country": "US" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "contact not found");
}

#[tokio::test]
async fn address_by_id_is_scoped_to_the_owner() {
    let app = TestApp::new();
    let (ada, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let (grace, _) = owner_with_contact(&app, "Grace Hopper", "grace@example.com").await;
    let id = app
        .create_address(&ada, json!({ "contact_id": contact_id, "city": "London", "country": "UK" }))
        .await;
    let uri = format!("/addresses/{}", id);

    let read = app.get(&uri, &grace).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.body["error"], "address not found");

    let update = app.put(&uri, &grace, json!({ "city": "Paris" })).await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app.delete(&uri, &grace).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let untouched = app.get(&uri, &ada).await;
    assert_eq!(untouched.body["data"]["city"], "London");
}

#[tokio::test]
async fn listing_requires_a_valid_owned_contact() {
    let app = TestApp::new();
    let (ada, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let (grace, _) = owner_with_contact(&app, "Grace Hopper", "grace@example.com").await;

    let missing = app.get("/addresses", &ada).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "contact_id is required");

    let invalid = app.get("/addresses?contact_id=abc", &ada).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["error"], "Invalid contact_id");

    let foreign = app
        .get(&format!("/addresses?contact_id={}", contact_id), &grace)
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body["error"], "contact not found");
}

#[tokio::test]
async fn listing_pages_and_searches_one_contact() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let other_contact = app
        .create_contact(&token, json!({ "first_name": "Mary", "email": "mary@example.com" }))
        .await;

    for city in ["London", "Leeds", "York"] {
        app.create_address(
            &token,
            json!({ "contact_id": contact_id, "city": city, "country": "UK" }),
        )
        .await;
    }
    app.create_address(
        &token,
        json!({ "contact_id": other_contact, "city": "Dublin", "country": "IE" }),
    )
    .await;

    let all = app
        .get(&format!("/addresses?contact_id={}&limit=2", contact_id), &token)
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total"], 3);
    assert_eq!(all.body["data"]["total_pages"], 2);
    assert_eq!(all.body["data"]["data"].as_array().map(Vec::len), Some(2));

    let last = app
        .get(&format!("/addresses?contact_id={}&page=2&limit=2", contact_id), &token)
        .await;
    assert_eq!(last.body["data"]["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(last.body["data"]["data"][0]["city"], "York");

    let past_end = app
        .get(&format!("/addresses?contact_id={}&page=3&limit=2", contact_id), &token)
        .await;
    assert_eq!(past_end.status, StatusCode::OK);
    assert_eq!(past_end.body["data"]["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(past_end.body["data"]["total"], 3);

    let searched = app
        .get(&format!("/addresses?contact_id={}&search=york", contact_id), &token)
        .await;
    assert_eq!(searched.body["data"]["total"], 1);
    assert_eq!(searched.body["data"]["data"][0]["city"], "York");
}

#[tokio::test]
async fn update_is_a_merge_patch() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let id = app
        .create_address(
            &token,
            json!({ "contact_id": contact_id, "city": "London", "state": "Greater London", "country": "UK" }),
        )
        .await;
    let uri = format!("/addresses/{}", id);

    let updated = app
        .put(&uri, &token, json!({ "postal_code": "SW1A 1AA", "state": "" }))
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["message"], "Address updated successfully");
    let address = &updated.body["data"];
    assert_eq!(address["postal_code"], "SW1A 1AA");
    assert_eq!(address["city"], "London");
    assert_eq!(address["country"], "UK");
    assert!(address["state"].is_null());
    assert_eq!(address["contact_id"], contact_id);
}

#[tokio::test]
async fn create_requires_country_and_positive_contact_id() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;

    let no_country = app
        .post("/addresses", &token, json!({ "contact_id": contact_id, "country": "" }))
        .await;
    assert_eq!(no_country.status, StatusCode::BAD_REQUEST);

    let bad_parent = app
        .post("/addresses", &token, json!({ "contact_id": 0, "country": "UK" }))
        .await;
    assert_eq!(bad_parent.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_contact_removes_its_addresses() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let id = app
        .create_address(&token, json!({ "contact_id": contact_id, "country": "UK" }))
        .await;

    let deleted = app.delete(&format!("/contacts/{}", contact_id), &token).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let orphan = app.get(&format!("/addresses/{}", id), &token).await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_address() {
    let app = TestApp::new();
    let (token, contact_id) = owner_with_contact(&app, "Ada Lovelace", "ada@example.com").await;
    let id = app
        .create_address(&token, json!({ "contact_id": contact_id, "country": "UK" }))
        .await;
    let uri = format!("/addresses/{}", id);

    let deleted = app.delete(&uri, &token).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["id"], id);
    assert_eq!(app.get(&uri, &token).await.status, StatusCode::NOT_FOUND);
}
