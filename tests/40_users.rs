mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use bicycle_parts_api::database::{Collection, DocumentStore, Filter};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn user_upsert_issues_a_one_day_token() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::PUT, "/user/alice@x.com", None, Some(json!({"email": "alice@x.com"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["upsertedCount"], 1);

    let token = body["token"].as_str().expect("token in response");
    let claims = app.tokens.verify(token)?;
    assert_eq!(claims.email, "alice@x.com");
    assert_eq!(claims.exp - claims.iat, 86_400);
    Ok(())
}

#[tokio::test]
async fn repeated_user_upserts_keep_one_document() -> Result<()> {
    let app = TestApp::new();

    for _ in 0..3 {
        let (status, body) = app
            .send(Method::PUT, "/user/alice@x.com", None, Some(json!({"email": "alice@x.com"})))
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());
    }

    let users = app
        .store
        .find(Collection::Users, Filter::eq("email", "alice@x.com"))
        .await?;
    assert_eq!(users.len(), 1);
    Ok(())
}

#[tokio::test]
async fn existing_user_still_gets_a_token_and_keeps_role() -> Result<()> {
    let app = TestApp::new();
    app.seed(Collection::Users, json!({"email": "alice@x.com", "role": "admin"})).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/user/alice@x.com",
            None,
            Some(json!({"email": "alice@x.com", "role": "customer"})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["matchedCount"], 1);
    assert!(body["token"].is_string());

    let user = app
        .store
        .find_one(Collection::Users, Filter::eq("email", "alice@x.com"))
        .await?
        .expect("user present");
    assert_eq!(user["role"], "admin");
    Ok(())
}

#[tokio::test]
async fn issued_token_opens_gated_routes() -> Result<()> {
    let app = TestApp::new();
    let (_, body) = app
        .send(Method::PUT, "/user/alice@x.com", None, Some(json!({})))
        .await?;
    let token = body["token"].as_str().expect("token").to_string();

    let (status, orders) = app
        .send(Method::GET, "/orders?email=alice@x.com", Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders, json!([]));
    Ok(())
}

#[tokio::test]
async fn missing_profile_is_null() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/profile/nobody@x.com", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
    Ok(())
}

#[tokio::test]
async fn profile_upsert_is_idempotent() -> Result<()> {
    let app = TestApp::new();
    let profile = json!({
        "name": "Alice",
        "country": "Bangladesh",
        "city": "Dhaka",
        "img": "https://img.example/alice.png",
        "location": "Road 7"
    });

    let (status, first) = app
        .send(Method::PUT, "/profile/alice@x.com", None, Some(profile.clone()))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["upsertedCount"], 1);
    let (_, after_once) = app.send(Method::GET, "/profile/alice@x.com", None, None).await?;

    let (_, second) = app
        .send(Method::PUT, "/profile/alice@x.com", None, Some(profile))
        .await?;
    assert_eq!(second["matchedCount"], 1);
    assert_eq!(second["modifiedCount"], 0);
    let (_, after_twice) = app.send(Method::GET, "/profile/alice@x.com", None, None).await?;

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice["email"], "alice@x.com");
    assert_eq!(after_twice["city"], "Dhaka");
    assert_eq!(app.store.count(Collection::Profiles).await, 1);
    Ok(())
}

#[tokio::test]
async fn profile_update_overwrites_display_attributes() -> Result<()> {
    let app = TestApp::new();
    app.send(
        Method::PUT,
        "/profile/alice@x.com",
        None,
        Some(json!({"name": "Alice", "city": "Dhaka"})),
    )
    .await?;
    app.send(Method::PUT, "/profile/alice@x.com", None, Some(json!({"city": "Chattogram"})))
        .await?;

    let (_, profile) = app.send(Method::GET, "/profile/alice@x.com", None, None).await?;
    assert_eq!(profile["city"], "Chattogram");
    assert!(profile["name"].is_null());
    Ok(())
}
