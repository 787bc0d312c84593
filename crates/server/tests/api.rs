use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{BankNew, DepositNew, Engine, MasjidNew};
use migration::MigratorTrait;

async fn test_engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn masjid_fields(name: &str) -> MasjidNew {
    MasjidNew {
        name: name.to_string(),
        address: "1 Example Road".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip_code: "10001".to_string(),
        country: "USA".to_string(),
        phone: None,
        email: None,
        website: None,
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn empty_directory_lists_nothing() {
    let app = server::app(test_engine().await);

    let (status, body) = get_json(&app, "/api/masjids").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], json!(0));
    assert_eq!(body["pagination"]["pages"], json!(0));
}

#[tokio::test]
async fn pagination_matches_ceiling_division() {
    let engine = test_engine().await;
    for i in 0..25 {
        engine
            .create_masjid(masjid_fields(&format!("Masjid {i:02}")))
            .await
            .unwrap();
    }
    let app = server::app(engine);

    let (status, body) = get_json(&app, "/api/masjids?limit=10&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["total"], json!(25));
    assert_eq!(body["pagination"]["page"], json!(1));
    assert_eq!(body["pagination"]["limit"], json!(10));
    assert_eq!(body["pagination"]["pages"], json!(3));

    let (_, last) = get_json(&app, "/api/masjids?limit=10&page=3").await;
    assert_eq!(last["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn malformed_pagination_falls_back_to_defaults() {
    let app = server::app(test_engine().await);

    let (status, body) = get_json(&app, "/api/masjids?limit=abc&page=zero").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["limit"], json!(10));
    assert_eq!(body["pagination"]["page"], json!(1));
}

#[tokio::test]
async fn list_is_ordered_by_name() {
    let engine = test_engine().await;
    for name in ["Masjid C", "Masjid A", "Masjid B"] {
        engine.create_masjid(masjid_fields(name)).await.unwrap();
    }
    let app = server::app(engine);

    let (_, body) = get_json(&app, "/api/masjids").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Masjid A", "Masjid B", "Masjid C"]);
}

#[tokio::test]
async fn banks_carry_latest_deposit_only() {
    let engine = test_engine().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor"))
        .await
        .unwrap();
    let funded = engine
        .create_bank(BankNew {
            masjid_id: masjid.id.clone(),
            name: "Chase Bank".to_string(),
            account_number: "1234567890".to_string(),
            routing_number: "021000021".to_string(),
            address: "100 Park Avenue".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "USA".to_string(),
        })
        .await
        .unwrap();
    engine
        .create_bank(BankNew {
            masjid_id: masjid.id.clone(),
            name: "Bank of America".to_string(),
            account_number: "0987654321".to_string(),
            routing_number: "026009593".to_string(),
            address: "200 Broadway".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "USA".to_string(),
        })
        .await
        .unwrap();

    for (amount, (y, m, d)) in [(500_000, (2023, 1, 15)), (750_000, (2023, 4, 10))] {
        engine
            .create_deposit(DepositNew {
                bank_id: funded.id.clone(),
                amount_minor: amount,
                description: Some("donation".to_string()),
                deposit_date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }
    let app = server::app(engine);

    let (status, body) = get_json(&app, "/api/masjids").await;
    assert_eq!(status, StatusCode::OK);

    let banks = body["data"][0]["banks"].as_array().unwrap();
    assert_eq!(banks.len(), 2);

    let chase = banks
        .iter()
        .find(|b| b["name"] == json!("Chase Bank"))
        .unwrap();
    assert_eq!(chase["latestDeposit"]["amountMinor"], json!(750_000));
    // The raw deposit history never leaks into the response shape.
    assert!(chase.get("deposits").is_none());

    let boa = banks
        .iter()
        .find(|b| b["name"] == json!("Bank of America"))
        .unwrap();
    assert_eq!(boa["latestDeposit"], Value::Null);
}

#[tokio::test]
async fn post_creates_masjid() {
    let app = server::app(test_engine().await);

    let (status, body) = post_json(
        &app,
        "/api/masjids",
        json!({
            "name": "Masjid Al-Noor",
            "address": "123 Main Street",
            "city": "New York",
            "state": "NY",
            "zipCode": "10001",
            "country": "USA",
            "email": "info@masjidalnoor.org",
            "website": "https://masjidalnoor.org",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["zipCode"], json!("10001"));

    let (_, listed) = get_json(&app, "/api/masjids").await;
    assert_eq!(listed["pagination"]["total"], json!(1));
    assert_eq!(listed["data"][0]["banks"], json!([]));
}

#[tokio::test]
async fn post_missing_name_is_a_field_error() {
    let app = server::app(test_engine().await);

    let (status, body) = post_json(
        &app,
        "/api/masjids",
        json!({
            "address": "123 Main Street",
            "city": "New York",
            "state": "NY",
            "zipCode": "10001",
            "country": "USA",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!("name"));
    assert_eq!(errors[0]["message"], json!("Name is required"));
}

#[tokio::test]
async fn post_invalid_contact_fields_are_rejected() {
    let app = server::app(test_engine().await);

    let (status, body) = post_json(
        &app,
        "/api/masjids",
        json!({
            "name": "Masjid Al-Noor",
            "address": "123 Main Street",
            "city": "New York",
            "state": "NY",
            "zipCode": "10001",
            "country": "USA",
            "email": "not-an-email",
            "website": "masjidalnoor.org",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["email", "website"]);
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let app = server::app(test_engine().await);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/masjids")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Method not allowed"));
}
