mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    FailingAddressRepository, OTHER_USER_ID, TestApp, USER_ID, address_payload, assert_failure,
};

#[tokio::test]
async fn create_address_returns_created_envelope() {
    let app = TestApp::new();
    let body = address_payload().to_string();

    let (status, json) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["code"], 201);
    assert_eq!(json["message"], "Success Create Address");
    assert_eq!(json["status"], true);
    assert_eq!(json["data"]["recipient"], "Galih");
    assert_eq!(json["data"]["hp"], "21343555");
    assert_eq!(json["data"]["zip"], "23413");
    assert_eq!(json["data"]["userId"], USER_ID);
}

#[tokio::test]
async fn create_address_accepts_capitalized_keys() {
    let app = TestApp::new();
    let body = serde_json::json!({
        "recipient": "Galih",
        "hp": "21343555",
        "street": "Jl Buntu",
        "subDistrict": "Bangun Rejo",
        "UrbanVillage": "Pagar Alam Utara",
        "City": "Pagar Alam",
        "zip": "23413"
    })
    .to_string();

    let (status, json) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["urbanVillage"], "Pagar Alam Utara");
    assert_eq!(json["data"]["city"], "Pagar Alam");
}

#[tokio::test]
async fn create_address_rejects_non_json_body() {
    let app = TestApp::new();

    let (status, json) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some("Jalan Gunung"))
        .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_failure(&json, 415, "Cannot Bind Data");
}

#[tokio::test]
async fn create_address_with_missing_fields_fails_validation_before_repository() {
    // A failing repository would answer 500 if it were reached.
    let app = TestApp::with_addresses(Arc::new(FailingAddressRepository));
    let body = serde_json::json!({
        "recipient": "Galih",
        "hp": "21343555",
        "street": "Jl Buntu"
    })
    .to_string();

    let (status, json) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_failure(&json, 406, "Validate Error");
}

#[tokio::test]
async fn create_address_rejects_non_numeric_phone() {
    let app = TestApp::new();
    let mut payload = address_payload();
    payload["hp"] = "0812-abc".into();

    let (status, json) = app
        .send(
            Method::POST,
            "/api/address",
            Some(USER_ID),
            Some(&payload.to_string()),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_failure(&json, 406, "Validate Error");
}

#[tokio::test]
async fn address_routes_require_a_bearer_token() {
    let app = TestApp::new();

    let (status, json) = app.send(Method::GET, "/api/address", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_failure(&json, 401, "Unauthorized");
}

#[tokio::test]
async fn repository_failures_surface_as_generic_database_error() {
    let app = TestApp::with_addresses(Arc::new(FailingAddressRepository));
    let body = address_payload().to_string();

    let calls = [
        (Method::POST, "/api/address", Some(body.as_str())),
        (Method::GET, "/api/address", None),
        (Method::GET, "/api/address/1", None),
        (Method::PUT, "/api/address/1", Some(body.as_str())),
        (Method::DELETE, "/api/address/7", None),
    ];

    for (method, uri, payload) in calls {
        let (status, json) = app.send(method.clone(), uri, Some(USER_ID), payload).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_failure(&json, 500, "Cannot Access Database");
    }
}

#[tokio::test]
async fn non_numeric_ids_cannot_be_converted() {
    let app = TestApp::with_addresses(Arc::new(FailingAddressRepository));
    let body = address_payload().to_string();

    for (method, uri, payload) in [
        (Method::GET, "/api/address/C", None),
        (Method::PUT, "/api/address/C", Some(body.as_str())),
        (Method::DELETE, "/api/address/C", None),
        (Method::DELETE, "/api/address/-1", None),
    ] {
        let (status, json) = app.send(method.clone(), uri, Some(USER_ID), payload).await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE, "{method} {uri}");
        assert_failure(&json, 406, "Cannot Convert ID");
    }
}

#[tokio::test]
async fn update_address_rejects_non_json_body() {
    let app = TestApp::new();

    let (status, json) = app
        .send(Method::PUT, "/api/address/1", Some(USER_ID), Some("Jalan Mentari"))
        .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_failure(&json, 415, "Cannot Bind Data");
}

#[tokio::test]
async fn address_crud_round_trip() {
    let app = TestApp::new();
    let body = address_payload().to_string();

    let (_, created) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;
    let id = created["data"]["id"].as_i64().unwrap();
    app.send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;

    let (status, all) = app.send(Method::GET, "/api/address", Some(USER_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["message"], "Success Get All data");
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let (status, one) = app
        .send(Method::GET, &format!("/api/address/{id}"), Some(USER_ID), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["message"], "Success Get Data ID");
    assert_eq!(one["data"]["city"], "Pagar Alam");

    let mut changed = address_payload();
    changed["city"] = "Palembang".into();
    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/address/{id}"),
            Some(USER_ID),
            Some(&changed.to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Updated");
    assert_eq!(updated["data"]["city"], "Palembang");

    let (status, deleted) = app
        .send(Method::DELETE, &format!("/api/address/{id}"), Some(USER_ID), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Deleted");
    assert_eq!(deleted["status"], true);

    let (status, json) = app
        .send(Method::GET, &format!("/api/address/{id}"), Some(USER_ID), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&json, 404, "Data Not Found");
}

#[tokio::test]
async fn addresses_are_scoped_to_their_owner() {
    let app = TestApp::new();
    let body = address_payload().to_string();
    let (_, created) = app
        .send(Method::POST, "/api/address", Some(USER_ID), Some(&body))
        .await;
    let uri = format!("/api/address/{}", created["data"]["id"]);

    let (status, _) = app.send(Method::GET, &uri, Some(OTHER_USER_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PUT, &uri, Some(OTHER_USER_ID), Some(&body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = app
        .send(Method::GET, "/api/address", Some(OTHER_USER_ID), None)
        .await;
    assert!(all["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_routes_get_a_json_not_found() {
    let app = TestApp::new();

    let (status, json) = app.send(Method::GET, "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&json, 404, "Not Found");
}
