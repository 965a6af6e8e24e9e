//! API tests
//!
//! The full HTTP surface runs against the in-memory store adapter, so these
//! cover routing, the authentication gate, validation, envelopes, and error
//! translation end to end without a database.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_insurance::Insurance;
use domain_user::User;
use interface_api::auth::Claims;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::MemoryStore;

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_access_secret: "test-access-secret".to_string(),
        jwt_refresh_secret: "test-refresh-secret".to_string(),
        ..ApiConfig::default()
    }
}

fn test_server() -> TestServer {
    test_utils::init_test_tracing();
    let state = AppState::new(
        Arc::new(MemoryStore::<User>::new()),
        Arc::new(MemoryStore::<Insurance>::new()),
        test_config(),
    );
    TestServer::new(create_router(state)).expect("router should start")
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header")
}

/// Registers a user and returns (user id, access token, refresh token)
async fn register(server: &TestServer, email: &str) -> (String, String, String) {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "jane",
            "email": email,
            "password": "password123!"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    (
        body["data"]["user"]["id"].as_str().unwrap().to_string(),
        body["data"]["accessToken"].as_str().unwrap().to_string(),
        body["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}

fn insurance_body(user_id: &str) -> Value {
    json!({
        "policyNumber": 123456,
        "insuranceType": "Auto",
        "insuranceCompanyName": "ABC Company",
        "startDate": "2026-01-01T00:00:00Z",
        "endDate": "2026-07-01T00:00:00Z",
        "premiumAmount": 20000,
        "tenure": 6,
        "userId": user_id
    })
}

async fn create_insurance(server: &TestServer, body: &Value) -> Value {
    let response = server.post("/insurance").json(body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["data"].clone()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn liveness_and_readiness_respond() {
        let server = test_server();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["status"], "healthy");

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["status"], "ready");
    }
}

mod authentication_gate {
    use super::*;

    #[tokio::test]
    async fn missing_credential_is_rejected() {
        let server = test_server();
        let response = server.get("/insurance").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], "unauthorized");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let server = test_server();
        let response = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer("not.a.token"))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let server = test_server();
        let (user_id, _, _) = register(&server, "jane@example.com").await;

        // Hand-rolled token, expired two hours ago.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            exp: now - 7200,
            iat: now - 10800,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-access-secret"),
        )
        .unwrap();

        let response = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_rejected() {
        let server = test_server();

        let token = interface_api::auth::create_token(
            uuid::Uuid::new_v4(),
            "test-access-secret",
            3600,
        )
        .unwrap();

        let response = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn access_token_cookie_is_a_fallback() {
        let server = test_server();
        let (_, access_token, _) = register(&server, "jane@example.com").await;

        let cookie = HeaderValue::from_str(&format!("access_token={access_token}")).unwrap();
        let response = server
            .get("/insurance")
            .add_header(header::COOKIE, cookie)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn creation_needs_no_credential() {
        let server = test_server();
        let (user_id, _, _) = register(&server, "jane@example.com").await;

        let response = server.post("/insurance").json(&insurance_body(&user_id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
}

mod insurance_crud {
    use super::*;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;

        let created = create_insurance(&server, &insurance_body(&user_id)).await;
        assert_eq!(created["policyNumber"], 123456);
        assert_eq!(created["insuranceType"], "Auto");
        assert_eq!(created["insuranceCompanyName"], "ABC Company");
        assert_eq!(created["premiumAmount"], 20000.0);
        assert_eq!(created["tenure"], 6);
        assert_eq!(created["userId"], user_id);
        assert!(created["id"].is_string());
        assert!(created["createdAt"].is_string());
        assert!(created["updatedAt"].is_string());

        let id = created["id"].as_str().unwrap();
        let response = server
            .get(&format!("/insurance/{id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["message"], "Insurance found successfully");
        assert_eq!(body["status"], 200);
        assert_eq!(body["data"], created);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let server = test_server();
        let (_, token, _) = register(&server, "jane@example.com").await;

        let response = server
            .get(&format!("/insurance/{}", uuid::Uuid::new_v4()))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Enter a valid Insurance ID");
    }

    #[tokio::test]
    async fn invalid_payload_is_unprocessable() {
        let server = test_server();
        let (user_id, _, _) = register(&server, "jane@example.com").await;

        let mut body = insurance_body(&user_id);
        body["endDate"] = body["startDate"].clone();
        body["tenure"] = json!(0);

        let response = server.post("/insurance").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["error"], "validation_error");
    }

    #[tokio::test]
    async fn update_is_partial() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;
        let created = create_insurance(&server, &insurance_body(&user_id)).await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .patch(&format!("/insurance/{id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"premiumAmount": 25000}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["message"], "Insurance updated successfully");
        let updated = &body["data"];
        assert_eq!(updated["premiumAmount"], 25000.0);
        // Every other field is untouched.
        assert_eq!(updated["policyNumber"], created["policyNumber"]);
        assert_eq!(updated["insuranceType"], created["insuranceType"]);
        assert_eq!(
            updated["insuranceCompanyName"],
            created["insuranceCompanyName"]
        );
        assert_eq!(updated["startDate"], created["startDate"]);
        assert_eq!(updated["endDate"], created["endDate"]);
        assert_eq!(updated["tenure"], created["tenure"]);
        assert_eq!(updated["userId"], created["userId"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn updating_missing_record_is_not_found() {
        let server = test_server();
        let (_, token, _) = register(&server, "jane@example.com").await;

        let response = server
            .patch(&format!("/insurance/{}", uuid::Uuid::new_v4()))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"tenure": 12}))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_is_observably_idempotent() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;
        let created = create_insurance(&server, &insurance_body(&user_id)).await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .delete(&format!("/insurance/{id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["message"], "Insurance deleted successfully");
        assert_eq!(body["data"]["id"].as_str().unwrap(), id);

        // Deleting the same id again: not-found, never a crash.
        let response = server
            .delete(&format!("/insurance/{id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lookup_by_policy_number() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;

        create_insurance(&server, &insurance_body(&user_id)).await;
        let mut other = insurance_body(&user_id);
        other["policyNumber"] = json!(777777);
        create_insurance(&server, &other).await;

        let response = server
            .get("/insurance/policy-number/777777")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["data"]["policyNumber"], 777777);

        let response = server
            .get("/insurance/policy-number/999999")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

mod pagination {
    use super::*;

    #[tokio::test]
    async fn defaults_are_page_one_limit_ten() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;
        create_insurance(&server, &insurance_body(&user_id)).await;

        let response = server
            .get("/insurance/paginated")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["page"], 1);
        assert_eq!(data["limit"], 10);
        assert_eq!(data["total"], 1);
    }

    #[tokio::test]
    async fn last_page_holds_the_remainder() {
        // 7 records, limit 3: the third page holds 7 mod 3 = 1 record.
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;

        for n in 1..=7 {
            let mut body = insurance_body(&user_id);
            body["policyNumber"] = json!(n);
            create_insurance(&server, &body).await;
        }

        let full = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await
            .json::<Value>()["data"]
            .clone();
        let full_numbers: Vec<i64> = full
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["policyNumber"].as_i64().unwrap())
            .collect();

        let mut paged_numbers = Vec::new();
        for page in 1..=3 {
            let response = server
                .get(&format!("/insurance/paginated?page={page}&limit=3"))
                .add_header(header::AUTHORIZATION, bearer(&token))
                .await;
            assert_eq!(response.status_code(), StatusCode::OK);

            let data = &response.json::<Value>()["data"];
            assert_eq!(data["total"], 7);
            assert_eq!(data["page"], page);
            assert_eq!(data["limit"], 3);

            let items = data["items"].as_array().unwrap().clone();
            assert_eq!(items.len(), if page < 3 { 3 } else { 1 });
            paged_numbers.extend(items.iter().map(|d| d["policyNumber"].as_i64().unwrap()));
        }

        // Pages tile the unpaginated listing in the same order.
        assert_eq!(paged_numbers, full_numbers);
    }

    #[tokio::test]
    async fn filter_by_user_quote_pages_the_matches() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;

        create_insurance(&server, &insurance_body(&user_id)).await;
        let mut health = insurance_body(&user_id);
        health["insuranceType"] = json!("Health");
        health["policyNumber"] = json!(222222);
        create_insurance(&server, &health).await;

        let response = server
            .post("/insurance/filter-by-user-quote")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"insuranceType": "Auto"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["total"], 1);
        let items = data["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["insuranceType"], "Auto");

        // An empty filter matches everything.
        let response = server
            .post("/insurance/filter-by-user-quote")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({}))
            .await;
        assert_eq!(response.json::<Value>()["data"]["total"], 2);
    }
}

mod auth_flows {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let server = test_server();
        register(&server, "jane@example.com").await;

        let response = server
            .post("/auth/register")
            .json(&json!({
                "username": "second",
                "email": "jane@example.com",
                "password": "password123!"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "conflict");
    }

    #[tokio::test]
    async fn short_password_fails_validation() {
        let server = test_server();
        let response = server
            .post("/auth/register")
            .json(&json!({
                "username": "jane",
                "email": "jane@example.com",
                "password": "short"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn login_returns_tokens_for_valid_credentials() {
        let server = test_server();
        register(&server, "jane@example.com").await;

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "jane@example.com", "password": "password123!"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["message"], "Login successful");
        let token = body["data"]["accessToken"].as_str().unwrap().to_string();

        // The issued token opens gated routes.
        let response = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_unauthorized() {
        let server = test_server();
        register(&server, "jane@example.com").await;

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "jane@example.com", "password": "wrong-password"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "nobody@example.com", "password": "password123!"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_exchanges_refresh_token_for_access_token() {
        let server = test_server();
        let (_, _, refresh_token) = register(&server, "jane@example.com").await;

        let response = server
            .post("/auth/refresh")
            .json(&json!({"refreshToken": refresh_token}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let token = response.json::<Value>()["data"]["accessToken"]
            .as_str()
            .unwrap()
            .to_string();
        let response = server
            .get("/insurance")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn access_token_cannot_refresh() {
        // Distinct secrets: an access token is not a refresh token.
        let server = test_server();
        let (_, access_token, _) = register(&server, "jane@example.com").await;

        let response = server
            .post("/auth/refresh")
            .json(&json!({"refreshToken": access_token}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}

mod users {
    use super::*;

    #[tokio::test]
    async fn listing_requires_auth_and_hides_hashes() {
        let server = test_server();
        let (_, token, _) = register(&server, "jane@example.com").await;

        let response = server.get("/users").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .get("/users")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["message"], "User found successfully");
        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "jane@example.com");
        assert!(users[0].get("password").is_none());
        assert!(users[0].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn get_and_update_by_id() {
        let server = test_server();
        let (user_id, token, _) = register(&server, "jane@example.com").await;

        let response = server
            .get(&format!("/users/{user_id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["data"]["username"], "jane");

        let response = server
            .patch(&format!("/users/{user_id}"))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"username": "janet"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["data"]["username"], "janet");
        // Email untouched by the partial update.
        assert_eq!(body["data"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let server = test_server();
        let (_, token, _) = register(&server, "jane@example.com").await;

        let response = server
            .get(&format!("/users/{}", uuid::Uuid::new_v4()))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Enter a valid User ID");
    }
}
