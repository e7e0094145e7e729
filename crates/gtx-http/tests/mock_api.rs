//! Mock API tests for the gtx transport and session store.
//!
//! These tests use wiremock to simulate the GTXBET API and exercise the
//! refresh-and-retry protocol without network access.

use std::sync::Arc;
use std::time::Duration;

use gtx_core::{
    AccessToken, ApiUrl, AuthApi, Credentials, Error, MemoryTokenStore, RefreshToken,
    Registration, SessionState, SessionStore, TokenStore,
};
use gtx_http::{ApiRequest, ClientConfig, Feed, HttpTransport, ListType};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a transport pointed at a mock server.
fn transport_for(server: &MockServer, tokens: Arc<MemoryTokenStore>) -> HttpTransport {
    let config = ClientConfig::new(ApiUrl::new(server.uri()).unwrap()).partner_package("partner-key");
    HttpTransport::new(config, tokens).unwrap()
}

fn stored(access: &str, refresh: Option<&str>) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_tokens(
        AccessToken::new(access),
        refresh.map(RefreshToken::new),
    ))
}

fn user_json() -> Value {
    json!({
        "id": "u_1",
        "email": "alice@example.com",
        "username": "alice",
        "firstName": "Alice",
        "role": "user",
        "status": "active",
        "emailVerified": true,
        "phoneVerified": false,
        "twoFactorEnabled": false
    })
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "success": false,
        "message": "Token expired"
    }))
}

// ============================================================================
// Envelope Handling
// ============================================================================

#[tokio::test]
async fn test_request_attaches_bearer_and_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer access-1"))
        .and(header("content-type", "application/json"))
        .respond_with(ok(json!({ "user": user_json() })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access-1", None));
    let user = transport.profile().await.unwrap();

    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_success_false_with_ok_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Wallet is frozen",
            "message": "Forbidden"
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access-1", None));
    let err = transport
        .request::<Value>(&ApiRequest::get("/wallet"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Wallet is frozen");
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_non_ok_status_without_text_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access-1", None));
    let err = transport
        .request::<Value>(&ApiRequest::get("/wallet"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn test_null_data_is_a_successful_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sports/live/en"))
        .respond_with(ok(Value::Null))
        .expect(2)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access", None));

    let sports = transport.sports(Feed::Live, "en").await.unwrap();
    assert_eq!(sports, Value::Null);

    let raw: Value = transport
        .request(&ApiRequest::get("/sports/live/en"))
        .await
        .unwrap();
    assert_eq!(raw, Value::Null);
}

#[tokio::test]
async fn test_null_data_for_profile_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ok(Value::Null))
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access", None));
    let err = transport.profile().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert_eq!(err.to_string(), "Network error occurred");
}

#[tokio::test]
async fn test_malformed_body_is_a_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access-1", None));
    let err = transport
        .request::<Value>(&ApiRequest::get("/wallet"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert_eq!(err.to_string(), "Network error occurred");
}

#[tokio::test]
async fn test_unreachable_api_is_a_network_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ClientConfig::new(ApiUrl::new(format!("http://127.0.0.1:{}", port)).unwrap());
    let transport = HttpTransport::new(config, Arc::new(MemoryTokenStore::new())).unwrap();

    let err = transport
        .request::<Value>(&ApiRequest::get("/auth/profile"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Network error occurred");
}

#[tokio::test]
async fn test_field_errors_reach_the_caller() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Validation failed",
            "errors": { "username": ["Username is taken"] }
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryTokenStore::new()));
    let registration = Registration::new("alice@example.com", "alice", "+15550100", "S3cret!pw");
    let err = transport.register(&registration).await.unwrap_err();

    assert_eq!(err.to_string(), "Validation failed");
    let errors = err.field_errors().unwrap();
    assert_eq!(errors["username"], vec!["Username is taken".to_string()]);
}

// ============================================================================
// Refresh and Retry
// ============================================================================

#[tokio::test]
async fn test_401_refresh_then_retry_returns_retried_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-1" })))
        .respond_with(ok(json!({ "accessToken": "new-access" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ok(json!([{ "id": "bet-7" }])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = stored("old-access", Some("refresh-1"));
    let transport = transport_for(&server, tokens.clone());

    let bets: Value = transport
        .request(&ApiRequest::get("/bets/open"))
        .await
        .unwrap();

    assert_eq!(bets, json!([{ "id": "bet-7" }]));
    assert_eq!(
        tokens.access_token().unwrap(),
        Some(AccessToken::new("new-access"))
    );
    // Not rotated by the refresh endpoint, so unchanged.
    assert_eq!(
        tokens.refresh_token().unwrap(),
        Some(RefreshToken::new("refresh-1"))
    );
}

#[tokio::test]
async fn test_retry_resends_method_and_body() {
    let server = MockServer::start().await;

    let slip = json!({ "selections": ["e1:home"], "stake": 10 });

    Mock::given(method("POST"))
        .and(path("/bets"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "new-access", "refreshToken": "refresh-2" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bets"))
        .and(header("authorization", "Bearer new-access"))
        .and(body_json(slip.clone()))
        .respond_with(ok(json!({ "id": "bet-9" })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = stored("old-access", Some("refresh-1"));
    let transport = transport_for(&server, tokens.clone());

    let placed: Value = transport
        .request(&ApiRequest::post("/bets").json(&slip).unwrap())
        .await
        .unwrap();

    assert_eq!(placed["id"], "bet-9");
    assert_eq!(
        tokens.refresh_token().unwrap(),
        Some(RefreshToken::new("refresh-2"))
    );
}

#[tokio::test]
async fn test_401_without_refresh_token_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "never" })))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = stored("old-access", None);
    let transport = transport_for(&server, tokens.clone());

    let err = transport
        .request::<Value>(&ApiRequest::get("/bets/open"))
        .await
        .unwrap_err();

    assert!(err.is_no_refresh_token());
    assert!(err.is_session_expired());
    assert!(tokens.access_token().unwrap().is_none());
}

#[tokio::test]
async fn test_second_401_is_final() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .respond_with(unauthorized())
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "still-rejected" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("old-access", Some("refresh-1")));

    let err = transport
        .request::<Value>(&ApiRequest::get("/bets/open"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn test_rejected_refresh_expires_session_and_erases_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Invalid refresh token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = stored("old-access", Some("revoked"));
    let transport = transport_for(&server, tokens.clone());

    let err = transport
        .request::<Value>(&ApiRequest::get("/bets/open"))
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    assert!(!err.is_no_refresh_token());
    assert_eq!(err.to_string(), "Session expired. Please login again.");
    assert!(tokens.access_token().unwrap().is_none());
    assert!(tokens.refresh_token().unwrap().is_none());
}

#[tokio::test]
async fn test_401_without_token_is_plain_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Authentication required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "never" })))
        .expect(0)
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryTokenStore::new()));
    let err = transport
        .request::<Value>(&ApiRequest::get("/bets/open"))
        .await
        .unwrap_err();

    assert!(!err.is_session_expired());
    assert_eq!(err.to_string(), "Authentication required");
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(unauthorized())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "new-access" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("old-access", Some("refresh-1")));
    let request = ApiRequest::get("/bets/open");

    let (first, second, third) = tokio::join!(
        transport.request::<Value>(&request),
        transport.request::<Value>(&request),
        transport.request::<Value>(&request),
    );

    assert_eq!(first.unwrap(), json!([]));
    assert_eq!(second.unwrap(), json!([]));
    assert_eq!(third.unwrap(), json!([]));
}

#[tokio::test]
async fn test_explicit_refresh_without_token() {
    let server = MockServer::start().await;
    let transport = transport_for(&server, stored("access", None));

    let err = transport.refresh_token().await.unwrap_err();
    assert!(matches!(err, Error::NoRefreshToken));
    assert_eq!(err.to_string(), "No refresh token available");
}

#[tokio::test]
async fn test_clear_during_refresh_erases_tokens_and_ends_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ok(json!({ "accessToken": "new-access", "refreshToken": "refresh-2" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Slow enough that the clear lands while the retry is in flight.
    Mock::given(method("GET"))
        .and(path("/bets/open"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ok(json!([1])).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let tokens = stored("old-access", Some("refresh-1"));
    let transport = transport_for(&server, tokens.clone());
    let request = ApiRequest::get("/bets/open");

    let (result, cleared) = tokio::join!(transport.request::<Value>(&request), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        transport.clear_credentials().await
    });

    cleared.unwrap();
    assert!(tokens.access_token().unwrap().is_none());
    assert!(tokens.refresh_token().unwrap().is_none());

    let err = result.unwrap_err();
    assert!(err.is_session_expired());
}

// ============================================================================
// Auth Endpoints
// ============================================================================

#[tokio::test]
async fn test_login_sends_credentials_without_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "S3cret!pw",
            "rememberMe": true
        })))
        .respond_with(ok(json!({
            "user": user_json(),
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // A stale token from an earlier session must not be sent with the login.
    let transport = transport_for(&server, stored("stale", None));
    let creds = Credentials::new("alice@example.com", "S3cret!pw").remember_me(true);
    let payload = transport.login(&creds).await.unwrap();

    assert_eq!(payload.access_token, AccessToken::new("access-1"));
    assert_eq!(payload.refresh_token, Some(RefreshToken::new("refresh-1")));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_rejected_login_keeps_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok(json!({ "accessToken": "never" })))
        .expect(0)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("stale", Some("refresh-1")));
    let err = transport
        .login(&Credentials::new("alice@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn test_profile_accepts_bare_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ok(user_json()))
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access", None));
    let user = transport.profile().await.unwrap();
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_sports_read_sends_partner_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sports/live/en"))
        .and(header("package", "partner-key"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ok(json!([{ "id": "1", "name": "Football" }])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access", None));
    let sports = transport.sports(Feed::Live, "en").await.unwrap();

    assert_eq!(sports[0]["name"], "Football");
}

#[tokio::test]
async fn test_sports_ids_that_escape_the_path_are_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let transport = transport_for(&server, stored("access", None));

    let err = transport
        .countries("1/../../auth/profile", Feed::Line, "en")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = transport
        .event("42?list=all", ListType::List, Feed::Live, "en")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

// ============================================================================
// Session Store over HTTP
// ============================================================================

#[tokio::test]
async fn test_bootstrap_with_invalid_token_settles_signed_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    let tokens = stored("stale", None);
    let store = SessionStore::new(transport_for(&server, tokens.clone()));
    store.bootstrap().await;

    assert_eq!(store.state(), SessionState::signed_out());
    assert!(tokens.access_token().unwrap().is_none());
    assert!(tokens.refresh_token().unwrap().is_none());
}

#[tokio::test]
async fn test_bootstrap_without_token_makes_no_call() {
    let server = MockServer::start().await;

    let store = SessionStore::new(transport_for(&server, Arc::new(MemoryTokenStore::new())));
    store.bootstrap().await;

    assert_eq!(store.state(), SessionState::signed_out());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_then_logout_with_failing_remote() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ok(json!({
            "user": user_json(),
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "success": false,
            "message": "Service unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(transport_for(&server, tokens.clone()));
    store.bootstrap().await;

    let user = store
        .login(&Credentials::new("alice@example.com", "S3cret!pw"))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert!(store.is_authenticated());
    assert!(tokens.refresh_token().unwrap().is_none());

    let outcome = store.logout().await;
    assert!(!outcome.remote_acknowledged());
    assert_eq!(store.state(), SessionState::signed_out());
    assert!(tokens.access_token().unwrap().is_none());
}

#[tokio::test]
async fn test_register_persists_both_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "username": "alice",
            "phone": "+15550100",
            "password": "S3cret!pw",
            "country": "NZ",
            "agreeToTerms": true
        })))
        .respond_with(ok(json!({
            "user": user_json(),
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(transport_for(&server, tokens.clone()));

    let registration = Registration::new("alice@example.com", "alice", "+15550100", "S3cret!pw")
        .country("NZ")
        .agree_to_terms(true);
    store.register(&registration).await.unwrap();

    assert_eq!(tokens.access_token().unwrap(), Some(AccessToken::new("access-1")));
    assert_eq!(
        tokens.refresh_token().unwrap(),
        Some(RefreshToken::new("refresh-1"))
    );
}
