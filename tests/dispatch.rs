//! Request dispatch tests.
//!
//! Uses wiremock to check what actually goes over the wire: verb, path,
//! query, body, headers and OAuth signature, and how responses are
//! classified into errors.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use twitter_rest::{
    Config, ErrorRegistry, FriendAction, HttpMethod, Params, Protocol, RestErrorKind, Surface,
    TwitterClient, TwitterError,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Both surfaces on the mock server, with a private error registry.
fn config_for(server: &MockServer) -> Config {
    let addr = server.address();
    Config {
        protocol: Protocol::Http,
        host: addr.ip().to_string(),
        port: addr.port(),
        search_protocol: Protocol::Http,
        search_host: addr.ip().to_string(),
        search_port: addr.port(),
        oauth_consumer_token: Some("config-key".to_string()),
        oauth_consumer_secret: Some("config-secret".to_string()),
        error_registry: Arc::new(ErrorRegistry::new()),
        ..Config::default()
    }
}

fn client_for(server: &MockServer) -> TwitterClient {
    TwitterClient::builder()
        .oauth_access("access-key", "access-secret")
        .config(config_for(server))
        .build()
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

fn authorization(request: &Request) -> String {
    request
        .headers
        .get("authorization")
        .expect("request was not signed")
        .to_str()
        .unwrap()
        .to_string()
}

fn user_json(id: u64, screen_name: &str) -> serde_json::Value {
    serde_json::json!({"id": id, "screen_name": screen_name, "name": screen_name})
}

#[tokio::test]
async fn test_friend_add_signed_with_consumer_override() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/friendships/create/1234567.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1234567, "dictionary")))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwitterClient::builder()
        .oauth_consumer("K1", "S1")
        .oauth_access("access-key", "access-secret")
        .config(config_for(&server))
        .build();

    let user = client.friend(FriendAction::Add, 1234567u64).await.unwrap();

    assert_eq!(user.id, 1234567);
    let request = single_request(&server).await;
    let auth = authorization(&request);
    assert!(auth.starts_with("OAuth "), "{auth}");
    assert!(auth.contains(r#"oauth_consumer_key="K1""#), "{auth}");
    assert!(auth.contains(r#"oauth_token="access-key""#), "{auth}");
    assert!(auth.contains(r#"oauth_signature_method="HMAC-SHA1""#), "{auth}");
    assert!(!auth.contains("config-key"));
}

#[tokio::test]
async fn test_consumer_from_config_without_override() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/verify_credentials.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "me")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.authenticate("me", "password").await.unwrap());

    let auth = authorization(&single_request(&server).await);
    assert!(auth.contains(r#"oauth_consumer_key="config-key""#), "{auth}");
}

#[tokio::test]
async fn test_registered_codes_raise_matching_variant() {
    let server = MockServer::start().await;

    for (code, _) in RestErrorKind::DEFAULTS {
        Mock::given(method("GET"))
            .and(path(format!("/code/{code}.json")))
            .respond_with(
                ResponseTemplate::new(code)
                    .set_body_json(serde_json::json!({"error": format!("failed with {code}")})),
            )
            .mount(&server)
            .await;
    }

    let client = client_for(&server);

    for (code, kind) in RestErrorKind::DEFAULTS {
        let uri = format!("/code/{code}.json");
        let err = client
            .dispatch(Surface::Rest, HttpMethod::Get, &uri, &Params::new(), &HeaderMap::new())
            .await
            .unwrap_err();

        let rest = err.as_rest().unwrap_or_else(|| panic!("{code}: {err:?}"));
        assert_eq!(rest.kind, kind, "code {code}");
        assert_eq!(rest.code, code);
        assert_eq!(rest.uri, uri);
        if code != 304 {
            // 304 responses carry no body
            assert_eq!(rest.error, Some(format!("failed with {code}")));
        }
    }
}

#[tokio::test]
async fn test_unregistered_code_raises_generic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teapot.json"))
        .respond_with(ResponseTemplate::new(418).set_body_string("short and stout"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .dispatch(Surface::Rest, HttpMethod::Get, "/teapot.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap_err();

    let rest = err.as_rest().unwrap();
    assert_eq!(rest.kind, RestErrorKind::Generic);
    assert_eq!(rest.code, 418);
    assert_eq!(rest.error, None);
}

#[tokio::test]
async fn test_redirect_is_classified_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved.json"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere.json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .dispatch(Surface::Rest, HttpMethod::Get, "/moved.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap_err();

    let rest = err.as_rest().unwrap();
    assert_eq!(rest.kind, RestErrorKind::Generic);
    assert_eq!(rest.code, 302);
    assert_eq!(rest.uri, "/moved.json");
    assert_eq!(single_request(&server).await.url.path(), "/moved.json");
}

#[tokio::test]
async fn test_private_registry_registration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = config_for(&server);
    config
        .error_registry
        .register(429, RestErrorKind::Custom("TooManyRequests".into()));
    let client = TwitterClient::builder().config(config).build();

    let err = client
        .dispatch(Surface::Rest, HttpMethod::Get, "/limited.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.rest_kind(),
        Some(&RestErrorKind::Custom("TooManyRequests".into()))
    );
    assert!(!ErrorRegistry::global().is_registered(429));
}

#[tokio::test]
async fn test_get_without_params_has_no_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"trends\":[]}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .dispatch(Surface::Rest, HttpMethod::Get, "/trends.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.url.query(), None);
    assert!(!request.url.as_str().ends_with('?'));
}

#[tokio::test]
async fn test_get_params_go_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statuses/show.json"))
        .and(query_param("id", "107786772"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = Params::new().with("id", 107786772u64);
    let response = client
        .dispatch(Surface::Rest, HttpMethod::Get, "/statuses/show.json", &params, &HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    assert!(single_request(&server).await.body.is_empty());
}

#[tokio::test]
async fn test_post_params_go_in_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statuses/update.json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("status=Hello%20Ladies%20%2B%20Gentlemen&source=twitter-rest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = Params::new()
        .with("status", "Hello Ladies + Gentlemen")
        .with("source", "twitter-rest");
    client
        .dispatch(Surface::Rest, HttpMethod::Post, "/statuses/update.json", &params, &HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(single_request(&server).await.url.query(), None);
}

#[tokio::test]
async fn test_delete_params_go_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/statuses/destroy.json"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .dispatch(
            Surface::Rest,
            HttpMethod::Delete,
            "/statuses/destroy.json",
            &Params::new().with("id", 5),
            &HeaderMap::new(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_caller_headers_merge_over_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/rate_limit_status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut headers = HeaderMap::new();
    headers.insert("x-twitter-client", HeaderValue::from_static("override"));
    headers.insert("x-extra", HeaderValue::from_static("1"));

    client
        .dispatch(Surface::Rest, HttpMethod::Get, "/account/rate_limit_status", &Params::new(), &headers)
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(request.headers["x-twitter-client"], "override");
    assert_eq!(request.headers["x-extra"], "1");
    assert_eq!(request.headers["accept"], "application/json");
    assert!(request.headers["user-agent"]
        .to_str()
        .unwrap()
        .starts_with("twitter-rest v"));
}

#[tokio::test]
async fn test_path_prefix_is_prepended() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/statuses/show.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwitterClient::builder()
        .config(Config {
            path_prefix: "/1".to_string(),
            ..config_for(&server)
        })
        .build();

    client
        .dispatch(Surface::Rest, HttpMethod::Get, "/statuses/show.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_surface_uses_search_site() {
    let rest = MockServer::start().await;
    let search = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "coworking"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\":[]}"))
        .expect(1)
        .mount(&search)
        .await;

    let search_addr = search.address();
    let client = TwitterClient::builder()
        .config(Config {
            search_host: search_addr.ip().to_string(),
            search_port: search_addr.port(),
            ..config_for(&rest)
        })
        .build();

    let results = client
        .search(twitter_rest::SearchOptions::query("coworking"))
        .await
        .unwrap();

    assert!(results.is_empty());
    assert!(rest.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_not_rest_error() {
    // A port that was just bound and released has nothing listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = TwitterClient::builder()
        .config(Config {
            protocol: Protocol::Http,
            host: "127.0.0.1".to_string(),
            port,
            error_registry: Arc::new(ErrorRegistry::new()),
            ..Config::default()
        })
        .build();
    let err = client
        .dispatch(Surface::Rest, HttpMethod::Get, "/trends.json", &Params::new(), &HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TwitterError::HttpError(_)), "{err:?}");
    assert!(err.as_rest().is_none());
}
