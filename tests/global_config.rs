//! Process-wide configuration tests.
//!
//! Kept in their own test binary with a single test function, since they
//! mutate the default configuration and the shared header cache.

use twitter_rest::{configure, current_config, reset_config, reset_default_headers, Protocol, TwitterClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn header(request: &Request, name: &str) -> String {
    request.headers[name].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_tokens_and_headers_snapshot_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/verify_credentials.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let addr = *server.address();
    configure(|config| {
        config.protocol = Protocol::Http;
        config.host = addr.ip().to_string();
        config.port = addr.port();
        config.user_agent = "first".to_string();
        config.oauth_consumer_token = Some("CK1".to_string());
        config.oauth_consumer_secret = Some("CS1".to_string());
    });
    assert_eq!(current_config().user_agent, "first");

    // First use snapshots the consumer key and the default headers.
    let early = TwitterClient::new("access-key", "access-secret");
    assert!(early.authenticate("me", "pw").await.unwrap());

    configure(|config| {
        config.user_agent = "second".to_string();
        config.oauth_consumer_token = Some("CK2".to_string());
    });

    assert!(early.authenticate("me", "pw").await.unwrap());
    let late = TwitterClient::new("access-key", "access-secret");
    assert!(late.authenticate("me", "pw").await.unwrap());

    // Headers are rebuilt only after an explicit reset.
    reset_default_headers();
    assert!(late.authenticate("me", "pw").await.unwrap());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);

    assert!(header(&requests[0], "authorization").contains(r#"oauth_consumer_key="CK1""#));
    assert!(header(&requests[0], "user-agent").ends_with("[first]"));

    // Early client keeps its token and the cached headers.
    assert!(header(&requests[1], "authorization").contains(r#"oauth_consumer_key="CK1""#));
    assert!(header(&requests[1], "user-agent").ends_with("[first]"));

    // Late client builds its token from the new configuration but still
    // shares the cached headers.
    assert!(header(&requests[2], "authorization").contains(r#"oauth_consumer_key="CK2""#));
    assert!(header(&requests[2], "user-agent").ends_with("[first]"));

    assert!(header(&requests[3], "user-agent").ends_with("[second]"));

    reset_config();
    reset_default_headers();
    assert_eq!(current_config().host, "twitter.com");
}
