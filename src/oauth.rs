//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use url::Url;

use crate::client::HttpMethod;
use crate::params::{percent_encode, Params};

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Everything needed to sign one request.
pub(crate) struct SigningKeys<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

/// Build the `Authorization` header value for a request.
///
/// `params` holds the query parameters (GET/DELETE) or form body (POST);
/// both take part in the signature.
pub(crate) fn authorization_header(
    keys: &SigningKeys<'_>,
    method: HttpMethod,
    url: &Url,
    params: &Params,
) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    authorization_header_with(keys, method, url, params, &nonce, &timestamp)
}

fn authorization_header_with(
    keys: &SigningKeys<'_>,
    method: HttpMethod,
    url: &Url,
    params: &Params,
    nonce: &str,
    timestamp: &str,
) -> String {
    let oauth = oauth_params(keys, nonce, timestamp);
    let base = signature_base_string(method, url, &oauth, params);
    let signature = sign(keys.consumer_secret, keys.token_secret, &base);

    let mut fields: Vec<(String, String)> = oauth.iter().cloned().collect();
    fields.push(("oauth_signature".to_string(), signature));
    fields.sort();

    let rendered = fields
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {rendered}")
}

fn oauth_params(keys: &SigningKeys<'_>, nonce: &str, timestamp: &str) -> Params {
    let mut oauth = Params::new()
        .with("oauth_consumer_key", keys.consumer_key)
        .with("oauth_nonce", nonce)
        .with("oauth_signature_method", SIGNATURE_METHOD)
        .with("oauth_timestamp", timestamp);
    // A request without an access token is signed as a two-legged call.
    if !keys.token.is_empty() {
        oauth.push("oauth_token", keys.token);
    }
    oauth.push("oauth_version", OAUTH_VERSION);
    oauth
}

/// `METHOD&enc(base_url)&enc(sorted params)`.
fn signature_base_string(method: HttpMethod, url: &Url, oauth: &Params, params: &Params) -> String {
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut pairs: Vec<(String, String)> = oauth
        .iter()
        .chain(params.iter())
        .chain(query.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();
    let normalized = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str(),
        percent_encode(&base_url(url)),
        percent_encode(&normalized)
    )
}

/// Scheme, host, non-default port and path; no query or fragment.
fn base_url(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.to_string()
}

fn sign(consumer_secret: &str, token_secret: &str, base: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_keys() -> SigningKeys<'static> {
        SigningKeys {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog",
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        }
    }

    fn reference_request() -> (Url, Params) {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
            .unwrap();
        let params = Params::new().with(
            "status",
            "Hello Ladies + Gentlemen, a signed OAuth request!",
        );
        (url, params)
    }

    #[test]
    fn test_hmac_sha1_vector() {
        let mut mac = Hmac::<Sha1>::new_from_slice(b"key").unwrap();
        mac.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            STANDARD.encode(mac.finalize().into_bytes()),
            "3nybhbi3iqa8ino29wqQcBydtNk="
        );
    }

    #[test]
    fn test_reference_signature_base_string() {
        let keys = reference_keys();
        let (url, params) = reference_request();
        let oauth = oauth_params(&keys, "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg", "1318622958");

        let base = signature_base_string(HttpMethod::Post, &url, &oauth, &params);

        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_reference_signature() {
        let keys = reference_keys();
        let (url, params) = reference_request();

        let header = authorization_header_with(
            &keys,
            HttpMethod::Post,
            &url,
            &params,
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            "1318622958",
        );

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_version=\"1.0\""));
    }

    #[test]
    fn test_default_port_dropped_from_base_url() {
        let url = Url::parse("https://twitter.com:443/statuses/show.json?id=5").unwrap();
        assert_eq!(base_url(&url), "https://twitter.com/statuses/show.json");

        let url = Url::parse("http://127.0.0.1:8080/search.json").unwrap();
        assert_eq!(base_url(&url), "http://127.0.0.1:8080/search.json");
    }

    #[test]
    fn test_empty_token_is_omitted() {
        let keys = SigningKeys {
            token: "",
            token_secret: "",
            ..reference_keys()
        };
        let url = Url::parse("https://twitter.com/account/verify_credentials.json").unwrap();
        let header = authorization_header(&keys, HttpMethod::Get, &url, &Params::new());
        assert!(!header.contains("oauth_token="));
        assert!(header.contains("oauth_nonce=\""));
    }
}
