//! Status model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bless::{impl_bindable, Bindable, ClientHandle};
use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::User;
use crate::params::Params;
use crate::resources::{StatusAction, StatusUpdate, StatusValue};
use crate::traits::Get;

/// A status update (tweet).
///
/// REST payloads embed the author as `user`; Search payloads flatten it into
/// the `from_user*` / `to_user*` fields instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub id: u64,
    pub text: String,
    pub source: Option<String>,
    pub truncated: bool,
    pub favorited: bool,
    pub in_reply_to_status_id: Option<u64>,
    pub in_reply_to_user_id: Option<u64>,
    pub in_reply_to_screen_name: Option<String>,

    #[serde(with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    pub user: Option<User>,

    // Search surface
    pub from_user: Option<String>,
    pub from_user_id: Option<u64>,
    pub to_user: Option<String>,
    pub to_user_id: Option<u64>,
    pub iso_language_code: Option<String>,
    pub profile_image_url: Option<String>,

    #[serde(skip)]
    pub(crate) client: ClientHandle,
}

impl_bindable!(Status, "Status", user);

impl Status {
    /// Post `text` as a reply to this status.
    ///
    /// # Errors
    ///
    /// Fails if the status is not bound to a live client or the request fails.
    pub async fn reply(&self, text: impl Into<String>) -> Result<Option<Status>> {
        let update = StatusUpdate {
            in_reply_to_status_id: Some(self.id),
            ..StatusUpdate::new(text)
        };
        self.bound_client()?
            .status(StatusAction::Reply, StatusValue::Update(update))
            .await
    }

    /// Delete this status.
    pub async fn destroy(&self) -> Result<Option<Status>> {
        self.bound_client()?
            .status(StatusAction::Delete, StatusValue::Id(self.id))
            .await
    }
}

#[async_trait]
impl Get for Status {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &TwitterClient, id: u64) -> Result<Self> {
        let params = Params::new().with("id", id);
        let response = client
            .rest_request(HttpMethod::Get, "/statuses/show.json", &params)
            .await?;
        let status: Status = response.json()?;
        Ok(client.bless(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const REST_STATUS: &str = r#"{
        "id": 1234567,
        "text": "Hello world",
        "source": "web",
        "truncated": false,
        "created_at": "Wed May 02 03:04:54 +0000 2007",
        "in_reply_to_status_id": null,
        "user": {"id": 6748302, "screen_name": "mayors_daughter"}
    }"#;

    #[test]
    fn test_deserialize_rest_payload() {
        let status: Status = serde_json::from_str(REST_STATUS).unwrap();
        assert_eq!(status.id, 1234567);
        assert_eq!(status.text, "Hello world");
        assert_eq!(status.user.as_ref().unwrap().screen_name, "mayors_daughter");
        assert_eq!(status.in_reply_to_status_id, None);
    }

    #[test]
    fn test_deserialize_search_payload() {
        let json = r#"{
            "id": 99,
            "text": "@bob coworking?",
            "from_user": "alice",
            "from_user_id": 1,
            "to_user": "bob",
            "iso_language_code": "en",
            "created_at": "Wed, 02 May 2007 03:04:54 +0000"
        }"#;
        let status: Status = serde_json::from_str(json).unwrap();
        assert_eq!(status.from_user.as_deref(), Some("alice"));
        assert_eq!(status.to_user.as_deref(), Some("bob"));
        assert!(status.user.is_none());
        assert!(status.created_at.is_some());
    }

    #[test]
    fn test_bless_binds_embedded_user() {
        let client = TwitterClient::builder().config(Config::default()).build();
        let status: Status = serde_json::from_str(REST_STATUS).unwrap();

        let status = client.bless(status);

        assert!(status.client_handle().unwrap().is_bound_to(&client));
        let user = status.user.as_ref().unwrap();
        assert!(user.client_handle().unwrap().is_bound_to(&client));
    }

    #[test]
    fn test_equality_ignores_binding() {
        let client = TwitterClient::builder().config(Config::default()).build();
        let status: Status = serde_json::from_str(REST_STATUS).unwrap();
        let blessed = client.bless(status.clone());
        assert_eq!(status, blessed);
    }

    #[tokio::test]
    async fn test_unbound_reply_fails() {
        let status: Status = serde_json::from_str(REST_STATUS).unwrap();
        let err = status.reply("hi").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::TwitterError::Unbound { model: "Status" }
        ));
    }
}
