//! User model and trait implementations.

use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bless::{impl_bindable, Bindable, ClientHandle};
use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::Status;
use crate::params::Params;
use crate::resources::FriendAction;
use crate::traits::Get;

/// A Twitter user.
///
/// Unknown JSON keys are ignored; missing keys take their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub profile_image_url: Option<String>,
    pub protected: bool,
    pub verified: bool,
    pub followers_count: u32,
    pub friends_count: u32,
    pub statuses_count: u32,
    pub favourites_count: u32,
    pub time_zone: Option<String>,
    pub utc_offset: Option<i32>,
    pub profile_background_color: Option<String>,
    pub profile_text_color: Option<String>,
    pub profile_link_color: Option<String>,
    pub profile_sidebar_fill_color: Option<String>,
    pub profile_sidebar_border_color: Option<String>,

    #[serde(with = "crate::models::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// The user's most recent status, when embedded.
    pub status: Option<Box<Status>>,

    #[serde(skip)]
    pub(crate) client: ClientHandle,
}

impl_bindable!(User, "User", status);

/// A user addressed by numeric id or screen name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(u64),
    ScreenName(String),
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "{id}"),
            UserRef::ScreenName(name) => f.write_str(name),
        }
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

impl From<u32> for UserRef {
    fn from(id: u32) -> Self {
        UserRef::Id(u64::from(id))
    }
}

impl From<&str> for UserRef {
    fn from(name: &str) -> Self {
        UserRef::ScreenName(name.to_string())
    }
}

impl From<String> for UserRef {
    fn from(name: String) -> Self {
        UserRef::ScreenName(name)
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        UserRef::Id(user.id)
    }
}

impl UserRef {
    /// Form used as a URL path segment; screen names are percent-encoded.
    pub(crate) fn path_segment(&self) -> Cow<'_, str> {
        match self {
            UserRef::Id(id) => Cow::Owned(id.to_string()),
            UserRef::ScreenName(name) => urlencoding::encode(name),
        }
    }

    /// Query parameter selecting this user on `users/show`.
    pub(crate) fn params(&self) -> Params {
        match self {
            UserRef::Id(id) => Params::new().with("user_id", id),
            UserRef::ScreenName(name) => Params::new().with("screen_name", name),
        }
    }
}

impl User {
    /// Users this user follows.
    ///
    /// # Errors
    ///
    /// Fails if the user is not bound to a live client or the request fails.
    pub async fn friends(&self) -> Result<Vec<User>> {
        self.connections("friends").await
    }

    /// Users following this user.
    ///
    /// # Errors
    ///
    /// Fails if the user is not bound to a live client or the request fails.
    pub async fn followers(&self) -> Result<Vec<User>> {
        self.connections("followers").await
    }

    async fn connections(&self, kind: &str) -> Result<Vec<User>> {
        let client = self.bound_client()?;
        let path = format!("/statuses/{kind}/{}.json", self.id);
        let response = client.rest_request(HttpMethod::Get, &path, &Params::new()).await?;
        let users: Vec<User> = response.json()?;
        Ok(client.bless(users))
    }

    /// Follow this user as the authenticated user.
    pub async fn befriend(&self) -> Result<User> {
        self.bound_client()?.friend(FriendAction::Add, self).await
    }

    /// Stop following this user.
    pub async fn defriend(&self) -> Result<User> {
        self.bound_client()?.friend(FriendAction::Remove, self).await
    }
}

#[async_trait]
impl Get for User {
    type Id = UserRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &TwitterClient, id: UserRef) -> Result<Self> {
        let response = client
            .rest_request(HttpMethod::Get, "/users/show.json", &id.params())
            .await?;
        let user: User = response.json()?;
        Ok(client.bless(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let json = r#"{
            "id": 6748302,
            "name": "Elizabeth Jane Newson-Henshard",
            "screen_name": "mayors_daughter_or_was_she",
            "location": "Casterbridge",
            "url": null,
            "created_at": "Wed May 02 03:04:54 +0000 2007",
            "some_future_field": [1, 2, 3]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 6748302);
        assert_eq!(user.location.as_deref(), Some("Casterbridge"));
        assert_eq!(user.url, None);
        assert!(user.created_at.is_some());
        assert!(!user.client.is_bound());
    }

    #[test]
    fn test_equality_on_attributes() {
        let user = User {
            id: 6748302,
            screen_name: "mayors_daughter".to_string(),
            ..Default::default()
        };
        let mut other = user.clone();
        assert_eq!(user, other);

        other.id = 1;
        assert_ne!(user, other);
    }

    #[test]
    fn test_user_ref_conversions() {
        assert_eq!(UserRef::from(1260061u64), UserRef::Id(1260061));
        assert_eq!(
            UserRef::from("dictionary"),
            UserRef::ScreenName("dictionary".to_string())
        );
        let user = User {
            id: 42,
            ..Default::default()
        };
        assert_eq!(UserRef::from(&user), UserRef::Id(42));
        assert_eq!(UserRef::Id(42).to_string(), "42");
        assert_eq!(UserRef::from("dictionary").params().get("screen_name"), Some("dictionary"));
    }

    #[test]
    fn test_path_segment_escapes_screen_names() {
        assert_eq!(UserRef::Id(42).path_segment(), "42");
        assert_eq!(UserRef::from("dictionary").path_segment(), "dictionary");
        assert_eq!(UserRef::from("bob?x=/#").path_segment(), "bob%3Fx%3D%2F%23");
    }

    #[test]
    fn test_bless_binds_embedded_status() {
        let client = TwitterClient::builder()
            .config(crate::config::Config::default())
            .build();
        let user = User {
            id: 6748302,
            status: Some(Box::new(Status {
                id: 107790712,
                ..Default::default()
            })),
            ..Default::default()
        };

        let user = client.bless(user);

        assert!(user.client_handle().unwrap().is_bound_to(&client));
        let status = user.status.as_ref().unwrap();
        assert!(status.client_handle().unwrap().is_bound_to(&client));
    }

    #[test]
    fn test_equality_ignores_binding() {
        let client = TwitterClient::builder()
            .config(crate::config::Config::default())
            .build();
        let user = User {
            id: 6748302,
            ..Default::default()
        };
        assert_eq!(client.bless(user.clone()), user);
    }
}
