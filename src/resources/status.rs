//! Status resource: show, update, destroy and reply.

use serde::Serialize;

use crate::client::{HttpMethod, TwitterClient};
use crate::error::{Result, TwitterError};
use crate::models::Status;
use crate::params::Params;

/// What [`TwitterClient::status`] does with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Fetch a status by id.
    Get,
    /// Publish a new status.
    Post,
    /// Delete a status by id.
    Delete,
    /// Publish a reply; needs both text and `in_reply_to_status_id`.
    Reply,
}

impl StatusAction {
    pub fn path(self) -> &'static str {
        match self {
            StatusAction::Get => "/statuses/show.json",
            StatusAction::Post | StatusAction::Reply => "/statuses/update.json",
            StatusAction::Delete => "/statuses/destroy.json",
        }
    }
}

/// Attributes of a new status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_coordinates: Option<bool>,
    /// Only sent for [`StatusAction::Reply`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<u64>,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    /// Attach coordinates.
    #[must_use]
    pub fn at(mut self, lat: f64, long: f64) -> Self {
        self.lat = Some(lat);
        self.long = Some(long);
        self
    }

    /// Mark as a reply to `status_id`.
    #[must_use]
    pub fn in_reply_to(mut self, status_id: u64) -> Self {
        self.in_reply_to_status_id = Some(status_id);
        self
    }

    fn is_complete_reply(&self) -> bool {
        !self.status.is_empty() && self.in_reply_to_status_id.is_some()
    }
}

/// Argument to [`TwitterClient::status`].
#[derive(Debug, Clone, PartialEq)]
pub enum StatusValue {
    Id(u64),
    Text(String),
    Update(StatusUpdate),
}

impl StatusValue {
    /// Coerce to a status id, as `get` and `delete` require.
    fn to_id(&self) -> Result<u64> {
        match self {
            StatusValue::Id(id) => Ok(*id),
            StatusValue::Text(text) => text.trim().parse().map_err(|_| {
                TwitterError::InvalidArgument(format!("'{text}' is not a status id"))
            }),
            StatusValue::Update(_) => Err(TwitterError::InvalidArgument(
                "a status update cannot be used as a status id".to_string(),
            )),
        }
    }
}

impl From<u64> for StatusValue {
    fn from(id: u64) -> Self {
        StatusValue::Id(id)
    }
}

impl From<&str> for StatusValue {
    fn from(text: &str) -> Self {
        StatusValue::Text(text.to_string())
    }
}

impl From<String> for StatusValue {
    fn from(text: String) -> Self {
        StatusValue::Text(text)
    }
}

impl From<StatusUpdate> for StatusValue {
    fn from(update: StatusUpdate) -> Self {
        StatusValue::Update(update)
    }
}

impl TwitterClient {
    /// Fetch, post, delete or reply to a status.
    ///
    /// * `Get` / `Delete`: `value` must be an id or numeric text.
    /// * `Post`: plain text or a [`StatusUpdate`]; only text, coordinates,
    ///   `place_id` and `display_coordinates` are sent.
    /// * `Reply`: a [`StatusUpdate`] with both text and
    ///   `in_reply_to_status_id`.
    ///
    /// The configured `source` is added to every post and reply.
    ///
    /// Returns `Ok(None)` without contacting the server when `value` is absent
    /// or a reply is missing either required field.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::InvalidArgument`] if `get`/`delete` is given a
    /// value that is not an id, or the request fails.
    #[tracing::instrument(skip(self, value))]
    pub async fn status(
        &self,
        action: StatusAction,
        value: impl Into<Option<StatusValue>>,
    ) -> Result<Option<Status>> {
        let Some(value) = value.into() else {
            return Ok(None);
        };
        let path = action.path();

        let response = match action {
            StatusAction::Get => {
                let params = Params::new().with("id", value.to_id()?);
                self.rest_request(HttpMethod::Get, path, &params).await?
            }
            StatusAction::Delete => {
                let params = Params::new().with("id", value.to_id()?);
                self.rest_request(HttpMethod::Delete, path, &params).await?
            }
            StatusAction::Post => {
                let mut params = match value {
                    StatusValue::Id(id) => Params::new().with("status", id),
                    StatusValue::Text(text) => Params::new().with("status", text),
                    StatusValue::Update(update) => Params::from_serialize(&StatusUpdate {
                        in_reply_to_status_id: None,
                        ..update
                    })?,
                };
                params.push("source", &self.config().source);
                self.rest_request(HttpMethod::Post, path, &params).await?
            }
            StatusAction::Reply => {
                let update = match value {
                    StatusValue::Update(update) if update.is_complete_reply() => update,
                    _ => {
                        tracing::debug!("reply skipped: needs status text and in_reply_to_status_id");
                        return Ok(None);
                    }
                };
                let mut params = Params::from_serialize(&update)?;
                params.push("source", &self.config().source);
                self.rest_request(HttpMethod::Post, path, &params).await?
            }
        };

        let status: Status = response.json()?;
        Ok(Some(self.bless(status)))
    }
}
