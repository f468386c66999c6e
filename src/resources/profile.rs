//! Profile resource: update profile info, colors and delivery device.

use serde::Serialize;

use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::User;
use crate::params::Params;

/// Which part of the profile an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Info,
    Colors,
    Device,
}

impl ProfileSection {
    pub fn path(self) -> &'static str {
        match self {
            ProfileSection::Info => "/account/update_profile",
            ProfileSection::Colors => "/account/update_profile_colors",
            ProfileSection::Device => "/account/update_delivery_device",
        }
    }
}

/// Profile text fields. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Profile colors as hex triplets (`"fff"` or `"ffffff"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_sidebar_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_sidebar_border_color: Option<String>,
}

/// Where notifications are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryDevice {
    Sms,
    Im,
    None,
}

impl DeliveryDevice {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryDevice::Sms => "sms",
            DeliveryDevice::Im => "im",
            DeliveryDevice::None => "none",
        }
    }
}

/// A profile update and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Info(ProfileInfo),
    Colors(ProfileColors),
    Device(DeliveryDevice),
}

impl ProfileUpdate {
    pub fn section(&self) -> ProfileSection {
        match self {
            ProfileUpdate::Info(_) => ProfileSection::Info,
            ProfileUpdate::Colors(_) => ProfileSection::Colors,
            ProfileUpdate::Device(_) => ProfileSection::Device,
        }
    }

    fn params(&self) -> Result<Params> {
        match self {
            ProfileUpdate::Info(info) => Params::from_serialize(info),
            ProfileUpdate::Colors(colors) => Params::from_serialize(colors),
            ProfileUpdate::Device(device) => Ok(Params::new().with("device", device.as_str())),
        }
    }
}

impl TwitterClient {
    /// Update the authenticated user's profile.
    ///
    /// ```no_run
    /// # use twitter_rest::{ProfileInfo, ProfileUpdate, TwitterClient};
    /// # async fn example(client: &TwitterClient) -> twitter_rest::Result<()> {
    /// let user = client
    ///     .profile(ProfileUpdate::Info(ProfileInfo {
    ///         location: Some("University Library".to_string()),
    ///         ..Default::default()
    ///     }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self), fields(section = ?update.section()))]
    pub async fn profile(&self, update: ProfileUpdate) -> Result<User> {
        let params = update.params()?;
        let response = self
            .rest_request(HttpMethod::Post, update.section().path(), &params)
            .await?;
        let user: User = response.json()?;
        Ok(self.bless(user))
    }
}
