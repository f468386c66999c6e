//! Account resource.

use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::RateLimitStatus;
use crate::params::Params;

/// Kind of account information to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountInfo {
    #[default]
    RateLimitStatus,
}

impl AccountInfo {
    fn path(self) -> &'static str {
        match self {
            AccountInfo::RateLimitStatus => "/account/rate_limit_status",
        }
    }
}

impl TwitterClient {
    /// Account status of the authenticated user.
    ///
    /// ```no_run
    /// # use twitter_rest::{AccountInfo, TwitterClient};
    /// # async fn example(client: &TwitterClient) -> twitter_rest::Result<()> {
    /// let limits = client.account_info(AccountInfo::RateLimitStatus).await?;
    /// println!("{} calls left", limits.remaining_hits);
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn account_info(&self, info: AccountInfo) -> Result<RateLimitStatus> {
        let response = self
            .rest_request(HttpMethod::Get, info.path(), &Params::new())
            .await?;
        let status: RateLimitStatus = response.json()?;
        Ok(self.bless(status))
    }
}
