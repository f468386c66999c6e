//! Credential verification.

use crate::client::{HttpMethod, TwitterClient};
use crate::error::{Result, TwitterError};
use crate::params::Params;

const VERIFY_CREDENTIALS_PATH: &str = "/account/verify_credentials.json";

impl TwitterClient {
    /// Whether the server accepts this client's credentials.
    ///
    /// The request is signed with the client's OAuth tokens; `login` and
    /// `password` are accepted for compatibility but not sent.
    ///
    /// # Errors
    ///
    /// Only transport and configuration failures are errors. Any non-2xx
    /// answer yields `Ok(false)`.
    #[tracing::instrument(skip(self, password), fields(has_password = !password.is_empty()))]
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<bool> {
        match self
            .rest_request(HttpMethod::Get, VERIFY_CREDENTIALS_PATH, &Params::new())
            .await
        {
            Ok(_) => Ok(true),
            Err(TwitterError::Rest(error)) => {
                tracing::debug!(code = error.code, "credentials rejected");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
