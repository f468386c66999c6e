//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::TwitterClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// The returned entity is bound to `client`, so follow-up calls on it
/// (`user.friends()`, `status.reply(..)`) go through the same credentials.
///
/// # Example
///
/// ```no_run
/// use twitter_rest::{Get, Status, TwitterClient, User};
///
/// # async fn example() -> twitter_rest::Result<()> {
/// let client = TwitterClient::from_env()?;
///
/// let status = Status::get(&client, 107786772).await?;
/// let user = User::get(&client, "dictionary".into()).await?;
/// println!("{} / {}", status.text, user.screen_name);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (numeric id, or a user reference).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &TwitterClient, id: Self::Id) -> Result<Self>;
}
