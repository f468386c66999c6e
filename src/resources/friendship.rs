//! Friendship resource: follow, unfollow and pending requests.

use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::{IdList, User, UserRef};
use crate::params::Params;

/// Follow or unfollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendAction {
    Add,
    Remove,
}

impl FriendAction {
    fn path(self, target: &UserRef) -> String {
        let verb = match self {
            FriendAction::Add => "create",
            FriendAction::Remove => "destroy",
        };
        format!("/friendships/{verb}/{}.json", target.path_segment())
    }
}

/// Which pending follow requests to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipDirection {
    /// Users who asked to follow the authenticated user.
    Incoming,
    /// Protected users the authenticated user asked to follow.
    Outgoing,
}

impl FriendshipDirection {
    fn path(self) -> &'static str {
        match self {
            FriendshipDirection::Incoming => "/friendships/incoming.json",
            FriendshipDirection::Outgoing => "/friendships/outgoing.json",
        }
    }
}

impl TwitterClient {
    /// Follow or unfollow `target` (an id, screen name or [`User`]).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use twitter_rest::{FriendAction, TwitterClient};
    /// # async fn example(client: &TwitterClient) -> twitter_rest::Result<()> {
    /// client.friend(FriendAction::Add, "dictionary").await?;
    /// client.friend(FriendAction::Remove, 1260061u64).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, target))]
    pub async fn friend(&self, action: FriendAction, target: impl Into<UserRef>) -> Result<User> {
        let path = action.path(&target.into());
        let response = self
            .rest_request(HttpMethod::Post, &path, &Params::new())
            .await?;
        let user: User = response.json()?;
        Ok(self.bless(user))
    }

    /// Ids of users with pending follow requests in `direction`.
    ///
    /// The list is returned as parsed and is not bound to this client.
    #[tracing::instrument(skip(self))]
    pub async fn friendships(&self, direction: FriendshipDirection) -> Result<IdList> {
        let response = self
            .rest_request(HttpMethod::Get, direction.path(), &Params::new())
            .await?;
        response.json()
    }
}
