//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Twitter API server.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Location, RateLimitStatus, Status, Trend, User, UserRef};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Users indexed by id.
    pub users: HashMap<u64, User>,

    /// Statuses indexed by id, oldest first.
    pub statuses: BTreeMap<u64, Status>,

    /// Id of the user the access token belongs to.
    pub authenticated_user: u64,

    /// Ids of users followed by each user.
    pub following: HashMap<u64, BTreeSet<u64>>,

    /// Pending follow requests to the authenticated user.
    pub incoming: Vec<u64>,

    /// Pending follow requests from the authenticated user.
    pub outgoing: Vec<u64>,

    /// Current global trends.
    pub trends: Vec<Trend>,

    /// Locations with local trends, by WOEID.
    pub locations: BTreeMap<u64, Location>,

    /// Rate limit reported by `account/rate_limit_status`.
    pub hourly_limit: u32,

    /// Requests served so far.
    pub requests: u32,

    /// If set, requests must be signed with this consumer key.
    pub required_consumer_key: Option<String>,

    next_status_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            statuses: BTreeMap::new(),
            authenticated_user: 0,
            following: HashMap::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            trends: Vec::new(),
            locations: BTreeMap::new(),
            hourly_limit: 150,
            requests: 0,
            required_consumer_key: None,
            next_status_id: 1,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }

    /// Add a user and make it the owner of the access token.
    pub fn with_authenticated_user(mut self, user: User) -> Self {
        self.authenticated_user = user.id;
        self.with_user(user)
    }

    /// Add a status to the state.
    pub fn with_status(mut self, status: Status) -> Self {
        self.next_status_id = self.next_status_id.max(status.id + 1);
        self.statuses.insert(status.id, status);
        self
    }

    /// Record that `follower` follows `followed`.
    pub fn with_following(mut self, follower: u64, followed: u64) -> Self {
        self.following.entry(follower).or_default().insert(followed);
        self
    }

    /// Add global trends.
    pub fn with_trends(mut self, trends: Vec<Trend>) -> Self {
        self.trends = trends;
        self
    }

    /// Add a trend location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.woeid, location);
        self
    }

    /// Require requests to be signed with `key`.
    pub fn with_required_consumer_key(mut self, key: &str) -> Self {
        self.required_consumer_key = Some(key.to_string());
        self
    }

    /// Find a user by id or screen name.
    pub fn find_user(&self, user: &UserRef) -> Option<&User> {
        match user {
            UserRef::Id(id) => self.users.get(id),
            UserRef::ScreenName(name) => self
                .users
                .values()
                .find(|u| u.screen_name.eq_ignore_ascii_case(name)),
        }
    }

    /// The user the access token belongs to.
    pub fn me(&self) -> Option<&User> {
        self.users.get(&self.authenticated_user)
    }

    pub fn get_status(&self, id: u64) -> Option<&Status> {
        self.statuses.get(&id)
    }

    /// Post a status as the authenticated user.
    pub fn post_status(
        &mut self,
        text: String,
        source: Option<String>,
        in_reply_to_status_id: Option<u64>,
    ) -> Status {
        let id = self.next_status_id;
        self.next_status_id += 1;

        let in_reply_to = in_reply_to_status_id.and_then(|id| self.statuses.get(&id));
        let status = Status {
            id,
            text,
            source,
            in_reply_to_status_id: in_reply_to.map(|s| s.id),
            in_reply_to_user_id: in_reply_to.and_then(|s| s.user.as_ref()).map(|u| u.id),
            in_reply_to_screen_name: in_reply_to
                .and_then(|s| s.user.as_ref())
                .map(|u| u.screen_name.clone()),
            created_at: Some(Utc::now()),
            user: self.me().cloned(),
            ..Default::default()
        };

        self.statuses.insert(id, status.clone());
        if let Some(me) = self.users.get_mut(&self.authenticated_user) {
            me.statuses_count += 1;
        }
        status
    }

    /// Delete a status, returning it.
    pub fn destroy_status(&mut self, id: u64) -> Option<Status> {
        let status = self.statuses.remove(&id)?;
        if let Some(me) = self.users.get_mut(&self.authenticated_user) {
            me.statuses_count = me.statuses_count.saturating_sub(1);
        }
        Some(status)
    }

    /// Users followed by `id`.
    pub fn friends_of(&self, id: u64) -> Vec<User> {
        self.following
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|friend| self.users.get(friend).cloned())
            .collect()
    }

    /// Users following `id`.
    pub fn followers_of(&self, id: u64) -> Vec<User> {
        let mut followers: Vec<User> = self
            .following
            .iter()
            .filter(|(_, followed)| followed.contains(&id))
            .filter_map(|(follower, _)| self.users.get(follower).cloned())
            .collect();
        followers.sort_by_key(|u| u.id);
        followers
    }

    /// Make the authenticated user follow (`true`) or unfollow `target`.
    pub fn set_following(&mut self, target: &UserRef, follow: bool) -> Option<User> {
        let target = self.find_user(target)?.id;
        let me = self.authenticated_user;
        let changed = if follow {
            self.following.entry(me).or_default().insert(target)
        } else {
            self.following.entry(me).or_default().remove(&target)
        };

        if changed {
            let delta: i64 = if follow { 1 } else { -1 };
            if let Some(user) = self.users.get_mut(&target) {
                user.followers_count = (i64::from(user.followers_count) + delta).max(0) as u32;
            }
            if let Some(user) = self.users.get_mut(&me) {
                user.friends_count = (i64::from(user.friends_count) + delta).max(0) as u32;
            }
        }
        self.users.get(&target).cloned()
    }

    /// Statuses whose text or author matches `query`, newest first.
    pub fn search(&self, query: &str) -> Vec<Status> {
        let query = query.to_lowercase();
        self.statuses
            .values()
            .rev()
            .filter(|s| {
                s.text.to_lowercase().contains(&query)
                    || s
                        .user
                        .as_ref()
                        .is_some_and(|u| u.screen_name.to_lowercase() == query)
            })
            .map(|s| {
                let mut result = s.clone();
                if let Some(user) = result.user.take() {
                    result.from_user = Some(user.screen_name);
                    result.from_user_id = Some(user.id);
                    result.profile_image_url = user.profile_image_url;
                }
                result
            })
            .collect()
    }

    /// Count a served request and report the remaining budget.
    pub fn rate_limit(&self) -> RateLimitStatus {
        let reset = Utc::now() + chrono::Duration::hours(1);
        RateLimitStatus {
            remaining_hits: self.hourly_limit.saturating_sub(self.requests),
            hourly_limit: self.hourly_limit,
            reset_time_in_seconds: reset.timestamp(),
            reset_time: Some(reset.format("%a %b %d %H:%M:%S %z %Y").to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, screen_name: &str) -> User {
        User {
            id,
            screen_name: screen_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_user_by_id_and_name() {
        let state = MockState::new().with_user(user(1, "Dictionary"));

        assert!(state.find_user(&UserRef::Id(1)).is_some());
        assert!(state.find_user(&"dictionary".into()).is_some());
        assert!(state.find_user(&UserRef::Id(2)).is_none());
    }

    #[test]
    fn test_post_and_reply() {
        let mut state = MockState::new().with_authenticated_user(user(1, "me"));

        let first = state.post_status("hello".to_string(), None, None);
        let reply = state.post_status("@me hi".to_string(), None, Some(first.id));

        assert_eq!(reply.in_reply_to_status_id, Some(first.id));
        assert_eq!(reply.in_reply_to_screen_name.as_deref(), Some("me"));
        assert_eq!(state.me().unwrap().statuses_count, 2);
    }

    #[test]
    fn test_follow_and_unfollow() {
        let mut state = MockState::new()
            .with_authenticated_user(user(1, "me"))
            .with_user(user(2, "dictionary"));

        state.set_following(&UserRef::Id(2), true).unwrap();
        assert_eq!(state.friends_of(1).len(), 1);
        assert_eq!(state.followers_of(2)[0].id, 1);

        let user = state.set_following(&"dictionary".into(), false).unwrap();
        assert_eq!(user.followers_count, 0);
        assert!(state.friends_of(1).is_empty());
    }

    #[test]
    fn test_search_flattens_author() {
        let mut state = MockState::new().with_authenticated_user(user(1, "me"));
        state.post_status("Looking for coworking space".to_string(), None, None);
        state.post_status("unrelated".to_string(), None, None);

        let results = state.search("coworking");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].from_user.as_deref(), Some("me"));
        assert!(results[0].user.is_none());
    }
}
