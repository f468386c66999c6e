//! Account status models.

use serde::{Deserialize, Serialize};

use crate::bless::{impl_bindable, ClientHandle};

/// API rate limit state for the authenticated account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitStatus {
    pub remaining_hits: u32,
    pub hourly_limit: u32,
    /// Epoch seconds at which the window resets.
    pub reset_time_in_seconds: i64,
    pub reset_time: Option<String>,

    #[serde(skip)]
    pub(crate) client: ClientHandle,
}

impl_bindable!(RateLimitStatus, "RateLimitStatus");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "remaining_hits": 147,
            "hourly_limit": 150,
            "reset_time_in_seconds": 1256593200,
            "reset_time": "Mon Oct 26 21:40:00 +0000 2009"
        }"#;
        let status: RateLimitStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.remaining_hits, 147);
        assert_eq!(status.hourly_limit, 150);
        assert_eq!(status.reset_time_in_seconds, 1256593200);
    }
}
