//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Location, PlaceType, Status, Trend, User};

/// Id of the authenticated user in the default scenario.
pub const DEFAULT_USER_ID: u64 = 16320720;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create a minimal user.
    pub fn user(id: u64, screen_name: &str, name: &str) -> User {
        User {
            id,
            screen_name: screen_name.to_string(),
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2007, 5, 2, 3, 4, 54).single(),
            ..Default::default()
        }
    }

    /// Create a user with a location and description.
    pub fn user_with_profile(
        id: u64,
        screen_name: &str,
        name: &str,
        location: &str,
        description: &str,
    ) -> User {
        User {
            location: Some(location.to_string()),
            description: Some(description.to_string()),
            ..Self::user(id, screen_name, name)
        }
    }

    // =========================================================================
    // Status Fixtures
    // =========================================================================

    /// Create a status authored by `author`.
    pub fn status(id: u64, text: &str, author: &User) -> Status {
        Status {
            id,
            text: text.to_string(),
            source: Some("web".to_string()),
            created_at: Utc.with_ymd_and_hms(2009, 10, 26, 20, 0, 0).single(),
            user: Some(author.clone()),
            ..Default::default()
        }
    }

    // =========================================================================
    // Trend Fixtures
    // =========================================================================

    pub fn trend(name: &str) -> Trend {
        Trend {
            name: name.to_string(),
            query: Some(name.to_string()),
            url: Some(format!(
                "http://search.twitter.com/search?q={}",
                urlencoding::encode(name)
            )),
        }
    }

    pub fn location(woeid: u64, name: &str, country: &str, country_code: &str) -> Location {
        Location {
            woeid,
            name: name.to_string(),
            country: Some(country.to_string()),
            country_code: Some(country_code.to_string()),
            place_type: Some(PlaceType {
                code: 7,
                name: "Town".to_string(),
            }),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    /// The user the access token belongs to.
    pub me: User,
    pub users: Vec<User>,
    pub statuses: Vec<Status>,
    /// `(follower, followed)` pairs.
    pub following: Vec<(u64, u64)>,
    pub incoming: Vec<u64>,
    pub outgoing: Vec<u64>,
    pub trends: Vec<Trend>,
    pub locations: Vec<Location>,
}

impl DefaultScenario {
    fn new() -> Self {
        let me = Fixtures::user_with_profile(
            DEFAULT_USER_ID,
            "t4ruby",
            "Twitter Client",
            "Chicago, IL",
            "Test account",
        );
        let dictionary = Fixtures::user(1260061, "dictionary", "Dictionary.com");
        let daughter = Fixtures::user_with_profile(
            6748302,
            "mayors_daughter",
            "Elizabeth Jane Newson-Henshard",
            "Casterbridge",
            "Or was she?",
        );

        let statuses = vec![
            Fixtures::status(107786772, "Word of the day: serendipity", &dictionary),
            Fixtures::status(107790712, "Looking for a coworking space in Casterbridge", &daughter),
            Fixtures::status(107793001, "Hello world", &me),
        ];

        Self {
            following: vec![(me.id, dictionary.id), (daughter.id, me.id)],
            incoming: vec![30592818, 21249843],
            outgoing: vec![],
            users: vec![dictionary, daughter],
            me,
            statuses,
            trends: vec![
                Fixtures::trend("#musicmonday"),
                Fixtures::trend("Halloween"),
                Fixtures::trend("Rust"),
            ],
            locations: vec![
                Fixtures::location(2459115, "New York", "United States", "US"),
                Fixtures::location(44418, "London", "United Kingdom", "GB"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_embeds_author() {
        let author = Fixtures::user(1, "alice", "Alice");
        let status = Fixtures::status(10, "hi", &author);
        assert_eq!(status.user.unwrap().screen_name, "alice");
    }

    #[test]
    fn test_trend_url_is_encoded() {
        let trend = Fixtures::trend("#musicmonday");
        assert_eq!(
            trend.url.as_deref(),
            Some("http://search.twitter.com/search?q=%23musicmonday")
        );
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.me.id, DEFAULT_USER_ID);
        assert!(!scenario.users.is_empty());
        assert!(!scenario.statuses.is_empty());
        assert!(!scenario.trends.is_empty());
        assert!(!scenario.locations.is_empty());
    }
}
