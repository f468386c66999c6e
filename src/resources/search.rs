//! Search resource.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::Status;
use crate::params::Params;

const SEARCH_PATH: &str = "/search.json";

/// Search query options, sent verbatim as query parameters.
///
/// Options without a dedicated field go in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    /// `"lat,long,radius"`, e.g. `"40.757929,-73.985506,25km"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geocode: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SearchOptions {
    /// Keyword search for `q`.
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Add an option without a dedicated field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[derive(Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Vec<Status>,
}

impl TwitterClient {
    /// Search public statuses on the Search surface.
    ///
    /// ```no_run
    /// # use twitter_rest::{SearchOptions, TwitterClient};
    /// # async fn example(client: &TwitterClient) -> twitter_rest::Result<()> {
    /// for status in client.search(SearchOptions::query("coworking")).await? {
    ///     println!("{}", status.text);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, options: SearchOptions) -> Result<Vec<Status>> {
        let params = Params::from_serialize(&options)?;
        let response = self
            .search_request(HttpMethod::Get, SEARCH_PATH, &params)
            .await?;
        let results: SearchResults = response.json()?;
        Ok(self.bless(results.results))
    }
}
