//! Trends resource.

use std::borrow::Cow;

use crate::client::{HttpMethod, TwitterClient};
use crate::error::Result;
use crate::models::{Location, Trendline};
use crate::params::Params;

/// Which trends to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendType {
    /// Locations that have local trends.
    Locations,
    /// Top ten topics right now.
    #[default]
    Global,
    Current,
    Daily,
    Weekly,
    /// Trends for a location, by WOEID.
    Local(u64),
}

impl TrendType {
    pub fn path(self) -> Cow<'static, str> {
        match self {
            TrendType::Locations => "/trends/available.json".into(),
            TrendType::Global => "/trends.json".into(),
            TrendType::Current => "/trends/current.json".into(),
            TrendType::Daily => "/trends/daily.json".into(),
            TrendType::Weekly => "/trends/weekly.json".into(),
            TrendType::Local(woeid) => format!("/trends/{woeid}.json").into(),
        }
    }
}

/// Result of [`TwitterClient::trends`].
#[derive(Debug, Clone, PartialEq)]
pub enum TrendResults {
    Locations(Vec<Location>),
    Trendlines(Vec<Trendline>),
}

impl TrendResults {
    pub fn len(&self) -> usize {
        match self {
            TrendResults::Locations(locations) => locations.len(),
            TrendResults::Trendlines(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_locations(self) -> Option<Vec<Location>> {
        match self {
            TrendResults::Locations(locations) => Some(locations),
            TrendResults::Trendlines(_) => None,
        }
    }

    pub fn into_trendlines(self) -> Option<Vec<Trendline>> {
        match self {
            TrendResults::Trendlines(lines) => Some(lines),
            TrendResults::Locations(_) => None,
        }
    }
}

impl TwitterClient {
    /// Trending topics, or the locations trends are available for.
    #[tracing::instrument(skip(self))]
    pub async fn trends(&self, trend_type: TrendType) -> Result<TrendResults> {
        let response = self
            .rest_request(HttpMethod::Get, &trend_type.path(), &Params::new())
            .await?;

        Ok(match trend_type {
            TrendType::Locations => {
                let locations: Vec<Location> = response.json()?;
                TrendResults::Locations(self.bless(locations))
            }
            _ => TrendResults::Trendlines(self.bless(Trendline::parse_many(&response.body)?)),
        })
    }
}
