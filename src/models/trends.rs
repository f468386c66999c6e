//! Trend models.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::bless::{impl_bindable, ClientHandle};
use crate::error::{Result, TwitterError};

/// A single trending topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trend {
    pub name: String,
    pub query: Option<String>,
    pub url: Option<String>,
}

/// Trending topics as of a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trendline {
    /// When the trends were computed. Rendered verbatim; the API uses both
    /// date strings and epoch seconds here.
    #[serde(deserialize_with = "string_or_number")]
    pub as_of: Option<String>,
    pub trends: Vec<Trend>,
    /// Locations the trends apply to, for local trends.
    pub locations: Vec<Location>,

    #[serde(skip)]
    pub(crate) client: ClientHandle,
}

impl_bindable!(Trendline, "Trendline");

impl Trendline {
    /// Parse any of the trend payload shapes into trendlines.
    ///
    /// Accepts an array of trendline objects (local trends), a single object
    /// with a `trends` array (global trends), or an object whose `trends` is
    /// keyed by date (current/daily/weekly trends). Date-keyed payloads yield
    /// one trendline per date in ascending date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or matches none of the shapes.
    pub fn parse_many(body: &str) -> Result<Vec<Trendline>> {
        match serde_json::from_str::<Value>(body)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(TwitterError::from))
                .collect(),
            Value::Object(mut object) => match object.remove("trends") {
                Some(Value::Object(by_date)) => {
                    let by_date: BTreeMap<String, Value> = by_date.into_iter().collect();
                    by_date
                        .into_iter()
                        .map(|(date, trends)| -> Result<Trendline> {
                            Ok(Trendline {
                                as_of: Some(date),
                                trends: serde_json::from_value(trends)?,
                                ..Default::default()
                            })
                        })
                        .collect()
                }
                Some(trends) => {
                    object.insert("trends".to_string(), trends);
                    Ok(vec![serde_json::from_value(Value::Object(object))?])
                }
                None => Err(TwitterError::InvalidArgument(
                    "trend payload has no 'trends' field".to_string(),
                )),
            },
            other => Err(TwitterError::InvalidArgument(format!(
                "unexpected trend payload: {other}"
            ))),
        }
    }
}

/// Classification of a [`Location`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceType {
    pub code: u32,
    pub name: String,
}

/// A place for which local trends are available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Yahoo! Where On Earth id, usable with `TrendType::Local`.
    pub woeid: u64,
    pub name: String,
    pub country: Option<String>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "placeType")]
    pub place_type: Option<PlaceType>,
    pub parentid: Option<u64>,
    pub url: Option<String>,

    #[serde(skip)]
    pub(crate) client: ClientHandle,
}

impl_bindable!(Location, "Location");

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
