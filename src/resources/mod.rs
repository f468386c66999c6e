//! Resource methods on [`TwitterClient`](crate::TwitterClient).
//!
//! Each resource maps a closed set of actions to a path, verb and parameters,
//! dispatches through the client and binds the parsed models to it.

mod account;
mod auth;
mod friendship;
mod profile;
mod search;
mod status;
mod trends;

pub use account::AccountInfo;
pub use friendship::{FriendAction, FriendshipDirection};
pub use profile::{DeliveryDevice, ProfileColors, ProfileInfo, ProfileSection, ProfileUpdate};
pub use search::SearchOptions;
pub use status::{StatusAction, StatusUpdate, StatusValue};
pub use trends::{TrendResults, TrendType};
