//! Twitter API model types.

mod account;
mod friendship;
mod status;
pub(crate) mod timestamp;
mod trends;
mod user;

pub use account::*;
pub use friendship::*;
pub use status::*;
pub use trends::*;
pub use user::*;
