//! Trait definitions shared by model types.

mod get;

pub use get::Get;
