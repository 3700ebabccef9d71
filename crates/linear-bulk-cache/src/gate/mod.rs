//! Fetch-once gate and the observable state of a category.
//!
//! The gate guarantees a category's populate routine runs at most once per
//! process, and that every caller sees its terminal outcome.

mod fetch_once;
mod state;

pub use fetch_once::FetchOnce;
pub use state::CategoryState;
