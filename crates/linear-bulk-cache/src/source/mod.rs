//! List source abstraction.
//!
//! This module defines the traits a remote client implements so the cache can
//! walk its list endpoints without knowing the transport.

mod traits;
mod whole_list;

pub use traits::{ListSource, PageSource};
pub use whole_list::WholeList;
