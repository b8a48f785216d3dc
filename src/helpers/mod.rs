//! Helper functions shared by the page renderers and the fetchers

mod date;
mod url;

pub use date::*;
pub use url::*;
