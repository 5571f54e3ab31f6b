//! Helper functions shared by the page renderers and templates

mod date;
mod html;
mod url;
mod version;

pub use date::*;
pub use html::*;
pub use url::*;
pub use version::*;
