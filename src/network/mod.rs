pub mod client;
pub mod errors;
pub mod identity;
pub mod source;

pub use client::ScoutClient;
pub use errors::NetworkError;
pub use identity::BrowserHeaders;
pub use source::{FetchFuture, InMemorySource, PageSource};
