use std::future::Future;

mod deploy;
mod fetch;

pub use deploy::{DeployError, VercelClient, LANDING_PAGE};
pub use fetch::{render_code, CodeFetcher, FetchError, ELLIPSIS, MESSAGE_LIMIT, TRUNCATE_AT};

/// Publishes a one-page static site and returns the URL it was assigned.
pub trait Deployer {
    fn create_website(&self, name: &str) -> impl Future<Output = Result<String, DeployError>> + Send;
}

/// Downloads the body behind a user-supplied URL as text.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}
