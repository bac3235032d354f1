//! Page fetching for skill extraction.
//!
//! `SkillExtractor` holds an `Arc<dyn PageFetcher>` so tests can observe or
//! fail fetches without touching the network.

use async_trait::async_trait;
use reqwest::redirect::{Attempt, Policy};
use reqwest::{Client, Url};
use thiserror::Error;

const FETCH_TIMEOUT_SECS: u64 = 15;
const MAX_REDIRECTS: usize = 5;
const USER_AGENT: &str = concat!("careercraft/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Refusing to fetch '{0}'")]
    DisallowedUrl(String),
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url`. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String, ExtractError>;
}

/// Production fetcher backed by `reqwest`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .redirect(Policy::custom(same_site_redirect))
                .build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Follows a redirect only over https and within the site of the original request.
fn same_site_redirect(attempt: Attempt) -> reqwest::redirect::Action {
    if attempt.previous().len() > MAX_REDIRECTS {
        return attempt.error("too many redirects");
    }
    let allowed = attempt
        .previous()
        .first()
        .is_some_and(|origin| is_same_site(origin, attempt.url()));
    if allowed {
        attempt.follow()
    } else {
        attempt.stop()
    }
}

/// True when `next` is https and shares `origin`'s last two host labels.
fn is_same_site(origin: &Url, next: &Url) -> bool {
    fn site(url: &Url) -> Option<String> {
        let host = url.host_str()?.to_ascii_lowercase();
        let labels: Vec<&str> = host.rsplitn(3, '.').take(2).collect();
        (labels.len() == 2).then(|| format!("{}.{}", labels[1], labels[0]))
    }
    next.scheme() == "https"
        && next.port().is_none()
        && site(origin).is_some_and(|s| site(next) == Some(s))
}
