//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the walker, including:
//! - Building HTTP clients with proper user agent strings
//! - Resolving the random-article endpoint to its landing address
//! - GET requests to fetch article markup
//! - Bounded retries for transient failures
//! - Error classification

use crate::config::{Config, UserAgentConfig};
use crate::url::ArticleRef;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a fetch did not produce page markup
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid landing URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// Returns true for failures worth retrying (server errors and timeouts)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Timeout { .. } => true,
            Self::Network { .. } | Self::InvalidUrl { .. } => false,
        }
    }
}

/// A random start and the markup of the page it landed on
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub article: ArticleRef,
    pub body: String,
}

/// Source of article pages
///
/// This is the seam between the resolution engine and the network. The
/// production implementation is [`HttpPageSource`]; tests supply in-memory
/// sources.
pub trait PageSource: Send + Sync {
    /// Follows the random-article endpoint and returns the page it landed on
    fn random_article(&self) -> impl Future<Output = Result<LandingPage, FetchError>> + Send;

    /// Fetches the markup of an article
    fn fetch_page(
        &self,
        article: &ArticleRef,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to 10 hops) so that the random-article
/// endpoint resolves to a canonical article address.
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use philo_walk::config::UserAgentConfig;
/// use philo_walk::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Page source backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    random_url: Url,
    retries: u32,
    retry_delay: Duration,
}

impl HttpPageSource {
    /// Creates a page source from an existing client
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `random_url` - Absolute URL of the random-article endpoint
    /// * `retries` - Extra attempts for transient failures
    /// * `retry_delay` - Pause between attempts
    pub fn new(client: Client, random_url: Url, retries: u32, retry_delay: Duration) -> Self {
        Self {
            client,
            random_url,
            retries,
            retry_delay,
        }
    }

    /// Creates a page source from the walker configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let base = Url::parse(&config.site.base_url)?;
        let random_url = base.join(&config.site.random_article_path)?;

        Ok(Self::new(
            client,
            random_url,
            config.walker.fetch_retries,
            Duration::from_millis(config.walker.retry_delay_ms),
        ))
    }

    /// Runs one GET request, returning the final URL and body
    async fn get_once(&self, url: &str) -> Result<(String, String), FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;
        Ok((final_url, body))
    }

    /// Runs a GET request, retrying transient failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 5xx | Retry up to `retries` times |
    /// | Timeout | Retry up to `retries` times |
    /// | Other HTTP error | Immediate failure |
    /// | Connection error | Immediate failure |
    async fn get(&self, url: &str) -> Result<(String, String), FetchError> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::debug!(
                        "Transient failure for {} ({}), retry {}/{}",
                        url,
                        e,
                        attempt,
                        self.retries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl PageSource for HttpPageSource {
    async fn random_article(&self) -> Result<LandingPage, FetchError> {
        let (final_url, body) = self.get(self.random_url.as_str()).await?;
        let article = ArticleRef::parse(&final_url).map_err(|e| FetchError::InvalidUrl {
            url: final_url.clone(),
            message: e.to_string(),
        })?;
        Ok(LandingPage { article, body })
    }

    async fn fetch_page(&self, article: &ArticleRef) -> Result<String, FetchError> {
        let (_final_url, body) = self.get(article.as_str()).await?;
        Ok(body)
    }
}

/// Classifies a transport error
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
