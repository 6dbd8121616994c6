//! Canonical article identifiers

use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Canonical identifier for an article: its absolute URL without a fragment
///
/// Two references are equal exactly when their canonical URL strings are
/// equal, which is what the resolution cache keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleRef(String);

impl ArticleRef {
    /// Parses an absolute HTTP(S) URL into an article reference
    ///
    /// # Examples
    ///
    /// ```
    /// use philo_walk::url::ArticleRef;
    ///
    /// let article = ArticleRef::parse("https://en.wikipedia.org/wiki/Logic#History").unwrap();
    /// assert_eq!(article.as_str(), "https://en.wikipedia.org/wiki/Logic");
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
        Self::from_url(url)
    }

    /// Builds an article reference from an already-parsed URL
    pub fn from_url(mut url: Url) -> UrlResult<Self> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(UrlError::InvalidScheme(other.to_string())),
        }

        url.set_fragment(None);
        Ok(Self(url.to_string()))
    }

    /// Returns the canonical URL string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment, which is the article title on wiki sites
    pub fn title(&self) -> &str {
        let path = self.0.split('?').next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or_default()
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
