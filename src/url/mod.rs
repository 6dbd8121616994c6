//! URL handling module for Philo-Walk
//!
//! This module provides the canonical article identifier and the helpers that
//! turn site-relative article links into absolute references.

mod article;

pub use article::ArticleRef;

use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a site-relative href against the site base URL
///
/// # Arguments
///
/// * `base_url` - The site base URL (e.g. `https://en.wikipedia.org`)
/// * `href` - The link target as found in the page (e.g. `/wiki/Logic`)
///
/// # Returns
///
/// The absolute article reference with any fragment removed
///
/// # Examples
///
/// ```
/// use philo_walk::url::resolve_article;
/// use url::Url;
///
/// let base = Url::parse("https://en.wikipedia.org").unwrap();
/// let article = resolve_article(&base, "/wiki/Logic#History").unwrap();
/// assert_eq!(article.as_str(), "https://en.wikipedia.org/wiki/Logic");
/// ```
pub fn resolve_article(base_url: &Url, href: &str) -> UrlResult<ArticleRef> {
    let joined = base_url
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    ArticleRef::from_url(joined)
}

/// Builds the reference for a named article under the article path prefix
///
/// # Examples
///
/// ```
/// use philo_walk::url::article_for_title;
/// use url::Url;
///
/// let base = Url::parse("https://en.wikipedia.org").unwrap();
/// let target = article_for_title(&base, "/wiki/", "Philosophy").unwrap();
/// assert_eq!(target.as_str(), "https://en.wikipedia.org/wiki/Philosophy");
/// ```
pub fn article_for_title(base_url: &Url, prefix: &str, title: &str) -> UrlResult<ArticleRef> {
    resolve_article(base_url, &format!("{}{}", prefix, title))
}
