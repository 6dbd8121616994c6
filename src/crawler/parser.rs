//! First-link extraction from article pages
//!
//! This module finds the single "next link" of an article:
//! - Paragraph blocks of the primary content region are serialized to markup
//! - Parenthesized prose is stripped from that markup
//! - The first anchor whose href is an internal article link wins
//! - List items are searched only when paragraphs yield nothing

use crate::config::ExtractionConfig;
use crate::crawler::filter::strip_parentheses;
use crate::url::{resolve_article, ArticleRef};
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Extracts the next article link from fetched page markup
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    base_url: Url,
    prefix_len: usize,
    paragraphs: Selector,
    list_items: Selector,
    anchors: Selector,
    article_link: Regex,
}

impl LinkExtractor {
    /// Creates an extractor for one site
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base address matched links are resolved against
    /// * `prefix` - Internal article path prefix (e.g. `/wiki/`)
    /// * `config` - Selectors for the paragraph and list-item blocks
    ///
    /// # Returns
    ///
    /// * `Ok(LinkExtractor)` - Selectors and link pattern compiled
    /// * `Err(ConfigError)` - A selector or the prefix pattern is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use philo_walk::config::ExtractionConfig;
    /// use philo_walk::crawler::LinkExtractor;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://en.wikipedia.org").unwrap();
    /// let extractor = LinkExtractor::new(base, "/wiki/", &ExtractionConfig::default()).unwrap();
    ///
    /// let html = r#"<div id="mw-content-text"><p>Logic (<a href="/wiki/Greek_language">Greek</a>)
    ///     is the study of <a href="/wiki/Reason">reasoning</a>.</p></div>"#;
    /// let next = extractor.next_link(html).unwrap();
    /// assert_eq!(next.as_str(), "https://en.wikipedia.org/wiki/Reason");
    /// ```
    pub fn new(base_url: Url, prefix: &str, config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let paragraphs = parse_selector(&config.paragraph_selector)?;
        let list_items = parse_selector(&config.list_item_selector)?;
        let anchors = parse_selector("a[href]")?;

        let pattern = format!(r"^{}[A-Za-z()\-,_#]*$", regex::escape(prefix));
        let article_link = Regex::new(&pattern)
            .map_err(|e| ConfigError::Validation(format!("Invalid link pattern: {}", e)))?;

        Ok(Self {
            base_url,
            prefix_len: prefix.len(),
            paragraphs,
            list_items,
            anchors,
            article_link,
        })
    }

    /// Returns the first qualifying internal link of a page, or `None`
    ///
    /// Paragraph blocks take precedence; list items are consulted only when
    /// the paragraphs contain no qualifying link at all.
    pub fn next_link(&self, html: &str) -> Option<ArticleRef> {
        let document = Html::parse_document(html);

        self.first_link_in(&document, &self.paragraphs).or_else(|| {
            tracing::trace!("No paragraph link found, falling back to list items");
            self.first_link_in(&document, &self.list_items)
        })
    }

    /// Serializes the blocks matched by `selector`, filters them, and searches for a link
    fn first_link_in(&self, document: &Html, selector: &Selector) -> Option<ArticleRef> {
        let serialized: String = document.select(selector).map(|block| block.html()).collect();
        if serialized.is_empty() {
            return None;
        }

        let cleaned = strip_parentheses(&serialized);
        self.first_article_href(&cleaned)
    }

    /// Finds the first anchor in cleaned markup whose href is an article link
    fn first_article_href(&self, cleaned: &str) -> Option<ArticleRef> {
        let fragment = Html::parse_fragment(cleaned);

        let href = fragment
            .select(&self.anchors)
            .filter_map(|anchor| anchor.value().attr("href"))
            .find(|href| self.article_link.is_match(href))?;

        // Drop the fragment; a bare prefix is not an article
        let path = href.split('#').next().unwrap_or_default();
        if path.len() <= self.prefix_len {
            return None;
        }

        match resolve_article(&self.base_url, path) {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::debug!("Failed to resolve link {}: {}", path, e);
                None
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}
