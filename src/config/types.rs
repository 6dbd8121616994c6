use serde::Deserialize;

/// Main configuration structure for Philo-Walk
///
/// Every section is optional; a missing section or key takes the built-in
/// default, which walks English Wikipedia toward the Philosophy article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walker: WalkerConfig,
    pub site: SiteConfig,
    pub extraction: ExtractionConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Trial and resolution behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Maximum number of hops before a trial fails
    #[serde(rename = "step-budget")]
    pub step_budget: u32,

    /// Number of trials to record
    #[serde(rename = "total-trials")]
    pub total_trials: u32,

    /// Maximum number of trials in flight at once
    pub concurrency: u32,

    /// Extra attempts for transient fetch failures (5xx, timeouts)
    #[serde(rename = "fetch-retries")]
    pub fetch_retries: u32,

    /// Delay between fetch attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Maximum number of trials started, counting redraws
    ///
    /// Defaults to four times `total-trials`.
    #[serde(rename = "max-attempts")]
    pub max_attempts: Option<u32>,
}

impl WalkerConfig {
    /// Returns the attempt limit, applying the default when unset
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts
            .unwrap_or_else(|| self.total_trials.saturating_mul(4))
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            step_budget: 45,
            total_trials: 500,
            concurrency: 4,
            fetch_retries: 0,
            retry_delay_ms: 1000,
            max_attempts: None,
        }
    }
}

/// The site being walked and the target article
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base address every article link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix shared by internal article links
    #[serde(rename = "article-path-prefix")]
    pub article_path_prefix: String,

    /// Title of the article every trial tries to reach
    #[serde(rename = "target-article")]
    pub target_article: String,

    /// Path that redirects to a random article
    #[serde(rename = "random-article-path")]
    pub random_article_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            article_path_prefix: "/wiki/".to_string(),
            target_article: "Philosophy".to_string(),
            random_article_path: "/wiki/Special:Random".to_string(),
        }
    }
}

/// Where in a page the next link is searched for
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// CSS selector for paragraph blocks of the primary content region
    #[serde(rename = "paragraph-selector")]
    pub paragraph_selector: String,

    /// CSS selector for list items, used when paragraphs have no link
    #[serde(rename = "list-item-selector")]
    pub list_item_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            paragraph_selector:
                "div#mw-content-text > div.mw-parser-output > p, div#mw-content-text > p"
                    .to_string(),
            list_item_selector:
                "div#mw-content-text > div.mw-parser-output > ul > li, div#mw-content-text > ul > li"
                    .to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "philo-walk".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/philo-walk/philo-walk".to_string(),
            contact_email: "philo-walk@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the `url,clicks` CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the path-length bar chart (SVG)
    #[serde(rename = "chart-path")]
    pub chart_path: String,

    /// Path to the markdown run summary
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "data.csv".to_string(),
            chart_path: "plot.svg".to_string(),
            summary_path: "summary.md".to_string(),
        }
    }
}
