use crate::config::types::{
    Config, ExtractionConfig, OutputConfig, SiteConfig, UserAgentConfig, WalkerConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_walker_config(&config.walker)?;
    validate_site_config(&config.site)?;
    validate_extraction_config(&config.extraction)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates trial and resolution settings
fn validate_walker_config(config: &WalkerConfig) -> Result<(), ConfigError> {
    if config.step_budget < 1 || config.step_budget > 1000 {
        return Err(ConfigError::Validation(format!(
            "step_budget must be between 1 and 1000, got {}",
            config.step_budget
        )));
    }

    if config.total_trials < 1 {
        return Err(ConfigError::Validation(format!(
            "total_trials must be >= 1, got {}",
            config.total_trials
        )));
    }

    if config.concurrency < 1 || config.concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 64, got {}",
            config.concurrency
        )));
    }

    if config.effective_max_attempts() < config.total_trials {
        return Err(ConfigError::Validation(format!(
            "max_attempts ({}) must be >= total_trials ({})",
            config.effective_max_attempts(),
            config.total_trials
        )));
    }

    Ok(())
}

/// Validates the site and target settings
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    let prefix = &config.article_path_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article_path_prefix must start and end with '/', got '{}'",
            prefix
        )));
    }

    if config.target_article.is_empty() || config.target_article.contains('/') {
        return Err(ConfigError::Validation(format!(
            "target_article must be a non-empty title without '/', got '{}'",
            config.target_article
        )));
    }

    if !config.random_article_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "random_article_path must start with '/', got '{}'",
            config.random_article_path
        )));
    }

    Ok(())
}

/// Validates that both selectors parse
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    validate_selector(&config.paragraph_selector)?;
    validate_selector(&config.list_item_selector)?;
    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("csv_path", &config.csv_path),
        ("chart_path", &config.chart_path),
        ("summary_path", &config.summary_path),
    ] {
        if path.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_walker_bounds() {
        let mut walker = WalkerConfig::default();
        walker.step_budget = 0;
        assert!(validate_walker_config(&walker).is_err());

        let mut walker = WalkerConfig::default();
        walker.total_trials = 0;
        assert!(validate_walker_config(&walker).is_err());

        let mut walker = WalkerConfig::default();
        walker.concurrency = 65;
        assert!(validate_walker_config(&walker).is_err());

        let mut walker = WalkerConfig::default();
        walker.max_attempts = Some(10);
        assert!(validate_walker_config(&walker).is_err());
    }

    #[test]
    fn test_validate_site_config() {
        let mut site = SiteConfig::default();
        site.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        let mut site = SiteConfig::default();
        site.article_path_prefix = "wiki".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = SiteConfig::default();
        site.target_article = String::new();
        assert!(validate_site_config(&site).is_err());

        let mut site = SiteConfig::default();
        site.target_article = "Philosophy/Talk".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_selector() {
        assert!(validate_selector("div#mw-content-text > p").is_ok());
        assert!(matches!(
            validate_selector("div >> [["),
            Err(ConfigError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_output_paths() {
        let mut output = OutputConfig::default();
        output.chart_path = String::new();
        assert!(validate_output_config(&output).is_err());
    }
}
