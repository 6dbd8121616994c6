//! Configuration module for Philo-Walk
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file walks English Wikipedia.
//!
//! # Example
//!
//! ```no_run
//! use philo_walk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walk.toml")).unwrap();
//! println!("Trials: {}", config.walker.total_trials);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractionConfig, OutputConfig, SiteConfig, UserAgentConfig, WalkerConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, default_config_with_hash, load_config, load_config_with_hash,
    parse_config,
};
pub use validation::validate;
