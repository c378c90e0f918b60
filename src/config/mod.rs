//! Configuration module for Hece
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use hece::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hece.toml")).unwrap();
//! println!("Crawler will run {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ScopeConfig, TextConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{hash_config, load_config, load_config_with_hash, parse_config};
