//! TOML loading and hashing
//!
//! The hash is taken over the exact bytes that were parsed, so the value
//! stored on a session row always matches the configuration it ran with.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates configuration text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads and validates a configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hece::config::load_config;
///
/// let config = load_config(Path::new("hece.toml")).unwrap();
/// println!("Seeds: {:?}", config.scope.seeds);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hex-encoded SHA-256 of configuration text
pub fn hash_config(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads a configuration file once and returns it with the hash of its content
///
/// # Returns
///
/// * `Ok((Config, String))` - The validated configuration and its hash
/// * `Err(ConfigError)` - The file could not be read, parsed or validated
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_config(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawler]
workers = 4
request-timeout-secs = 10
host-delay-ms = 1000

[user-agent]
crawler-name = "HeceBot"
crawler-version = "0.1"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[output]
database-path = "./hece.db"
export-path = "./hece.json"

[scope]
seeds = ["https://tr.wikipedia.org/wiki/T%C3%BCrkiye"]
blocked-domains = ["*.facebook.com"]
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.workers, 4);
        assert_eq!(config.crawler.host_delay_ms, 1000);
        assert_eq!(config.user_agent.crawler_name, "HeceBot");
        assert_eq!(config.scope.seeds.len(), 1);
        assert_eq!(config.scope.blocked_domains, vec!["*.facebook.com"]);
    }

    #[test]
    fn test_defaults_applied() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.idle_wait_ms, 500);
        assert_eq!(config.crawler.max_links_per_page, 50);
        assert_eq!(config.crawler.max_pages, 0);
        assert!(!config.crawler.stop_when_drained);
        assert_eq!(config.output.export_top, 20);
        assert_eq!(config.output.export_sample_words, 50);
        assert_eq!(config.text.min_word_length, 2);
        assert!(config.text.skip_capitalized);
        assert!(config.text.dedupe_per_page);
        assert!(config.scope.follow_turkish_hints);
        assert!(config.scope.allowed_domains.is_empty());
    }

    #[test]
    fn test_user_agent_header() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.user_agent.header_value(),
            "HeceBot/0.1 (+https://example.com/about; admin@example.com)"
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = parse_config("this is not valid TOML {{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_workers_is_validation_error() {
        let content = VALID_CONFIG.replace("workers = 4", "workers = 0");
        assert!(matches!(
            parse_config(&content),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_config_with_hash() {
        let file = create_temp_config(VALID_CONFIG);
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.crawler.workers, 4);
        assert_eq!(hash, hash_config(VALID_CONFIG));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_hash_follows_content() {
        assert_eq!(hash_config("a = 1"), hash_config("a = 1"));
        assert_ne!(hash_config("a = 1"), hash_config("a = 2"));
        assert_eq!(
            hash_config(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
