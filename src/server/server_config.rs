use std::{fs, net::SocketAddr, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

use scheduler::FailurePolicy;

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub store: PathBuf,
    #[serde(default)]
    pub failure_policy: FailurePolicy
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        return AppConfig::parse(&file_content);
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}


#[cfg(test)]
mod tests {
    use super::AppConfig;
    use scheduler::FailurePolicy;

    #[test]
    fn policy_defaults_to_permissive() {
        let config = AppConfig::parse(r#"
            bind = "127.0.0.1:8080"
            store = "ledger.json"
        "#).unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.store.to_str(), Some("ledger.json"));
        assert_eq!(config.failure_policy, FailurePolicy::Permissive);
    }

    #[test]
    fn strict_policy() {
        let config = AppConfig::parse(r#"
            bind = "0.0.0.0:9000"
            store = "ledger.json"
            failure_policy = "strict"
        "#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
    }

    #[test]
    fn missing_store_is_rejected() {
        assert!(AppConfig::parse(r#"bind = "127.0.0.1:8080""#).is_err());
    }
}
