//! Resolver settings: defaults, optional JSON file, then CLI flags

use anyhow::{Context, Result};
use modget_types::ResolverConfig;
use std::path::Path;

/// Values given on the command line or through the environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub lookup_url: Option<String>,
    pub cdn_url: Option<String>,
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut ResolverConfig) {
        if let Some(url) = self.lookup_url {
            config.lookup_url = url;
        }
        if let Some(url) = self.cdn_url {
            config.cdn_url = url;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        if self.connect_timeout_secs.is_some() {
            config.connect_timeout_secs = self.connect_timeout_secs;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
    }
}

/// Build the effective settings
pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    overrides.apply(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modget_types::{DEFAULT_CDN_URL, DEFAULT_LOOKUP_URL};

    #[test]
    fn test_defaults_without_file() {
        let config = load(None, Overrides::default()).unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.lookup_url, DEFAULT_LOOKUP_URL);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modget.json");
        std::fs::write(
            &path,
            r#"{"lookup_url": "http://mirror.local", "timeout_secs": 30}"#,
        )
        .unwrap();

        let overrides = Overrides {
            timeout_secs: Some(5),
            ..Default::default()
        };
        let config = load(Some(&path), overrides).unwrap();

        assert_eq!(config.lookup_url, "http://mirror.local");
        assert_eq!(config.cdn_url, DEFAULT_CDN_URL);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/modget.json")), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
