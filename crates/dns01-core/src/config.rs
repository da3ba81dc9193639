//! Configuration types for DNS-01 solvers
//!
//! `SolverConfig` is built once at startup and injected into solvers, so
//! nothing below reads process-wide settings ad hoc.

use serde::{Deserialize, Serialize};

/// Default ClouDNS API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudns.net/dns/";

/// Process-wide solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Operator group identifier the webhook is served under
    pub group_name: String,

    /// Desired TXT record TTL in seconds (rounded up to a provider-allowed value)
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Provider API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Zones to match FQDNs against instead of discovering them via DNS
    ///
    /// Empty means auto-discovery (SOA walk).
    #[serde(default)]
    pub zones: Vec<String>,
}

impl SolverConfig {
    /// Create a new configuration with defaults
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            ttl: default_ttl(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            zones: Vec::new(),
        }
    }

    /// Set the TXT record TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the provider API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Pin zone discovery to a fixed list of zones
    pub fn with_zones(mut self, zones: Vec<String>) -> Self {
        self.zones = zones;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.group_name.trim().is_empty() {
            return Err(crate::Error::config("group name is required"));
        }

        if self.ttl == 0 {
            return Err(crate::Error::config("TTL must be > 0"));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "base URL must use HTTP or HTTPS scheme. Got: {}",
                self.base_url
            )));
        }

        if !(1..=300).contains(&self.timeout_secs) {
            return Err(crate::Error::config(format!(
                "timeout must be between 1 and 300 seconds. Got: {}",
                self.timeout_secs
            )));
        }

        if let Some(zone) = self.zones.iter().find(|z| crate::zone::un_fqdn(z).is_empty()) {
            return Err(crate::Error::config(format!("invalid zone name: '{}'", zone)));
        }

        Ok(())
    }
}

fn default_ttl() -> u32 {
    60
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SolverConfig::new("acme.example.com");
        assert_eq!(config.ttl, 60);
        assert_eq!(config.base_url, "https://api.cloudns.net/dns/");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.zones.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"group_name": "acme.example.com", "ttl": 300}"#).unwrap();
        assert_eq!(config.ttl, 300);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn group_name_is_required() {
        let err = SolverConfig::new("  ").validate().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn rejects_zero_ttl_and_bad_scheme() {
        assert!(SolverConfig::new("g").with_ttl(0).validate().is_err());
        assert!(
            SolverConfig::new("g")
                .with_base_url("ftp://api.cloudns.net/dns/")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_out_of_range_timeout() {
        assert!(SolverConfig::new("g").with_timeout_secs(0).validate().is_err());
        assert!(SolverConfig::new("g").with_timeout_secs(301).validate().is_err());
    }

    #[test]
    fn rejects_empty_zone() {
        let config = SolverConfig::new("g").with_zones(vec!["example.com".into(), ".".into()]);
        assert!(config.validate().is_err());
    }
}
