//! Zone finder over a fixed list of zones
//!
//! Lets operators pin zone discovery when the resolver visible to the
//! process does not see the provider's delegation (split-horizon DNS,
//! zones not yet delegated).

use async_trait::async_trait;

use crate::traits::zone_finder::{ZoneFinder, un_fqdn};
use crate::{Error, Result};

/// Resolves FQDNs against a configured set of zones
#[derive(Debug, Clone, Default)]
pub struct FixedZoneFinder {
    zones: Vec<String>,
}

impl FixedZoneFinder {
    /// Create a finder over `zones` (trailing dots are ignored)
    pub fn new<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            zones: zones
                .into_iter()
                .map(|z| un_fqdn(z.as_ref().trim()).to_ascii_lowercase())
                .filter(|z| !z.is_empty())
                .collect(),
        }
    }

    /// The configured zones
    pub fn zones(&self) -> &[String] {
        &self.zones
    }
}

#[async_trait]
impl ZoneFinder for FixedZoneFinder {
    async fn find_zone(&self, fqdn: &str) -> Result<String> {
        let name = un_fqdn(fqdn).to_ascii_lowercase();

        // Longest label-aligned suffix wins, so delegated subzones beat parents
        self.zones
            .iter()
            .filter(|zone| {
                name == **zone
                    || name
                        .strip_suffix(zone.as_str())
                        .is_some_and(|head| head.ends_with('.'))
            })
            .max_by_key(|zone| zone.len())
            .cloned()
            .ok_or_else(|| Error::zone_not_found(format!("no configured zone owns {}", fqdn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matches_label_aligned_suffix() {
        let finder = FixedZoneFinder::new(["example.com."]);
        assert_eq!(
            finder.find_zone("_acme-challenge.example.com.").await.unwrap(),
            "example.com"
        );
        assert_eq!(finder.find_zone("example.com").await.unwrap(), "example.com");
    }

    #[tokio::test]
    async fn does_not_match_partial_label() {
        let finder = FixedZoneFinder::new(["example.com"]);
        let err = finder.find_zone("_acme-challenge.badexample.com.").await.unwrap_err();
        assert!(matches!(err, Error::ZoneNotFound(_)));
    }

    #[tokio::test]
    async fn longest_zone_wins() {
        let finder = FixedZoneFinder::new(["example.com", "dev.example.com"]);
        assert_eq!(
            finder.find_zone("_acme-challenge.api.dev.example.com.").await.unwrap(),
            "dev.example.com"
        );
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let finder = FixedZoneFinder::new(["Example.COM"]);
        assert_eq!(
            finder.find_zone("_ACME-challenge.example.com.").await.unwrap(),
            "example.com"
        );
    }

    #[test]
    fn empty_entries_are_dropped() {
        let finder = FixedZoneFinder::new(["", " . ", "example.org"]);
        assert_eq!(finder.zones(), &["example.org".to_string()]);
    }
}
