//! Zone discovery trait
//!
//! Given `_acme-challenge.www.example.com.`, a zone finder answers
//! `example.com`: the DNS zone that owns the name. Ownership is decided by
//! DNS delegation, not by a single lookup at the provider.

use async_trait::async_trait;

/// Trait for mapping an FQDN to the zone that owns it
#[async_trait]
pub trait ZoneFinder: Send + Sync {
    /// Find the zone owning `fqdn`
    ///
    /// `fqdn` may or may not carry a trailing dot. The returned zone name
    /// never does.
    ///
    /// Returns `Error::ZoneNotFound` when no owning zone exists.
    async fn find_zone(&self, fqdn: &str) -> crate::Result<String>;
}

/// Strip a single trailing dot, if present
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Candidate zone names for an FQDN, longest first
///
/// `_acme-challenge.example.com.` yields `_acme-challenge.example.com`,
/// `example.com`, `com`.
pub fn candidate_zones(fqdn: &str) -> Vec<&str> {
    let name = un_fqdn(fqdn);
    if name.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![name];
    let mut rest = name;
    while let Some((_, parent)) = rest.split_once('.') {
        if parent.is_empty() {
            break;
        }
        candidates.push(parent);
        rest = parent;
    }
    candidates
}
