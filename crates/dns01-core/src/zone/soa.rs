//! SOA-walk zone discovery
//!
//! Queries SOA for each candidate suffix of the FQDN, longest first. The
//! first candidate answered with an SOA record owned by that exact name is
//! the zone. A CNAME answer or "no records" moves on to the parent.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::{Record, RecordType};
use std::future::Future;

use crate::traits::zone_finder::{ZoneFinder, candidate_zones, un_fqdn};
use crate::{Error, Result};

/// Zone finder backed by a DNS resolver
#[derive(Clone)]
pub struct SoaZoneFinder {
    resolver: TokioAsyncResolver,
}

impl std::fmt::Debug for SoaZoneFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoaZoneFinder").finish_non_exhaustive()
    }
}

impl SoaZoneFinder {
    /// Create a finder using an existing resolver
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }

    /// Create a finder from the system resolver configuration (`/etc/resolv.conf`)
    pub fn from_system_conf() -> Result<Self> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| Error::dns(format!("failed to create dns resolver: {}", e)))?;
        Ok(Self::new(resolver))
    }
}

#[async_trait]
impl ZoneFinder for SoaZoneFinder {
    async fn find_zone(&self, fqdn: &str) -> Result<String> {
        walk_soa(fqdn, |candidate| async move {
            match self.resolver.soa_lookup(format!("{}.", candidate)).await {
                Ok(lookup) => Ok(Some(lookup.as_lookup().records().to_vec())),
                Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => Ok(None),
                Err(e) => Err(Error::dns(format!("SOA lookup for {} failed: {}", candidate, e))),
            }
        })
        .await
    }
}

/// True when `records` hold an SOA owned by `candidate` itself
pub fn soa_owned_by(records: &[Record], candidate: &str) -> bool {
    records.iter().any(|record| {
        record.record_type() == RecordType::SOA
            && un_fqdn(&record.name().to_utf8()).eq_ignore_ascii_case(candidate)
    })
}

/// Walk the candidates of `fqdn` through `lookup`, returning the lowercase zone
///
/// `lookup` answers `Ok(None)` for "no records", `Ok(Some(records))` for an
/// answer section, and `Err` for anything that should stop the walk.
async fn walk_soa<'a, F, Fut>(fqdn: &'a str, mut lookup: F) -> Result<String>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<Option<Vec<Record>>>>,
{
    for candidate in candidate_zones(fqdn) {
        tracing::debug!("Querying SOA for candidate zone: {}", candidate);

        let Some(records) = lookup(candidate).await? else {
            continue;
        };

        if soa_owned_by(&records, candidate) {
            tracing::debug!("Found zone {} for {}", candidate, fqdn);
            return Ok(candidate.to_ascii_lowercase());
        }
    }

    Err(Error::zone_not_found(format!(
        "could not find the start of authority for {}",
        fqdn
    )))
}
