// # ClouDNS DNS-01 Solver
//
// This crate satisfies ACME DNS-01 challenges by publishing and removing
// `_acme-challenge` TXT records through the ClouDNS HTTP API.
//
// ## Behaviour
//
// - ✅ Zone discovery via SOA walk (or a configured zone list), confirmed
//   against ClouDNS by exact name
// - ✅ TTLs rounded up to the values ClouDNS accepts
// - ✅ Idempotent clean-up: a missing record is success, not an error
// - ✅ Every surfaced error is prefixed with `cloudns`
// - ✅ Credentials never appear in logs, `Debug` output or error messages
// - ❌ NO retry logic (owned by the certificate controller)
// - ❌ NO management of records other than the challenge TXT record
// - ❌ NO propagation checks (owned by the certificate controller)
//
// ## API Reference
//
// - ClouDNS API: https://www.cloudns.net/wiki/article/41/
// - Zone info: GET `get-zone-info.json?domain-name=...`
// - List records: GET `records.json?domain-name=...&host=...&type=TXT`
// - Add record: POST `add-record.json?domain-name=...&host=...&record=...&ttl=...&record-type=TXT`
// - Delete record: POST `delete-record.json?domain-name=...&record-Id=...`

pub mod client;
pub mod solver;
pub mod ttl;
pub mod types;

pub use client::{CloudnsClient, relative_host};
pub use solver::CloudnsSolver;
pub use ttl::normalize_ttl;
pub use types::{TxtRecord, Zone};

use dns01_core::{Result, SolverConfig, SolverRegistry};
use std::sync::Arc;

/// Name the controller routes challenges to this solver by
pub const PROVIDER_NAME: &str = "cloudns";

/// Prefix of the credential environment variables (`CLOUDNS_AUTH_ID`, ...)
pub const CREDENTIALS_ENV_PREFIX: &str = "CLOUDNS";

/// Register the ClouDNS solver with a registry
///
/// This function should be called during initialization to make the
/// ClouDNS solver available.
///
/// # Example
///
/// ```rust,no_run
/// use dns01_core::{SolverConfig, SolverRegistry};
///
/// # fn main() -> dns01_core::Result<()> {
/// let registry = SolverRegistry::new();
/// let config = SolverConfig::new("acme.example.com");
/// dns01_provider_cloudns::register(&registry, &config)?;
/// # Ok(())
/// # }
/// ```
pub fn register(registry: &SolverRegistry, config: &SolverConfig) -> Result<()> {
    let solver = CloudnsSolver::from_config(config)?;
    registry.register(Arc::new(solver));
    Ok(())
}
