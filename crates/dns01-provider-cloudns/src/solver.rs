//! ClouDNS DNS-01 solver
//!
//! `present`: credentials → zone → add TXT record.
//! `clean_up`: credentials → zone → find TXT record → delete it, or succeed
//! without deleting anything when there is no record.
//!
//! Nothing is kept between the two calls; both re-derive zone and record
//! state from ClouDNS, which is what makes them safe to repeat.

use async_trait::async_trait;
use dns01_core::traits::{ChallengeRequest, CredentialProvider, HostConfig, Solver, ZoneFinder};
use dns01_core::{
    EnvCredentialProvider, Error, FixedZoneFinder, Result, SoaZoneFinder, SolverConfig,
};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::client::CloudnsClient;
use crate::{CREDENTIALS_ENV_PREFIX, PROVIDER_NAME};

/// ClouDNS challenge solver
///
/// # Trust Level: Untrusted
///
/// - ✅ One strictly sequential chain of at most three API calls per invocation
/// - ✅ Credentials resolved fresh on every invocation
/// - ❌ NO retry logic (owned by the certificate controller)
/// - ❌ NO caching of zones or records
#[derive(Clone)]
pub struct CloudnsSolver {
    client: CloudnsClient,
    credentials: Arc<dyn CredentialProvider>,
    ttl: u32,
}

impl std::fmt::Debug for CloudnsSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudnsSolver")
            .field("client", &self.client)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CloudnsSolver {
    /// Create a solver from its parts
    ///
    /// # Parameters
    ///
    /// - `client`: ClouDNS API client
    /// - `credentials`: Resolved on every `present`/`clean_up`
    /// - `ttl`: Desired TXT TTL in seconds (rounded up by the client)
    pub fn new(client: CloudnsClient, credentials: Arc<dyn CredentialProvider>, ttl: u32) -> Self {
        Self {
            client,
            credentials,
            ttl,
        }
    }

    /// Create a solver from the solver configuration
    ///
    /// Uses `CLOUDNS_AUTH_*` environment credentials, and a fixed zone list
    /// when `config.zones` is non-empty, SOA discovery otherwise.
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        config.validate()?;

        let zone_finder: Arc<dyn ZoneFinder> = if config.zones.is_empty() {
            Arc::new(SoaZoneFinder::from_system_conf()?)
        } else {
            tracing::info!("Using configured zones: {}", config.zones.join(", "));
            Arc::new(FixedZoneFinder::new(&config.zones))
        };

        let client = CloudnsClient::from_config(config, zone_finder)?;
        let credentials = Arc::new(EnvCredentialProvider::new(CREDENTIALS_ENV_PREFIX));

        Ok(Self::new(client, credentials, config.ttl))
    }

    /// The TTL requested for challenge records
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    async fn do_present(&self, request: &ChallengeRequest) -> Result<()> {
        let credentials = self.credentials.resolve().await?;

        let zone = self
            .client
            .get_zone(&credentials, &request.resolved_fqdn)
            .await?;

        self.client
            .add_txt_record(
                &credentials,
                &zone.name,
                &request.resolved_fqdn,
                &request.key,
                self.ttl,
            )
            .await?;

        tracing::info!(
            "Presented TXT record: {} (zone: {})",
            request.resolved_fqdn,
            zone.name
        );
        Ok(())
    }

    async fn do_clean_up(&self, request: &ChallengeRequest) -> Result<()> {
        let credentials = self.credentials.resolve().await?;

        let zone = self
            .client
            .get_zone(&credentials, &request.resolved_fqdn)
            .await?;

        let Some(record) = self
            .client
            .find_txt_record(&credentials, &zone.name, &request.resolved_fqdn)
            .await?
        else {
            tracing::info!(
                "No TXT record to clean up: {} (zone: {})",
                request.resolved_fqdn,
                zone.name
            );
            return Ok(());
        };

        self.client
            .remove_txt_record(&credentials, record.id, &zone.name)
            .await?;

        tracing::info!(
            "Cleaned up TXT record {}: {} (zone: {})",
            record.id,
            request.resolved_fqdn,
            zone.name
        );
        Ok(())
    }
}

#[async_trait]
impl Solver for CloudnsSolver {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        self.do_present(request)
            .await
            .map_err(|e| Error::solver(PROVIDER_NAME, e))
    }

    async fn clean_up(&self, request: &ChallengeRequest) -> Result<()> {
        self.do_clean_up(request)
            .await
            .map_err(|e| Error::solver(PROVIDER_NAME, e))
    }

    async fn initialize(&self, host: &HostConfig, _stop: oneshot::Receiver<()>) -> Result<()> {
        // Stateless per call: no connections to open, no caches to warm
        tracing::debug!("ClouDNS solver initialized (group: {})", host.group_name);
        Ok(())
    }
}
