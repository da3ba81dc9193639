// # Solver Trait
//
// Defines the plugin interface a certificate-issuance controller uses to
// satisfy ACME DNS-01 challenges.
//
// ## Implementations
//
// - ClouDNS: `dns01-provider-cloudns` crate
//
// ## Usage
//
// ```rust,ignore
// use dns01_core::{ChallengeRequest, Solver};
//
// let request = ChallengeRequest::new("_acme-challenge.example.com.", "token");
// solver.present(&request).await?;
// // ... the controller waits for validation ...
// solver.clean_up(&request).await?;
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// A DNS-01 challenge as handed over by the controller
///
/// Only the two fields a solver needs are modelled; any other fields in the
/// controller's payload are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// Fully-qualified, trailing-dot-terminated record name
    /// (e.g. `_acme-challenge.example.com.`)
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,

    /// The expected TXT record value
    pub key: String,
}

impl ChallengeRequest {
    /// Create a new challenge request
    pub fn new(resolved_fqdn: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            resolved_fqdn: resolved_fqdn.into(),
            key: key.into(),
        }
    }
}

/// Host-framework configuration passed to [`Solver::initialize`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Operator group identifier the host serves solvers under
    pub group_name: String,
}

/// Trait for DNS-01 challenge solvers
///
/// # Thread Safety
///
/// The controller may call `present` and `clean_up` concurrently for
/// different challenges. Implementations must be `Send + Sync` and must not
/// hold mutable state shared across calls.
///
/// # Failure Semantics
///
/// - Every failure is returned to the caller, prefixed with [`Solver::name`]
/// - Nothing is retried internally; the controller owns retry and backoff
/// - No failure is fatal to the process
#[async_trait]
pub trait Solver: Send + Sync {
    /// The fixed identifier the controller routes challenges by
    fn name(&self) -> &'static str;

    /// Publish the TXT record for the challenge
    ///
    /// Calling this twice for the same FQDN may leave two records at the
    /// provider; deduplication is not the solver's job.
    async fn present(&self, request: &ChallengeRequest) -> crate::Result<()>;

    /// Remove the TXT record for the challenge
    ///
    /// # Idempotency
    ///
    /// Succeeds without touching the provider's records when no matching
    /// record exists, so repeated calls are safe.
    async fn clean_up(&self, request: &ChallengeRequest) -> crate::Result<()>;

    /// Lifecycle hook called once before any challenge is served
    ///
    /// `stop` resolves (or is dropped) when the host shuts down.
    async fn initialize(&self, host: &HostConfig, stop: oneshot::Receiver<()>) -> crate::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_request_from_controller_payload() {
        let payload = serde_json::json!({
            "uid": "1234",
            "action": "Present",
            "type": "dns-01",
            "dnsName": "example.com",
            "key": "abc123",
            "resolvedFQDN": "_acme-challenge.example.com.",
            "resolvedZone": "example.com.",
            "allowAmbientCredentials": false
        });

        let request: ChallengeRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(
            request,
            ChallengeRequest::new("_acme-challenge.example.com.", "abc123")
        );
    }
}
