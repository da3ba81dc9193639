//! ClouDNS HTTP API client
//!
//! Every call is a single request against `base_url + endpoint` with all
//! parameters in the query string, including the two authentication
//! parameters. No request carries a body.
//!
//! ## API Reference
//!
//! | Endpoint | Method | Parameters |
//! |---|---|---|
//! | `get-zone-info.json` | GET | `domain-name` |
//! | `records.json` | GET | `domain-name`, `host`, `type` |
//! | `add-record.json` | POST | `domain-name`, `host`, `record`, `ttl`, `record-type` |
//! | `delete-record.json` | POST | `domain-name`, `record-Id` |
//!
//! Authentication: `auth-id` or `sub-auth-id`, plus `auth-password`.

use dns01_core::traits::{Credentials, ZoneFinder};
use dns01_core::zone::un_fqdn;
use dns01_core::{Error, Result, SolverConfig};
use reqwest::{Method, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

use crate::PROVIDER_NAME;
use crate::ttl::normalize_ttl;
use crate::types::{ApiResponse, STATUS_FAILED, TXT, TxtRecord, TxtRecords, Zone};

const GET_ZONE_INFO: &str = "get-zone-info.json";
const LIST_RECORDS: &str = "records.json";
const ADD_RECORD: &str = "add-record.json";
const DELETE_RECORD: &str = "delete-record.json";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// ClouDNS API client
///
/// Holds no per-call state: credentials are passed into every operation,
/// so one client can serve concurrent invocations without locking. The
/// underlying `reqwest::Client` pools connections and is safe to share.
#[derive(Clone)]
pub struct CloudnsClient {
    /// Base URL, always ending in `/`
    base_url: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Discovers the zone owning an FQDN
    zone_finder: Arc<dyn ZoneFinder>,
}

impl std::fmt::Debug for CloudnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudnsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CloudnsClient {
    /// Create a new client
    ///
    /// # Parameters
    ///
    /// - `base_url`: API base, e.g. `https://api.cloudns.net/dns/` (a missing
    ///   trailing `/` is added)
    /// - `timeout`: Per-request timeout
    /// - `zone_finder`: Used by [`CloudnsClient::get_zone`] to pick the candidate zone
    pub fn new(
        base_url: &str,
        timeout: Duration,
        zone_finder: Arc<dyn ZoneFinder>,
    ) -> Result<Self> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::config(format!("invalid base URL {}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client,
            zone_finder,
        })
    }

    /// Create a client from the solver configuration
    pub fn from_config(config: &SolverConfig, zone_finder: Arc<dyn ZoneFinder>) -> Result<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            zone_finder,
        )
    }

    /// The API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the zone owning `fqdn`
    ///
    /// The candidate zone comes from the zone finder; ClouDNS is then asked
    /// about that exact name. A `Failed` status, or a zone whose name differs
    /// from the candidate, is reported as `Error::ZoneNotFound`.
    pub async fn get_zone(&self, credentials: &Credentials, fqdn: &str) -> Result<Zone> {
        let zone_name = self.zone_finder.find_zone(fqdn).await?;
        tracing::debug!("Looking up ClouDNS zone {} for {}", zone_name, fqdn);

        let body = self
            .do_request(
                credentials,
                Method::GET,
                GET_ZONE_INFO,
                &[("domain-name", zone_name.clone())],
            )
            .await?;

        let zone: Zone = if body.trim().is_empty() {
            Zone::default()
        } else {
            serde_json::from_str(&body)
                .map_err(|e| Error::invalid_body(GET_ZONE_INFO, e, body.as_str()))?
        };

        if zone.status == STATUS_FAILED {
            return Err(Error::zone_not_found(format!(
                "could not get zone info: {}",
                zone.status_description
            )));
        }

        if zone.name != zone_name {
            return Err(Error::zone_not_found(format!(
                "zone {} not found for authFQDN {}",
                zone_name, fqdn
            )));
        }

        Ok(zone)
    }

    /// Find the TXT record for `fqdn` in `zone_name`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: The first record whose host and type match exactly
    /// - `Ok(None)`: No such record (an empty result is not an error)
    /// - `Err(Error)`: Transport, status or decoding failure
    pub async fn find_txt_record(
        &self,
        credentials: &Credentials,
        zone_name: &str,
        fqdn: &str,
    ) -> Result<Option<TxtRecord>> {
        let host = relative_host(fqdn, zone_name)?;
        tracing::debug!("Looking up TXT record: {} (zone: {})", host, zone_name);

        let body = self
            .do_request(
                credentials,
                Method::GET,
                LIST_RECORDS,
                &[
                    ("domain-name", zone_name.to_string()),
                    ("host", host.clone()),
                    ("type", TXT.to_string()),
                ],
            )
            .await?;

        // The API returns [] when there are no records
        if body.trim() == "[]" {
            return Ok(None);
        }

        let records: TxtRecords = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_body(LIST_RECORDS, e, body.as_str()))?;

        // The host filter is loose, so re-check every entry
        Ok(records
            .into_values()
            .find(|record| record.host.eq_ignore_ascii_case(&host) && record.record_type == TXT))
    }

    /// Add a TXT record for `fqdn` in `zone_name`
    ///
    /// `ttl` is rounded up to the nearest TTL ClouDNS accepts.
    pub async fn add_txt_record(
        &self,
        credentials: &Credentials,
        zone_name: &str,
        fqdn: &str,
        value: &str,
        ttl: u32,
    ) -> Result<()> {
        let host = relative_host(fqdn, zone_name)?;
        let ttl = normalize_ttl(ttl);
        tracing::debug!("Adding TXT record: {} (zone: {}, ttl: {})", host, zone_name, ttl);

        let body = self
            .do_request(
                credentials,
                Method::POST,
                ADD_RECORD,
                &[
                    ("domain-name", zone_name.to_string()),
                    ("host", host),
                    ("record", value.to_string()),
                    ("ttl", ttl.to_string()),
                    ("record-type", TXT.to_string()),
                ],
            )
            .await?;

        let response = decode_api_response(ADD_RECORD, &body)?;
        if !response.is_success() {
            return Err(Error::provider(
                PROVIDER_NAME,
                format!(
                    "fail to add TXT record: {} {}",
                    response.status, response.status_description
                ),
            ));
        }

        Ok(())
    }

    /// Remove the record with `record_id` from `zone_name`
    pub async fn remove_txt_record(
        &self,
        credentials: &Credentials,
        record_id: u64,
        zone_name: &str,
    ) -> Result<()> {
        tracing::debug!("Removing TXT record {} (zone: {})", record_id, zone_name);

        let body = self
            .do_request(
                credentials,
                Method::POST,
                DELETE_RECORD,
                &[
                    ("domain-name", zone_name.to_string()),
                    ("record-Id", record_id.to_string()),
                ],
            )
            .await?;

        let response = decode_api_response(DELETE_RECORD, &body)?;
        if !response.is_success() {
            return Err(Error::provider(
                PROVIDER_NAME,
                format!(
                    "fail to remove TXT record: {} {}",
                    response.status, response.status_description
                ),
            ));
        }

        Ok(())
    }

    /// Send one authenticated request and return the raw body of a 200 response
    ///
    /// ⚠️ The request URL carries the password: it must never reach logs or
    /// error messages. Errors name the endpoint only.
    async fn do_request(
        &self,
        credentials: &Credentials,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| Error::http(format!("invalid request URL for {}: {}", endpoint, e)))?;

        tracing::debug!("{} {}", method, endpoint);

        let response = self
            .client
            .request(method, url)
            .query(params)
            .query(&[
                (credentials.id_type.as_param(), credentials.id.as_str()),
                ("auth-password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::http(format!("{} request failed: {}", endpoint, e.without_url())))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::http(format!(
                "failed to read {} response body: {}",
                endpoint,
                e.without_url()
            ))
        })?;

        if status != StatusCode::OK {
            return Err(Error::unexpected_status(status.as_u16(), body));
        }

        Ok(body)
    }
}

fn decode_api_response(endpoint: &str, body: &str) -> Result<ApiResponse> {
    serde_json::from_str(body).map_err(|e| Error::invalid_body(endpoint, e, body))
}

/// The record label for `fqdn` relative to `zone_name`
///
/// `_acme-challenge.example.com.` in `example.com` is `_acme-challenge`;
/// the zone apex is the empty label. Trailing dots and letter case on
/// either side are ignored and the label comes back lowercase. A name
/// outside the zone is an error.
pub fn relative_host(fqdn: &str, zone_name: &str) -> Result<String> {
    let name = un_fqdn(fqdn).to_ascii_lowercase();
    let zone = un_fqdn(zone_name).to_ascii_lowercase();

    if name == zone {
        return Ok(String::new());
    }

    name.strip_suffix(zone.as_str())
        .and_then(|head| head.strip_suffix('.'))
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::zone_not_found(format!("{} is not inside zone {}", fqdn, zone_name)))
}
