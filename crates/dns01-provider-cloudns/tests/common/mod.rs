//! Test doubles and common utilities for ClouDNS contract tests
//!
//! `wiremock` stands in for the ClouDNS API. `FakeCloudns` keeps records
//! across calls so present/clean-up sequences can be checked end to end.

#![allow(dead_code)]

use dns01_core::traits::{CredentialProvider, Credentials, IdentityType};
use dns01_core::{Error, FixedCredentialProvider, FixedZoneFinder, Result};
use dns01_provider_cloudns::{CloudnsClient, CloudnsSolver, TxtRecord};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const ZONE: &str = "example.com";
pub const FQDN: &str = "_acme-challenge.example.com.";
pub const AUTH_ID: &str = "1234";
pub const PASSWORD: &str = "s3cr3t-password";

/// Endpoint path on the mock server
pub fn endpoint(name: &str) -> String {
    format!("/dns/{}", name)
}

pub fn credentials() -> Credentials {
    Credentials::new(IdentityType::AuthId, AUTH_ID, PASSWORD)
}

pub fn client(server: &MockServer) -> CloudnsClient {
    client_at(&format!("{}/dns/", server.uri()))
}

pub fn client_at(base_url: &str) -> CloudnsClient {
    CloudnsClient::new(
        base_url,
        Duration::from_secs(5),
        Arc::new(FixedZoneFinder::new([ZONE])),
    )
    .expect("client construction succeeds")
}

pub fn solver(server: &MockServer, ttl: u32) -> CloudnsSolver {
    solver_with_credentials(server, ttl, Arc::new(FixedCredentialProvider::new(credentials())))
}

pub fn solver_with_credentials(
    server: &MockServer,
    ttl: u32,
    credentials: Arc<dyn CredentialProvider>,
) -> CloudnsSolver {
    CloudnsSolver::new(client(server), credentials, ttl)
}

/// Zone-info response for `name`
pub fn zone_info(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "type": "master",
        "zone": "domain",
        "status": "1"
    })
}

/// Mount a zone-info mock answering with `body`
pub async fn mount_zone_info(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint("get-zone-info.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// First value of query parameter `key`
pub fn param(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// A credential provider that always fails, counting calls
#[derive(Default)]
pub struct FailingCredentialProvider {
    calls: AtomicUsize,
}

impl FailingCredentialProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CredentialProvider for FailingCredentialProvider {
    async fn resolve(&self) -> Result<Credentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::config("CLOUDNS_AUTH_ID(_FILE) is required"))
    }
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    records: BTreeMap<u64, TxtRecord>,
}

/// Stateful stand-in for the ClouDNS record endpoints of one zone
#[derive(Clone, Default)]
pub struct FakeCloudns {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCloudns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount zone info for `ZONE` plus the list/add/delete endpoints
    pub async fn mount(&self, server: &MockServer) {
        mount_zone_info(server, zone_info(ZONE)).await;

        let fake = self.clone();
        Mock::given(method("GET"))
            .and(path(endpoint("records.json")))
            .respond_with(move |req: &Request| fake.list(req))
            .mount(server)
            .await;

        let fake = self.clone();
        Mock::given(method("POST"))
            .and(path(endpoint("add-record.json")))
            .respond_with(move |req: &Request| fake.add(req))
            .mount(server)
            .await;

        let fake = self.clone();
        Mock::given(method("POST"))
            .and(path(endpoint("delete-record.json")))
            .respond_with(move |req: &Request| fake.delete(req))
            .mount(server)
            .await;
    }

    /// Snapshot of the stored records
    pub fn records(&self) -> Vec<TxtRecord> {
        self.state.lock().unwrap().records.values().cloned().collect()
    }

    fn list(&self, req: &Request) -> ResponseTemplate {
        let host = param(req, "host").unwrap_or_default();
        let state = self.state.lock().unwrap();

        let matching: BTreeMap<String, &TxtRecord> = state
            .records
            .iter()
            .filter(|(_, record)| record.host == host)
            .map(|(id, record)| (id.to_string(), record))
            .collect();

        if matching.is_empty() {
            ResponseTemplate::new(200).set_body_string("[]")
        } else {
            ResponseTemplate::new(200).set_body_json(matching)
        }
    }

    fn add(&self, req: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;

        let record = TxtRecord {
            id,
            record_type: param(req, "record-type").unwrap_or_default(),
            host: param(req, "host").unwrap_or_default(),
            record: param(req, "record").unwrap_or_default(),
            failover: 0,
            ttl: param(req, "ttl").and_then(|t| t.parse().ok()).unwrap_or_default(),
            status: 1,
        };
        state.records.insert(id, record);

        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "Success",
            "statusDescription": "The record was added successfully."
        }))
    }

    fn delete(&self, req: &Request) -> ResponseTemplate {
        let id: Option<u64> = param(req, "record-Id").and_then(|id| id.parse().ok());
        let removed = id.and_then(|id| self.state.lock().unwrap().records.remove(&id));

        let body = match removed {
            Some(_) => serde_json::json!({
                "status": "Success",
                "statusDescription": "The record was deleted successfully."
            }),
            None => serde_json::json!({
                "status": "Failed",
                "statusDescription": "Invalid record-id param."
            }),
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}
