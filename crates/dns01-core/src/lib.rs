// # dns01-core
//
// Core library for ACME DNS-01 challenge solvers.
//
// A certificate-issuance controller hands a solver a `ChallengeRequest`
// (the resolved `_acme-challenge` FQDN and the expected TXT value). The
// solver publishes the TXT record on `present` and removes it again on
// `clean_up`. This crate holds everything that is not specific to a single
// DNS provider.
//
// ## Architecture Overview
//
// - **Solver**: The four-operation plugin interface the controller calls
// - **CredentialProvider**: Resolves provider credentials on every invocation
// - **ZoneFinder**: Maps an FQDN to the DNS zone that owns it
// - **SolverRegistry**: Routes challenges to solvers by name
// - **SolverConfig**: Process-wide settings, built once and injected
//
// ## Design Principles
//
// 1. **Stateless invocations**: Zone and record state is re-derived from the
//    provider on every call; nothing is cached between `present` and `clean_up`
// 2. **No retries**: Every failure is surfaced once; the controller owns backoff
// 3. **Plugin-Based**: Providers live in their own crates and register a solver
// 4. **Attributable errors**: Every error a solver surfaces carries its name

pub mod traits;
pub mod registry;
pub mod config;
pub mod error;
pub mod credentials;
pub mod zone;

// Re-export core types for convenience
pub use traits::{
    ChallengeRequest, CredentialProvider, Credentials, HostConfig, IdentityType, Solver,
    ZoneFinder,
};
pub use registry::{SolverRegistry, SolverShutdown};
pub use config::SolverConfig;
pub use error::{Error, Result};
pub use credentials::{EnvCredentialProvider, FixedCredentialProvider};
pub use zone::{FixedZoneFinder, SoaZoneFinder};
