//! Core traits for DNS-01 solvers
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Solver`]: The plugin interface the certificate controller calls
//! - [`CredentialProvider`]: Per-invocation credential resolution
//! - [`ZoneFinder`]: FQDN to owning-zone discovery

pub mod solver;
pub mod credential_provider;
pub mod zone_finder;

pub use solver::{ChallengeRequest, HostConfig, Solver};
pub use credential_provider::{CredentialProvider, Credentials, IdentityType};
pub use zone_finder::ZoneFinder;
