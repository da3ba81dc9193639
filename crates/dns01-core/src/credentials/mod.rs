// # Credential Provider Implementations
//
// This module provides implementations of the CredentialProvider trait for
// different credential sources.

pub mod env;
pub mod fixed;

pub use env::EnvCredentialProvider;
pub use fixed::FixedCredentialProvider;
