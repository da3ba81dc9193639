// # Credential Provider Trait
//
// Provider credentials are resolved on every `present`/`clean_up` call
// instead of once at startup: the source of truth (environment, mounted
// secret files) may change while the process runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of account identifier the credentials carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityType {
    /// Primary account identifier
    #[default]
    AuthId,
    /// Sub-account identifier
    SubAuthId,
}

impl IdentityType {
    /// The query parameter name the identity is sent under
    pub fn as_param(&self) -> &'static str {
        match self {
            IdentityType::AuthId => "auth-id",
            IdentityType::SubAuthId => "sub-auth-id",
        }
    }
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for IdentityType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth-id" => Ok(IdentityType::AuthId),
            "sub-auth-id" => Ok(IdentityType::SubAuthId),
            other => Err(crate::Error::config(format!(
                "auth id type is not valid. Expected one of 'auth-id' or 'sub-auth-id' but was: '{}'",
                other
            ))),
        }
    }
}

/// Resolved provider credentials for a single invocation
///
/// The Debug implementation does NOT expose the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Kind of identifier in `id`
    pub id_type: IdentityType,
    /// Account or sub-account identifier
    pub id: String,
    /// Password / API secret
    /// ⚠️ NEVER log this value
    pub password: String,
}

impl Credentials {
    /// Create new credentials
    pub fn new(id_type: IdentityType, id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id_type,
            id: id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id_type", &self.id_type)
            .field("id", &self.id)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Source of provider credentials
///
/// Injected into solvers so tests can supply fixed credentials without
/// touching the process environment.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve the credentials for one invocation
    ///
    /// Returns `Error::Config` when credentials are missing or invalid.
    async fn resolve(&self) -> crate::Result<Credentials>;
}
