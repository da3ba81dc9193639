// # Fixed Credential Provider
//
// Returns the same credentials on every call. Useful for tests and for
// embedding a solver in a process that already holds resolved secrets.

use async_trait::async_trait;

use crate::traits::credential_provider::{CredentialProvider, Credentials};
use crate::Result;

/// Credential provider backed by a constant value
#[derive(Debug, Clone)]
pub struct FixedCredentialProvider {
    credentials: Credentials,
}

impl FixedCredentialProvider {
    /// Create a provider that always returns `credentials`
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for FixedCredentialProvider {
    async fn resolve(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::IdentityType;

    #[tokio::test]
    async fn resolves_the_same_credentials_every_time() {
        let creds = Credentials::new(IdentityType::AuthId, "42", "secret");
        let provider = FixedCredentialProvider::new(creds.clone());

        assert_eq!(provider.resolve().await.unwrap(), creds);
        assert_eq!(provider.resolve().await.unwrap(), creds);
    }
}
