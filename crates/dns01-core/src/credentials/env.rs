// # Environment Credential Provider
//
// Reads credentials from environment variables, or from files named by
// `*_FILE` variables (mounted secrets), on every call.
//
// ## Variables (prefix `CLOUDNS` shown)
//
// - `CLOUDNS_AUTH_ID_TYPE`: `auth-id` (default) or `sub-auth-id`
// - `CLOUDNS_AUTH_ID` / `CLOUDNS_AUTH_ID_FILE`: account identifier
// - `CLOUDNS_AUTH_PASSWORD` / `CLOUDNS_AUTH_PASSWORD_FILE`: password
//
// A non-empty variable wins over its `_FILE` counterpart. File contents are
// trimmed.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::traits::credential_provider::{CredentialProvider, Credentials, IdentityType};
use crate::{Error, Result};

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Credential provider reading the process environment per invocation
#[derive(Clone)]
pub struct EnvCredentialProvider {
    prefix: String,
    lookup: Lookup,
}

impl fmt::Debug for EnvCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentialProvider")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl EnvCredentialProvider {
    /// Create a provider reading `<prefix>_AUTH_*` from the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Create a provider reading variables through `lookup`
    ///
    /// `lookup` stands in for `std::env::var`, which lets callers resolve
    /// from another source (or tests avoid mutating the real environment).
    pub fn with_lookup<F>(prefix: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            prefix: prefix.into(),
            lookup: Arc::new(lookup),
        }
    }

    fn var_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Value of `<name>`, else the trimmed contents of the file named by `<name>_FILE`
    async fn get_or_file(&self, name: &str) -> Result<Option<String>> {
        if let Some(value) = (self.lookup)(name).filter(|v| !v.is_empty()) {
            return Ok(Some(value));
        }

        let file_var = format!("{}_FILE", name);
        let Some(path) = (self.lookup)(&file_var).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::config(format!("failed to read {} ({}): {}", file_var, path, e)))?;

        let trimmed = contents.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn resolve(&self) -> Result<Credentials> {
        let id_type = match (self.lookup)(&self.var_name("AUTH_ID_TYPE")) {
            Some(raw) if !raw.is_empty() => raw.parse::<IdentityType>()?,
            _ => IdentityType::default(),
        };

        let id_var = self.var_name("AUTH_ID");
        let id = self
            .get_or_file(&id_var)
            .await?
            .ok_or_else(|| Error::config(format!("{}(_FILE) is required", id_var)))?;

        let password_var = self.var_name("AUTH_PASSWORD");
        let password = self
            .get_or_file(&password_var)
            .await?
            .ok_or_else(|| Error::config(format!("{}(_FILE) is required", password_var)))?;

        tracing::debug!("Resolved {} credentials (type: {})", self.prefix, id_type);

        Ok(Credentials {
            id_type,
            id,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn provider(vars: &[(&str, &str)]) -> EnvCredentialProvider {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvCredentialProvider::with_lookup("CLOUDNS", move |name| vars.get(name).cloned())
    }

    #[tokio::test]
    async fn resolves_inline_values_with_default_type() {
        let creds = provider(&[("CLOUDNS_AUTH_ID", "1234"), ("CLOUDNS_AUTH_PASSWORD", "pw")])
            .resolve()
            .await
            .unwrap();

        assert_eq!(creds, Credentials::new(IdentityType::AuthId, "1234", "pw"));
    }

    #[tokio::test]
    async fn resolves_sub_auth_id() {
        let creds = provider(&[
            ("CLOUDNS_AUTH_ID_TYPE", "sub-auth-id"),
            ("CLOUDNS_AUTH_ID", "77"),
            ("CLOUDNS_AUTH_PASSWORD", "pw"),
        ])
        .resolve()
        .await
        .unwrap();

        assert_eq!(creds.id_type, IdentityType::SubAuthId);
    }

    #[tokio::test]
    async fn rejects_invalid_type_before_anything_else() {
        let err = provider(&[("CLOUDNS_AUTH_ID_TYPE", "token")])
            .resolve()
            .await
            .unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("'token'"));
    }

    #[tokio::test]
    async fn missing_id_and_password_are_reported_by_name() {
        let err = provider(&[]).resolve().await.unwrap_err();
        assert!(err.to_string().contains("CLOUDNS_AUTH_ID(_FILE) is required"));

        let err = provider(&[("CLOUDNS_AUTH_ID", "1234")])
            .resolve()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("CLOUDNS_AUTH_PASSWORD(_FILE) is required"));
    }

    #[tokio::test]
    async fn reads_secrets_from_files() {
        let mut id_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(id_file, "5678").unwrap();
        let mut password_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(password_file, "  file-secret  ").unwrap();

        let id_path = id_file.path().to_string_lossy().to_string();
        let password_path = password_file.path().to_string_lossy().to_string();

        let creds = provider(&[
            ("CLOUDNS_AUTH_ID_FILE", id_path.as_str()),
            ("CLOUDNS_AUTH_PASSWORD_FILE", password_path.as_str()),
        ])
        .resolve()
        .await
        .unwrap();

        assert_eq!(creds.id, "5678");
        assert_eq!(creds.password, "file-secret");
    }

    #[tokio::test]
    async fn inline_value_wins_over_file() {
        let mut id_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(id_file, "from-file").unwrap();
        let id_path = id_file.path().to_string_lossy().to_string();

        let creds = provider(&[
            ("CLOUDNS_AUTH_ID", "inline"),
            ("CLOUDNS_AUTH_ID_FILE", id_path.as_str()),
            ("CLOUDNS_AUTH_PASSWORD", "pw"),
        ])
        .resolve()
        .await
        .unwrap();

        assert_eq!(creds.id, "inline");
    }

    #[tokio::test]
    async fn unreadable_file_is_a_config_error() {
        let err = provider(&[
            ("CLOUDNS_AUTH_ID_FILE", "/nonexistent/dns01/auth-id"),
            ("CLOUDNS_AUTH_PASSWORD", "pw"),
        ])
        .resolve()
        .await
        .unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("CLOUDNS_AUTH_ID_FILE"));
    }

    #[tokio::test]
    async fn values_are_reread_on_every_call() {
        let current = Arc::new(std::sync::Mutex::new("first".to_string()));
        let shared = current.clone();
        let provider = EnvCredentialProvider::with_lookup("CLOUDNS", move |name| match name {
            "CLOUDNS_AUTH_ID" => Some("1".to_string()),
            "CLOUDNS_AUTH_PASSWORD" => Some(shared.lock().unwrap().clone()),
            _ => None,
        });

        assert_eq!(provider.resolve().await.unwrap().password, "first");
        *current.lock().unwrap() = "rotated".to_string();
        assert_eq!(provider.resolve().await.unwrap().password, "rotated");
    }
}
