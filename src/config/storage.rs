use serde::Deserialize;
use std::fmt;

/// Hosted storage service credentials.
///
/// Both values are required at startup. Reads and writes go through the
/// direct database connection, so these are validated and reported but never
/// used to open a second client.
#[derive(Clone, Deserialize)]
pub struct StorageServiceConfig {
    /// Storage service endpoint URL
    pub url: String,

    /// Storage service access key
    pub access_key: String,
}

impl StorageServiceConfig {
    /// Validate storage service configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("SUPABASE_URL must not be empty".to_string());
        }

        if self.access_key.trim().is_empty() {
            return Err("SUPABASE_KEY must not be empty".to_string());
        }

        Ok(())
    }
}

impl fmt::Debug for StorageServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageServiceConfig")
            .field("url", &self.url)
            .field("access_key", &"<redacted>")
            .finish()
    }
}
