use serde::Deserialize;

/// HTTP layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// List of allowed origins for CORS (use ["*"] for all origins)
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl HttpConfig {
    /// Validate HTTP configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_origins.is_empty() {
            return Err("ALLOWED_ORIGINS must list at least one origin".to_string());
        }

        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }
}
