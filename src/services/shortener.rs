use crate::config::ShortenerConfig;
use crate::db::MappingStore;
use crate::error::{AppError, AppResult};
use crate::models::Mapping;
use crate::services::ShortCodeGenerator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Creates and resolves mappings.
///
/// Storage is the only source of truth; nothing is cached here.
#[derive(Clone)]
pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    generator: ShortCodeGenerator,
    code_length: usize,
    max_attempts: u32,
}

impl ShortenerService {
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: ShortCodeGenerator,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            store,
            generator,
            code_length: config.short_code_length,
            max_attempts: config.short_code_max_attempts,
        }
    }

    /// Store `original_url` under a freshly generated short code.
    ///
    /// The URL is stored as given. A code that is already taken is replaced
    /// by a new one, up to `max_attempts` codes in total.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ShortCodeGenerationFailed` if every attempted code
    /// was taken, or `AppError::Database` if the insert fails.
    pub async fn create(&self, original_url: &str) -> AppResult<Mapping> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate(self.code_length);
            debug!(code = %code, attempt, "Generated short code");

            if let Some(mapping) = self.store.insert_mapping(original_url, &code).await? {
                info!(code = %mapping.short, "Created mapping");
                return Ok(mapping);
            }

            warn!(code = %code, attempt, "Short code already taken, regenerating");
        }

        Err(AppError::ShortCodeGenerationFailed(self.max_attempts))
    }

    /// Return the original URL stored under `short_code`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UrlNotFound` if no mapping has that code.
    pub async fn resolve(&self, short_code: &str) -> AppResult<String> {
        self.store
            .find_by_code(short_code)
            .await?
            .map(|mapping| mapping.url)
            .ok_or_else(|| AppError::UrlNotFound(short_code.to_string()))
    }
}
