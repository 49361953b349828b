#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shrtn::config::{HttpConfig, ShortenerConfig};
use shrtn::db::MappingStore;
use shrtn::error::{AppError, AppResult};
use shrtn::models::Mapping;
use shrtn::routes::{create_router, AppState};
use shrtn::services::{ShortCodeGenerator, ShortenerService};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory `MappingStore` keyed by short code.
#[derive(Default)]
pub struct MemoryStore {
    rows: DashMap<String, Mapping>,
    inserts: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store a row directly, bypassing the shortener
    pub fn seed(&self, url: &str, short: &str) {
        self.rows.insert(
            short.to_string(),
            Mapping {
                url: url.to_string(),
                short: short.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// Make every subsequent call fail like an unreachable database
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Number of insert attempts, including ones that hit a taken code
    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn insert_mapping(&self, url: &str, short: &str) -> AppResult<Option<Mapping>> {
        self.check()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);

        match self.rows.entry(short.to_string()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let mapping = Mapping {
                    url: url.to_string(),
                    short: short.to_string(),
                    created_at: Utc::now(),
                };
                slot.insert(mapping.clone());
                Ok(Some(mapping))
            }
        }
    }

    async fn find_by_code(&self, short: &str) -> AppResult<Option<Mapping>> {
        self.check()?;
        Ok(self.rows.get(short).map(|row| row.value().clone()))
    }

    async fn count_mappings(&self) -> AppResult<i64> {
        self.check()?;
        Ok(self.rows.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

pub fn shortener_config() -> ShortenerConfig {
    ShortenerConfig {
        short_code_length: 8,
        short_code_max_attempts: 5,
    }
}

pub fn shortener(store: Arc<MemoryStore>, generator: ShortCodeGenerator) -> ShortenerService {
    ShortenerService::new(store, generator, &shortener_config())
}

pub fn test_server_with(store: Arc<MemoryStore>, generator: ShortCodeGenerator) -> TestServer {
    let shortener = shortener(store.clone(), generator);
    let state = Arc::new(AppState { store, shortener });
    let http_config = HttpConfig {
        allowed_origins: vec!["*".to_string()],
        max_body_bytes: 64 * 1024,
    };

    TestServer::new(create_router(state, &http_config)).unwrap()
}

pub fn test_server(store: Arc<MemoryStore>) -> TestServer {
    test_server_with(store, ShortCodeGenerator::new())
}
