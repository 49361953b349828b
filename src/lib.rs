//! shrtn - a minimal URL shortener.
//!
//! `POST /api/shorten` stores a URL under a random eight character code and
//! `GET /api/actualURL/{code}` resolves it again. Mappings live in a single
//! Postgres table reached through [`db::MappingStore`].

pub mod admin;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
