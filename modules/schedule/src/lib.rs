//! Backend core for the schedule bot: users keyed by their Telegram ID and
//! per-user weekly schedule items, exposed as a JSON REST API.
//!
//! Layering follows the usual module shape: `contract` holds pure models,
//! `domain` the business rules, `infra` the SeaORM storage, `api` the REST
//! surface. All state lives in the database; the service is handed its
//! connection at construction and keeps nothing request-scoped.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;

pub use domain::service::Service;
pub use infra::storage::migrations::Migrator;
