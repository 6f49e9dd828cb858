//! Hearth: a self-hostable practice backend for therapists.
//!
//! Patient records, session notes, the day's schedule and billing, served as
//! a JSON API over an in-memory practice dataset, plus database diagnostics
//! against libSQL.

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
