//! Taskledger: an in-memory TODO manager.
//!
//! Tasks, projects, categories, tags and notifications share one entity
//! contract and one generic repository.
//!
//! # Architecture
//!
//! - **Entities** validate themselves against an [`config::AppConfig`] and
//!   serialise to deterministic JSON objects
//! - **Repositories** own entities, assign identifiers and enforce
//!   validation, uniqueness and lifecycle rules on every write
//! - **Responses** wrap results in success or error envelopes at the
//!   presentation boundary
//!
//! # Modules
//!
//! - [`config`]: Validation limits and defaults
//! - [`entity`]: Entity contract and the concrete TODO entities
//! - [`error`]: Application error taxonomy
//! - [`repository`]: Generic in-memory repository and per-entity queries
//! - [`response`]: Success and error envelopes
//! - [`validation`]: Reusable field validators

pub mod config;
pub mod entity;
pub mod error;
pub mod repository;
pub mod response;
pub mod validation;
