//! course-portal - weekly course content with GitHub / Google Drive resources
//!
//! Staff manage weeks (semanas) and the resources (archivos) attached to
//! them; students browse the enabled weeks through a public JSON listing.
//!
//! # Architecture
//! - `links`: Drive ID extraction and GitHub file link resolution
//! - `storage`: sea-orm persistence with retry
//! - `services`: course and staff business logic
//! - `api`: HTTP handlers, middleware and session tokens
//! - `interfaces`: command-line management commands
//! - `config`: layered TOML + environment configuration
//! - `runtime`: server startup and shutdown
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod links;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
