//! Shared types and configuration for Fairshare.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes for group ledgers
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
