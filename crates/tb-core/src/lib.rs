//! # tb-core
//!
//! Core types, traits, and utilities for Taskboard RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types (`TbError`, `ValidationErrors`, `RuleViolation`)
//! - Result type aliases
//! - Core traits (Entity, Identifiable)
//! - Patch helpers for nullable fields
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
