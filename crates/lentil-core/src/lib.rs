//! # lentil-core
//!
//! Core types and utilities shared across all Lentil crates.
//!
//! This crate provides:
//! - Version and SpecifierSet types for PEP 440 versions and constraints
//! - PackageName validation and normalization
//! - PythonSelector for interpreter requirements
//! - LentilError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, SpecifierSet, PackageName, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{LentilError, LentilResult};
pub use types::{Op, PackageName, PythonSelector, Specifier, SpecifierSet, Version};
