//! Core data types for manifest handling.
//!
//! This module provides the fundamental types used throughout Lentil:
//! - Version types for PEP 440 version numbers
//! - Specifier types for version constraints
//! - Package name validation and normalization
//! - Interpreter version selectors

pub mod name;
pub mod python;
pub mod specifier;
pub mod version;

// Re-export all public types
pub use name::{NameError, PackageName};
pub use python::PythonSelector;
pub use specifier::{Op, Specifier, SpecifierError, SpecifierSet};
pub use version::{PreRelease, PreTag, Version, VersionError};
