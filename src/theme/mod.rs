//! Theme module with separated pure types and I/O operations.
//!
//! This module is split into:
//! - `types`: Pure data types and normalization (no filesystem access)
//! - `format`: File format classification and the two decoders
//! - `loader`: `ThemeLoader` I/O trait and the include-following `ThemeResolver`
//! - `registry`: `ThemeRegistry` built by scanning a themes directory
//!
//! # Example
//!
//! ```ignore
//! use textmate_theme::{LocalThemeLoader, ResolveOptions, ThemeRegistry, ThemeResolver};
//! use std::path::Path;
//!
//! // Resolve a single theme, following its includes
//! let resolver = ThemeResolver::new(&LocalThemeLoader);
//! let theme = resolver.resolve(Path::new("themes/dark_plus.json"))?;
//!
//! // Or load every theme in a directory
//! let registry = ThemeRegistry::load_dir(&LocalThemeLoader, Path::new("themes"), ResolveOptions::default());
//! let dark_plus = registry.get("dark-plus");
//! ```

mod error;
mod format;
mod loader;
mod options;
mod registry;
mod types;

pub use error::*;
pub use format::*;
pub use loader::*;
pub use options::*;
pub use registry::*;
pub use types::*;
