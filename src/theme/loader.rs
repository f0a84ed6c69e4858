//! Theme loading with I/O abstraction.
//!
//! This module provides the `ThemeLoader` trait for reading theme files from
//! various sources, `LocalThemeLoader` as the default filesystem-based
//! implementation, and `ThemeResolver`, which decodes, normalizes and follows
//! `include` chains.

use std::io;
use std::path::{Component, Path, PathBuf};

use super::error::{Result, ThemeError};
use super::format::FileFormat;
use super::options::{BackgroundInheritance, ResolveOptions};
use super::types::{normalize, ColorSource, RawTheme, Theme};

/// Trait for reading theme files from various sources.
///
/// This abstraction allows:
/// - Testing with in-memory implementations
/// - Themes bundled into the binary or fetched over the network
pub trait ThemeLoader: Send + Sync {
    /// Read the raw bytes of a file.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// List entries in a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Canonical identity of a directory, used to visit each one once.
    ///
    /// Sources without links can keep the default.
    fn canonical_dir(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(normalize_path(path))
    }
}

/// Default implementation using local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalThemeLoader;

impl ThemeLoader for LocalThemeLoader {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonical_dir(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

/// Resolve a theme file from the local filesystem with default options.
pub fn resolve_theme(path: impl AsRef<Path>) -> Result<Theme> {
    ThemeResolver::new(&LocalThemeLoader).resolve(path.as_ref())
}

/// Decodes themes through a [`ThemeLoader`] and applies their includes.
///
/// A resolver holds no state between calls, so one instance can serve any
/// number of resolutions, also from several threads.
pub struct ThemeResolver<'a> {
    loader: &'a dyn ThemeLoader,
    options: ResolveOptions,
}

impl<'a> ThemeResolver<'a> {
    pub fn new(loader: &'a dyn ThemeLoader) -> Self {
        Self::with_options(loader, ResolveOptions::default())
    }

    pub fn with_options(loader: &'a dyn ThemeLoader, options: ResolveOptions) -> Self {
        Self { loader, options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Load, normalize and fully resolve the theme at `path`.
    pub fn resolve(&self, path: &Path) -> Result<Theme> {
        let path = normalize_path(path);
        let mut stack = Vec::new();
        self.resolve_file(&path, &mut stack)
    }

    /// Read and decode a theme file without normalizing it.
    pub fn load_raw(&self, path: &Path) -> Result<RawTheme> {
        let format = FileFormat::from_path(path);
        let bytes = self
            .loader
            .read_file(path)
            .map_err(|source| ThemeError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        format.decode(&bytes).map_err(|source| ThemeError::Decode {
            path: path.to_path_buf(),
            format,
            source,
        })
    }

    /// Apply the `include` of an already normalized theme that was loaded
    /// from `current_path`. Themes without an include come back unchanged.
    pub fn resolve_includes(&self, theme: Theme, current_path: &Path) -> Result<Theme> {
        let current_path = normalize_path(current_path);
        let mut stack = vec![current_path.clone()];
        self.merge_include(theme, &current_path, &mut stack)
    }

    fn resolve_file(&self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<Theme> {
        tracing::debug!("Resolving theme {:?}", path);
        let theme = normalize(self.load_raw(path)?);

        stack.push(path.to_path_buf());
        let result = self.merge_include(theme, path, stack);
        stack.pop();
        result
    }

    /// `stack` holds every file currently being resolved, `current_path` last.
    fn merge_include(
        &self,
        mut theme: Theme,
        current_path: &Path,
        stack: &mut Vec<PathBuf>,
    ) -> Result<Theme> {
        let Some(include) = theme
            .include
            .as_deref()
            .filter(|include| !include.is_empty())
        else {
            return Ok(theme);
        };
        let included_path = include_path(current_path, include);

        if stack.contains(&included_path) {
            let mut chain = stack.clone();
            chain.push(included_path);
            return Err(ThemeError::IncludeCycle { chain });
        }
        if stack.len() > self.options.max_include_depth {
            return Err(ThemeError::IncludeDepthExceeded {
                path: included_path,
                limit: self.options.max_include_depth,
            });
        }

        tracing::debug!("Theme {:?} includes {:?}", current_path, included_path);
        let included = self
            .resolve_file(&included_path, stack)
            .map_err(|err| match err {
                ThemeError::Io { path, source }
                    if path == included_path && source.kind() == io::ErrorKind::NotFound =>
                {
                    ThemeError::IncludeNotFound {
                        path,
                        included_from: current_path.to_path_buf(),
                        source,
                    }
                }
                other => other,
            })?;

        if self.inherits_background(&theme, &included) {
            tracing::debug!(
                "Theme {:?} takes background {} from {:?}",
                current_path,
                included.bg,
                included_path
            );
            theme.bg = included.bg;
            theme.bg_source = ColorSource::Include;
        }
        theme.settings.extend(included.settings);

        Ok(theme)
    }

    fn inherits_background(&self, theme: &Theme, included: &Theme) -> bool {
        match self.options.background_inheritance {
            BackgroundInheritance::WhenFallback => {
                theme.bg_source == ColorSource::Fallback
                    && included.bg_source != ColorSource::Fallback
            }
            BackgroundInheritance::Never => false,
        }
    }
}

/// Path of an included theme: `include` relative to the including file's
/// directory.
pub fn include_path(current_path: &Path, include: &str) -> PathBuf {
    let dir = current_path.parent().unwrap_or(Path::new(""));
    normalize_path(&dir.join(include))
}

/// Lexically clean a path: drop `.` and fold `..` into its parent.
///
/// Symlinks are not resolved and the filesystem is not consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
