//! Theme registry built from a directory of theme files.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::loader::{ThemeLoader, ThemeResolver};
use super::options::ResolveOptions;
use super::types::Theme;

/// Extensions scanned for theme files.
const THEME_EXTENSIONS: [&str; 2] = ["json", "tmTheme"];

/// Theme metadata for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeInfo {
    pub name: String,
    pub path: PathBuf,
}

/// A registry holding all resolved themes of a directory.
///
/// This is a pure data structure once loaded - lookups do no I/O.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    /// All loaded themes, keyed by normalized name
    themes: HashMap<String, Theme>,
    /// Theme metadata for listing, in load order
    theme_list: Vec<ThemeInfo>,
}

impl ThemeRegistry {
    /// Resolve every theme file below `dir` (recursively).
    ///
    /// Files that fail to resolve are logged and skipped. When two files
    /// produce the same name, the first one found wins.
    pub fn load_dir(loader: &dyn ThemeLoader, dir: &Path, options: ResolveOptions) -> Self {
        let resolver = ThemeResolver::with_options(loader, options);
        let mut registry = Self::default();
        let mut visited = HashSet::new();
        registry.scan_directory(loader, &resolver, dir, &mut visited);

        tracing::info!("Loaded {} themes from {:?}", registry.len(), dir);
        registry
    }

    fn scan_directory(
        &mut self,
        loader: &dyn ThemeLoader,
        resolver: &ThemeResolver<'_>,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
    ) {
        // Linked directories may point back up the tree
        let canonical = match loader.canonical_dir(dir) {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::warn!("Failed to read themes directory {:?}: {}", dir, e);
                return;
            }
        };
        if !visited.insert(canonical) {
            tracing::debug!("Skipping already scanned directory {:?}", dir);
            return;
        }

        let mut entries = match loader.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read themes directory {:?}: {}", dir, e);
                return;
            }
        };
        // Directory order is platform dependent
        entries.sort();

        for path in entries {
            if loader.is_dir(&path) {
                self.scan_directory(loader, resolver, &path, visited);
                continue;
            }

            let is_theme_file = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| THEME_EXTENSIONS.contains(&ext));
            if !is_theme_file {
                continue;
            }

            let theme = match resolver.resolve(&path) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!("Skipping theme {:?}: {}", path, e);
                    continue;
                }
            };

            let name = theme
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .or_else(|| {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                })
                .unwrap_or_default();
            self.insert(name, path, theme);
        }
    }

    fn insert(&mut self, name: String, path: PathBuf, theme: Theme) {
        let key = normalize_name(&name);
        if self.themes.contains_key(&key) {
            tracing::debug!("Theme {:?} from {:?} already registered", key, path);
            return;
        }
        self.themes.insert(key.clone(), theme);
        self.theme_list.push(ThemeInfo { name: key, path });
    }

    /// Get a theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(&normalize_name(name))
    }

    /// Registered themes in the order they were found.
    pub fn list(&self) -> &[ThemeInfo] {
        &self.theme_list
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

/// Lowercase, with `_` and spaces turned into `-`.
fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(['_', ' '], "-")
}
