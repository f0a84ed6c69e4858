//! Loading and normalization of TextMate / VS Code color themes.
//!
//! A theme file is either JSON (`*.json`, comments and trailing commas allowed)
//! or a property list (`*.tmTheme` and anything else). Both are decoded into a
//! [`RawTheme`], normalized into a [`Theme`] with guaranteed `fg`/`bg` defaults,
//! and any `include` chain is followed and merged.
//!
//! # Example
//!
//! ```no_run
//! let theme = textmate_theme::resolve_theme("themes/monokai.tmTheme")?;
//! println!("{} on {} with {} rules", theme.fg, theme.bg, theme.settings.len());
//! # Ok::<(), textmate_theme::ThemeError>(())
//! ```

pub mod theme;

pub use theme::*;
