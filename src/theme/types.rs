//! Pure theme data types.
//!
//! This module contains the decoded and normalized theme shapes and the
//! normalization step between them. No I/O happens here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Editor foreground used by light themes that set none.
pub const LIGHT_FOREGROUND: &str = "#333333";
/// Editor background used by light themes that set none.
pub const LIGHT_BACKGROUND: &str = "#fffffe";
/// Editor foreground used by dark (or untyped) themes that set none.
pub const DARK_FOREGROUND: &str = "#BBBBBB";
/// Editor background used by dark (or untyped) themes that set none.
pub const DARK_BACKGROUND: &str = "#1E1E1E";

/// Key in `colors` that overrides the default foreground.
pub const EDITOR_FOREGROUND_KEY: &str = "editor.foreground";
/// Key in `colors` that overrides the default background.
pub const EDITOR_BACKGROUND_KEY: &str = "editor.background";

/// Light or dark appearance, taken from a theme's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeType {
    Light,
    #[default]
    Dark,
}

impl ThemeType {
    /// Only the exact string `"light"` selects the light appearance.
    pub fn from_type_field(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn default_foreground(self) -> &'static str {
        match self {
            Self::Light => LIGHT_FOREGROUND,
            Self::Dark => DARK_FOREGROUND,
        }
    }

    pub fn default_background(self) -> &'static str {
        match self {
            Self::Light => LIGHT_BACKGROUND,
            Self::Dark => DARK_BACKGROUND,
        }
    }
}

/// The `scope` of a token color rule: a single selector string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeSelector {
    One(String),
    Many(Vec<String>),
}

impl ScopeSelector {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(scope) => scope.is_empty(),
            Self::Many(scopes) => scopes.is_empty(),
        }
    }

    /// All selectors as a list, in declaration order.
    pub fn selectors(&self) -> Vec<&str> {
        match self {
            Self::One(scope) => vec![scope.as_str()],
            Self::Many(scopes) => scopes.iter().map(String::as_str).collect(),
        }
    }
}

/// Style of a token color rule.
///
/// Only `foreground` and `background` are interpreted; `fontStyle` and any
/// other keys are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One entry of a theme's `settings` / `tokenColors` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenColorRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeSelector>,
    #[serde(default)]
    pub settings: TokenStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenColorRule {
    /// A rule without a name and without a scope holds the theme-wide
    /// defaults. It never matches tokens itself.
    pub fn is_global(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
            && self.scope.as_ref().is_none_or(ScopeSelector::is_empty)
    }
}

/// A theme exactly as decoded from disk, before normalization.
///
/// JSON themes usually carry `tokenColors`, plist themes `settings`. Fields
/// this crate does not interpret land in `extra` and survive normalization.
/// `colors` values are kept as decoded; entries that are not strings are
/// carried through but never used as a default color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub theme_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<IndexMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<TokenColorRule>>,
    #[serde(
        rename = "tokenColors",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub token_colors: Option<Vec<TokenColorRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawTheme {
    /// Rules consulted for the global default: `settings` if present,
    /// otherwise `tokenColors`.
    fn default_rules(&self) -> Option<&[TokenColorRule]> {
        self.settings
            .as_deref()
            .or(self.token_colors.as_deref())
    }

    fn editor_color(&self, key: &str) -> Option<&str> {
        self.colors
            .as_ref()
            .and_then(|colors| colors.get(key))
            .and_then(Value::as_str)
            .filter(|color| !color.is_empty())
    }
}

/// Where a resolved default color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSource {
    /// Built-in light/dark constant.
    #[default]
    Fallback,
    /// The theme's global token color rule.
    GlobalRule,
    /// `editor.foreground` / `editor.background` in `colors`.
    EditorColors,
    /// Taken over from an included theme.
    Include,
}

/// Default foreground and background of a theme, with their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultColors {
    pub fg: String,
    pub bg: String,
    pub fg_source: ColorSource,
    pub bg_source: ColorSource,
}

/// Compute the default colors of a raw theme.
///
/// Later steps win: the light/dark fallback, then the global rule, then the
/// editor colors. Foreground and background are resolved independently.
pub fn resolve_default_colors(raw: &RawTheme) -> DefaultColors {
    let theme_type = ThemeType::from_type_field(raw.theme_type.as_deref());
    let mut colors = DefaultColors {
        fg: theme_type.default_foreground().to_string(),
        bg: theme_type.default_background().to_string(),
        fg_source: ColorSource::Fallback,
        bg_source: ColorSource::Fallback,
    };

    let global = raw
        .default_rules()
        .and_then(|rules| rules.iter().find(|rule| rule.is_global()));
    if let Some(global) = global {
        if let Some(fg) = non_empty(global.settings.foreground.as_deref()) {
            colors.fg = fg.to_string();
            colors.fg_source = ColorSource::GlobalRule;
        }
        if let Some(bg) = non_empty(global.settings.background.as_deref()) {
            colors.bg = bg.to_string();
            colors.bg_source = ColorSource::GlobalRule;
        }
    }

    if let Some(fg) = raw.editor_color(EDITOR_FOREGROUND_KEY) {
        colors.fg = fg.to_string();
        colors.fg_source = ColorSource::EditorColors;
    }
    if let Some(bg) = raw.editor_color(EDITOR_BACKGROUND_KEY) {
        colors.bg = bg.to_string();
        colors.bg_source = ColorSource::EditorColors;
    }

    colors
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A normalized theme, ready for a tokenizer.
///
/// `settings` always exists and `fg`/`bg` are always set. Once returned by a
/// resolver, `include` has already been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub theme_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<IndexMap<String, Value>>,
    pub settings: Vec<TokenColorRule>,
    pub fg: String,
    pub bg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub fg_source: ColorSource,
    #[serde(skip)]
    pub bg_source: ColorSource,
}

impl Theme {
    pub fn appearance(&self) -> ThemeType {
        ThemeType::from_type_field(self.theme_type.as_deref())
    }

    /// The first rule without name and scope, if any.
    pub fn global_rule(&self) -> Option<&TokenColorRule> {
        self.settings.iter().find(|rule| rule.is_global())
    }
}

/// Turn a raw theme into its normalized form.
///
/// `tokenColors` replaces `settings` whenever it is present.
pub fn normalize(raw: RawTheme) -> Theme {
    let defaults = resolve_default_colors(&raw);
    let RawTheme {
        name,
        theme_type,
        colors,
        settings,
        token_colors,
        include,
        extra,
    } = raw;

    Theme {
        name,
        theme_type,
        colors,
        settings: token_colors.or(settings).unwrap_or_default(),
        fg: defaults.fg,
        bg: defaults.bg,
        include,
        extra,
        fg_source: defaults.fg_source,
        bg_source: defaults.bg_source,
    }
}

impl From<RawTheme> for Theme {
    fn from(raw: RawTheme) -> Self {
        normalize(raw)
    }
}
