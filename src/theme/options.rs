use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Longest include chain followed before giving up.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// When an including theme takes over the background of the theme it includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundInheritance {
    /// Use the included background if the including theme's own background is
    /// only the light/dark fallback and the included one is not.
    #[default]
    WhenFallback,
    /// Always keep the including theme's own background.
    Never,
}

/// Knobs for [`ThemeResolver`](super::ThemeResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResolveOptions {
    /// Maximum number of nested includes below the requested theme.
    pub max_include_depth: usize,
    pub background_inheritance: BackgroundInheritance,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            background_inheritance: BackgroundInheritance::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults_from_empty_json() {
        let options: ResolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ResolveOptions::default());
        assert_eq!(options.max_include_depth, DEFAULT_MAX_INCLUDE_DEPTH);
        assert_eq!(
            options.background_inheritance,
            BackgroundInheritance::WhenFallback
        );
    }

    #[test]
    fn test_options_partial_override() {
        let options: ResolveOptions =
            serde_json::from_str(r#"{ "background_inheritance": "never" }"#).unwrap();
        assert_eq!(options.background_inheritance, BackgroundInheritance::Never);
        assert_eq!(options.max_include_depth, DEFAULT_MAX_INCLUDE_DEPTH);
    }

    #[test]
    fn test_options_schema() {
        let schema = schemars::schema_for!(ResolveOptions);
        let schema = serde_json::to_value(&schema).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("max_include_depth"));
        assert!(properties.contains_key("background_inheritance"));
    }
}
