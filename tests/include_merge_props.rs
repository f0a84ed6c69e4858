// Property tests for default color precedence and include merge order

mod common;

use std::path::Path;

use common::MemoryLoader;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use textmate_theme::{
    normalize, resolve_default_colors, RawTheme, ScopeSelector, ThemeResolver, DARK_BACKGROUND,
    DARK_FOREGROUND, LIGHT_BACKGROUND, LIGHT_FOREGROUND,
};

fn color() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

fn scope_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}(\\.[a-z]{1,8}){0,2}", 0..8)
}

fn theme_json(scopes: &[String], include: Option<&str>) -> String {
    let rules: Vec<Value> = scopes
        .iter()
        .map(|scope| json!({ "scope": scope, "settings": { "foreground": "#010101" } }))
        .collect();
    let mut theme = Map::new();
    theme.insert("tokenColors".into(), Value::Array(rules));
    if let Some(include) = include {
        theme.insert("include".into(), json!(include));
    }
    Value::Object(theme).to_string()
}

fn scopes_of(theme: &textmate_theme::Theme) -> Vec<String> {
    theme
        .settings
        .iter()
        .map(|rule| match &rule.scope {
            Some(ScopeSelector::One(scope)) => scope.clone(),
            other => panic!("unexpected scope {other:?}"),
        })
        .collect()
}

proptest! {
    #[test]
    fn include_merge_keeps_own_rules_first(
        a in scope_list(),
        b in scope_list(),
        c in scope_list(),
    ) {
        let loader = MemoryLoader::new()
            .with_file("/t/a.json", theme_json(&a, Some("b.json")))
            .with_file("/t/b.json", theme_json(&b, Some("nested/c.json")))
            .with_file("/t/nested/c.json", theme_json(&c, None));

        let theme = ThemeResolver::new(&loader)
            .resolve(Path::new("/t/a.json"))
            .unwrap();

        let expected: Vec<String> = a.iter().chain(&b).chain(&c).cloned().collect();
        prop_assert_eq!(scopes_of(&theme), expected);
    }

    #[test]
    fn default_colors_follow_precedence(
        light in any::<bool>(),
        global_fg in prop::option::of(color()),
        global_bg in prop::option::of(color()),
        editor_fg in prop::option::of(color()),
        editor_bg in prop::option::of(color()),
    ) {
        let mut global = Map::new();
        if let Some(fg) = &global_fg {
            global.insert("foreground".into(), json!(fg));
        }
        if let Some(bg) = &global_bg {
            global.insert("background".into(), json!(bg));
        }
        let mut colors = Map::new();
        if let Some(fg) = &editor_fg {
            colors.insert("editor.foreground".into(), json!(fg));
        }
        if let Some(bg) = &editor_bg {
            colors.insert("editor.background".into(), json!(bg));
        }
        let theme_type = if light { "light" } else { "dark" };
        let raw: RawTheme = serde_json::from_value(json!({
            "type": theme_type,
            "colors": colors,
            "tokenColors": [
                { "scope": "comment", "settings": { "foreground": "#ff0000", "background": "#00ff00" } },
                { "settings": global }
            ]
        }))
        .unwrap();

        let (fallback_fg, fallback_bg) = if light {
            (LIGHT_FOREGROUND, LIGHT_BACKGROUND)
        } else {
            (DARK_FOREGROUND, DARK_BACKGROUND)
        };
        let expected_fg = editor_fg.or(global_fg).unwrap_or_else(|| fallback_fg.to_string());
        let expected_bg = editor_bg.or(global_bg).unwrap_or_else(|| fallback_bg.to_string());

        let defaults = resolve_default_colors(&raw);
        prop_assert_eq!(&defaults.fg, &expected_fg);
        prop_assert_eq!(&defaults.bg, &expected_bg);

        let theme = normalize(raw);
        prop_assert_eq!(theme.fg, expected_fg);
        prop_assert_eq!(theme.bg, expected_bg);
        prop_assert_eq!(theme.settings.len(), 2);
    }
}
