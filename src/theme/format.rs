//! Theme file formats and their decoders.
//!
//! Both decoders first produce a generic `serde_json::Value` tree, which is
//! then read into a [`RawTheme`]. That keeps the structural checks identical
//! for JSON and plist themes.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use serde_json::Value;

use super::error::DecodeError;
use super::types::RawTheme;

/// On-disk format of a theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// VS Code style JSON, comments and trailing commas allowed.
    Json,
    /// TextMate property list (`.tmTheme`), XML or binary.
    Plist,
}

impl FileFormat {
    /// Classify a path by its suffix.
    ///
    /// The check is a case-sensitive `.json` suffix match; every other path is
    /// treated as a property list.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".json") {
            Self::Json
        } else {
            Self::Plist
        }
    }

    /// Decode file contents into a raw theme.
    pub fn decode(self, bytes: &[u8]) -> Result<RawTheme, DecodeError> {
        let tree = match self {
            Self::Json => decode_json_tree(bytes)?,
            Self::Plist => decode_plist_tree(bytes)?,
        };
        Ok(serde_json::from_value(tree)?)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Plist => write!(f, "plist"),
        }
    }
}

fn decode_json_tree(bytes: &[u8]) -> Result<Value, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(serde_json_lenient::from_str_lenient(text)?)
}

fn decode_plist_tree(bytes: &[u8]) -> Result<Value, DecodeError> {
    let tree = plist::Value::from_reader(Cursor::new(bytes))?;
    Ok(serde_json::to_value(tree)?)
}
