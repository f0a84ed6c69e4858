use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::FileFormat;

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Failure to turn file contents into a raw theme.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("theme is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json_lenient::Error),
    #[error("malformed property list: {0}")]
    Plist(#[from] plist::Error),
    #[error("unexpected theme structure: {0}")]
    Structure(#[from] serde_json::Error),
}

/// Errors returned while resolving a theme and its includes.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {format} theme {}", .path.display())]
    Decode {
        path: PathBuf,
        format: FileFormat,
        #[source]
        source: DecodeError,
    },
    #[error(
        "theme {} includes {}, which does not exist",
        .included_from.display(),
        .path.display()
    )]
    IncludeNotFound {
        path: PathBuf,
        included_from: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("include cycle: {}", display_chain(.chain))]
    IncludeCycle { chain: Vec<PathBuf> },
    #[error(
        "include chain is deeper than {limit} levels at {}",
        .path.display()
    )]
    IncludeDepthExceeded { path: PathBuf, limit: usize },
}

impl ThemeError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Decode { path, .. }
            | Self::IncludeNotFound { path, .. }
            | Self::IncludeDepthExceeded { path, .. } => path,
            Self::IncludeCycle { chain } => chain.last().map_or(Path::new(""), PathBuf::as_path),
        }
    }
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
