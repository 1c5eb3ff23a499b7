use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

pub const DEFAULT_HIGHLIGHT_THEME: &str = "base16-ocean.dark";
pub const DEFAULT_HIGHLIGHT_STYLESHEET: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css";
pub const DEFAULT_HIGHLIGHT_SCRIPT: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub site: SiteConfig,
    pub highlight: HighlightConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| BuildError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&data).map_err(|source| BuildError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Locations relative to the project root.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub markdown: String,
    pub template: String,
    pub output: String,
    pub index: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            markdown: "markdown".into(),
            template: "template".into(),
            output: "dist".into(),
            index: "index.html".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "All Blogs".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme used for server-side highlighting
    pub theme: String,
    /// highlight.js stylesheet linked from every page
    pub stylesheet: String,
    /// highlight.js script loaded by every page
    pub script: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_HIGHLIGHT_THEME.into(),
            stylesheet: DEFAULT_HIGHLIGHT_STYLESHEET.into(),
            script: DEFAULT_HIGHLIGHT_SCRIPT.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdblog.toml");
        std::fs::write(&path, "[site]\ntitle = \"Field Notes\"\n\n[paths]\noutput = \"public\"\n")
            .unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.site.title, "Field Notes");
        assert_eq!(config.paths.output, "public");
        assert_eq!(config.paths.markdown, "markdown");
        assert_eq!(config.highlight, HighlightConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdblog.toml");
        std::fs::write(&path, "[site\ntitle = 1").unwrap();

        let err = Config::read(&path).unwrap_err();
        assert!(matches!(err, BuildError::ConfigParse { .. }));
        assert!(err.to_string().contains("mdblog.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, BuildError::ConfigIo { .. }));
    }
}
