use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use config::{Config as ConfigBuilder, File, FileFormat};
use mdblog_core::Config;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "mdblog.toml";

/// CLI flags that override a key of the configuration file.
const PATH_OVERRIDES: [(&str, &str); 4] = [
    ("markdown", "paths.markdown"),
    ("template", "paths.template"),
    ("output", "paths.output"),
    ("index", "paths.index"),
];

/// Everything a build needs once all configuration sources are merged
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub root: PathBuf,
    pub config: Config,
}

/// Load configuration with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Configuration file
/// 3. Defaults (lowest priority)
pub fn load_build_config(args: &ArgMatches) -> Result<BuildSettings> {
    let root = args
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut builder = ConfigBuilder::builder();

    // 1. Start with defaults
    builder = builder.add_source(ConfigBuilder::try_from(&Config::default())?);

    // 2. Add configuration file; an explicit one must exist
    match args.get_one::<String>("config") {
        Some(file) => {
            let path = root.join(file);
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }
        None => {
            let path = root.join(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
        }
    }

    // 3. Override with CLI arguments
    for (arg, key) in PATH_OVERRIDES {
        if let Some(value) = args.try_get_one::<String>(arg).unwrap_or(None) {
            builder = builder.set_override(key, value.as_str())?;
        }
    }

    let config: Config = builder
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    Ok(BuildSettings { root, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::build::make_command;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["mdblog"];
        argv.extend_from_slice(args);
        make_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();

        let settings = load_build_config(&matches(&["--root", root])).unwrap();
        assert_eq!(settings.root, dir.path());
        assert_eq!(settings.config, Config::default());
        assert_eq!(settings.config.paths.markdown, "markdown");
        assert_eq!(settings.config.paths.output, "dist");
        assert_eq!(settings.config.site.title, "All Blogs");
    }

    #[test]
    fn test_no_arguments_uses_current_dir() {
        let settings = load_build_config(&matches(&[])).unwrap();
        assert_eq!(settings.root, PathBuf::from("."));
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[site]\ntitle = \"Field Notes\"\n\n[paths]\noutput = \"public\"\n",
        )
        .unwrap();

        let settings =
            load_build_config(&matches(&["--root", dir.path().to_str().unwrap()])).unwrap();
        assert_eq!(settings.config.site.title, "Field Notes");
        assert_eq!(settings.config.paths.output, "public");
        // Should still have defaults for keys the file leaves out
        assert_eq!(settings.config.paths.template, "template");
    }

    #[test]
    fn test_cli_args_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[paths]\noutput = \"public\"\nmarkdown = \"posts\"\n",
        )
        .unwrap();

        let settings = load_build_config(&matches(&[
            "--root",
            dir.path().to_str().unwrap(),
            "--output",
            "site",
            "--index",
            "site/index.html",
        ]))
        .unwrap();

        assert_eq!(settings.config.paths.output, "site");
        assert_eq!(settings.config.paths.index, "site/index.html");
        assert_eq!(settings.config.paths.markdown, "posts");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_build_config(&matches(&[
            "--root",
            dir.path().to_str().unwrap(),
            "--config",
            "custom.toml",
        ]));
        assert!(result.is_err());
    }
}
