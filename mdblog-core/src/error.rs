use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Stylesheet not found: {path}")]
    MissingStylesheet { path: PathBuf },

    #[error("Layout template not found: {path}")]
    MissingLayout { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {message}")]
    ListDir { path: PathBuf, message: String },

    #[error("Unknown highlight theme: {name}")]
    UnknownTheme { name: String },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Config file {path} could not be read: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
