use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{BuildError, Result};

/// Copy every file directly inside `src_dir` into `dest_dir`.
///
/// A missing `src_dir` is not an error: nothing is created and `0` is
/// returned. Sub-directories are not descended into. Existing files in
/// `dest_dir` with the same name are overwritten.
pub fn copy_images(src_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !src_dir.is_dir() {
        debug!(path = %src_dir.display(), "no images directory, skipping");
        return Ok(0);
    }

    create_dir(dest_dir)?;

    let entries = fs::read_dir(src_dir).map_err(|error| BuildError::ListDir {
        path: src_dir.to_path_buf(),
        message: error.to_string(),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|error| BuildError::ListDir {
            path: src_dir.to_path_buf(),
            message: error.to_string(),
        })?;
        let from = entry.path();

        if from.is_dir() {
            debug!(path = %from.display(), "skipping nested directory");
            continue;
        }

        let to = dest_dir.join(entry.file_name());
        copy_file(&from, &to)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();
    if !names.is_empty() {
        info!("Copied images: {}", names.join(", "));
    }

    Ok(names.len())
}

/// Copy the site stylesheet. Unlike images, the stylesheet is required.
pub fn copy_stylesheet(src_path: &Path, dest_path: &Path) -> Result<()> {
    if !src_path.is_file() {
        return Err(BuildError::MissingStylesheet {
            path: src_path.to_path_buf(),
        });
    }

    copy_file(src_path, dest_path)?;
    debug!(from = %src_path.display(), to = %dest_path.display(), "copied stylesheet");

    Ok(())
}

pub(crate) fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|source| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}
