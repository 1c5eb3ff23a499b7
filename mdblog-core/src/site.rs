use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{BuildError, Result};

pub const MARKDOWN_SUFFIX: &str = ".md";

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub source: PathBuf,
}

impl Page {
    /// Build a page from a markdown file path, or `None` if the file name
    /// doesn't end in `.md`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let title = title_from_file_name(file_name)?;

        Some(Self {
            title: title.to_string(),
            source: path.to_path_buf(),
        })
    }

    pub fn out_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.html", self.title))
    }
}

/// A link from the index document to one generated page.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

impl NavLink {
    pub fn new(page: &Page, out_path: &Path, index_dir: &Path) -> Self {
        Self {
            title: page.title.clone(),
            href: relative_href(index_dir, out_path),
        }
    }
}

pub fn title_from_file_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(MARKDOWN_SUFFIX)
}

/// Markdown pages directly inside `dir`, sorted by file name.
pub fn list_pages(dir: &Path) -> Result<Vec<Page>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|error| BuildError::ListDir {
            path: dir.to_path_buf(),
            message: error.to_string(),
        })?;

        // Only regular files; a directory named "x.md" is not a page
        if !entry.path().is_file() {
            continue;
        }

        if let Some(page) = Page::from_path(entry.path()) {
            pages.push(page);
        }
    }

    Ok(pages)
}

/// Express `target` relative to `base` as a `/`-separated href, stepping out
/// with `..` when `target` isn't under `base`. Paths below `base` get a `./`
/// prefix. An absolute target under a relative base stays absolute.
pub fn relative_href(base: &Path, target: &Path) -> String {
    let Some(relative) = pathdiff::diff_paths(normalize(target), normalize(base)) else {
        return target.to_string_lossy().replace('\\', "/");
    };
    if relative.is_absolute() {
        return relative.to_string_lossy().replace('\\', "/");
    }

    let href = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    match relative.components().next() {
        Some(Component::ParentDir) => href,
        _ => format!("./{href}"),
    }
}

// Drop "." components so "./dist/a.html" sits under "." and "" alike
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_title_strips_suffix() {
        assert_eq!(title_from_file_name("hello.md"), Some("hello"));
        assert_eq!(title_from_file_name("my.post.md"), Some("my.post"));
        assert_eq!(title_from_file_name("notes.txt"), None);
        assert_eq!(title_from_file_name("README.MD"), None);
    }

    #[test]
    fn test_page_out_path() {
        let page = Page::from_path(Path::new("markdown/first.md")).unwrap();
        assert_eq!(page.title, "first");
        assert_eq!(page.out_path(Path::new("dist")), PathBuf::from("dist/first.html"));
    }

    #[test]
    fn test_list_pages_is_flat_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "# b").unwrap();
        fs::write(dir.path().join("a.md"), "# a").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images").join("nested.md"), "skip").unwrap();
        fs::create_dir(dir.path().join("folder.md")).unwrap();

        let titles: Vec<String> = list_pages(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_list_pages_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_pages(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, BuildError::ListDir { .. }));
    }

    #[test]
    fn test_relative_href() {
        assert_eq!(
            relative_href(Path::new("."), Path::new("./dist/a.html")),
            "./dist/a.html"
        );
        assert_eq!(
            relative_href(Path::new(""), Path::new("dist/a.html")),
            "./dist/a.html"
        );
        assert_eq!(
            relative_href(Path::new("/site"), Path::new("/site/dist/a.html")),
            "./dist/a.html"
        );
    }

    #[test]
    fn test_relative_href_steps_out_of_base() {
        assert_eq!(
            relative_href(Path::new("/site/public"), Path::new("/site/out/a.html")),
            "../out/a.html"
        );
        assert_eq!(
            relative_href(Path::new("/site/a/b"), Path::new("/site/dist/a.html")),
            "../../dist/a.html"
        );
        assert_eq!(
            relative_href(Path::new("public"), Path::new("./dist/a.html")),
            "../dist/a.html"
        );
    }
}
