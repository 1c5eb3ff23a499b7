use std::fs;
use std::path::{Path, PathBuf};

use syntect::highlighting::Theme;
use tracing::{debug, info};

use crate::assets::{copy_images, copy_stylesheet, create_dir};
use crate::config::{Config, HighlightConfig, SiteConfig};
use crate::error::{BuildError, Result};
use crate::markdown::{highlight_theme, render_markdown};
use crate::site::{NavLink, Page, list_pages, relative_href};
use crate::template::{AssetTags, IndexTemplate, Layout};

const LAYOUT_FILE: &str = "layout.html";
const STYLESHEET_FILE: &str = "style.css";
const IMAGES_DIR: &str = "images";

pub struct SiteBuilder {
    markdown_dir: PathBuf,
    images_dir: Option<PathBuf>,
    template_dir: PathBuf,
    output_dir: PathBuf,
    index_path: PathBuf,
    site: SiteConfig,
    highlight: HighlightConfig,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self::from_config("", &Config::default())
    }

    /// Resolve every configured path against `root`.
    pub fn from_config<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        let root = root.as_ref();

        Self {
            markdown_dir: root.join(&config.paths.markdown),
            images_dir: None,
            template_dir: root.join(&config.paths.template),
            output_dir: root.join(&config.paths.output),
            index_path: root.join(&config.paths.index),
            site: config.site.clone(),
            highlight: config.highlight.clone(),
        }
    }

    pub fn markdown_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.markdown_dir = path.as_ref().to_path_buf();
        self
    }

    /// Defaults to `images/` inside the markdown directory.
    pub fn images_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.images_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn template_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn index_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.index_path = path.as_ref().to_path_buf();
        self
    }

    pub fn site_title<S: Into<String>>(mut self, title: S) -> Self {
        self.site.title = title.into();
        self
    }

    pub fn highlight(mut self, config: HighlightConfig) -> Self {
        self.highlight = config;
        self
    }

    pub fn build(self) -> Result<Site> {
        let theme = highlight_theme(&self.highlight.theme)?;
        let index_template = IndexTemplate::new()?;

        let images_dir = self
            .images_dir
            .unwrap_or_else(|| self.markdown_dir.join(IMAGES_DIR));

        Ok(Site {
            layout_path: self.template_dir.join(LAYOUT_FILE),
            stylesheet_path: self.template_dir.join(STYLESHEET_FILE),
            markdown_dir: self.markdown_dir,
            images_dir,
            output_dir: self.output_dir,
            index_path: self.index_path,
            site_title: self.site.title,
            assets: AssetTags::from(&self.highlight),
            theme,
            index_template,
        })
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub links: Vec<NavLink>,
    pub images_copied: usize,
    pub index_path: PathBuf,
}

pub struct Site {
    markdown_dir: PathBuf,
    images_dir: PathBuf,
    layout_path: PathBuf,
    stylesheet_path: PathBuf,
    output_dir: PathBuf,
    index_path: PathBuf,
    site_title: String,
    assets: AssetTags,
    theme: &'static Theme,
    index_template: IndexTemplate,
}

impl Site {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the whole pipeline. The first failure aborts the run; anything
    /// written before it stays on disk.
    pub fn generate(&self) -> Result<BuildReport> {
        create_dir(&self.output_dir)?;

        let images_copied = copy_images(&self.images_dir, &self.output_dir.join(IMAGES_DIR))?;
        let stylesheet_out = self.output_dir.join(STYLESHEET_FILE);
        copy_stylesheet(&self.stylesheet_path, &stylesheet_out)?;

        let layout = self.load_layout()?;

        let index_dir = self.index_path.parent().unwrap_or(Path::new(""));
        let mut links = Vec::new();

        for page in list_pages(&self.markdown_dir)? {
            let out_path = self.render_page(&page, &layout)?;
            links.push(NavLink::new(&page, &out_path, index_dir));
        }

        let stylesheet_href = relative_href(index_dir, &stylesheet_out);
        let index = self
            .index_template
            .render(&self.site_title, &stylesheet_href, &links)?;
        self.write_index(&index)?;

        info!("Compiled {} markdown pages with syntax highlighting", links.len());

        Ok(BuildReport {
            links,
            images_copied,
            index_path: self.index_path.clone(),
        })
    }

    fn load_layout(&self) -> Result<Layout> {
        if !self.layout_path.is_file() {
            return Err(BuildError::MissingLayout {
                path: self.layout_path.clone(),
            });
        }

        let source = read_file(&self.layout_path)?;
        Ok(Layout::new(source))
    }

    fn render_page(&self, page: &Page, layout: &Layout) -> Result<PathBuf> {
        let markdown = read_file(&page.source)?;
        let content = render_markdown(&markdown, self.theme);
        let html = layout.render_page(&page.title, &content, &self.assets);

        let out_path = page.out_path(&self.output_dir);
        write_file(&out_path, &html)?;
        debug!(from = %page.source.display(), to = %out_path.display(), "rendered page");
        info!("Wrote {}", out_path.display());

        Ok(out_path)
    }

    // Always overwritten; an existing index only changes the log line
    fn write_index(&self, html: &str) -> Result<()> {
        if let Some(parent) = self.index_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }

        let existed = self.index_path.exists();
        write_file(&self.index_path, html)?;

        if existed {
            info!("Replaced existing index at {}", self.index_path.display());
        } else {
            info!("Created index at {}", self.index_path.display());
        }

        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
