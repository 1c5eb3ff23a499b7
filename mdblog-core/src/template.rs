use serde::Serialize;
use tera::{Context, Tera};

use crate::config::HighlightConfig;
use crate::error::Result;
use crate::site::NavLink;

const TITLE_TOKEN: &str = "{{title}}";
const CONTENT_TOKEN: &str = "{{content}}";

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = r#"
<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <title>{{ site_title }}</title>
    <link rel="stylesheet" href="{{ stylesheet | safe }}" />
  </head>
  <body>
    <h1>{{ site_title }}</h1>
    <ul>{% for link in links %}<li><a href="{{ link.href | safe }}" target="_blank" rel="noopener noreferrer">{{ link.title }}</a></li>{% endfor %}</ul>
  </body>
</html>
"#;

/// Client-side highlighting assets appended after every page body.
#[derive(Debug, Clone)]
pub struct AssetTags {
    pub stylesheet: String,
    pub script: String,
}

impl Default for AssetTags {
    fn default() -> Self {
        Self::from(&HighlightConfig::default())
    }
}

impl From<&HighlightConfig> for AssetTags {
    fn from(config: &HighlightConfig) -> Self {
        Self {
            stylesheet: config.stylesheet.clone(),
            script: config.script.clone(),
        }
    }
}

impl AssetTags {
    pub fn to_html(&self) -> String {
        format!(
            "\n<link rel=\"stylesheet\" href=\"{}\" />\n<script src=\"{}\"></script>\n<script>hljs.highlightAll();</script>\n",
            html_escape::encode_double_quoted_attribute(&self.stylesheet),
            html_escape::encode_double_quoted_attribute(&self.script),
        )
    }
}

/// The page layout. Every `{{title}}` and `{{content}}` token is substituted
/// in a single pass, so substituted text is never scanned for tokens again.
#[derive(Debug, Clone)]
pub struct Layout {
    source: String,
}

impl Layout {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn render_page(&self, title: &str, content_html: &str, assets: &AssetTags) -> String {
        let title = html_escape::encode_text(title).into_owned();
        let content = format!("{}{}", content_html, assets.to_html());

        let mut out = String::with_capacity(self.source.len() + content.len());
        let mut rest = self.source.as_str();

        while let Some((offset, token)) = next_token(rest) {
            out.push_str(&rest[..offset]);
            out.push_str(if token == TITLE_TOKEN { &title } else { &content });
            rest = &rest[offset + token.len()..];
        }
        out.push_str(rest);

        out
    }
}

fn next_token(haystack: &str) -> Option<(usize, &'static str)> {
    [TITLE_TOKEN, CONTENT_TOKEN]
        .into_iter()
        .filter_map(|token| haystack.find(token).map(|offset| (offset, token)))
        .min_by_key(|(offset, _)| *offset)
}

#[derive(Debug, Serialize)]
struct IndexEntry {
    title: String,
    href: String,
}

/// Renders the root index document listing every generated page.
pub struct IndexTemplate {
    tera: Tera,
}

impl IndexTemplate {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;

        Ok(Self { tera })
    }

    pub fn render(&self, site_title: &str, stylesheet_href: &str, links: &[NavLink]) -> Result<String> {
        // Titles go through tera's autoescape; hrefs are escaped for an attribute
        // here since tera would also escape the slashes.
        let entries: Vec<IndexEntry> = links
            .iter()
            .map(|link| IndexEntry {
                title: link.title.clone(),
                href: html_escape::encode_double_quoted_attribute(&link.href).into_owned(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("site_title", site_title);
        context.insert(
            "stylesheet",
            &html_escape::encode_double_quoted_attribute(stylesheet_href),
        );
        context.insert("links", &entries);

        Ok(self.tera.render(INDEX_TEMPLATE_NAME, &context)?)
    }
}
