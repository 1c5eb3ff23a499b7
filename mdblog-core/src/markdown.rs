use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug;

use crate::error::{BuildError, Result};

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Look up one of syntect's bundled themes by name.
pub fn highlight_theme(name: &str) -> Result<&'static Theme> {
    THEME_SET
        .themes
        .get(name)
        .ok_or_else(|| BuildError::UnknownTheme {
            name: name.to_string(),
        })
}

struct CodeBuffer {
    lang: String,
    text: String,
}

/// Convert markdown to HTML, replacing every code block with highlighted markup.
pub fn render_markdown(source: &str, theme: &Theme) -> String {
    let parser = Parser::new_ext(source, markdown_options());

    let mut processed_events = Vec::new();
    let mut code: Option<CodeBuffer> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info).to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some(CodeBuffer {
                    lang,
                    text: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code.take() {
                    let highlighted = highlight_code(&block.text, &block.lang, theme);
                    processed_events.push(Event::Html(highlighted.into()));
                }
            }
            event => match code.as_mut() {
                Some(block) => {
                    if let Event::Text(text) = event {
                        block.text.push_str(&text);
                    }
                }
                None => processed_events.push(event),
            },
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());
    out
}

// Metadata blocks, math and wikilinks stay off: a leading `---` block is
// ordinary markdown here.
fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Highlight a code snippet, falling back to the plain-text grammar when the
/// language is missing or unknown.
pub fn highlight_code(code: &str, lang: &str, theme: &Theme) -> String {
    let syntax = find_syntax(lang).unwrap_or_else(|| {
        if !lang.is_empty() {
            debug!(lang, "no grammar for code fence language, using plain text");
        }
        SYNTAX_SET.find_syntax_plain_text()
    });

    highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).unwrap_or_else(|_| {
        format!(
            "<pre><code>{}</code></pre>\n",
            html_escape::encode_text(code)
        )
    })
}

// "rust,ignore" and "python title=x" both select on the first token
fn fence_language(info: &str) -> &str {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or("")
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    if lang.is_empty() {
        return None;
    }

    SYNTAX_SET
        .find_syntax_by_token(lang)
        .or_else(|| {
            SYNTAX_SET
                .syntaxes()
                .iter()
                .find(|syntax| syntax.name.eq_ignore_ascii_case(lang))
        })
        .or_else(|| {
            // Fallback mappings for languages syntect doesn't bundle
            match lang.to_ascii_lowercase().as_str() {
                "nix" | "ts" | "typescript" | "jsx" | "tsx" => {
                    SYNTAX_SET.find_syntax_by_name("JavaScript")
                }
                "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
                "shell" | "console" | "zsh" => {
                    SYNTAX_SET.find_syntax_by_name("Bourne Again Shell (bash)")
                }
                _ => None,
            }
        })
}
