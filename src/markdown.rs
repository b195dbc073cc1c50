//! Markdown Rendering
//!
//! pulldown-cmark with:
//! - tables, strikethrough, task lists
//! - syntax highlighting for fenced code (syntect)
//! - raw HTML in the source escaped rather than passed through
//! - link and image targets limited to relative, http(s) and mailto URLs

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    let themes = &THEME_SET.get_or_init(ThemeSet::load_defaults).themes;
    themes.get("base16-ocean.dark").or_else(|| themes.values().next())
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML string
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                // Server content is untrusted
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let dest_url = safe_url(dest_url);
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }
                Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                    let dest_url = safe_url(dest_url);
                    events.push(Event::Start(Tag::Image { link_type, dest_url, title, id }));
                }
                other => events.push(other),
            },
            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }

    events
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Keep relative targets and known schemes; everything else becomes `#`
fn safe_url(dest: CowStr<'_>) -> CowStr<'_> {
    let trimmed = dest.trim();
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    let allowed = match scheme_end {
        Some(i) if trimmed[i..].starts_with(':') => {
            let scheme = trimmed[..i].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    };
    if allowed {
        dest
    } else {
        tracing::warn!("[VIEWER] dropped unsafe link target");
        CowStr::Borrowed("#")
    }
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let plain = || format!("<pre><code>{}</code></pre>", escape_html(code));
    let Some(lang) = lang else {
        return plain();
    };
    let ss = get_syntax_set();
    let (Some(syntax), Some(theme)) = (ss.find_syntax_by_token(lang), get_theme()) else {
        return plain();
    };
    highlighted_html_for_string(code, ss, syntax, theme).unwrap_or_else(|_| plain())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let html = render_markdown("### Family A\n\n- **Trust**: belief in others\n");
        assert!(html.contains("<h3>Family A</h3>"));
        assert!(html.contains("<li><strong>Trust</strong>: belief in others</li>"));
    }

    #[test]
    fn test_raw_html_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n\nhi <b>there</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_plain_code_block() {
        let html = render_markdown("```\nlet x = 1 < 2;\n```\n");
        assert!(html.contains("<pre><code>let x = 1 &lt; 2;\n</code></pre>"));
    }

    #[test]
    fn test_script_urls_neutralized() {
        let html = render_markdown("[click](javascript:alert(document.cookie))");
        assert_eq!(html, "<p><a href=\"#\">click</a></p>\n");

        let html = render_markdown("![x](data:text/html;base64,PHNjcmlwdD4=)\n\n[y]( JavaScript:void(0))");
        assert!(!html.contains("data:"));
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains("<img src=\"#\""));
    }

    #[test]
    fn test_safe_urls_kept() {
        let html = render_markdown("[a](https://example.com/x) [b](/home) [c](#top) [d](mailto:me@example.com) [e](notes.md)");
        assert!(html.contains("href=\"https://example.com/x\""));
        assert!(html.contains("href=\"/home\""));
        assert!(html.contains("href=\"#top\""));
        assert!(html.contains("href=\"mailto:me@example.com\""));
        assert!(html.contains("href=\"notes.md\""));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
