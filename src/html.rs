//! Standalone HTML preview of a rendered reference document.

use comrak::Options;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::markdown::MarkdownRenderer;
use crate::model::Document;

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; line-height: 1.5; color: #1f2328; }
.container { max-width: 980px; margin: 0 auto; padding: 32px 16px; }
h1, h2 { border-bottom: 1px solid #d1d9e0; padding-bottom: .3em; }
table { border-collapse: collapse; display: block; overflow: auto; margin-bottom: 16px; }
th, td { border: 1px solid #d1d9e0; padding: 6px 13px; vertical-align: top; }
th { background: #f6f8fa; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 85%; white-space: pre; }
pre { background: #f6f8fa; padding: 16px; overflow: auto; border-radius: 6px; }
";

/// Converts rendered markdown to HTML.
///
/// Enables the GFM extensions the renderer relies on (tables,
/// strikethrough, autolinks) and heading ids so table of contents links
/// resolve. Raw HTML passes through: record text is trusted and table
/// cells use `<br>` for line breaks.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::default();

    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());

    options.render.unsafe_ = true;

    comrak::markdown_to_html(markdown, &options)
}

/// Wraps page content with standard HTML structure.
///
/// # Arguments
///
/// * `title`: Page title text
/// * `body`: Page body markup
pub fn page_wrapper(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main class="container" {
                    (body)
                }
            }
        }
    }
}

/// Renders the document as a complete HTML page.
pub fn render_html(doc: &Document, renderer: &MarkdownRenderer) -> String {
    let body = markdown_to_html(&renderer.render(doc));
    page_wrapper(doc.title(), PreEscaped(body)).into_string()
}
