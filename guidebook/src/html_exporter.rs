//! HTML exporter for guides
//!
//! This module holds the block to HTML mapping shared with the EPUB
//! exporter, and renders a whole guide as one standalone reader page:
//! - A contents nav listing every section and its headings
//! - One `<section>` per guide section, anchored by section id
//! - Inline code spans rendered as `<code>`

use crate::guide::GuideDocument;
use crate::markdown_exporter::write_output;
use crate::source_model::{Block, CalloutTone, ListVariant, Section, TextVariant};
use crate::toc::toc_items;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Render a guide as a standalone HTML page
///
/// # Parameters
/// * `document` - The guide to render
/// * `toc_min_level` - Shallowest heading level listed under each section
///
/// # Returns
/// * `String` - Complete HTML document
pub fn to_html_string(document: &GuideDocument, toc_min_level: u8) -> String {
    let mut output = String::new();

    write_html_header(&mut output, &document.title);

    output.push_str("<body>\n");
    output.push_str("<div class=\"container\">\n");
    output.push_str(&format!(
        "<h1 class=\"document-title\">{}</h1>\n",
        escape_html(&document.title)
    ));

    write_contents(&mut output, &document.sections, toc_min_level);

    for section in &document.sections {
        write_section(&mut output, section);
    }

    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Export a guide to an HTML file
///
/// # Parameters
/// * `document` - The guide to export
/// * `toc_min_level` - Shallowest heading level listed in the contents
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
/// * `Ok(())` - Successfully exported to HTML
/// * `Err(HtmlExportError)` - Error during export
pub fn to_html(
    document: &GuideDocument,
    toc_min_level: u8,
    output_path: &Path,
) -> Result<(), HtmlExportError> {
    let html = to_html_string(document, toc_min_level);
    write_output(output_path, html.as_bytes())?;
    log::info!("Wrote HTML page to {}", output_path.display());
    Ok(())
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the contents nav: sections, each with its own headings
fn write_contents(output: &mut String, sections: &[Section], toc_min_level: u8) {
    output.push_str("<nav class=\"contents\">\n<ol>\n");

    for section in sections {
        output.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            escape_html(&section.id),
            escape_html(&section.title)
        ));

        let items = toc_items(section, toc_min_level);
        if !items.is_empty() {
            output.push_str("\n<ul>\n");
            for item in items {
                output.push_str(&format!(
                    "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
                    item.level,
                    escape_html(&item.id),
                    escape_html(&item.text)
                ));
            }
            output.push_str("</ul>\n");
        }

        output.push_str("</li>\n");
    }

    output.push_str("</ol>\n</nav>\n");
}

/// Write a single section to the output
fn write_section(output: &mut String, section: &Section) {
    output.push_str(&format!("<section id=\"{}\">\n", escape_html(&section.id)));
    output.push_str(&format!(
        "<h1 class=\"section-heading\">{}</h1>\n",
        escape_html(&section.title)
    ));

    if section.is_empty() {
        output.push_str("<p class=\"empty\">No content</p>\n");
    }

    for block in &section.blocks {
        output.push_str(&block_to_html(block));
        output.push('\n');
    }

    output.push_str("</section>\n");
}

/// Map one block to an HTML fragment
///
/// Output is well-formed XHTML, so the EPUB exporter uses it unchanged.
pub fn block_to_html(block: &Block) -> String {
    match block {
        Block::Text(text) => {
            let content = inline_to_html(&text.content);
            match text.variant {
                TextVariant::Heading => {
                    format!("<h2 id=\"{}\">{}</h2>", escape_html(&text.id), content)
                }
                TextVariant::Subheading => {
                    format!("<h3 id=\"{}\">{}</h3>", escape_html(&text.id), content)
                }
                TextVariant::Quote => format!("<blockquote>{}</blockquote>", content),
                TextVariant::Paragraph => format!("<p>{}</p>", content),
            }
        }

        Block::List(list) => {
            let items: String = list
                .items
                .iter()
                .map(|item| format!("<li>{}</li>", inline_to_html(item)))
                .collect();
            match list.variant {
                ListVariant::Ordered => format!("<ol>{}</ol>", items),
                ListVariant::Bullet => format!("<ul>{}</ul>", items),
            }
        }

        Block::Callout(callout) => {
            let title = callout
                .title
                .as_deref()
                .map(|title| format!("<strong>{}</strong>", escape_html(title)))
                .unwrap_or_default();
            format!(
                "<div class=\"callout callout-{}\">{}<p>{}</p></div>",
                tone_class(callout.tone),
                title,
                inline_to_html(&callout.content)
            )
        }

        Block::Code(code) => match code.language.as_deref() {
            Some(language) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(language),
                escape_html(&code.content)
            ),
            None => format!("<pre><code>{}</code></pre>", escape_html(&code.content)),
        },

        Block::Hr(_) => "<hr/>".to_string(),
    }
}

fn tone_class(tone: CalloutTone) -> &'static str {
    match tone {
        CalloutTone::Tip => "tip",
        CalloutTone::Warning => "warning",
        CalloutTone::Example => "example",
        CalloutTone::Note => "note",
    }
}

/// Escape text and render backtick spans as `<code>`
///
/// An unmatched backtick is kept as a literal character.
pub fn inline_to_html(text: &str) -> String {
    let parts: Vec<&str> = text.split('`').collect();
    let mut result = String::new();

    for (index, part) in parts.iter().enumerate() {
        let is_span = index % 2 == 1;
        if is_span && index + 1 < parts.len() {
            result.push_str("<code>");
            result.push_str(&escape_html(part));
            result.push_str("</code>");
        } else {
            if is_span {
                result.push('`');
            }
            result.push_str(&escape_html(part));
        }
    }

    result
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// CSS styles for the HTML page
const CSS_STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
                 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue',
                 sans-serif;
    line-height: 1.6;
    color: #333;
    background-color: #f5f5f5;
    padding: 20px;
}

.container {
    max-width: 900px;
    margin: 0 auto;
    background: white;
    padding: 60px;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    border-radius: 4px;
}

.document-title {
    font-size: 2.5em;
    font-weight: 700;
    margin-bottom: 20px;
    color: #1a1a1a;
    border-bottom: 3px solid #0066cc;
    padding-bottom: 10px;
}

.contents {
    margin-bottom: 40px;
    padding: 20px;
    background-color: #f9f9f9;
    border-left: 4px solid #0066cc;
    border-radius: 4px;
}

.contents ul {
    list-style: none;
    padding-left: 16px;
    margin-bottom: 4px;
}

.contents .toc-level-3 {
    padding-left: 12px;
}

.contents .toc-level-4,
.contents .toc-level-5,
.contents .toc-level-6 {
    padding-left: 24px;
    font-size: 0.95em;
}

.section-heading {
    margin-top: 40px;
    margin-bottom: 20px;
    font-size: 2em;
    color: #1a1a1a;
    font-weight: 600;
    border-bottom: 2px solid #e0e0e0;
    padding-bottom: 8px;
}

h2, h3 {
    margin-top: 24px;
    margin-bottom: 12px;
    color: #333;
    font-weight: 600;
}

p {
    margin-bottom: 16px;
}

p.empty {
    color: #888;
    font-style: italic;
}

strong {
    font-weight: 600;
    color: #1a1a1a;
}

code {
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace;
    background-color: #f4f4f4;
    padding: 2px 6px;
    border-radius: 3px;
    font-size: 0.9em;
    color: #d73a49;
}

pre {
    background-color: #f6f8fa;
    border: 1px solid #e1e4e8;
    border-radius: 4px;
    padding: 16px;
    margin-bottom: 16px;
    overflow-x: auto;
}

pre code {
    background: none;
    padding: 0;
    color: #24292e;
    font-size: 0.9em;
    line-height: 1.45;
}

blockquote {
    border-left: 4px solid #ddd;
    padding-left: 16px;
    margin: 16px 0;
    color: #666;
    font-style: italic;
}

ul, ol {
    margin-bottom: 16px;
    padding-left: 30px;
}

li {
    margin-bottom: 8px;
}

.callout {
    margin: 16px 0;
    padding: 12px 16px;
    border-radius: 4px;
    border-left: 4px solid #0066cc;
    background-color: #f1f7ff;
}

.callout-warning {
    border-left-color: #d73a49;
    background-color: #ffeef0;
}

.callout-tip {
    border-left-color: #28a745;
    background-color: #f0fff4;
}

.callout p {
    margin-bottom: 0;
}

hr {
    border: none;
    border-top: 2px solid #e1e4e8;
    margin: 32px 0;
}

a {
    color: #0366d6;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

@media print {
    body {
        background: white;
        padding: 0;
    }

    .container {
        box-shadow: none;
        padding: 0;
    }

    .contents {
        display: none;
    }

    .section-heading {
        page-break-after: avoid;
    }
}

@media screen and (max-width: 768px) {
    .container {
        padding: 30px 20px;
    }

    .document-title {
        font-size: 2em;
    }
}
"#;
