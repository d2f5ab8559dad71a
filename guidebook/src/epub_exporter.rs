//! EPUB exporter
//!
//! Builds an EPUB 2 package in memory: one XHTML document per section,
//! an OPF manifest and spine, and an NCX navigation map. Block markup
//! comes from the shared HTML mapping in [`crate::html_exporter`].

use crate::html_exporter::{block_to_html, escape_html};
use crate::markdown_exporter::write_output;
use crate::source_model::{slugify, Section};
use std::io::{Cursor, Write};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Errors that can occur during EPUB export
#[derive(Error, Debug)]
pub enum EpubExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

/// Package metadata
#[derive(Debug, Clone)]
pub struct EpubOptions {
    pub title: String,
    /// BCP 47 language tag for `dc:language`
    pub language: String,
    /// Unique identifier, usually a `urn:uuid:` URN
    pub identifier: String,
}

impl EpubOptions {
    /// Options for `title` in English with a fresh random identifier
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            language: "en".to_string(),
            identifier: format!("urn:uuid:{}", Uuid::new_v4()),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml" />
  </rootfiles>
</container>"#;

/// Build an EPUB archive in memory
///
/// # Parameters
/// * `sections` - Sections in reading order, one XHTML file each
/// * `options` - Package metadata
///
/// # Returns
/// * `Ok(Vec<u8>)` - The ZIP bytes of the package
/// * `Err(EpubExportError)` - Error assembling the archive
pub fn to_epub_bytes(sections: &[Section], options: &EpubOptions) -> Result<Vec<u8>, EpubExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    // Readers sniff the first entry, so mimetype goes first and uncompressed
    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file("mimetype", stored)?;
    zip.write_all(b"application/epub+zip")?;

    let deflated = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    let mut manifest_items = Vec::new();
    let mut spine_items = Vec::new();
    let mut nav_points = Vec::new();

    for (index, section) in sections.iter().enumerate() {
        let number = index + 1;
        let file_name = format!("section-{}.xhtml", number);

        zip.start_file(format!("OEBPS/{}", file_name), deflated)?;
        zip.write_all(section_xhtml(section).as_bytes())?;

        manifest_items.push(format!(
            "<item id=\"item-{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>",
            number, file_name
        ));
        spine_items.push(format!("<itemref idref=\"item-{}\"/>", number));
        nav_points.push(format!(
            "<navPoint id=\"nav-{n}\" playOrder=\"{n}\">\n  <navLabel><text>{}</text></navLabel>\n  <content src=\"{}\"/>\n</navPoint>",
            escape_html(&section.title),
            file_name,
            n = number
        ));
    }

    zip.start_file("OEBPS/content.opf", deflated)?;
    zip.write_all(content_opf(options, &manifest_items, &spine_items).as_bytes())?;

    zip.start_file("OEBPS/toc.ncx", deflated)?;
    zip.write_all(toc_ncx(options, &nav_points).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Export sections to an EPUB file
///
/// # Parameters
/// * `sections` - Sections in reading order
/// * `options` - Package metadata
/// * `output_path` - Path where the package will be written
///
/// # Returns
/// * `Ok(())` - Successfully exported
/// * `Err(EpubExportError)` - Error during export
pub fn to_epub(
    sections: &[Section],
    options: &EpubOptions,
    output_path: &Path,
) -> Result<(), EpubExportError> {
    let bytes = to_epub_bytes(sections, options)?;
    write_output(output_path, &bytes)?;
    log::info!(
        "Wrote EPUB with {} sections to {}",
        sections.len(),
        output_path.display()
    );
    Ok(())
}

/// Suggested file name for a package titled `title`
///
/// Falls back to `guide.epub` when the title has no slug characters.
pub fn default_file_name(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        "guide.epub".to_string()
    } else {
        format!("{}.epub", slug)
    }
}

fn section_xhtml(section: &Section) -> String {
    let title = escape_html(&section.title);
    let body: Vec<String> = section.blocks.iter().map(block_to_html).collect();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head>
    <title>{title}</title>
  </head>
  <body>
    <h1>{title}</h1>
    {}
  </body>
</html>"#,
        body.join("\n    "),
        title = title
    )
}

fn content_opf(options: &EpubOptions, manifest_items: &[String], spine_items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>{}</dc:title>
    <dc:language>{}</dc:language>
    <dc:identifier id="BookId">{}</dc:identifier>
  </metadata>
  <manifest>
    {}
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
  </manifest>
  <spine toc="ncx">
    {}
  </spine>
</package>"#,
        escape_html(&options.title),
        escape_html(&options.language),
        escape_html(&options.identifier),
        manifest_items.join("\n    "),
        spine_items.join("\n    ")
    )
}

fn toc_ncx(options: &EpubOptions, nav_points: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="{}" />
    <meta name="dtb:depth" content="1" />
    <meta name="dtb:totalPageCount" content="0" />
    <meta name="dtb:maxPageNumber" content="0" />
  </head>
  <docTitle><text>{}</text></docTitle>
  <navMap>
    {}
  </navMap>
</ncx>"#,
        escape_html(&options.identifier),
        escape_html(&options.title),
        nav_points.join("\n")
    )
}
