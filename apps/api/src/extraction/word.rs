//! Word document text extraction.
//!
//! The upload is spooled to a named temp file and the OOXML package is read
//! back from that path. The temp file is owned by a [`NamedTempFile`] guard,
//! so it is removed on every return path, errors included.
//!
//! Output is one line per top-level body paragraph, joined by `\n`. Table
//! and textbox content is skipped. Legacy binary `.doc` files are not OOXML packages and
//! fail with [`ExtractionError::Word`].

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::{Builder, NamedTempFile};

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_word_text(data: &[u8], suffix: &str) -> Result<String, ExtractionError> {
    extract_word_text_in(&std::env::temp_dir(), data, suffix)
}

pub fn extract_word_text_in(
    dir: &Path,
    data: &[u8],
    suffix: &str,
) -> Result<String, ExtractionError> {
    let tmp = spool_to_temp_file(dir, data, suffix)?;
    let xml = read_document_part(File::open(tmp.path())?)?;
    paragraphs_to_text(&xml)
}

fn spool_to_temp_file(
    dir: &Path,
    data: &[u8],
    suffix: &str,
) -> Result<NamedTempFile, ExtractionError> {
    let mut tmp = Builder::new()
        .prefix("resume-")
        .suffix(suffix)
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(tmp)
}

fn read_document_part(file: File) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(word_err)?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(word_err)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Containers whose content never reaches paragraph text. Textboxes are
/// stored twice (`mc:Choice` and `mc:Fallback`) inside `mc:AlternateContent`.
const SKIPPED_CONTAINERS: &[&[u8]] = &[b"w:tbl", b"w:txbxContent", b"mc:AlternateContent"];

fn is_skipped(name: &[u8]) -> bool {
    SKIPPED_CONTAINERS.contains(&name)
}

fn paragraphs_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut skip_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(word_err)? {
            Event::Start(e) => {
                let name = e.name();
                if is_skipped(name.as_ref()) {
                    skip_depth += 1;
                } else if skip_depth == 0 {
                    match name.as_ref() {
                        b"w:p" => paragraph_depth += 1,
                        b"w:r" => in_run = true,
                        b"w:t" => in_text = true,
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                let name = e.name();
                if is_skipped(name.as_ref()) {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if skip_depth == 0 {
                    match name.as_ref() {
                        b"w:p" => {
                            paragraph_depth = paragraph_depth.saturating_sub(1);
                            if paragraph_depth == 0 {
                                paragraphs.push(std::mem::take(&mut current));
                            }
                        }
                        b"w:r" => in_run = false,
                        b"w:t" => in_text = false,
                        _ => {}
                    }
                }
            }
            Event::Empty(e) if skip_depth == 0 => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" | b"w:ptab" if in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_run => current.push('\n'),
                b"w:noBreakHyphen" if in_run => current.push('-'),
                _ => {}
            },
            Event::Text(e) if in_text && skip_depth == 0 => {
                current.push_str(&e.unescape().map_err(word_err)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

fn word_err(e: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Word(e.to_string())
}
