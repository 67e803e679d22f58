//! Word document conversion.
//!
//! A `.docx` package is rewritten entry by entry: story parts (body,
//! headers, footers, footnotes, endnotes) have their Devanagari runs
//! converted and put in the Kruti Dev font, everything else is copied
//! through unchanged. Legacy `.doc` input is first turned into `.docx` by
//! LibreOffice.

mod libreoffice;
mod runs;
pub(crate) mod xml;

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, debug_span};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::batch::par_map;
use crate::converter::Converter;
use crate::settings::settings;

use runs::RunRewriter;

const MAIN_PART: &str = "word/document.xml";

#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("unsupported file type {0:?}: only .doc and .docx are supported")]
    UnsupportedType(String),
    #[error("input is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
    #[error("package has no {0}")]
    MissingPart(String),
    #[error("malformed XML in {part}: {source}")]
    InvalidXml {
        part: String,
        source: xml::XmlError,
    },
    #[error("legacy .doc conversion requires LibreOffice ('soffice'), which is not installed")]
    LibreOfficeMissing,
    #[error("LibreOffice conversion failed: {0}")]
    LibreOffice(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocxReport {
    /// Story parts that were rewritten, in package order.
    pub parts: Vec<String>,
    pub runs_converted: usize,
    pub runs_split: usize,
    /// Devanagari codepoints copied through without a mapping.
    pub unmapped: usize,
}

pub struct DocxConverter {
    converter: Converter,
    font_name: String,
    max_input_bytes: u64,
    workers: usize,
}

impl Default for DocxConverter {
    fn default() -> Self {
        let s = settings();
        Self::new(
            Converter::default(),
            s.docx.font_name.clone(),
            s.docx.max_input_bytes,
            s.batch.workers,
        )
    }
}

/// Word story parts that carry run text.
pub fn is_story_part(name: &str) -> bool {
    let Some(file) = name.strip_prefix("word/") else {
        return false;
    };
    if file.contains('/') || !file.ends_with(".xml") {
        return false;
    }
    let stem = &file[..file.len() - ".xml".len()];
    matches!(stem, "document" | "footnotes" | "endnotes")
        || ["header", "footer"].iter().any(|kind| {
            stem.strip_prefix(kind)
                .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
        })
}

impl DocxConverter {
    pub fn new(converter: Converter, font_name: String, max_input_bytes: u64, workers: usize) -> Self {
        Self {
            converter,
            font_name,
            max_input_bytes,
            workers,
        }
    }

    /// Convert an in-memory `.docx` package.
    pub fn convert_bytes(&self, input: &[u8]) -> Result<(Vec<u8>, DocxReport), DocxError> {
        let _span = debug_span!("docx_convert", bytes = input.len()).entered();
        self.check_size(input.len() as u64)?;

        let mut archive = ZipArchive::new(Cursor::new(input))?;
        let mut stories: Vec<(usize, String, String)> = Vec::new();
        // Uncompressed bytes of story parts read so far, bounded by the same limit.
        let mut unpacked = 0u64;
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            if !is_story_part(&name) {
                continue;
            }
            self.check_size(unpacked.saturating_add(file.size()))?;

            // The declared size can lie; never read past the remaining budget.
            let budget = self.max_input_bytes - unpacked;
            let mut raw = Vec::new();
            file.by_ref().take(budget.saturating_add(1)).read_to_end(&mut raw)?;
            unpacked += raw.len() as u64;
            self.check_size(unpacked)?;
            let xml = String::from_utf8(raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            stories.push((i, name, xml));
        }
        if !stories.iter().any(|(_, name, _)| name == MAIN_PART) {
            return Err(DocxError::MissingPart(MAIN_PART.to_string()));
        }

        let rewriter = RunRewriter::new(&self.converter, &self.font_name);
        let rewritten = par_map(&stories, self.workers, |(_, name, xml)| {
            rewriter
                .rewrite_part(xml)
                .map_err(|source| DocxError::InvalidXml {
                    part: name.clone(),
                    source,
                })
        });

        let mut report = DocxReport::default();
        let mut replacements = Vec::with_capacity(stories.len());
        for ((index, name, _), result) in stories.iter().zip(rewritten) {
            let (xml, stats) = result?;
            debug!(
                part = %name,
                runs_converted = stats.runs_converted,
                runs_split = stats.runs_split,
                "processed story part"
            );
            report.parts.push(name.clone());
            report.runs_converted += stats.runs_converted;
            report.runs_split += stats.runs_split;
            report.unmapped += stats.unmapped;
            replacements.push((*index, xml));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(input.len())));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut replacements = replacements.into_iter().peekable();
        for i in 0..archive.len() {
            match replacements.next_if(|(index, _)| *index == i) {
                Some((_, xml)) => {
                    let name = archive.by_index_raw(i)?.name().to_string();
                    writer.start_file(name, options)?;
                    writer.write_all(xml.as_bytes())?;
                }
                None => writer.raw_copy_file(archive.by_index_raw(i)?)?,
            }
        }
        let output = writer.finish()?.into_inner();

        Ok((output, report))
    }

    /// Convert a `.docx` or `.doc` file and write the result as `.docx`.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<DocxReport, DocxError> {
        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if ext != "docx" && ext != "doc" {
            return Err(DocxError::UnsupportedType(ext));
        }
        self.check_size(fs::metadata(input)?.len())?;

        let bytes = if ext == "doc" {
            let upgraded = libreoffice::to_docx(input)?;
            fs::read(upgraded.path())?
        } else {
            fs::read(input)?
        };

        let (converted, report) = self.convert_bytes(&bytes)?;
        fs::write(output, converted)?;
        debug!(
            input = %input.display(),
            output = %output.display(),
            parts = report.parts.len(),
            "document converted"
        );
        Ok(report)
    }

    fn check_size(&self, size: u64) -> Result<(), DocxError> {
        if size > self.max_input_bytes {
            return Err(DocxError::TooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
