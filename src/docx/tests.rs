use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::*;
use crate::converter::ConvertOptions;
use crate::tables::Tables;

const FONT: &str = "Kruti Dev 010";

fn docx_converter(max_input_bytes: u64) -> DocxConverter {
    DocxConverter::new(
        Converter::new(Tables::global(), ConvertOptions::default()),
        FONT.to_string(),
        max_input_bytes,
        2,
    )
}

fn body(paragraphs: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        paragraphs
    )
}

fn package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut s = String::new();
    file.read_to_string(&mut s).unwrap();
    s
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_story_part_names() {
    for name in [
        "word/document.xml",
        "word/header1.xml",
        "word/footer12.xml",
        "word/header.xml",
        "word/footnotes.xml",
        "word/endnotes.xml",
    ] {
        assert!(is_story_part(name), "{name}");
    }
    for name in [
        "word/styles.xml",
        "word/headerx.xml",
        "word/_rels/document.xml.rels",
        "docProps/core.xml",
        "word/media/image1.png",
    ] {
        assert!(!is_story_part(name), "{name}");
    }
}

#[test]
fn test_convert_body_and_header() {
    let input = package(&[
        ("[Content_Types].xml", "<Types/>"),
        (
            "word/document.xml",
            &body("<w:p><w:r><w:t>भारत</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>धर्म</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"),
        ),
        ("word/header1.xml", "<w:hdr><w:p><w:r><w:t>कि</w:t></w:r></w:p></w:hdr>"),
        ("word/styles.xml", "<w:styles>हिंदी</w:styles>"),
    ]);

    let (output, report) = docx_converter(1 << 20).convert_bytes(&input).unwrap();

    assert_eq!(report.parts, vec!["word/document.xml", "word/header1.xml"]);
    assert_eq!(report.runs_converted, 3);
    assert_eq!(report.unmapped, 0);

    let doc = read_entry(&output, "word/document.xml");
    assert!(doc.contains("<w:t>Hkkjr</w:t>"));
    assert!(doc.contains("<w:t>/keZ</w:t>"));
    assert!(doc.contains(r#"w:ascii="Kruti Dev 010""#));
    assert!(doc.starts_with(r#"<?xml version="1.0""#));

    assert!(read_entry(&output, "word/header1.xml").contains("<w:t>fd</w:t>"));
    // Non-story parts are copied untouched.
    assert_eq!(read_entry(&output, "word/styles.xml"), "<w:styles>हिंदी</w:styles>");
    assert_eq!(entry_names(&output), entry_names(&input));
}

#[test]
fn test_hyperlink_runs_converted() {
    let input = package(&[(
        "word/document.xml",
        &body(r#"<w:p><w:hyperlink r:id="rId5"><w:r><w:t>राम</w:t></w:r></w:hyperlink></w:p>"#),
    )]);
    let (output, report) = docx_converter(1 << 20).convert_bytes(&input).unwrap();
    assert_eq!(report.runs_converted, 1);
    let doc = read_entry(&output, "word/document.xml");
    assert!(doc.contains(r#"<w:hyperlink r:id="rId5"><w:r><w:rPr>"#));
    assert!(doc.contains("<w:t>jke</w:t>"));
}

#[test]
fn test_mixed_run_split_reported() {
    let input = package(&[(
        "word/document.xml",
        &body("<w:p><w:r><w:t>Page 1: भारत</w:t></w:r></w:p>"),
    )]);
    let (output, report) = docx_converter(1 << 20).convert_bytes(&input).unwrap();
    assert_eq!(report.runs_split, 1);
    let doc = read_entry(&output, "word/document.xml");
    assert!(doc.contains(r#"<w:t xml:space="preserve">Page 1: </w:t>"#));
    assert!(doc.contains("<w:t>Hkkjr</w:t>"));
}

#[test]
fn test_missing_document_part() {
    let input = package(&[("word/header1.xml", "<w:hdr/>")]);
    let err = docx_converter(1 << 20).convert_bytes(&input).unwrap_err();
    assert!(matches!(err, DocxError::MissingPart(ref p) if p == "word/document.xml"));
}

#[test]
fn test_not_a_zip() {
    let err = docx_converter(1 << 20).convert_bytes(b"plain text").unwrap_err();
    assert!(matches!(err, DocxError::Zip(_)));
}

#[test]
fn test_too_large() {
    let input = package(&[("word/document.xml", &body(""))]);
    let err = docx_converter(10).convert_bytes(&input).unwrap_err();
    assert!(matches!(err, DocxError::TooLarge { limit: 10, .. }));
}

#[test]
fn test_unpacked_story_parts_count_against_limit() {
    let filler = "क".repeat(20_000);
    let input = package(&[(
        "word/document.xml",
        &body(&format!("<w:p><w:r><w:t>{filler}</w:t></w:r></w:p>")),
    )]);
    let limit = 4096;
    assert!((input.len() as u64) < limit, "package should compress well");

    let err = docx_converter(limit).convert_bytes(&input).unwrap_err();
    match err {
        DocxError::TooLarge { size, limit: l } => {
            assert_eq!(l, limit);
            assert!(size > limit);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_xml_names_part() {
    let input = package(&[
        ("word/document.xml", &body("")),
        ("word/footer1.xml", "<w:ftr><w:p><w:r"),
    ]);
    let err = docx_converter(1 << 20).convert_bytes(&input).unwrap_err();
    match err {
        DocxError::InvalidXml { part, .. } => assert_eq!(part, "word/footer1.xml"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_convert_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.DOCX");
    let output_path = dir.path().join("out.docx");
    std::fs::write(
        &input_path,
        package(&[("word/document.xml", &body("<w:p><w:r><w:t>प्रेम</w:t></w:r></w:p>"))]),
    )
    .unwrap();

    let report = docx_converter(1 << 20)
        .convert_file(&input_path, &output_path)
        .unwrap();
    assert_eq!(report.runs_converted, 1);

    let output = std::fs::read(&output_path).unwrap();
    assert!(read_entry(&output, "word/document.xml").contains("<w:t>çse</w:t>"));
}

#[test]
fn test_convert_file_rejects_other_types() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("notes.txt");
    std::fs::write(&input_path, "राम").unwrap();
    let err = docx_converter(1 << 20)
        .convert_file(&input_path, &dir.path().join("out.docx"))
        .unwrap_err();
    assert!(matches!(err, DocxError::UnsupportedType(ref e) if e == "txt"));
}

#[test]
fn test_convert_file_size_checked_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("big.docx");
    std::fs::write(&input_path, vec![0u8; 64]).unwrap();
    let err = docx_converter(32)
        .convert_file(&input_path, &dir.path().join("out.docx"))
        .unwrap_err();
    assert!(matches!(err, DocxError::TooLarge { size: 64, limit: 32 }));
}
