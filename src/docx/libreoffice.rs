//! Legacy `.doc` → `.docx` through a headless LibreOffice.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::DocxError;

const SOFFICE: &str = "soffice";

/// A converted document inside a temporary directory that lives as long as
/// this value.
pub(super) struct Upgraded {
    _dir: TempDir,
    path: PathBuf,
}

impl Upgraded {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(super) fn to_docx(input: &Path) -> Result<Upgraded, DocxError> {
    let dir = tempfile::Builder::new().prefix("kruti_doc_").tempdir()?;

    let output = Command::new(SOFFICE)
        .args(["--headless", "--convert-to", "docx", "--outdir"])
        .arg(dir.path())
        .arg(input)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocxError::LibreOfficeMissing,
            _ => DocxError::Io(e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(DocxError::LibreOffice(format!(
            "exit code {}: {}",
            output.status.code().unwrap_or(-1),
            detail.trim()
        )));
    }

    let path = find_output(dir.path(), input)?;
    debug!(input = %input.display(), output = %path.display(), "converted legacy .doc");
    Ok(Upgraded { _dir: dir, path })
}

/// `<stem>.docx`, or the only `.docx` LibreOffice left in `dir`.
fn find_output(dir: &Path, input: &Path) -> Result<PathBuf, DocxError> {
    if let Some(stem) = input.file_stem() {
        let expected = dir.join(format!("{}.docx", stem.to_string_lossy()));
        if expected.exists() {
            return Ok(expected);
        }
    }

    let mut produced = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_docx = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
        if is_docx {
            produced.push(path);
        }
    }

    match produced.len() {
        1 => Ok(produced.remove(0)),
        _ => Err(DocxError::LibreOffice(
            "conversion did not produce a .docx file".to_string(),
        )),
    }
}
