//! Source-file wrapper and format detection heuristics.

use crate::errors::ImportError;

/// File-picker input: byte content plus the original name and the declared
/// content type. The core validates the format before parsing anything.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), content_type: None, bytes }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    Workbook,
}

/// Decide the format from the extension, then the declared content type,
/// then a content sniff.
///
/// # Errors
/// `UnsupportedFormat` when nothing matches either supported family.
pub fn detect_format(file: &SourceFile) -> Result<SourceFormat, ImportError> {
    if let Some(ext) = file.extension() {
        match ext.as_str() {
            "csv" => return Ok(SourceFormat::Delimited),
            "xlsx" | "xls" => return Ok(SourceFormat::Workbook),
            _ => return Err(ImportError::UnsupportedFormat(file.name.clone())),
        }
    }
    if let Some(ct) = file.content_type.as_deref() {
        let ct = ct.to_lowercase();
        if ct.contains("csv") || ct.starts_with("text/") {
            return Ok(SourceFormat::Delimited);
        }
        if ct.contains("spreadsheet") || ct.contains("ms-excel") {
            return Ok(SourceFormat::Workbook);
        }
    }
    sniff(&file.bytes).ok_or_else(|| ImportError::UnsupportedFormat(file.name.clone()))
}

// XLSX is a ZIP archive; legacy XLS is an OLE2 compound file.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4b, 0x03, 0x04];
const OLE2_MAGIC: &[u8] = &[0xd0, 0xcf, 0x11, 0xe0];

fn sniff(bytes: &[u8]) -> Option<SourceFormat> {
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE2_MAGIC) {
        return Some(SourceFormat::Workbook);
    }
    let head = &bytes[..bytes.len().min(512)];
    let s = String::from_utf8_lossy(head);
    let printable = s.chars().all(|c| !c.is_control() || c == '\n' || c == '\r' || c == '\t');
    if printable && (s.contains(',') || s.contains('\n')) {
        return Some(SourceFormat::Delimited);
    }
    None
}
