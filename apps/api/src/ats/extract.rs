//! Text extraction for uploaded resume files (PDF or plain text).

use crate::errors::AnalysisError;

/// Upload size cap for resume files.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeFormat {
    Pdf,
    Text,
}

fn detect_format(filename: Option<&str>, content_type: Option<&str>) -> Option<ResumeFormat> {
    let mime = content_type.map(|c| c.split(';').next().unwrap_or(c).trim().to_lowercase());
    match mime.as_deref() {
        Some("application/pdf") => return Some(ResumeFormat::Pdf),
        Some("text/plain") | Some("text/markdown") => return Some(ResumeFormat::Text),
        _ => {}
    }

    let extension = filename
        .and_then(|f| f.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase());
    match extension.as_deref() {
        Some("pdf") => Some(ResumeFormat::Pdf),
        Some("txt") | Some("md") => Some(ResumeFormat::Text),
        _ => None,
    }
}

/// Extracts resume text. Blocking for PDFs; callers on the runtime should use `spawn_blocking`.
pub fn extract_resume_text(
    filename: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::validation("Resume file is empty"));
    }

    let text = match detect_format(filename, content_type) {
        Some(ResumeFormat::Pdf) => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AnalysisError::validation(format!("Could not read PDF: {e}")))?,
        Some(ResumeFormat::Text) => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AnalysisError::validation("Resume file is not valid UTF-8 text")
        })?,
        None => {
            return Err(AnalysisError::validation(
                "Unsupported resume file type; upload a PDF or plain-text file",
            ))
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AnalysisError::validation(
            "No text could be extracted from the resume",
        ));
    }
    Ok(text.to_string())
}
