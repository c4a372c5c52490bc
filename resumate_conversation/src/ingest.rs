//! Résumé ingestion: download to a scoped temp file, extract text and skills.

use async_trait::async_trait;
use resumate_core::{TransportError, extract_skills};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::event::FileRef;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable PDF: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("download failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Where uploaded document bytes come from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Stream the content of `file` into `destination`.
    async fn download(
        &self,
        file: &FileRef,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), TransportError>;
}

/// Bytes → plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF text extraction backed by `pdf-extract`.
///
/// `pdf-extract` panics on some structurally broken documents (a font without
/// `/Subtype`, a page without resources); those panics are caught and reported
/// as [`ExtractionError::Malformed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|payload| {
                let message = panic_message(payload.as_ref());
                warn!("PDF parser panicked: {message}");
                ExtractionError::Malformed(format!("PDF parser panicked: {message}"))
            })?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedDocument {
    pub text: String,
    pub skills: Vec<String>,
    pub file_name: Option<String>,
}

pub struct DocumentIngestor {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn TextExtractor>,
    download_dir: PathBuf,
}

impl DocumentIngestor {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            extractor,
            download_dir: download_dir.into(),
        }
    }

    /// Download `file`, extract its text and skills.
    ///
    /// The downloaded bytes live in a `NamedTempFile` inside the download
    /// directory; it is removed when this call returns, whatever the outcome.
    pub async fn ingest(&self, file: &FileRef) -> Result<IngestedDocument, IngestError> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        let temp = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(&self.download_dir)?;

        let mut writer = tokio::fs::File::from_std(temp.reopen()?);
        self.source.download(file, &mut writer).await?;
        writer.flush().await?;
        drop(writer);

        let bytes = tokio::fs::read(temp.path()).await?;
        info!(
            "Downloaded {} ({} bytes)",
            file.file_name.as_deref().unwrap_or(&file.id),
            bytes.len()
        );

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| IngestError::Task(e.to_string()))??;
        let skills = extract_skills(&text);

        Ok(IngestedDocument {
            text,
            skills,
            file_name: file.file_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct BytesSource(Option<Vec<u8>>);

    #[async_trait]
    impl DocumentSource for BytesSource {
        async fn download(
            &self,
            _file: &FileRef,
            destination: &mut (dyn AsyncWrite + Unpin + Send),
        ) -> Result<(), TransportError> {
            match &self.0 {
                Some(bytes) => {
                    destination.write_all(bytes).await?;
                    Ok(())
                }
                None => Err(TransportError::Download("file expired".into())),
            }
        }
    }

    /// Treats the bytes as UTF-8 text; anything starting with `%BAD` fails.
    struct Utf8Extractor;

    impl TextExtractor for Utf8Extractor {
        fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
            if bytes.starts_with(b"%BAD") {
                return Err(ExtractionError::Malformed("broken xref".into()));
            }
            String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::Malformed(e.to_string()))
        }
    }

    fn file() -> FileRef {
        FileRef {
            id: "file-1".into(),
            file_name: Some("cv.pdf".into()),
            mime_type: Some("application/pdf".into()),
        }
    }

    fn ingestor(source: BytesSource, dir: &Path) -> DocumentIngestor {
        DocumentIngestor::new(Arc::new(source), Arc::new(Utf8Extractor), dir)
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).map_or(0, Iterator::count)
    }

    #[tokio::test]
    async fn extracts_text_and_skills() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ingestor(BytesSource(Some(b"Senior Rust and Python engineer".to_vec())), dir.path())
            .ingest(&file())
            .await
            .unwrap();
        assert_eq!(doc.text, "Senior Rust and Python engineer");
        assert_eq!(doc.skills, vec!["Python", "Rust"]);
        assert_eq!(doc.file_name.as_deref(), Some("cv.pdf"));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn temp_file_removed_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = ingestor(BytesSource(Some(b"%BAD pdf".to_vec())), dir.path())
            .ingest(&file())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Extraction(_)));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn temp_file_removed_on_download_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = ingestor(BytesSource(None), dir.path())
            .ingest(&file())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Transport(_)));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn creates_missing_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("downloads");
        ingestor(BytesSource(Some(b"Go".to_vec())), &nested)
            .ingest(&file())
            .await
            .unwrap();
        assert!(nested.is_dir());
        assert_eq!(entries(&nested), 0);
    }

    /// Assemble a PDF from object bodies with a correct cross-reference table.
    fn pdf(objects: &[String]) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = out.len();
        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            table.push_str(&format!("{offset:010} 00000 n \n"));
        }
        table.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            objects.len() + 1
        ));
        out.extend_from_slice(table.as_bytes());
        out
    }

    /// One page whose font dictionary has no `/Subtype`.
    fn pdf_with_untyped_font() -> Vec<u8> {
        let content = "BT /F1 12 Tf 72 712 Td (Hello) Tj ET";
        pdf(&[
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /BaseFont /Helvetica >>".to_string(),
        ])
    }

    #[test]
    fn pdf_extractor_rejects_garbage() {
        assert!(PdfTextExtractor.extract(b"definitely not a pdf").is_err());
    }

    #[test]
    fn pdf_extractor_reports_parser_panic_as_malformed() {
        let result = PdfTextExtractor.extract(&pdf_with_untyped_font());
        assert!(matches!(result, Err(ExtractionError::Malformed(_))));
    }

    #[tokio::test]
    async fn structurally_broken_pdf_fails_ingest_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = DocumentIngestor::new(
            Arc::new(BytesSource(Some(pdf_with_untyped_font()))),
            Arc::new(PdfTextExtractor),
            dir.path(),
        );

        let err = ingestor.ingest(&file()).await.unwrap_err();

        assert!(matches!(err, IngestError::Extraction(_)));
        assert_eq!(entries(dir.path()), 0);
    }
}
