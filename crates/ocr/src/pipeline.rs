use std::path::{Path, PathBuf};

use ledgerlens_core::ParsedStatement;
use ledgerlens_parse::{DocumentParser, OcrTextParser, ParseError};
use thiserror::Error;

use crate::archive;
use crate::preprocess;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] preprocess::PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Statement parsing failed: {0}")]
    Parse(#[from] ParseError),
}

/// The result of one statement extraction run.
#[derive(Debug)]
pub struct ExtractionResult {
    /// SHA-256 hex digest of the original image bytes.
    pub hash_hex: String,
    /// Where the original was archived, when an archive dir is set.
    pub archive_path: Option<PathBuf>,
    /// Raw OCR text, kept for debugging misreads.
    pub ocr_text: String,
    pub statement: ParsedStatement,
}

/// Orchestrates: hash → archive → preprocess → OCR → parse.
///
/// Each run is independent; the pipeline holds no per-document state,
/// so one pipeline may process any number of statements.
pub struct StatementPipeline<R: OcrBackend> {
    recognizer: R,
    parser: OcrTextParser,
    archive_dir: Option<PathBuf>,
}

impl<R: OcrBackend> StatementPipeline<R> {
    pub fn new(recognizer: R, parser: OcrTextParser) -> Self {
        Self { recognizer, parser, archive_dir: None }
    }

    /// Keep a content-addressed copy of every source image under `dir`.
    pub fn with_archive_dir(mut self, dir: PathBuf) -> Self {
        self.archive_dir = Some(dir);
        self
    }

    pub async fn process_file(&self, path: &Path) -> Result<ExtractionResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_lowercase();
        self.process_bytes(&bytes, &ext).await
    }

    pub async fn process_bytes(&self, data: &[u8], ext: &str) -> Result<ExtractionResult, PipelineError> {
        let hash_hex = archive::to_hex(&archive::sha256_bytes(data));

        let archive_path = match &self.archive_dir {
            Some(root) => {
                let dest = archive::archive_path(root, &hash_hex, ext);
                if let Some(parent) = dest.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&dest, data).await?;
                Some(dest)
            }
            None => None,
        };

        let image_bytes = preprocess::prepare_for_ocr_from_bytes(data)?;

        let ocr_text = self.recognizer.recognize(&image_bytes)?;
        tracing::debug!(chars = ocr_text.len(), "OCR produced text");

        let statement = self.parser.parse_document(&ocr_text)?;
        tracing::info!(hash = %hash_hex, records = statement.len(), "statement extracted");

        Ok(ExtractionResult { hash_hex, archive_path, ocr_text, statement })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
