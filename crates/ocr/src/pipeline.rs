use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::extract::Extractor;
use crate::hash;
use crate::recognizer::{clean_page_text, OcrBackend, OcrError};
use crate::types::{ExtractedReceipt, RawScan, ReceiptStatus};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("No text found in image")]
    NoText,
}

/// An extracted receipt awaiting review by its owner.
#[derive(Debug, Clone, Serialize)]
pub struct ScanDraft {
    /// SHA-256 hex digest of the scanned input; identical uploads share it.
    pub content_hash: String,
    /// Raw OCR text output.
    pub ocr_text: String,
    pub receipt: ExtractedReceipt,
    pub status: ReceiptStatus,
}

/// Orchestrates: hash → OCR → blank-text check → extract.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: R,
    extractor: Extractor,
}

impl<R: OcrBackend> ScanPipeline<R> {
    pub fn new(recognizer: R, extractor: Extractor) -> Self {
        Self { recognizer, extractor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Process an image file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ScanDraft, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes)
    }

    /// Process raw image bytes (camera capture or upload).
    pub fn process_bytes(&self, data: &[u8]) -> Result<ScanDraft, PipelineError> {
        if data.is_empty() {
            return Err(OcrError::EmptyImage.into());
        }
        let content_hash = hash::content_hash(data);
        let ocr_text = clean_page_text(&self.recognizer.recognize(data)?);
        tracing::debug!(backend = self.recognizer.name(), hash = %content_hash, "image recognized");
        self.finish(content_hash, ocr_text)
    }

    /// Process text that was already recognized elsewhere.
    pub fn process_text(&self, ocr_text: &str) -> Result<ScanDraft, PipelineError> {
        let content_hash = hash::content_hash(ocr_text.as_bytes());
        self.finish(content_hash, ocr_text.to_string())
    }

    fn finish(&self, content_hash: String, ocr_text: String) -> Result<ScanDraft, PipelineError> {
        let scan = RawScan::new(ocr_text.as_str());
        if scan.is_blank() {
            tracing::warn!(hash = %content_hash, "no text found, skipping extraction");
            return Err(PipelineError::NoText);
        }

        let receipt = self.extractor.extract(&scan);
        tracing::info!(
            hash = %content_hash,
            lines = scan.lines().len(),
            items = receipt.items.len(),
            category = %receipt.category,
            "scan processed"
        );

        Ok(ScanDraft {
            content_hash,
            ocr_text,
            receipt,
            status: ReceiptStatus::Pending,
        })
    }
}
