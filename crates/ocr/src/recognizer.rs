use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Empty image: no bytes to recognize")]
    EmptyImage,
    #[error("Could not decode receipt image: {0}")]
    Decode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("No OCR engine compiled in; rebuild with the `tesseract` feature")]
    NotAvailable,
}

/// Turns a photographed or scanned receipt into plain text lines.
pub trait OcrBackend: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

/// Engine output as receipt text: page breaks removed, `\r\n` folded to `\n`.
pub fn clean_page_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace(['\u{c}', '\r'], "\n")
}

/// Answers every image with the same receipt text.
pub struct StaticRecognizer {
    text: String,
}

impl StaticRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for StaticRecognizer {
    fn name(&self) -> &'static str {
        "static"
    }

    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Stands in when no engine is compiled in; every image is refused.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use std::path::PathBuf;

    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// Phone photos rarely carry DPI metadata; Tesseract guesses badly without it.
    pub const DEFAULT_DPI: i32 = 300;

    pub struct TesseractRecognizer {
        tessdata: Option<PathBuf>,
        lang: String,
        dpi: i32,
    }

    impl TesseractRecognizer {
        pub fn new(tessdata: Option<PathBuf>, lang: &str) -> Self {
            Self { tessdata, lang: lang.to_string(), dpi: DEFAULT_DPI }
        }

        pub fn with_dpi(mut self, dpi: i32) -> Self {
            self.dpi = dpi;
            self
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn name(&self) -> &'static str {
            "tesseract"
        }

        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let tessdata = match &self.tessdata {
                Some(p) => Some(p.to_str().ok_or_else(|| {
                    OcrError::Engine(format!("tessdata path is not UTF-8: {}", p.display()))
                })?),
                None => None,
            };
            // One engine per call: LepTess is not Sync, and scans are infrequent.
            let mut engine = LepTess::new(tessdata, &self.lang)
                .map_err(|e| OcrError::Engine(format!("{} ({})", e, self.lang)))?;
            engine
                .set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::Decode(e.to_string()))?;
            engine.set_source_resolution(self.dpi);
            let text = engine.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            tracing::debug!(lang = %self.lang, chars = text.len(), "tesseract pass done");
            Ok(text)
        }
    }
}
