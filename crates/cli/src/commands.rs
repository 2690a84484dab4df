use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Serialize;
use slip_core::Category;
use slip_ocr::{
    Extractor, ExtractorConfig, OcrBackend, PipelineError, ScanPipeline, UnavailableRecognizer,
};

#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub name: Category,
    pub label: &'static str,
    pub keywords: Vec<String>,
}

pub fn load_extractor(config_path: Option<&Path>) -> anyhow::Result<Extractor> {
    let config = match config_path {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractorConfig::default(),
    };
    Ok(Extractor::new(config))
}

/// Read OCR text from `path`, or from stdin when absent or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn extract(extractor: Extractor, text: &str, compact: bool) -> anyhow::Result<String> {
    let pipeline = ScanPipeline::new(UnavailableRecognizer, extractor);
    let draft = match pipeline.process_text(text) {
        Ok(draft) => draft,
        Err(PipelineError::NoText) => bail!("No text found in input"),
        Err(e) => return Err(e.into()),
    };
    to_json(&draft.receipt, compact)
}

pub async fn scan<R: OcrBackend>(
    backend: R,
    extractor: Extractor,
    image: &Path,
    compact: bool,
) -> anyhow::Result<String> {
    let pipeline = ScanPipeline::new(backend, extractor);
    let draft = pipeline
        .process_file(image)
        .await
        .with_context(|| format!("Failed to scan {}", image.display()))?;
    to_json(&draft, compact)
}

pub fn categories(extractor: &Extractor, compact: bool) -> anyhow::Result<String> {
    let mut entries: Vec<CategoryEntry> = extractor
        .config()
        .taxonomy
        .entries()
        .iter()
        .map(|e| CategoryEntry {
            name: e.category,
            label: e.category.label(),
            keywords: e.keywords.clone(),
        })
        .collect();
    entries.push(CategoryEntry {
        name: Category::General,
        label: Category::General.label(),
        keywords: vec![],
    });
    to_json(&entries, compact)
}

#[cfg(feature = "tesseract")]
pub fn ocr_backend(tessdata: Option<PathBuf>, lang: &str) -> Box<dyn OcrBackend> {
    Box::new(slip_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(tessdata, lang))
}

#[cfg(not(feature = "tesseract"))]
pub fn ocr_backend(_tessdata: Option<PathBuf>, _lang: &str) -> Box<dyn OcrBackend> {
    tracing::debug!("built without the tesseract feature; scans will fail");
    Box::new(UnavailableRecognizer)
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
