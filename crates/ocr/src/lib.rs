pub mod config;
pub mod extract;
pub mod hash;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use config::{CategoryKeywords, CategoryTaxonomy, ConfigError, ExtractorConfig};
pub use extract::{
    CategoryClassifier, DateExtractor, ExtractedDate, Extractor, ItemExtractor, TotalExtractor,
    VendorExtractor,
};
pub use hash::{content_hash, sha256_bytes, to_hex};
pub use pipeline::{PipelineError, ScanDraft, ScanPipeline};
pub use recognizer::{
    clean_page_text, OcrBackend, OcrError, StaticRecognizer, UnavailableRecognizer,
};
pub use types::{ExtractedReceipt, LineItem, RawScan, ReceiptStatus};
