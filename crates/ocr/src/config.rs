use std::path::Path;

use serde::{Deserialize, Serialize};
use slip_core::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

/// Keyword triggers for one category. Keywords are matched as
/// case-insensitive substrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Ordered category → keywords table. Order is the tie-break when several
/// categories match the same text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    entries: Vec<CategoryKeywords>,
}

impl CategoryTaxonomy {
    pub fn new(entries: Vec<CategoryKeywords>) -> Result<Self, ConfigError> {
        let mut seen = Vec::with_capacity(entries.len());
        for entry in &entries {
            if entry.category == Category::General {
                return Err(ConfigError::InvalidTaxonomy(
                    "'general' is the fallback category and cannot carry keywords".into(),
                ));
            }
            if seen.contains(&entry.category) {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "category '{}' listed more than once",
                    entry.category
                )));
            }
            seen.push(entry.category);
        }
        Ok(Self { entries }.normalized())
    }

    pub fn entries(&self) -> &[CategoryKeywords] {
        &self.entries
    }

    fn normalized(mut self) -> Self {
        for entry in &mut self.entries {
            entry.keywords = lowercase_all(&entry.keywords);
        }
        self
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        let table: [(Category, &[&str]); 6] = [
            (
                Category::Food,
                &[
                    "restaurant", "cafe", "coffee", "starbucks", "mcdonald", "burger", "pizza",
                    "kfc", "subway", "bakery", "grocery", "supermarket", "diner", "bistro",
                    "kitchen", "grill", "sushi", "taco", "milk", "bread",
                ],
            ),
            (
                Category::Transport,
                &[
                    "uber", "lyft", "taxi", "shell", "chevron", "exxon", "petrol",
                    "fuel", "parking", "transit", "metro", "railway", "airline", "airways",
                    "toll",
                ],
            ),
            (
                Category::Utilities,
                &[
                    "electric", "utility", "utilities", "internet", "broadband", "comcast",
                    "verizon", "at&t", "t-mobile", "energy", "water dept",
                ],
            ),
            (
                Category::Shopping,
                &[
                    "walmart", "target", "amazon", "costco", "ikea", "best buy",
                    "store", "shop", "outlet", "boutique", "clothing", "apparel",
                ],
            ),
            (
                Category::Entertainment,
                &[
                    "cinema", "movie", "theater", "theatre", "netflix", "spotify", "concert",
                    "ticket", "amc", "bowling", "arcade", "museum",
                ],
            ),
            (
                Category::Health,
                &[
                    "pharmacy", "cvs", "walgreens", "clinic", "hospital", "medical", "dental",
                    "doctor", "gym", "fitness", "vitamin",
                ],
            ),
        ];
        Self {
            entries: table
                .into_iter()
                .map(|(category, words)| CategoryKeywords {
                    category,
                    keywords: to_strings(words),
                })
                .collect(),
        }
    }
}

/// Static tables that drive the extractors. Built once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// How many leading lines are considered for the merchant name.
    pub vendor_scan_lines: usize,
    /// How many extracted items the classifier inspects after the vendor.
    pub classified_item_limit: usize,
    /// Vendor used when no candidate line survives. Empty disables the fallback.
    pub fallback_vendor: Option<String>,
    /// Lines containing any of these are never taken as the vendor.
    pub boilerplate_words: Vec<String>,
    /// Payment/tender noise; excluded from totals and items.
    pub payment_words: Vec<String>,
    /// Summary labels that never name a purchased item.
    pub item_stop_words: Vec<String>,
    pub taxonomy: CategoryTaxonomy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            vendor_scan_lines: 6,
            classified_item_limit: 5,
            fallback_vendor: Some("Unknown Vendor".to_string()),
            boilerplate_words: to_strings(&[
                "welcome", "receipt", "copy", "customer", "transaction", "original", "date",
            ]),
            payment_words: to_strings(&[
                "cash", "tender", "tendered", "change", "paid", "visa", "mastercard", "amex",
                "card",
            ]),
            item_stop_words: to_strings(&["total", "subtotal", "tax", "vat", "due", "balance", "date"]),
            taxonomy: CategoryTaxonomy::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let raw: ExtractorConfig = toml::from_str(toml_content)?;
        // Re-run taxonomy validation; serde(transparent) bypasses the constructor.
        let taxonomy = CategoryTaxonomy::new(raw.taxonomy.entries)?;
        Ok(ExtractorConfig { taxonomy, ..raw }.normalized())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded extractor config");
        Ok(config)
    }

    /// Lower-case every keyword table and drop an empty fallback vendor.
    pub fn normalized(mut self) -> Self {
        self.boilerplate_words = lowercase_all(&self.boilerplate_words);
        self.payment_words = lowercase_all(&self.payment_words);
        self.item_stop_words = lowercase_all(&self.item_stop_words);
        self.fallback_vendor = self
            .fallback_vendor
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self.taxonomy = self.taxonomy.normalized();
        self
    }
}

/// Case-insensitive substring test against a lower-cased word list.
pub(crate) fn contains_any(text: &str, words: &[String]) -> bool {
    let lower = text.to_lowercase();
    words.iter().any(|w| lower.contains(w.as_str()))
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
