use slip_core::Category;

use crate::config::ExtractorConfig;
use crate::types::LineItem;

/// Maps vendor and item text onto the category taxonomy.
pub struct CategoryClassifier<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> CategoryClassifier<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// The vendor decides when it matches; otherwise the leading items are
    /// tried in order. Falls back to `Category::General`.
    pub fn classify(&self, vendor: Option<&str>, items: &[LineItem]) -> Category {
        if let Some(category) = vendor.and_then(|v| self.match_text(v)) {
            return category;
        }
        items
            .iter()
            .take(self.config.classified_item_limit)
            .find_map(|item| self.match_text(&item.name))
            .unwrap_or_default()
    }

    /// First taxonomy entry with a keyword contained in `text`.
    pub fn match_text(&self, text: &str) -> Option<Category> {
        let lower = text.to_lowercase();
        self.config
            .taxonomy
            .entries()
            .iter()
            .find(|entry| entry.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|entry| entry.category)
    }
}
