use std::sync::OnceLock;

use regex::Regex;
use slip_core::Money;

use crate::config::ExtractorConfig;
use crate::types::{ExtractedReceipt, RawScan};

pub mod classify;
pub mod date;
pub mod items;
pub mod total;
pub mod vendor;

pub use classify::CategoryClassifier;
pub use date::{DateExtractor, ExtractedDate};
pub use items::ItemExtractor;
pub use total::TotalExtractor;
pub use vendor::VendorExtractor;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($vis:vis $name:ident, $pat:expr) => {
        $vis fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}
pub(crate) use re;

// 1–5 integer digits, exactly two fraction digits, `.` or `,` separator.
re!(pub(crate) re_amount, r"\b(\d{1,5}[.,]\d{2})\b");
re!(pub(crate) re_standalone_price, r"^[$€£]?\s*(\d{1,5}[.,]\d{2})$");

/// Every amount printed on `line`, in order.
pub(crate) fn amounts_in(line: &str) -> impl Iterator<Item = Money> + '_ {
    re_amount()
        .captures_iter(line)
        .filter_map(|c| Money::parse_amount(c.get(1)?.as_str()))
}

/// The price when `line` is nothing but an amount (optionally with a symbol).
pub(crate) fn standalone_price(line: &str) -> Option<Money> {
    let c = re_standalone_price().captures(line.trim())?;
    Money::parse_amount(c.get(1)?.as_str())
}

// ── Public extraction API ─────────────────────────────────────────────────────

/// Runs the extraction stages over one scan. Holds only read-only tables, so a
/// single instance can serve concurrent scans.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config: config.normalized() }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract structured fields from raw OCR text.
    pub fn extract_text(&self, ocr_text: &str) -> ExtractedReceipt {
        self.extract(&RawScan::new(ocr_text))
    }

    /// Date and vendor run first because the item stage uses both to reject
    /// false matches, and the classifier reads vendor and items.
    pub fn extract(&self, scan: &RawScan) -> ExtractedReceipt {
        let lines = scan.lines();

        let date = DateExtractor::new().extract(scan.text());
        let vendor = VendorExtractor::new(&self.config).extract(lines);
        let total = TotalExtractor::new(&self.config).extract(lines);
        let items =
            ItemExtractor::new(&self.config, vendor.as_deref(), date.as_ref()).extract(lines);
        let category = CategoryClassifier::new(&self.config).classify(vendor.as_deref(), &items);

        tracing::debug!(
            vendor = vendor.as_deref().unwrap_or("-"),
            date = date.as_ref().map(|d| d.value.as_str()).unwrap_or("-"),
            total = %total.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
            items = items.len(),
            %category,
            "receipt extracted"
        );

        ExtractedReceipt {
            vendor,
            date: date.map(|d| d.value),
            total,
            items,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slip_core::Category;

    #[test]
    fn amounts_in_finds_every_amount() {
        let found: Vec<String> = amounts_in("2 @ 1.50 = 3,00").map(|m| m.to_string()).collect();
        assert_eq!(found, vec!["1.50", "3.00"]);
        assert_eq!(amounts_in("no money here 12").count(), 0);
    }

    #[test]
    fn standalone_price_shapes() {
        assert_eq!(standalone_price("4.50"), Some(Money::from_cents(450)));
        assert_eq!(standalone_price("$ 4.50"), Some(Money::from_cents(450)));
        assert_eq!(standalone_price("€12,00"), Some(Money::from_cents(1200)));
        assert_eq!(standalone_price("Coffee 4.50"), None);
        assert_eq!(standalone_price("4.5"), None);
    }

    #[test]
    fn full_receipt() {
        let text = "Target\nDate: Dec 25, 2023\nTotal: $50.00";
        let r = Extractor::default().extract_text(text);
        assert_eq!(r.vendor.as_deref(), Some("Target"));
        assert_eq!(r.date.as_deref(), Some("2023-12-25"));
        assert_eq!(r.total, Some(Money::from_cents(5000)));
        assert!(r.items.is_empty());
        assert_eq!(r.category, Category::Shopping);
    }

    #[test]
    fn price_under_vendor_is_total_not_item() {
        let r = Extractor::default().extract_text("STARBUCKS\n$5.50\nVISA");
        assert_eq!(r.vendor.as_deref(), Some("STARBUCKS"));
        assert_eq!(r.total, Some(Money::from_cents(550)));
        assert!(r.items.is_empty());
        assert_eq!(r.category, Category::Food);
    }

    #[test]
    fn empty_text_yields_defaults() {
        let r = Extractor::default().extract_text("");
        assert_eq!(r.vendor.as_deref(), Some("Unknown Vendor"));
        assert!(r.date.is_none());
        assert!(r.total.is_none());
        assert!(r.items.is_empty());
        assert_eq!(r.category, Category::General);
    }

    #[test]
    fn no_panic_on_garbage_input() {
        let r = Extractor::default().extract_text("!@#$%^&*()\n\0\x01\x02\n$$$\n....");
        assert_eq!(r.category, Category::General);
    }

    #[test]
    fn new_normalizes_hand_built_config() {
        let mut config = ExtractorConfig::default();
        config.fallback_vendor = Some("   ".into());
        config.boilerplate_words.push("THANK YOU".into());
        let extractor = Extractor::new(config);
        assert!(extractor.config().fallback_vendor.is_none());
        assert!(extractor.config().boilerplate_words.contains(&"thank you".to_string()));
        assert!(extractor.extract_text("").vendor.is_none());
    }
}
