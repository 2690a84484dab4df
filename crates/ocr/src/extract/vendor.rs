use std::sync::OnceLock;

use regex::Regex;

use super::{re, DateExtractor};
use crate::config::{contains_any, ExtractorConfig};

re!(re_phone, r"\(?\d{3}\)?[\s.\-]?\d{3}[.\-]\d{4}");
re!(re_price_only, r"^\$?\s*\d+[.,]\d+$");

/// Picks the merchant name from the top of the receipt.
pub struct VendorExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> VendorExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// First of the leading lines that is not boilerplate, a date, a phone
    /// number or a bare price; otherwise the configured fallback.
    pub fn extract(&self, lines: &[String]) -> Option<String> {
        lines
            .iter()
            .take(self.config.vendor_scan_lines)
            .map(|l| l.trim())
            .find(|l| self.is_candidate(l))
            .map(str::to_string)
            .or_else(|| self.config.fallback_vendor.clone())
    }

    fn is_candidate(&self, line: &str) -> bool {
        let reason = if line.chars().count() < 2 {
            "too short"
        } else if DateExtractor::is_date_like(line) {
            "date"
        } else if contains_any(line, &self.config.boilerplate_words) {
            "boilerplate"
        } else if re_phone().is_match(line) {
            "phone"
        } else if re_price_only().is_match(line) {
            "price"
        } else {
            return true;
        };
        tracing::debug!(line, reason, "vendor candidate rejected");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(lines: &[&str]) -> Option<String> {
        let config = ExtractorConfig::default();
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        VendorExtractor::new(&config).extract(&lines)
    }

    #[test]
    fn first_line_is_vendor() {
        assert_eq!(vendor(&["Target", "Total: $50.00"]).as_deref(), Some("Target"));
    }

    #[test]
    fn boilerplate_line_is_skipped() {
        assert_eq!(
            vendor(&["Receipt Copy", "Blue Bottle Coffee", "Latte 5.00"]).as_deref(),
            Some("Blue Bottle Coffee")
        );
        assert_eq!(
            vendor(&["WELCOME TO", "CUSTOMER COPY", "Joe's Diner"]).as_deref(),
            Some("Joe's Diner")
        );
    }

    #[test]
    fn price_only_line_is_skipped() {
        assert_eq!(vendor(&["$12.00", "Corner Deli"]).as_deref(), Some("Corner Deli"));
        assert_eq!(vendor(&["12,00", "Corner Deli"]).as_deref(), Some("Corner Deli"));
    }

    #[test]
    fn phone_and_date_lines_are_skipped() {
        assert_eq!(
            vendor(&["555-123-4567", "12/05/2023", "(555) 987-6543", "Hardware Hut"]).as_deref(),
            Some("Hardware Hut")
        );
    }

    #[test]
    fn short_lines_are_skipped() {
        assert_eq!(vendor(&["*", "Q", "Quick Mart"]).as_deref(), Some("Quick Mart"));
    }

    #[test]
    fn only_first_six_lines_are_considered() {
        let lines = ["Receipt", "Copy", "Date", "$1.00", "$2.00", "$3.00", "Late Name"];
        assert_eq!(vendor(&lines).as_deref(), Some("Unknown Vendor"));
    }

    #[test]
    fn empty_input_uses_fallback() {
        assert_eq!(vendor(&[]).as_deref(), Some("Unknown Vendor"));
    }

    #[test]
    fn fallback_can_be_disabled() {
        let config = ExtractorConfig { fallback_vendor: None, ..ExtractorConfig::default() };
        assert_eq!(VendorExtractor::new(&config).extract(&[]), None);
    }
}
