use std::sync::OnceLock;

use regex::Regex;
use slip_core::Money;

use super::{re, standalone_price, ExtractedDate};
use crate::config::{contains_any, ExtractorConfig};
use crate::types::LineItem;

// `<name><ws><optional symbol><amount>` at end of line.
re!(re_item_line, r"^(.+?)\s+[$€£]?\s*(\d{1,5}[.,]\d{2})$");

/// Pairs item names with prices, either on one line or split across two.
pub struct ItemExtractor<'a> {
    config: &'a ExtractorConfig,
    vendor: Option<String>,
    date: Option<&'a ExtractedDate>,
}

impl<'a> ItemExtractor<'a> {
    /// `vendor` and `date` are the already-extracted header fields; lines
    /// carrying either are never items.
    pub fn new(
        config: &'a ExtractorConfig,
        vendor: Option<&str>,
        date: Option<&'a ExtractedDate>,
    ) -> Self {
        let vendor = vendor.map(|v| v.trim().to_lowercase()).filter(|v| !v.is_empty());
        Self { config, vendor, date }
    }

    pub fn extract(&self, lines: &[String]) -> Vec<LineItem> {
        let mut items = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            // A price with no name of its own.
            if standalone_price(line).is_some() {
                i += 1;
                continue;
            }

            if let Some(c) = re_item_line().captures(line) {
                let name = c[1].trim();
                if let Some(price) = Money::parse_amount(&c[2]).filter(|_| self.accepts(name)) {
                    items.push(LineItem::new(name, price));
                }
                i += 1;
                continue;
            }

            let next_price = lines.get(i + 1).and_then(|next| standalone_price(next));
            if let Some(price) = next_price {
                if !line.chars().any(char::is_alphabetic) {
                    // Likely a quantity marker. Only this line is consumed so
                    // the price can still pair with what follows it.
                    tracing::debug!(line, "split-line name has no letters");
                    i += 1;
                    continue;
                }
                if self.accepts(line) {
                    tracing::debug!(name = line, %price, "paired split-line item");
                    items.push(LineItem::new(line, price));
                    i += 2;
                    continue;
                }
            }

            i += 1;
        }

        items
    }

    fn accepts(&self, name: &str) -> bool {
        if contains_any(name, &self.config.item_stop_words)
            || contains_any(name, &self.config.payment_words)
            || contains_any(name, &self.config.boilerplate_words)
        {
            return false;
        }
        if let Some(vendor) = &self.vendor {
            if name.to_lowercase().contains(vendor.as_str()) {
                return false;
            }
        }
        match self.date {
            Some(d) => !name.contains(d.raw.as_str()) && !name.contains(d.value.as_str()),
            None => true,
        }
    }
}
