use std::sync::OnceLock;

use regex::Regex;
use slip_core::Money;

use super::{amounts_in, re, re_amount};
use crate::config::{contains_any, ExtractorConfig};

// The trailing `\b` on the label is stricter than a bare alternation: a
// `Subtotal` line never counts as a labeled total.
re!(re_total_label,
    r"(?i)\b(?:grand\s+total|total|balance|amount|due)\b[\s:]*[$€£]?\s*(\d{1,5}[.,]\d{2})\b");

/// Finds the grand total while ignoring tender and change amounts.
pub struct TotalExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> TotalExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// A labeled total on a safe line wins; otherwise the largest amount on
    /// any safe line.
    pub fn extract(&self, lines: &[String]) -> Option<Money> {
        let safe = self.safe_lines(lines);

        let labeled = safe.iter().find_map(|line| {
            let c = re_total_label().captures(line)?;
            Money::parse_amount(c.get(1)?.as_str())
        });
        if let Some(total) = labeled {
            return Some(total);
        }

        let largest = safe.iter().flat_map(|line| amounts_in(line)).max();
        if let Some(total) = largest {
            tracing::debug!(%total, "no labeled total, using largest amount");
        }
        largest
    }

    /// Lines that do not describe a payment. A payment line without an amount
    /// of its own also drops the line after it, where the amount usually sits.
    pub fn safe_lines<'l>(&self, lines: &'l [String]) -> Vec<&'l str> {
        let mut safe = Vec::with_capacity(lines.len());
        let mut poison_next = false;

        for line in lines {
            let poisoned = std::mem::take(&mut poison_next);
            let noise = contains_any(line, &self.config.payment_words);
            if noise && !re_amount().is_match(line) {
                poison_next = true;
            }
            if noise || poisoned {
                tracing::debug!(line = line.as_str(), noise, poisoned, "dropped from total search");
                continue;
            }
            safe.push(line.as_str());
        }
        safe
    }
}
