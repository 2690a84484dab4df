use serde::{Deserialize, Serialize};
use slip_core::{Category, Money};

/// OCR output for one image: the full text plus its trimmed, non-empty lines
/// in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScan {
    text: String,
    lines: Vec<String>,
}

impl RawScan {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self { name: name.into(), price }
    }
}

/// Structured fields recovered from one scan. Missing fields are `None`;
/// `category` always holds a value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExtractedReceipt {
    pub vendor: Option<String>,
    /// `YYYY-MM-DD` when a known layout parsed, otherwise the raw matched text.
    pub date: Option<String>,
    pub total: Option<Money>,
    pub items: Vec<LineItem>,
    pub category: Category,
}

/// Review state of a draft handed to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptStatus::Pending => write!(f, "pending"),
            ReceiptStatus::Verified => write!(f, "verified"),
            ReceiptStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ReceiptStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReceiptStatus::Pending),
            "verified" => Ok(ReceiptStatus::Verified),
            "rejected" => Ok(ReceiptStatus::Rejected),
            other => Err(format!("Unknown receipt status: '{other}'")),
        }
    }
}
