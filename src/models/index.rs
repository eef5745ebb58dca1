use serde::{Deserialize, Serialize};

/// Whether a quoted symbol is a market index or a single stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteKind {
    Index,
    Stock,
}

/// A configured symbol to quote (from settings), plus its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub symbol: String,
    pub name: String,
    /// Icon glyph shown next to the symbol
    #[serde(default)]
    pub icon: String,
}

impl IndexSpec {
    pub fn new(symbol: &str, name: &str, icon: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// A resolved quote for one index or stock.
///
/// A failed fetch never produces a zeroed quote; the symbol is simply
/// absent from the batch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    pub symbol: String,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: QuoteKind,
    pub price: f64,
    /// Percent change vs. previous close
    pub change: f64,
    pub previous_close: f64,
}

/// Percent change vs. previous close; `None` when the previous close
/// cannot anchor the computation.
pub fn percent_change(price: f64, previous_close: f64) -> Option<f64> {
    if previous_close > 0.0 {
        Some((price - previous_close) / previous_close * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change_fixtures() {
        assert_eq!(percent_change(110.0, 100.0), Some(10.0));
        assert_eq!(percent_change(95.0, 100.0), Some(-5.0));
        assert_eq!(percent_change(100.0, 100.0), Some(0.0));
    }

    #[test]
    fn test_percent_change_rejects_unusable_close() {
        assert_eq!(percent_change(100.0, 0.0), None);
        assert_eq!(percent_change(100.0, -1.0), None);
    }

    #[test]
    fn test_quote_kind_serializes_as_type() {
        let quote = IndexQuote {
            symbol: "^GSPC".to_string(),
            name: "S&P 500".to_string(),
            icon: "📊".to_string(),
            kind: QuoteKind::Index,
            price: 5000.0,
            change: 0.5,
            previous_close: 4975.12,
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["type"], "Index");
        assert_eq!(json["previousClose"], 4975.12);
    }
}
