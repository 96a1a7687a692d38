//! Structured "thinking" payload attached to some Agent turns.
//!
//! The engine treats this as an opaque blob — only its presence drives
//! selection behavior. The structure exists so the detail panel can
//! render titles, sections, inference bullets, tables, and prediction
//! scores without re-parsing JSON.

use serde::{Deserialize, Serialize};

/// Detail payload rendered in the thinking panel when its turn is
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thinking {
    /// Panel headline.
    #[serde(default)]
    pub title: String,
    /// Ordered content sections.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One block of the thinking payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    #[serde(default)]
    pub heading: String,
    /// Free-form body text (may carry `**bold**` markers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Inference bullets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferences: Option<Vec<Inference>>,
    /// Tabular data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    /// Scored product predictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
}

/// A single heading/content inference bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    /// Bullet heading.
    #[serde(default)]
    pub heading: String,
    /// Bullet body.
    #[serde(default)]
    pub content: String,
}

/// Open-keyed table: column order is significant, row cells are looked
/// up by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Column headers, in display order.
    pub columns: Vec<String>,
    /// Rows keyed by column header.
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// A scored prediction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted product name.
    pub product: String,
    /// Confidence score, 0–100.
    pub score: u8,
}

impl Prediction {
    /// Scores at or above this threshold get the highlight treatment.
    pub const HIGH_SCORE: u8 = 90;

    /// Whether this prediction should be visually emphasized.
    #[must_use]
    pub fn is_high_score(&self) -> bool {
        self.score >= Self::HIGH_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thinking_deserializes_with_defaults() {
        let thinking: Thinking = serde_json::from_str("{}").unwrap();
        assert!(thinking.title.is_empty());
        assert!(thinking.sections.is_empty());
    }

    #[test]
    fn section_optional_fields_default_to_none() {
        let section: Section = serde_json::from_str(r#"{"heading": "Usage"}"#).unwrap();
        assert_eq!(section.heading, "Usage");
        assert!(section.content.is_none());
        assert!(section.inferences.is_none());
        assert!(section.table.is_none());
        assert!(section.predictions.is_none());
    }

    #[test]
    fn table_rows_preserve_open_keys() {
        let json = r#"{
            "columns": ["Product", "Total uses"],
            "rows": [{"Product": "Washer", "Total uses": 31}]
        }"#;
        let table: TableData = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0]["Total uses"], serde_json::json!(31));
    }

    #[test]
    fn prediction_high_score_threshold() {
        let high = Prediction {
            product: "Dryer".to_string(),
            score: 92,
        };
        let low = Prediction {
            product: "Styler".to_string(),
            score: 89,
        };
        assert!(high.is_high_score());
        assert!(!low.is_high_score());
    }
}
