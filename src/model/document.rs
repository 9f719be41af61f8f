//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Page, Paragraph};

/// A document as produced by the extraction service.
///
/// The structure is immutable after ingestion except for the one-time
/// addition of paragraph regions to each page by
/// [`annotate`](crate::layout::annotate).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full document text in reading order.
    #[serde(default)]
    pub content: String,

    /// Pages, ascending by page number.
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Semantic paragraphs in reading order.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    /// Extraction-service metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by its 1-indexed number.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        if page_number == 0 {
            return None;
        }
        self.pages.get((page_number - 1) as usize)
    }

    /// True once every page with text carries computed regions.
    pub fn is_annotated(&self) -> bool {
        self.pages
            .iter()
            .all(|p| !p.regions.is_empty() || !p.has_text())
    }
}

/// Metadata reported by the extraction service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Identifier of the extraction model that produced the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Service API version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// When the extraction ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_page_lookup_is_one_indexed() {
        let mut doc = Document::new();
        doc.pages.push(Page::new(1, 8.5, 11.0));
        doc.pages.push(Page::new(2, 8.5, 11.0));

        assert!(doc.page(0).is_none());
        assert_eq!(doc.page(1).map(|p| p.page_number), Some(1));
        assert_eq!(doc.page(2).map(|p| p.page_number), Some(2));
        assert!(doc.page(3).is_none());
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_metadata_deserializes_from_service_json() {
        let json = r#"{
            "content": "Hello world",
            "pages": [],
            "paragraphs": [],
            "metadata": {
                "modelId": "prebuilt-layout",
                "apiVersion": "2024-02-29",
                "created": "2025-11-02T09:30:00Z"
            }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.metadata.model_id.as_deref(), Some("prebuilt-layout"));
        assert!(doc.metadata.created.is_some());
    }
}
