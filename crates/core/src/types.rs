//! Domain types for normalized slide-deck content.
//!
//! A [`Presentation`] owns its [`Section`]s, which own their [`Slide`]s,
//! which own their [`ContentBlock`]s. The recursive trees ([`ListItem`],
//! [`DiagramNode`]) own their children directly; no type holds a reference
//! back to its parent. Everything is built once during extraction and read
//! only afterwards.

use serde::{Deserialize, Serialize};

/// One typed unit of slide content.
///
/// The order of blocks within [`Slide::content`] follows the top-to-bottom,
/// then left-to-right placement of the shapes they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A slide heading (the title shape produces level 1).
    Heading { text: String, level: u32 },

    /// A plain run of text not attached to any list structure.
    Paragraph { text: String },

    /// Bulleted or numbered text, one item per paragraph.
    List { style: ListStyle, items: Vec<ListItem> },

    /// An image persisted to the media directory.
    Image { src: String, alt: String, caption: String },

    /// Tabular data, row-major, cell text trimmed.
    Table { rows: Vec<Vec<String>> },

    /// A diagram reconstructed from its point/connection graph.
    SmartArt { layout: String, nodes: Vec<DiagramNode> },

    /// An embedded video persisted to the media directory.
    Video { src: String, title: String },

    /// A hyperlink, also used for externally hosted videos.
    Link { text: String, url: String },
}

/// Visual style of a [`ContentBlock::List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Bullet,
    Numbered,
}

/// A single list entry with its indent level and optional hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,

    /// Indent level, 0 for top-level items.
    pub level: u32,

    /// First hyperlink found in the source paragraph, if any.
    pub url: Option<String>,

    /// Nested sub-items.
    pub children: Vec<ListItem>,
}

impl ListItem {
    /// Create a leaf item at the given indent level.
    pub fn new(text: impl Into<String>, level: u32) -> Self {
        Self {
            text: text.into(),
            level,
            url: None,
            children: Vec::new(),
        }
    }

    /// Attach a hyperlink url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One node of a reconstructed diagram tree.
///
/// `level` is assigned while the tree is built (roots are 0) rather than
/// read from the source graph. `icon` is a media path relative to the
/// output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Point id, unique within one diagram instance.
    pub id: String,

    pub text: String,

    pub children: Vec<DiagramNode>,

    pub level: u32,

    pub icon: Option<String>,

    pub icon_alt: Option<String>,
}

impl DiagramNode {
    /// Create a childless node at level 0.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
            level: 0,
            icon: None,
            icon_alt: None,
        }
    }

    /// All text from this node and its descendants, newline separated.
    pub fn all_text(&self) -> String {
        let mut result = self.text.clone();
        for child in &self.children {
            let child_text = child.all_text();
            if !result.is_empty() && !child_text.is_empty() {
                result.push('\n');
            }
            result.push_str(&child_text);
        }
        result
    }
}

/// A single assembled slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based position across the whole presentation, regardless of
    /// section boundaries.
    pub order: u32,

    /// Title text, empty when the slide has no usable title shape.
    pub title: String,

    /// Layout name from the slide's layout part.
    pub layout: String,

    /// Speaker notes, verbatim; empty when absent or blank.
    pub notes: String,

    /// Content blocks in reading order.
    pub content: Vec<ContentBlock>,
}

/// A named, ordered grouping of consecutive slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title; `"Default"` for the synthetic catch-all section.
    pub title: String,

    pub slides: Vec<Slide>,
}

impl Section {
    /// Create an empty section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }
}

/// Extraction counters reported in [`PresentationMetadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub slide_count: u32,
    pub image_count: u32,
}

/// Metadata about one extracted presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationMetadata {
    /// Stable identifier derived from the source filename stem.
    pub id: String,

    /// Original filename (without path).
    pub source_file: String,

    /// ISO-8601 timestamp of the extraction run.
    pub processed_at: String,

    pub stats: Stats,
}

/// An entire extracted presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub metadata: PresentationMetadata,

    /// Sections in deck order; concatenating their slides yields the full
    /// deck with orders `1..=N`.
    pub sections: Vec<Section>,
}

impl Presentation {
    /// Total number of slides across all sections.
    pub fn slide_count(&self) -> usize {
        self.sections.iter().map(|s| s.slides.len()).sum()
    }

    /// Title of the first slide, used for index listings.
    pub fn first_slide_title(&self) -> Option<&str> {
        self.sections
            .first()
            .and_then(|s| s.slides.first())
            .map(|slide| slide.title.as_str())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_content_block_json_tags() {
        let heading = ContentBlock::Heading {
            text: "Intro".to_string(),
            level: 1,
        };
        let value = serde_json::to_value(&heading).unwrap();
        assert_eq!(
            value,
            json!({"type": "heading", "text": "Intro", "level": 1})
        );

        let table = ContentBlock::Table {
            rows: vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string(), "D".to_string()],
            ],
        };
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["type"], "table");
        assert_eq!(value["rows"], json!([["A", "B"], ["C", "D"]]));

        let smart_art = ContentBlock::SmartArt {
            layout: "Basic Process".to_string(),
            nodes: vec![DiagramNode::new("1", "Step")],
        };
        let value = serde_json::to_value(&smart_art).unwrap();
        assert_eq!(value["type"], "smart_art");
        assert_eq!(value["nodes"][0]["id"], "1");
        assert_eq!(value["nodes"][0]["icon"], Value::Null);
    }

    #[test]
    fn test_list_style_serializes_lowercase() {
        let list = ContentBlock::List {
            style: ListStyle::Bullet,
            items: vec![ListItem::new("one", 0).with_url("https://example.com")],
        };
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["style"], "bullet");
        assert_eq!(value["items"][0]["url"], "https://example.com");
        assert_eq!(value["items"][0]["children"], json!([]));
    }

    #[test]
    fn test_diagram_node_all_text() {
        let mut root = DiagramNode::new("1", "Root");
        let mut child = DiagramNode::new("2", "Child");
        child.children.push(DiagramNode::new("3", "Leaf"));
        root.children.push(child);

        assert_eq!(root.all_text(), "Root\nChild\nLeaf");
    }

    #[test]
    fn test_first_slide_title() {
        let presentation = Presentation {
            metadata: PresentationMetadata {
                id: "deck".to_string(),
                source_file: "deck.pptx".to_string(),
                processed_at: "2024-01-01T00:00:00Z".to_string(),
                stats: Stats::default(),
            },
            sections: vec![Section {
                title: "Default".to_string(),
                slides: vec![Slide {
                    order: 1,
                    title: "Welcome".to_string(),
                    layout: "Title Slide".to_string(),
                    notes: String::new(),
                    content: Vec::new(),
                }],
            }],
        };

        assert_eq!(presentation.first_slide_title(), Some("Welcome"));
        assert_eq!(presentation.slide_count(), 1);
    }
}
