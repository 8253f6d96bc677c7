//! In-memory object model for a parsed presentation document.
//!
//! Shape capabilities are computed once at ingestion into the closed
//! [`ShapeContent`] union instead of being re-probed at every
//! classification branch. The video reference is tracked independently of
//! the content union because a shape can carry both.

use crate::package::{PartView, PptxPackage};
use crate::reader;
use deck_core::Result;

/// One paragraph of a shape's text body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphDoc {
    pub text: String,

    /// Native indent level, 0 for top-level paragraphs.
    pub level: u32,

    /// First resolvable hyperlink address among this paragraph's runs.
    pub hyperlink: Option<String>,
}

/// Video references found in a shape's structural subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoRef {
    /// Relationship id of an external video link.
    pub link_rel: Option<String>,

    /// Relationship id of an embedded media part.
    pub embed_rel: Option<String>,
}

/// What a shape can contribute to slide content, decided at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeContent {
    /// Tabular data, row-major.
    Table(Vec<Vec<String>>),

    /// A graphics frame holding diagram data.
    Diagram {
        data_rel: Option<String>,
        layout_rel: Option<String>,
    },

    /// A shape exposing binary image data, with any text it also carries
    /// (kept so a failed image write can fall back to text).
    Picture {
        image_rel: String,
        paragraphs: Vec<ParagraphDoc>,
    },

    /// A plain text body.
    Text(Vec<ParagraphDoc>),

    /// Nothing this engine extracts.
    Other,
}

/// A single shape with its position and computed capability.
#[derive(Debug, Clone)]
pub struct ShapeDoc {
    /// Shape id from the non-visual properties.
    pub id: u32,

    pub name: String,

    /// Vertical offset in EMU; 0 when the shape carries no position.
    pub top: i64,

    /// Horizontal offset in EMU; 0 when the shape carries no position.
    pub left: i64,

    /// Whether this is the slide's designated title placeholder.
    pub is_title: bool,

    pub content: ShapeContent,

    pub video: Option<VideoRef>,
}

impl ShapeDoc {
    /// The shape's paragraphs, for text shapes and for picture shapes that
    /// also carry text.
    pub fn paragraphs(&self) -> &[ParagraphDoc] {
        match &self.content {
            ShapeContent::Text(paragraphs) => paragraphs,
            ShapeContent::Picture { paragraphs, .. } => paragraphs,
            _ => &[],
        }
    }

    /// Full text of the shape, paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First hyperlink across the shape's paragraphs.
    pub fn first_hyperlink(&self) -> Option<&str> {
        self.paragraphs()
            .iter()
            .find_map(|p| p.hyperlink.as_deref())
    }
}

/// One slide of the document, in deck order.
#[derive(Debug, Clone)]
pub struct SlideDoc {
    /// Slide id from the presentation's slide id list.
    pub slide_id: u32,

    /// Package path of the slide part.
    pub part_path: String,

    /// Shapes in document order.
    pub shapes: Vec<ShapeDoc>,

    /// Speaker notes text, empty when the slide has none.
    pub notes: String,

    /// Name of the slide's layout, when the layout part declares one.
    pub layout_name: Option<String>,
}

impl SlideDoc {
    /// Index of the designated title shape, if any.
    pub fn title_shape_index(&self) -> Option<usize> {
        self.shapes.iter().position(|s| s.is_title)
    }

    /// The designated title shape, if any.
    pub fn title_shape(&self) -> Option<&ShapeDoc> {
        self.title_shape_index().map(|i| &self.shapes[i])
    }
}

/// A fully loaded presentation document.
pub struct PptxDocument {
    /// Slides in deck order.
    pub slides: Vec<SlideDoc>,

    /// Raw `extLst` XML from the presentation part, holding section data.
    pub(crate) section_xml: Option<String>,

    package: PptxPackage,
}

impl PptxDocument {
    /// Build the object model from an opened package.
    pub fn load(package: PptxPackage) -> Result<Self> {
        let pres_path = package.presentation_part()?;
        let pres_xml = package.part_str(&pres_path)?.into_owned();
        let parsed = reader::parse_presentation_xml(&pres_xml)?;

        let mut slides = Vec::with_capacity(parsed.slide_refs.len());
        for slide_ref in &parsed.slide_refs {
            match reader::load_slide(&package, &pres_path, slide_ref)? {
                Some(slide) => slides.push(slide),
                None => {
                    log::warn!(
                        "slide relationship {} does not resolve, skipping",
                        slide_ref.rel_id
                    );
                }
            }
        }

        Ok(Self {
            slides,
            section_xml: parsed.section_xml,
            package,
        })
    }

    /// A related-part resolver scoped to the given part path.
    pub fn part_view(&self, part_path: &str) -> PartView<'_> {
        self.package.view(part_path)
    }
}
