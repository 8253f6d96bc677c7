//! Assembly of one slide from its classified shapes.

use crate::classify::classify_shape;
use crate::document::SlideDoc;
use crate::media::MediaStore;
use crate::package::RelatedParts;
use deck_core::{ContentBlock, Diagnostics, Slide};

const UNKNOWN_LAYOUT: &str = "Unknown";

/// Assemble a [`Slide`] from a slide document.
///
/// Shapes are visited in reading order: stable sort by `(top, left)`, so
/// shapes without position data keep their document order. The title
/// heading (and its hyperlink, if any) always comes first. Returns the
/// slide plus the number of images it persisted.
pub fn assemble_slide(
    slide: &SlideDoc,
    order: u32,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> (Slide, u32) {
    let mut content = Vec::new();
    let mut images = 0;

    let title_index = slide.title_shape_index();
    let mut title = String::new();
    if let Some(shape) = title_index.map(|index| &slide.shapes[index]) {
        let text = shape.text();
        let text = text.trim();
        if !text.is_empty() {
            title = text.to_string();
            content.push(ContentBlock::Heading {
                text: title.clone(),
                level: 1,
            });
            if let Some(url) = shape.first_hyperlink() {
                content.push(ContentBlock::Link {
                    text: title.clone(),
                    url: url.to_string(),
                });
            }
        }
    }

    let mut reading_order: Vec<usize> = (0..slide.shapes.len()).collect();
    reading_order.sort_by_key(|&index| (slide.shapes[index].top, slide.shapes[index].left));

    for index in reading_order {
        let (blocks, shape_images) = classify_shape(
            &slide.shapes[index],
            Some(index) == title_index,
            order,
            parts,
            media,
            diags,
        );
        content.extend(blocks);
        images += shape_images;
    }

    let notes = if slide.notes.trim().is_empty() {
        String::new()
    } else {
        slide.notes.clone()
    };

    let slide = Slide {
        order,
        title,
        layout: slide
            .layout_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_LAYOUT.to_string()),
        notes,
        content,
    };
    (slide, images)
}
