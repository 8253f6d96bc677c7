//! Per-shape classification into content blocks.
//!
//! Branch order is a fixed contract: video probe first (independent of
//! everything else, since a shape can carry a video alongside other
//! content), then title skip, table, diagram, image, text. Reordering
//! changes observable output for shapes that satisfy several branches.

use crate::diagram;
use crate::document::{ParagraphDoc, ShapeContent, ShapeDoc, VideoRef};
use crate::media::MediaStore;
use crate::package::RelatedParts;
use deck_core::{ContentBlock, DegradationKind, Diagnostics, ListItem, ListStyle};

/// Extension table for embedded video parts; anything unknown is written
/// as `.mp4`.
const VIDEO_EXTENSIONS: &[(&str, &str)] = &[
    ("video/mp4", ".mp4"),
    ("video/x-m4v", ".m4v"),
    ("video/webm", ".webm"),
    ("video/quicktime", ".mov"),
    ("video/x-msvideo", ".avi"),
];

const DEFAULT_VIDEO_EXTENSION: &str = ".mp4";

/// Classify one shape into zero or more content blocks.
///
/// Returns the blocks in emission order plus the number of images
/// persisted. `order` is the slide's global 1-based position, used for
/// media filenames.
pub fn classify_shape(
    shape: &ShapeDoc,
    is_title: bool,
    order: u32,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> (Vec<ContentBlock>, u32) {
    let mut blocks = Vec::new();
    let mut images = 0;

    if let Some(video) = &shape.video {
        blocks.extend(probe_video(shape, video, order, parts, media, diags));
    }

    // The title's text is emitted as a heading by the assembler; only the
    // video probe above applies to the title shape.
    if is_title {
        return (blocks, images);
    }

    match &shape.content {
        ShapeContent::Table(rows) => {
            blocks.push(ContentBlock::Table {
                rows: rows
                    .iter()
                    .map(|row| row.iter().map(|cell| cell.trim().to_string()).collect())
                    .collect(),
            });
        }
        ShapeContent::Diagram {
            data_rel,
            layout_rel,
        } => {
            if let Some((layout, nodes)) = diagram::extract_diagram(
                data_rel.as_deref(),
                layout_rel.as_deref(),
                parts,
                media,
                diags,
            ) {
                blocks.push(ContentBlock::SmartArt { layout, nodes });
            }
        }
        ShapeContent::Picture {
            image_rel,
            paragraphs,
        } => match persist_image(shape, image_rel, order, parts, media, diags) {
            Some(block) => {
                blocks.push(block);
                images += 1;
            }
            // An unpersistable picture still contributes its text.
            None => blocks.extend(list_block(paragraphs)),
        },
        ShapeContent::Text(paragraphs) => blocks.extend(list_block(paragraphs)),
        ShapeContent::Other => {}
    }

    (blocks, images)
}

/// Resolve a shape's video reference into a Link (external) or Video
/// (embedded, persisted) block.
fn probe_video(
    shape: &ShapeDoc,
    video: &VideoRef,
    order: u32,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> Option<ContentBlock> {
    let title = if shape.name.is_empty() {
        "Video".to_string()
    } else {
        shape.name.clone()
    };

    if let Some(rel) = &video.link_rel {
        if let Some(target) = parts.target_ref(rel) {
            if target.external
                && (target.target.starts_with("http://") || target.target.starts_with("https://"))
            {
                return Some(ContentBlock::Link {
                    text: title,
                    url: target.target.to_string(),
                });
            }
        }
    }

    if let Some(rel) = &video.embed_rel {
        match parts.related_part(rel) {
            Some(part) => {
                let ext = VIDEO_EXTENSIONS
                    .iter()
                    .find(|(content_type, _)| *content_type == part.content_type)
                    .map(|(_, ext)| *ext)
                    .unwrap_or(DEFAULT_VIDEO_EXTENSION);
                let filename = format!("slide_{}_{}{}", order, shape.id, ext);
                match media.write(&filename, part.bytes) {
                    Ok(src) => return Some(ContentBlock::Video { src, title }),
                    Err(e) => diags.record(
                        DegradationKind::MediaWriteFailure,
                        format!("embedded video {}: {}", filename, e),
                    ),
                }
            }
            None => diags.record(
                DegradationKind::MediaRelationshipMissing,
                format!("video relationship {} does not resolve", rel),
            ),
        }
    }

    None
}

fn persist_image(
    shape: &ShapeDoc,
    image_rel: &str,
    order: u32,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> Option<ContentBlock> {
    let Some(part) = parts.related_part(image_rel) else {
        diags.record(
            DegradationKind::MediaRelationshipMissing,
            format!("image relationship {} does not resolve", image_rel),
        );
        return None;
    };

    let filename = format!("slide_{}_{}.png", order, shape.id);
    match media.write(&filename, part.bytes) {
        Ok(src) => Some(ContentBlock::Image {
            src,
            alt: if shape.name.is_empty() {
                "Slide Image".to_string()
            } else {
                shape.name.clone()
            },
            caption: String::new(),
        }),
        Err(e) => {
            diags.record(
                DegradationKind::MediaWriteFailure,
                format!("image {}: {}", filename, e),
            );
            None
        }
    }
}

/// One list block from a shape's non-blank paragraphs, or nothing.
fn list_block(paragraphs: &[ParagraphDoc]) -> Option<ContentBlock> {
    let items: Vec<ListItem> = paragraphs
        .iter()
        .filter(|p| !p.text.trim().is_empty())
        .map(|p| ListItem {
            text: p.text.trim().to_string(),
            level: p.level,
            url: p.hyperlink.clone(),
            children: Vec::new(),
        })
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(ContentBlock::List {
            style: ListStyle::Bullet,
            items,
        })
    }
}
