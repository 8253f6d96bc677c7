//! Grouping of a deck's slides into titled sections.
//!
//! Resolution runs through three tiers, first success wins: native section
//! objects, the declarative section list in the presentation's extension
//! block, then a single synthetic "Default" section. Whatever tier wins, the
//! resolved sections always cover the deck exactly: every slide once, in
//! deck order. A tier whose data is present but fails that check is treated
//! as degraded and the next tier takes over.

use crate::document::PptxDocument;
use crate::xml::{attr, local_name};
use deck_core::{DegradationKind, Diagnostics, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// A section the document exposes directly, membership already resolved to
/// deck positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSection {
    pub title: String,
    pub slide_indices: Vec<usize>,
}

/// A declared section entry: a title plus slide ids still to be resolved
/// against the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredSection {
    pub title: String,
    pub slide_ids: Vec<u32>,
}

/// Section data exposed by a document.
///
/// Both accessors are fallible; an error is never fatal to resolution, it
/// only moves the resolver on to the next tier.
pub trait SectionSource {
    /// Native section objects, when the document model has them.
    fn native_sections(&self) -> Result<Vec<NativeSection>>;

    /// The declarative section list from the document's extension block.
    fn fallback_sections(&self) -> Result<Vec<DeclaredSection>>;
}

/// One resolved section: a title and the deck positions of its slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSection {
    pub title: String,
    pub slide_indices: Vec<usize>,
}

/// Resolve a deck's sections against a [`SectionSource`].
///
/// `deck` is the ordered list of slide ids. The returned sections
/// concatenate to exactly `0..deck.len()`.
pub fn resolve_sections<S: SectionSource>(
    deck: &[u32],
    source: &S,
    diags: &mut Diagnostics,
) -> Vec<ResolvedSection> {
    if deck.is_empty() {
        return Vec::new();
    }

    match source.native_sections() {
        Ok(native) => {
            let sections: Vec<ResolvedSection> = native
                .into_iter()
                .filter(|s| !s.slide_indices.is_empty())
                .map(|s| ResolvedSection {
                    title: s.title,
                    slide_indices: s.slide_indices,
                })
                .collect();
            if !sections.is_empty() {
                if covers_deck(&sections, deck.len()) {
                    return sections;
                }
                diags.record(
                    DegradationKind::SectionResolutionDegraded,
                    "native sections do not cover the deck, trying declarative list",
                );
            }
        }
        Err(e) => diags.record(
            DegradationKind::SectionResolutionDegraded,
            format!("error accessing native sections: {}", e),
        ),
    }

    match source.fallback_sections() {
        Ok(declared) => {
            let index_of: HashMap<u32, usize> = deck
                .iter()
                .enumerate()
                .map(|(index, &id)| (id, index))
                .collect();
            let sections: Vec<ResolvedSection> = declared
                .into_iter()
                .map(|entry| ResolvedSection {
                    title: entry.title,
                    slide_indices: entry
                        .slide_ids
                        .iter()
                        .filter_map(|id| index_of.get(id).copied())
                        .collect(),
                })
                .filter(|s| !s.slide_indices.is_empty())
                .collect();
            if !sections.is_empty() {
                if covers_deck(&sections, deck.len()) {
                    return sections;
                }
                diags.record(
                    DegradationKind::SectionResolutionDegraded,
                    "declared sections do not cover the deck, using default",
                );
            }
        }
        Err(e) => diags.record(
            DegradationKind::SectionResolutionDegraded,
            format!("error reading declared sections: {}", e),
        ),
    }

    vec![ResolvedSection {
        title: "Default".to_string(),
        slide_indices: (0..deck.len()).collect(),
    }]
}

/// Whether the sections' concatenated indices are exactly `0..deck_len`.
fn covers_deck(sections: &[ResolvedSection], deck_len: usize) -> bool {
    let mut next = 0;
    for section in sections {
        for &index in &section.slide_indices {
            if index != next {
                return false;
            }
            next += 1;
        }
    }
    next == deck_len
}

impl SectionSource for PptxDocument {
    /// The minimal package layer has no native section objects; section
    /// data only arrives through the presentation's extension list.
    fn native_sections(&self) -> Result<Vec<NativeSection>> {
        Ok(Vec::new())
    }

    fn fallback_sections(&self) -> Result<Vec<DeclaredSection>> {
        match &self.section_xml {
            Some(xml) => parse_declared_sections(xml),
            None => Ok(Vec::new()),
        }
    }
}

/// Scan extension-block XML for a `sectionLst` and collect its entries.
///
/// Entries without a resolvable structure are simply not collected; only a
/// malformed document is an error (and even that just moves resolution to
/// the next tier).
pub(crate) fn parse_declared_sections(xml: &str) -> Result<Vec<DeclaredSection>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut sections = Vec::new();
    let mut current: Option<DeclaredSection> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"section" => {
                        // A dangling open section still gets collected.
                        sections.extend(current.take());
                        current = Some(DeclaredSection {
                            title: attr(e, b"name").unwrap_or_default(),
                            slide_ids: Vec::new(),
                        });
                    }
                    b"sldId" => {
                        if let Some(section) = current.as_mut() {
                            if let Some(id) = attr(e, b"id").and_then(|v| v.parse().ok()) {
                                section.slide_ids.push(id);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"section" {
                    sections.extend(current.take());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(deck_core::Error::Xml(format!(
                    "Error parsing section list: {}",
                    e
                )));
            }

            _ => {}
        }
    }
    sections.extend(current.take());
    Ok(sections)
}
