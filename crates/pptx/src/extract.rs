//! Per-file extraction pipeline: package → document → sections → slides.

use crate::assemble::assemble_slide;
use crate::document::PptxDocument;
use crate::media::MediaStore;
use crate::package::PptxPackage;
use crate::sections::resolve_sections;
use chrono::{SecondsFormat, Utc};
use deck_core::{
    Diagnostics, Presentation, PresentationMetadata, Result, Section, Stats,
};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Extracts one `.pptx` file into a [`Presentation`].
///
/// Errors returned here are fatal to the file only; everything recoverable
/// degrades through the supplied [`Diagnostics`] instead. Independent
/// files never share state beyond the output directory, so callers may
/// run one extractor per file in parallel.
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from a file on disk. Media lands under
    /// `<output>/media/<file stem>/`.
    pub fn extract(
        &self,
        path: &Path,
        output_dir: &Path,
        diags: &mut Diagnostics,
    ) -> Result<Presentation> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown");
        let file = File::open(path)?;
        self.extract_reader(BufReader::new(file), filename, output_dir, diags)
    }

    /// Extract from any seekable reader over package bytes.
    pub fn extract_reader<R: Read + Seek>(
        &self,
        reader: R,
        filename: &str,
        output_dir: &Path,
        diags: &mut Diagnostics,
    ) -> Result<Presentation> {
        let file_id = Path::new(filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("presentation")
            .to_string();
        let media = MediaStore::create(output_dir, &file_id)?;

        log::info!("Parsing {}", filename);
        let package = PptxPackage::open(reader)?;
        let document = PptxDocument::load(package)?;

        let deck: Vec<u32> = document.slides.iter().map(|slide| slide.slide_id).collect();
        let resolved = resolve_sections(&deck, &document, diags);

        let mut order = 0u32;
        let mut image_count = 0u32;
        let mut sections = Vec::with_capacity(resolved.len());
        for entry in resolved {
            let mut section = Section::new(entry.title);
            for index in entry.slide_indices {
                let slide_doc = &document.slides[index];
                order += 1;
                let parts = document.part_view(&slide_doc.part_path);
                let (slide, images) = assemble_slide(slide_doc, order, &parts, &media, diags);
                image_count += images;
                section.slides.push(slide);
            }
            sections.push(section);
        }

        Ok(Presentation {
            metadata: PresentationMetadata {
                id: file_id,
                source_file: filename.to_string(),
                processed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                stats: Stats {
                    slide_count: order,
                    image_count,
                },
            },
            sections,
        })
    }
}

impl Default for PptxExtractor {
    fn default() -> Self {
        Self::new()
    }
}
