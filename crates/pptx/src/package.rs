//! Read access to the OOXML package: parts, content types, relationships.
//!
//! The archive is loaded eagerly into memory so the extraction engine can
//! resolve related parts in any order without holding the archive open. The
//! engine itself only sees the [`RelatedParts`] capability, which keeps it
//! (and its tests) independent of the ZIP layer.

use crate::xml::{attr, local_name};
use deck_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// One relationship entry from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Raw target, relative to the owning part (or absolute with a leading
    /// `/`); verbatim for external targets.
    pub target: String,
    /// Relationship type URI.
    pub rel_type: String,
    /// Whether the target lives outside the package.
    pub external: bool,
}

/// Binary content of a part reached through a relationship.
pub struct RelatedPart<'a> {
    pub bytes: &'a [u8],
    pub content_type: String,
}

/// Raw relationship target, used for external hyperlink/video targets.
pub struct TargetRef<'a> {
    pub target: &'a str,
    pub external: bool,
}

/// Relationship-id resolution scoped to one package part.
///
/// Implemented by [`PartView`] over a real package and by in-memory fakes in
/// tests.
pub trait RelatedParts {
    /// Resolve a relationship id to the bytes and content type of the
    /// target part. External targets resolve to `None`.
    fn related_part(&self, rel_id: &str) -> Option<RelatedPart<'_>>;

    /// The raw target of a relationship, without loading any part.
    fn target_ref(&self, rel_id: &str) -> Option<TargetRef<'_>>;

    /// A resolver scoped to the target part, for following its own
    /// relationships (diagram data parts reference their icons this way).
    fn view_of(&self, rel_id: &str) -> Option<Box<dyn RelatedParts + '_>>;
}

/// An in-memory OOXML package.
pub struct PptxPackage {
    parts: HashMap<String, Vec<u8>>,
    default_types: HashMap<String, String>,
    override_types: HashMap<String, String>,
    rels: HashMap<String, HashMap<String, Relationship>>,
}

impl PptxPackage {
    /// Load a package from a reader over a `.pptx` ZIP archive.
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = HashMap::new();
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::Zip(format!("Failed to read archive entry: {}", e)))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().trim_start_matches('/').to_string();
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            parts.insert(name, bytes);
        }

        let content_types = parts
            .get(CONTENT_TYPES_PART)
            .ok_or_else(|| Error::Corrupted("missing [Content_Types].xml".to_string()))?;
        let (default_types, override_types) =
            parse_content_types(&String::from_utf8_lossy(content_types))?;

        let mut rels = HashMap::new();
        for (name, bytes) in &parts {
            if let Some(owner) = rels_owner(name) {
                let map = parse_rels(&String::from_utf8_lossy(bytes))?;
                rels.insert(owner, map);
            }
        }

        Ok(Self {
            parts,
            default_types,
            override_types,
            rels,
        })
    }

    /// Raw bytes of a part, if present.
    pub fn part(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    /// Part content decoded as text; errors if the part is absent.
    pub fn part_str(&self, path: &str) -> Result<Cow<'_, str>> {
        self.parts
            .get(path)
            .map(|b| String::from_utf8_lossy(b))
            .ok_or_else(|| Error::MissingPart(path.to_string()))
    }

    /// Declared content type for a part path.
    pub fn content_type(&self, path: &str) -> Option<&str> {
        let override_key = format!("/{}", path);
        if let Some(ct) = self.override_types.get(&override_key) {
            return Some(ct);
        }
        let ext = path.rsplit('.').next()?.to_ascii_lowercase();
        self.default_types.get(&ext).map(String::as_str)
    }

    /// Relationships owned by a part (`""` is the package root).
    pub fn rels_for(&self, part_path: &str) -> Option<&HashMap<String, Relationship>> {
        self.rels.get(part_path)
    }

    /// Path of the main presentation part, resolved through the package
    /// root relationships.
    pub fn presentation_part(&self) -> Result<String> {
        if let Some(root) = self.rels.get("") {
            if let Some(rel) = root
                .values()
                .find(|r| !r.external && r.rel_type.ends_with("/officeDocument"))
            {
                return Ok(resolve_target("", &rel.target));
            }
        }
        if self.parts.contains_key("ppt/presentation.xml") {
            return Ok("ppt/presentation.xml".to_string());
        }
        Err(Error::UnsupportedFormat(
            "no presentation part found".to_string(),
        ))
    }

    /// A [`RelatedParts`] resolver scoped to the given part.
    pub fn view(&self, part_path: &str) -> PartView<'_> {
        PartView {
            package: self,
            part_path: part_path.to_string(),
        }
    }
}

/// [`RelatedParts`] implementation over a [`PptxPackage`] part.
pub struct PartView<'a> {
    package: &'a PptxPackage,
    part_path: String,
}

impl PartView<'_> {
    fn relationship(&self, rel_id: &str) -> Option<&Relationship> {
        self.package.rels.get(&self.part_path)?.get(rel_id)
    }
}

impl RelatedParts for PartView<'_> {
    fn related_part(&self, rel_id: &str) -> Option<RelatedPart<'_>> {
        let rel = self.relationship(rel_id)?;
        if rel.external {
            return None;
        }
        let path = resolve_target(&self.part_path, &rel.target);
        let bytes = self.package.part(&path)?;
        let content_type = self
            .package
            .content_type(&path)
            .unwrap_or_default()
            .to_string();
        Some(RelatedPart {
            bytes,
            content_type,
        })
    }

    fn target_ref(&self, rel_id: &str) -> Option<TargetRef<'_>> {
        let rel = self.relationship(rel_id)?;
        Some(TargetRef {
            target: &rel.target,
            external: rel.external,
        })
    }

    fn view_of(&self, rel_id: &str) -> Option<Box<dyn RelatedParts + '_>> {
        let rel = self.relationship(rel_id)?;
        if rel.external {
            return None;
        }
        let path = resolve_target(&self.part_path, &rel.target);
        if !self.package.parts.contains_key(&path) {
            return None;
        }
        Some(Box::new(self.package.view(&path)))
    }
}

/// Map a `.rels` part name to the part that owns it.
///
/// `ppt/slides/_rels/slide1.xml.rels` belongs to `ppt/slides/slide1.xml`;
/// `_rels/.rels` belongs to the package root (`""`).
fn rels_owner(name: &str) -> Option<String> {
    let stem = name.strip_suffix(".rels")?;
    let (dir, file) = stem.rsplit_once('/')?;
    let dir = dir.strip_suffix("_rels")?;
    Some(format!("{}{}", dir, file))
}

/// Resolve a relationship target against the directory of the owning part.
pub(crate) fn resolve_target(base_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = match base_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Parse a `.rels` document into an id → relationship map.
fn parse_rels(xml: &str) -> Result<HashMap<String, Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut map = HashMap::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let id = attr(e, b"Id").unwrap_or_default();
                let target = attr(e, b"Target").unwrap_or_default();
                let rel_type = attr(e, b"Type").unwrap_or_default();
                let external = attr(e, b"TargetMode").as_deref() == Some("External");
                if !id.is_empty() {
                    map.insert(
                        id,
                        Relationship {
                            target,
                            rel_type,
                            external,
                        },
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }
    Ok(map)
}

/// Parse `[Content_Types].xml` into (extension defaults, part overrides).
fn parse_content_types(xml: &str) -> Result<(HashMap<String, String>, HashMap<String, String>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut defaults = HashMap::new();
    let mut overrides = HashMap::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"Default" => {
                        if let (Some(ext), Some(ct)) =
                            (attr(e, b"Extension"), attr(e, b"ContentType"))
                        {
                            defaults.insert(ext.to_ascii_lowercase(), ct);
                        }
                    }
                    b"Override" => {
                        if let (Some(part), Some(ct)) =
                            (attr(e, b"PartName"), attr(e, b"ContentType"))
                        {
                            overrides.insert(part, ct);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing content types: {}", e)));
            }
            _ => {}
        }
    }
    Ok((defaults, overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_package(entries: &[(&str, &str)]) -> PptxPackage {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let cursor = writer.finish().unwrap();
        PptxPackage::open(cursor).unwrap()
    }

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/ppt/presentation.xml"
            ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "../media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(
            resolve_target("ppt/presentation.xml", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "/ppt/media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(resolve_target("", "ppt/presentation.xml"), "ppt/presentation.xml");
    }

    #[test]
    fn test_rels_owner() {
        assert_eq!(
            rels_owner("ppt/slides/_rels/slide1.xml.rels").as_deref(),
            Some("ppt/slides/slide1.xml")
        );
        assert_eq!(rels_owner("_rels/.rels").as_deref(), Some(""));
        assert_eq!(rels_owner("ppt/slides/slide1.xml"), None);
    }

    #[test]
    fn test_part_and_content_type_lookup() {
        let package = build_package(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("ppt/presentation.xml", "<p:presentation/>"),
            ("ppt/media/image1.png", "not really a png"),
        ]);

        assert!(package.part("ppt/presentation.xml").is_some());
        assert_eq!(
            package.content_type("ppt/media/image1.png"),
            Some("image/png")
        );
        assert!(package
            .content_type("ppt/presentation.xml")
            .unwrap()
            .ends_with("main+xml"));
    }

    #[test]
    fn test_related_part_resolution() {
        let package = build_package(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            (
                "_rels/.rels",
                r#"<Relationships><Relationship Id="rId1"
                    Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument"
                    Target="ppt/presentation.xml"/></Relationships>"#,
            ),
            ("ppt/presentation.xml", "<p:presentation/>"),
            (
                "ppt/slides/_rels/slide1.xml.rels",
                r#"<Relationships>
                    <Relationship Id="rId2"
                        Type=".../image" Target="../media/image1.png"/>
                    <Relationship Id="rId3" Type=".../hyperlink"
                        Target="https://example.com" TargetMode="External"/>
                </Relationships>"#,
            ),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
            ("ppt/media/image1.png", "png bytes"),
        ]);

        assert_eq!(
            package.presentation_part().unwrap(),
            "ppt/presentation.xml"
        );

        let view = package.view("ppt/slides/slide1.xml");
        let image = view.related_part("rId2").unwrap();
        assert_eq!(image.bytes, b"png bytes");
        assert_eq!(image.content_type, "image/png");

        // External targets never resolve to parts, only to raw refs.
        assert!(view.related_part("rId3").is_none());
        let target = view.target_ref("rId3").unwrap();
        assert_eq!(target.target, "https://example.com");
        assert!(target.external);

        assert!(view.related_part("rId99").is_none());
    }
}
