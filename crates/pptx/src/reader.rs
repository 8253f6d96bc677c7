//! XML readers that build the object model from package parts.
//!
//! Event-driven parsing with prefix-agnostic element dispatch; shape
//! capabilities (table, diagram, picture, text, video) are captured in one
//! pass per slide.

use crate::document::{ParagraphDoc, ShapeContent, ShapeDoc, SlideDoc, VideoRef};
use crate::package::{resolve_target, PptxPackage, Relationship};
use crate::xml::{attr, local_name};
use deck_core::{Error, Result};
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

const DIAGRAM_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/diagram";

/// A slide entry from the presentation's slide id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlideRef {
    pub slide_id: u32,
    pub rel_id: String,
}

/// Parsed `presentation.xml`: ordered slide references and the raw
/// extension block holding section data.
#[derive(Debug, Default)]
pub(crate) struct PresentationXml {
    pub slide_refs: Vec<SlideRef>,
    pub section_xml: Option<String>,
}

pub(crate) fn parse_presentation_xml(xml: &str) -> Result<PresentationXml> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = PresentationXml::default();
    let mut in_sld_id_lst = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sldIdLst" => in_sld_id_lst = true,
                b"sldId" if in_sld_id_lst => push_slide_ref(e, &mut parsed.slide_refs),
                b"extLst" if parsed.section_xml.is_none() => {
                    let inner = reader
                        .read_text(e.name())
                        .map_err(|err| Error::Xml(format!("Error reading extLst: {}", err)))?;
                    parsed.section_xml = Some(inner.into_owned());
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if in_sld_id_lst && local_name(e.name().as_ref()) == b"sldId" {
                    push_slide_ref(e, &mut parsed.slide_refs);
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"sldIdLst" {
                    in_sld_id_lst = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing presentation: {}", e)));
            }
            _ => {}
        }
    }
    Ok(parsed)
}

fn push_slide_ref(e: &BytesStart, out: &mut Vec<SlideRef>) {
    let slide_id = attr(e, b"id").and_then(|v| v.parse().ok());
    let rel_id = attr(e, b"r:id");
    if let (Some(slide_id), Some(rel_id)) = (slide_id, rel_id) {
        out.push(SlideRef { slide_id, rel_id });
    }
}

/// Load one slide part plus its notes text and layout name.
///
/// Returns `Ok(None)` when the slide relationship does not resolve. A
/// missing notes or layout part degrades to defaults; a missing slide part
/// is an error for the whole file.
pub(crate) fn load_slide(
    package: &PptxPackage,
    pres_path: &str,
    slide_ref: &SlideRef,
) -> Result<Option<SlideDoc>> {
    let Some(rel) = package
        .rels_for(pres_path)
        .and_then(|m| m.get(&slide_ref.rel_id))
    else {
        return Ok(None);
    };

    let part_path = resolve_target(pres_path, &rel.target);
    let xml = package.part_str(&part_path)?.into_owned();
    let empty_rels = HashMap::new();
    let slide_rels = package.rels_for(&part_path).unwrap_or(&empty_rels);
    let shapes = parse_slide_xml(&xml, slide_rels)?;

    let mut notes = String::new();
    let mut layout_name = None;
    if let Some(notes_rel) = slide_rels
        .values()
        .find(|r| !r.external && r.rel_type.ends_with("/notesSlide"))
    {
        let notes_path = resolve_target(&part_path, &notes_rel.target);
        match package.part_str(&notes_path) {
            Ok(notes_xml) => notes = parse_notes_xml(&notes_xml)?,
            Err(e) => log::debug!("notes part unavailable for {}: {}", part_path, e),
        }
    }
    if let Some(layout_rel) = slide_rels
        .values()
        .find(|r| !r.external && r.rel_type.ends_with("/slideLayout"))
    {
        let layout_path = resolve_target(&part_path, &layout_rel.target);
        match package.part_str(&layout_path) {
            Ok(layout_xml) => layout_name = parse_layout_name(&layout_xml)?,
            Err(e) => log::debug!("layout part unavailable for {}: {}", part_path, e),
        }
    }

    Ok(Some(SlideDoc {
        slide_id: slide_ref.slide_id,
        part_path,
        shapes,
        notes,
        layout_name,
    }))
}

/// Parse a slide part into its shapes, in document order.
pub(crate) fn parse_slide_xml(
    xml: &str,
    rels: &HashMap<String, Relationship>,
) -> Result<Vec<ShapeDoc>> {
    // Text is captured only inside `a:t` runs, untrimmed: run-level
    // whitespace is significant ("First " + "step").
    let mut reader = Reader::from_str(xml);

    let mut shapes = Vec::new();
    let mut shape: Option<ShapeParse> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                match shape.as_mut() {
                    Some(s) => {
                        if local == s.container.as_slice() {
                            s.depth += 1;
                        }
                        s.start(e, rels);
                    }
                    None => {
                        if is_shape_container(local) {
                            shape = Some(ShapeParse::new(local));
                        }
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(s) = shape.as_mut() {
                    s.empty(e, rels);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(s) = shape.as_mut() {
                    let text = e.unescape().unwrap_or_default();
                    s.text(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                if let Some(s) = shape.as_mut() {
                    if local == s.container.as_slice() {
                        s.depth -= 1;
                        if s.depth == 0 {
                            let finished = shape.take().map(ShapeParse::finish);
                            shapes.extend(finished);
                            continue;
                        }
                    }
                    s.end(local);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Error parsing slide: {}", e))),
            _ => {}
        }
    }
    Ok(shapes)
}

fn is_shape_container(local: &[u8]) -> bool {
    matches!(local, b"sp" | b"pic" | b"graphicFrame")
}

/// Parser state for one shape subtree.
struct ShapeParse {
    container: Vec<u8>,
    depth: u32,

    id: u32,
    name: String,
    top: i64,
    left: i64,
    is_title: bool,
    is_diagram: bool,
    data_rel: Option<String>,
    layout_rel: Option<String>,
    image_rel: Option<String>,
    video_link: Option<String>,
    video_embed: Option<String>,
    has_table: bool,
    rows: Vec<Vec<String>>,
    paragraphs: Vec<ParagraphDoc>,

    row: Vec<String>,
    cell: String,
    para: Option<ParagraphDoc>,
    seen_cnvpr: bool,
    has_off: bool,
    in_blipfill: bool,
    in_txbody: bool,
    in_table: bool,
    in_cell: bool,
    in_t: bool,
}

impl ShapeParse {
    fn new(container: &[u8]) -> Self {
        Self {
            container: container.to_vec(),
            depth: 1,
            id: 0,
            name: String::new(),
            top: 0,
            left: 0,
            is_title: false,
            is_diagram: false,
            data_rel: None,
            layout_rel: None,
            image_rel: None,
            video_link: None,
            video_embed: None,
            has_table: false,
            rows: Vec::new(),
            paragraphs: Vec::new(),
            row: Vec::new(),
            cell: String::new(),
            para: None,
            seen_cnvpr: false,
            has_off: false,
            in_blipfill: false,
            in_txbody: false,
            in_table: false,
            in_cell: false,
            in_t: false,
        }
    }

    fn start(&mut self, e: &BytesStart, rels: &HashMap<String, Relationship>) {
        match local_name(e.name().as_ref()) {
            b"tbl" => {
                self.in_table = true;
                self.has_table = true;
            }
            b"tr" if self.in_table => self.row = Vec::new(),
            b"tc" if self.in_table => {
                self.in_cell = true;
                self.cell = String::new();
            }
            b"txBody" if !self.in_table => self.in_txbody = true,
            b"blipFill" => self.in_blipfill = true,
            b"p" => self.open_paragraph(),
            b"t" => self.in_t = true,
            _ => self.element(e, rels),
        }
    }

    fn empty(&mut self, e: &BytesStart, rels: &HashMap<String, Relationship>) {
        if local_name(e.name().as_ref()) == b"p" {
            self.open_paragraph();
            self.close_paragraph();
        } else {
            self.element(e, rels);
        }
    }

    /// Attribute captures shared by start and empty events.
    fn element(&mut self, e: &BytesStart, rels: &HashMap<String, Relationship>) {
        match local_name(e.name().as_ref()) {
            b"cNvPr" if !self.seen_cnvpr => {
                self.seen_cnvpr = true;
                if let Some(id) = attr(e, b"id").and_then(|v| v.parse().ok()) {
                    self.id = id;
                }
                if let Some(name) = attr(e, b"name") {
                    self.name = name;
                }
            }
            b"ph" => {
                if matches!(attr(e, b"type").as_deref(), Some("title") | Some("ctrTitle")) {
                    self.is_title = true;
                }
            }
            b"off" if !self.has_off => {
                self.has_off = true;
                if let Some(x) = attr(e, b"x").and_then(|v| v.parse().ok()) {
                    self.left = x;
                }
                if let Some(y) = attr(e, b"y").and_then(|v| v.parse().ok()) {
                    self.top = y;
                }
            }
            b"videoFile" if self.video_link.is_none() => {
                self.video_link = attr(e, b"r:link");
            }
            b"media" if self.video_embed.is_none() => {
                self.video_embed = attr(e, b"r:embed");
            }
            b"blip" if self.in_blipfill && self.image_rel.is_none() => {
                self.image_rel = attr(e, b"r:embed");
            }
            b"graphicData" => {
                if attr(e, b"uri").as_deref() == Some(DIAGRAM_URI) {
                    self.is_diagram = true;
                }
            }
            b"relIds" => {
                self.data_rel = attr(e, b"r:dm");
                self.layout_rel = attr(e, b"r:lo");
            }
            b"pPr" => {
                if let Some(p) = self.para.as_mut() {
                    if let Some(level) = attr(e, b"lvl").and_then(|v| v.parse().ok()) {
                        p.level = level;
                    }
                }
            }
            b"hlinkClick" => {
                if let Some(p) = self.para.as_mut() {
                    if p.hyperlink.is_none() {
                        if let Some(rel) = attr(e, b"r:id").and_then(|rid| rels.get(&rid)) {
                            if rel.external {
                                p.hyperlink = Some(rel.target.clone());
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn open_paragraph(&mut self) {
        if self.in_cell {
            if !self.cell.is_empty() {
                self.cell.push('\n');
            }
        } else if self.in_txbody {
            self.para = Some(ParagraphDoc::default());
        }
    }

    fn close_paragraph(&mut self) {
        if let Some(p) = self.para.take() {
            self.paragraphs.push(p);
        }
    }

    fn text(&mut self, s: &str) {
        if !self.in_t {
            return;
        }
        if self.in_cell {
            self.cell.push_str(s);
        } else if let Some(p) = self.para.as_mut() {
            p.text.push_str(s);
        }
    }

    fn end(&mut self, local: &[u8]) {
        match local {
            b"t" => self.in_t = false,
            b"p" => self.close_paragraph(),
            b"tc" if self.in_cell => {
                self.in_cell = false;
                self.row.push(std::mem::take(&mut self.cell));
            }
            b"tr" if self.in_table => self.rows.push(std::mem::take(&mut self.row)),
            b"tbl" => self.in_table = false,
            b"txBody" => self.in_txbody = false,
            b"blipFill" => self.in_blipfill = false,
            _ => {}
        }
    }

    fn finish(self) -> ShapeDoc {
        let content = if self.has_table {
            ShapeContent::Table(self.rows)
        } else if self.is_diagram {
            ShapeContent::Diagram {
                data_rel: self.data_rel,
                layout_rel: self.layout_rel,
            }
        } else if let Some(image_rel) = self.image_rel {
            ShapeContent::Picture {
                image_rel,
                paragraphs: self.paragraphs,
            }
        } else if !self.paragraphs.is_empty() {
            ShapeContent::Text(self.paragraphs)
        } else {
            ShapeContent::Other
        };

        let video = if self.video_link.is_some() || self.video_embed.is_some() {
            Some(VideoRef {
                link_rel: self.video_link,
                embed_rel: self.video_embed,
            })
        } else {
            None
        };

        ShapeDoc {
            id: self.id,
            name: self.name,
            top: self.top,
            left: self.left,
            is_title: self.is_title,
            content,
            video,
        }
    }
}

/// Text of the notes slide's body placeholder.
pub(crate) fn parse_notes_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut notes: Option<String> = None;
    let mut in_shape = false;
    let mut is_body = false;
    let mut in_t = false;
    let mut buffer = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    in_shape = true;
                    is_body = false;
                    buffer.clear();
                }
                b"p" if in_shape => {
                    if !buffer.is_empty() {
                        buffer.push('\n');
                    }
                }
                b"t" => in_t = true,
                b"ph" => {
                    if in_shape && attr(e, b"type").as_deref() == Some("body") {
                        is_body = true;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if in_shape
                    && local_name(e.name().as_ref()) == b"ph"
                    && attr(e, b"type").as_deref() == Some("body")
                {
                    is_body = true;
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_shape && in_t {
                    buffer.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_t = false,
                b"sp" => {
                    if in_shape && is_body && notes.is_none() {
                        notes = Some(std::mem::take(&mut buffer));
                    }
                    in_shape = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Error parsing notes: {}", e))),
            _ => {}
        }
    }
    Ok(notes.unwrap_or_default())
}

/// Layout display name from a slide layout part (`p:cSld/@name`).
pub(crate) fn parse_layout_name(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"cSld" {
                    return Ok(attr(e, b"name"));
                }
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(Error::Xml(format!("Error parsing layout: {}", e))),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external_rel(target: &str) -> Relationship {
        Relationship {
            target: target.to_string(),
            rel_type: "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
                .to_string(),
            external: true,
        }
    }

    #[test]
    fn test_parse_presentation_xml() {
        let xml = r#"<p:presentation xmlns:p="..." xmlns:r="...">
            <p:sldIdLst>
                <p:sldId id="256" r:id="rId2"/>
                <p:sldId id="257" r:id="rId3"/>
            </p:sldIdLst>
            <p:extLst><p:ext uri="{521415D9}">
                <p14:sectionLst xmlns:p14="..."><p14:section name="Intro"/></p14:sectionLst>
            </p:ext></p:extLst>
        </p:presentation>"#;

        let parsed = parse_presentation_xml(xml).unwrap();
        assert_eq!(
            parsed.slide_refs,
            vec![
                SlideRef {
                    slide_id: 256,
                    rel_id: "rId2".to_string()
                },
                SlideRef {
                    slide_id: 257,
                    rel_id: "rId3".to_string()
                },
            ]
        );
        assert!(parsed.section_xml.unwrap().contains("sectionLst"));
    }

    #[test]
    fn test_parse_title_and_text_shapes() {
        let xml = r#"<p:sld><p:cSld><p:spTree>
            <p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Title 1"/>
                    <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
                <p:spPr><a:xfrm><a:off x="100" y="0"/></a:xfrm></p:spPr>
                <p:txBody><a:p><a:r><a:t>Welcome</a:t></a:r></a:p></p:txBody>
            </p:sp>
            <p:sp>
                <p:nvSpPr><p:cNvPr id="3" name="Content 2"/></p:nvSpPr>
                <p:spPr><a:xfrm><a:off x="100" y="2000"/></a:xfrm></p:spPr>
                <p:txBody>
                    <a:p><a:pPr lvl="1"/><a:r>
                        <a:rPr><a:hlinkClick r:id="rId5"/></a:rPr>
                        <a:t>Linked bullet</a:t>
                    </a:r></a:p>
                    <a:p><a:r><a:t>Plain </a:t></a:r><a:r><a:t>bullet</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>
        </p:spTree></p:cSld></p:sld>"#;

        let mut rels = HashMap::new();
        rels.insert("rId5".to_string(), external_rel("https://example.com"));

        let shapes = parse_slide_xml(xml, &rels).unwrap();
        assert_eq!(shapes.len(), 2);

        let title = &shapes[0];
        assert!(title.is_title);
        assert_eq!(title.id, 2);
        assert_eq!(title.name, "Title 1");
        assert_eq!(title.top, 0);
        assert_eq!(title.left, 100);
        assert_eq!(title.text(), "Welcome");

        let body = &shapes[1];
        assert!(!body.is_title);
        assert_eq!(body.top, 2000);
        let paragraphs = body.paragraphs();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "Linked bullet");
        assert_eq!(paragraphs[0].level, 1);
        assert_eq!(
            paragraphs[0].hyperlink.as_deref(),
            Some("https://example.com")
        );
        assert_eq!(paragraphs[1].text, "Plain bullet");
        assert_eq!(paragraphs[1].hyperlink, None);
    }

    #[test]
    fn test_parse_table_shape() {
        let xml = r#"<p:sld><p:cSld><p:spTree>
            <p:graphicFrame>
                <p:nvGraphicFramePr><p:cNvPr id="4" name="Table 3"/></p:nvGraphicFramePr>
                <p:xfrm><a:off x="0" y="500"/></p:xfrm>
                <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
                    <a:tbl>
                        <a:tr>
                            <a:tc><a:txBody><a:p><a:r><a:t> A </a:t></a:r></a:p></a:txBody></a:tc>
                            <a:tc><a:txBody><a:p><a:r><a:t>B</a:t></a:r></a:p></a:txBody></a:tc>
                        </a:tr>
                        <a:tr>
                            <a:tc><a:txBody><a:p><a:r><a:t>C</a:t></a:r></a:p></a:txBody></a:tc>
                            <a:tc><a:txBody><a:p><a:r><a:t>D</a:t></a:r></a:p></a:txBody></a:tc>
                        </a:tr>
                    </a:tbl>
                </a:graphicData></a:graphic>
            </p:graphicFrame>
        </p:spTree></p:cSld></p:sld>"#;

        let shapes = parse_slide_xml(xml, &HashMap::new()).unwrap();
        assert_eq!(shapes.len(), 1);
        let ShapeContent::Table(rows) = &shapes[0].content else {
            panic!("expected a table shape");
        };
        assert_eq!(
            rows,
            &vec![
                vec![" A ".to_string(), "B".to_string()],
                vec!["C".to_string(), "D".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_picture_and_diagram_shapes() {
        let xml = r#"<p:sld><p:cSld><p:spTree>
            <p:pic>
                <p:nvPicPr><p:cNvPr id="5" name="Picture 4"/></p:nvPicPr>
                <p:blipFill><a:blip r:embed="rId7"/></p:blipFill>
                <p:spPr><a:xfrm><a:off x="10" y="20"/></a:xfrm></p:spPr>
            </p:pic>
            <p:graphicFrame>
                <p:nvGraphicFramePr><p:cNvPr id="6" name="Diagram 5"/></p:nvGraphicFramePr>
                <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/diagram">
                    <dgm:relIds r:dm="rId8" r:lo="rId9"/>
                </a:graphicData></a:graphic>
            </p:graphicFrame>
        </p:spTree></p:cSld></p:sld>"#;

        let shapes = parse_slide_xml(xml, &HashMap::new()).unwrap();
        assert_eq!(shapes.len(), 2);

        let ShapeContent::Picture { image_rel, .. } = &shapes[0].content else {
            panic!("expected a picture shape");
        };
        assert_eq!(image_rel, "rId7");

        let ShapeContent::Diagram {
            data_rel,
            layout_rel,
        } = &shapes[1].content
        else {
            panic!("expected a diagram shape");
        };
        assert_eq!(data_rel.as_deref(), Some("rId8"));
        assert_eq!(layout_rel.as_deref(), Some("rId9"));
    }

    #[test]
    fn test_parse_video_shape() {
        let xml = r#"<p:sld><p:cSld><p:spTree>
            <p:pic>
                <p:nvPicPr><p:cNvPr id="7" name="Video 6"/>
                    <p:nvPr>
                        <a:videoFile r:link="rId10"/>
                        <p:extLst><p:ext><p14:media r:embed="rId11"/></p:ext></p:extLst>
                    </p:nvPr>
                </p:nvPicPr>
                <p:blipFill><a:blip r:embed="rId12"/></p:blipFill>
            </p:pic>
        </p:spTree></p:cSld></p:sld>"#;

        let shapes = parse_slide_xml(xml, &HashMap::new()).unwrap();
        assert_eq!(shapes.len(), 1);
        let video = shapes[0].video.as_ref().expect("video reference");
        assert_eq!(video.link_rel.as_deref(), Some("rId10"));
        assert_eq!(video.embed_rel.as_deref(), Some("rId11"));
        // The poster frame still makes it an image candidate.
        assert!(matches!(
            shapes[0].content,
            ShapeContent::Picture { .. }
        ));
    }

    #[test]
    fn test_parse_notes_body_only() {
        let xml = r#"<p:notes><p:cSld><p:spTree>
            <p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Slide Image"/>
                    <p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr>
            </p:sp>
            <p:sp>
                <p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder"/>
                    <p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>
                <p:txBody>
                    <a:p><a:r><a:t>Remember the demo.</a:t></a:r></a:p>
                    <a:p><a:r><a:t>Second line.</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>
        </p:spTree></p:cSld></p:notes>"#;

        assert_eq!(
            parse_notes_xml(xml).unwrap(),
            "Remember the demo.\nSecond line."
        );
    }

    #[test]
    fn test_parse_layout_name() {
        let xml = r#"<p:sldLayout><p:cSld name="Title and Content"><p:spTree/></p:cSld></p:sldLayout>"#;
        assert_eq!(
            parse_layout_name(xml).unwrap().as_deref(),
            Some("Title and Content")
        );
        assert_eq!(
            parse_layout_name("<p:sldLayout><p:cSld><p:spTree/></p:cSld></p:sldLayout>")
                .unwrap(),
            None
        );
    }
}
