//! Reconstruction of a diagram's hierarchy from its point/connection graph.
//!
//! The raw data part is a flat list of typed points plus typed directed
//! connections between them. Only `parOf` connections carry structure; the
//! `presOf`/`presParOf` connections describe the visual presentation tree,
//! which is used for two things before being discarded: identifying
//! presentation-only points (never emitted) and tracing icons attached to
//! presentation points back to the data point they illustrate.
//!
//! Resolution is deterministic: points and connections are processed in
//! document order throughout.

use crate::media::MediaStore;
use crate::package::RelatedParts;
use crate::xml::{attr, local_name};
use deck_core::{DegradationKind, DiagramNode, Diagnostics, Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};

/// One raw point of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagramPoint {
    /// Model id, unique within one diagram.
    pub id: String,

    /// Point type attribute; `"doc"` marks the data root.
    pub kind: String,

    /// Paragraph texts joined with newlines.
    pub text: String,

    /// Relationship id of an embedded icon blob.
    pub icon_rel: Option<String>,

    pub icon_alt: Option<String>,

    /// Explicit visual-to-data association attribute.
    pub assoc: Option<String>,
}

/// Connection types the resolver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CxnKind {
    /// Structural parent-of edge; also the default when no type is given.
    ParOf,
    /// Presentation point → the data point it presents.
    PresOf,
    /// Presentation-tree parent edge.
    PresParOf,
    Other,
}

impl CxnKind {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            None | Some("parOf") => Self::ParOf,
            Some("presOf") => Self::PresOf,
            Some("presParOf") => Self::PresParOf,
            Some(_) => Self::Other,
        }
    }
}

/// A typed directed edge between two points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagramConnection {
    pub src: String,
    pub dest: String,
    pub kind: CxnKind,
}

/// The parsed graph, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DiagramGraph {
    pub points: Vec<DiagramPoint>,
    pub connections: Vec<DiagramConnection>,
}

/// Resolve one diagram shape into its layout name and node trees.
///
/// `slide_parts` is the resolver scoped to the slide part; icons are
/// resolved through a view scoped to the diagram data part, since that is
/// where their relationships live. Any failure degrades to `None` for this
/// shape only.
pub fn extract_diagram(
    data_rel: Option<&str>,
    layout_rel: Option<&str>,
    slide_parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> Option<(String, Vec<DiagramNode>)> {
    let data_rel = data_rel?;
    let Some(data_part) = slide_parts.related_part(data_rel) else {
        diags.record(
            DegradationKind::MediaRelationshipMissing,
            format!("diagram data relationship {} does not resolve", data_rel),
        );
        return None;
    };
    let xml = String::from_utf8_lossy(data_part.bytes).into_owned();

    let graph = match parse_diagram_xml(&xml) {
        Ok(graph) => graph,
        Err(e) => {
            diags.record(DegradationKind::DiagramMalformed, e.to_string());
            return None;
        }
    };

    let icon_parts = slide_parts.view_of(data_rel)?;
    let nodes = resolve_nodes(&graph, icon_parts.as_ref(), media, diags)?;

    let layout = layout_rel
        .and_then(|rel| slide_parts.related_part(rel))
        .and_then(|part| parse_layout_title(&String::from_utf8_lossy(part.bytes)))
        .unwrap_or_default();

    Some((layout, nodes))
}

/// Turn a parsed graph into the filtered sequence of root node trees.
pub(crate) fn resolve_nodes(
    graph: &DiagramGraph,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> Option<Vec<DiagramNode>> {
    if graph.points.is_empty() {
        diags.record(DegradationKind::DiagramMalformed, "diagram has no points");
        return None;
    }

    let index_of: HashMap<&str, usize> = graph
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| (point.id.as_str(), index))
        .collect();

    let mut builds = persist_icons(graph, parts, media, diags);

    // Association maps from the presentation connections.
    let mut visual_to_data: HashMap<&str, &str> = HashMap::new();
    let mut visual_parent: HashMap<&str, &str> = HashMap::new();
    let mut visual_children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut pres_points: HashSet<&str> = HashSet::new();
    for cxn in &graph.connections {
        match cxn.kind {
            CxnKind::PresOf => {
                visual_to_data.insert(cxn.dest.as_str(), cxn.src.as_str());
            }
            CxnKind::PresParOf => {
                visual_parent.insert(cxn.dest.as_str(), cxn.src.as_str());
                visual_children
                    .entry(cxn.src.as_str())
                    .or_default()
                    .push(cxn.dest.as_str());
                pres_points.insert(cxn.src.as_str());
                pres_points.insert(cxn.dest.as_str());
            }
            _ => {}
        }
    }
    // Explicit association attributes override the presOf links.
    for point in &graph.points {
        if let Some(assoc) = &point.assoc {
            visual_to_data.insert(point.id.as_str(), assoc.as_str());
        }
    }

    let data_root = graph
        .points
        .iter()
        .find(|point| point.kind == "doc")
        .map(|point| point.id.as_str());

    // Move icons from decorative presentation points to the data point
    // that owns them, unless the owner already has one.
    for i in 0..graph.points.len() {
        if builds[i].icon.is_none() {
            continue;
        }
        let point_id = graph.points[i].id.as_str();
        let Some(owner_id) = find_data_owner(
            point_id,
            &visual_to_data,
            &visual_parent,
            &visual_children,
            data_root,
        ) else {
            continue;
        };
        if owner_id == point_id {
            continue;
        }
        let Some(&owner) = index_of.get(owner_id) else {
            continue;
        };
        if builds[owner].icon.is_some() {
            continue;
        }
        builds[owner].icon = builds[i].icon.take();
        builds[owner].icon_alt = builds[i].icon_alt.take();
    }

    // Structural adjacency: parOf edges between data points only.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.points.len()];
    let mut has_parent = vec![false; graph.points.len()];
    for cxn in &graph.connections {
        if cxn.kind != CxnKind::ParOf
            || pres_points.contains(cxn.src.as_str())
            || pres_points.contains(cxn.dest.as_str())
        {
            continue;
        }
        let (Some(&src), Some(&dest)) = (
            index_of.get(cxn.src.as_str()),
            index_of.get(cxn.dest.as_str()),
        ) else {
            continue;
        };
        adjacency[src].push(dest);
        has_parent[dest] = true;
    }

    let mut path = Vec::new();
    let mut roots = Vec::new();
    for (index, point) in graph.points.iter().enumerate() {
        if has_parent[index] || pres_points.contains(point.id.as_str()) {
            continue;
        }
        roots.push(build_node(index, 0, graph, &builds, &adjacency, &mut path));
    }

    // A single textless, iconless root is purely organizational (the doc
    // root, usually); its children become the top-level nodes.
    if roots.len() == 1
        && roots[0].text.trim().is_empty()
        && roots[0].icon.is_none()
        && !roots[0].children.is_empty()
    {
        roots = roots.remove(0).children;
    }

    let filtered = filter_empty(roots);
    if filtered.is_empty() {
        diags.record(
            DegradationKind::DiagramMalformed,
            "diagram has no usable structure",
        );
        return None;
    }
    Some(filtered)
}

/// Per-point mutable state carried through icon reassignment.
#[derive(Debug, Clone)]
struct NodeBuild {
    icon: Option<String>,
    icon_alt: Option<String>,
}

/// Persist every point's icon blob, in document order.
fn persist_icons(
    graph: &DiagramGraph,
    parts: &dyn RelatedParts,
    media: &MediaStore,
    diags: &mut Diagnostics,
) -> Vec<NodeBuild> {
    let mut builds: Vec<NodeBuild> = graph
        .points
        .iter()
        .map(|point| NodeBuild {
            icon: None,
            icon_alt: point.icon_alt.clone(),
        })
        .collect();

    for (i, point) in graph.points.iter().enumerate() {
        let Some(rel) = &point.icon_rel else {
            continue;
        };
        match parts.related_part(rel) {
            Some(part) => {
                let filename = format!(
                    "sa_{}.{}",
                    sanitize_point_id(&point.id),
                    icon_extension(&part.content_type)
                );
                match media.write(&filename, part.bytes) {
                    Ok(path) => builds[i].icon = Some(path),
                    Err(e) => diags.record(
                        DegradationKind::MediaWriteFailure,
                        format!("diagram icon {}: {}", filename, e),
                    ),
                }
            }
            None => diags.record(
                DegradationKind::MediaRelationshipMissing,
                format!("diagram icon relationship {} does not resolve", rel),
            ),
        }
    }
    builds
}

/// Filename-safe form of a point's model id (GUID braces and dashes out).
fn sanitize_point_id(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(c, '{' | '}' | '-'))
        .collect()
}

fn icon_extension(content_type: &str) -> String {
    content_type
        .rsplit('/')
        .next()
        .unwrap_or("png")
        .replace("x-", "")
        .replace("+xml", "")
}

/// Walk from a presentation point to the data point that owns it.
///
/// Tries the point's own association first, then every sibling under the
/// same presentation parent, then moves up a level. The data root never
/// counts as an owner. The visited set terminates the walk on cyclic
/// presentation trees.
fn find_data_owner<'a>(
    start: &'a str,
    visual_to_data: &HashMap<&'a str, &'a str>,
    visual_parent: &HashMap<&'a str, &'a str>,
    visual_children: &HashMap<&'a str, Vec<&'a str>>,
    data_root: Option<&str>,
) -> Option<&'a str> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;
    loop {
        if !visited.insert(current) {
            return None;
        }
        if let Some(&data_id) = visual_to_data.get(current) {
            if Some(data_id) != data_root {
                return Some(data_id);
            }
        }
        let Some(&parent) = visual_parent.get(current) else {
            return None;
        };
        if let Some(siblings) = visual_children.get(parent) {
            for &sibling in siblings {
                if sibling == current {
                    continue;
                }
                if let Some(&data_id) = visual_to_data.get(sibling) {
                    if Some(data_id) != data_root {
                        return Some(data_id);
                    }
                }
            }
        }
        current = parent;
    }
}

/// Build one owned subtree, assigning levels top-down.
///
/// `path` holds the indices of the current ancestor chain; a child already
/// on it would become its own ancestor and is skipped.
fn build_node(
    index: usize,
    level: u32,
    graph: &DiagramGraph,
    builds: &[NodeBuild],
    adjacency: &[Vec<usize>],
    path: &mut Vec<usize>,
) -> DiagramNode {
    path.push(index);
    let mut node = DiagramNode {
        id: graph.points[index].id.clone(),
        text: graph.points[index].text.clone(),
        children: Vec::new(),
        level,
        icon: builds[index].icon.clone(),
        icon_alt: builds[index].icon_alt.clone(),
    };
    for &child in &adjacency[index] {
        if !path.contains(&child) {
            node.children
                .push(build_node(child, level + 1, graph, builds, adjacency, path));
        }
    }
    path.pop();
    node
}

/// Drop nodes that end up with no text, no icon, and no surviving
/// children. Bottom-up, so a parent emptied by its children's removal is
/// itself removed. Idempotent.
pub(crate) fn filter_empty(nodes: Vec<DiagramNode>) -> Vec<DiagramNode> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            node.children = filter_empty(std::mem::take(&mut node.children));
            let keep =
                !node.text.trim().is_empty() || node.icon.is_some() || !node.children.is_empty();
            keep.then_some(node)
        })
        .collect()
}

/// Parse a diagram data part into its point and connection lists.
pub(crate) fn parse_diagram_xml(xml: &str) -> Result<DiagramGraph> {
    let mut reader = Reader::from_str(xml);

    let mut graph = DiagramGraph::default();
    let mut point: Option<PointParse> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"pt" if point.is_none() => point = Some(PointParse::begin(e)),
                b"p" => {
                    if let Some(p) = point.as_mut() {
                        p.paragraphs.push(String::new());
                        p.in_paragraph = true;
                    }
                }
                // `t` is both the dgm text container and the leaf run
                // element; only the leaf (inside a paragraph) holds text.
                b"t" => {
                    if let Some(p) = point.as_mut() {
                        if p.in_paragraph {
                            p.in_text = true;
                        }
                    }
                }
                b"cxn" => push_connection(e, &mut graph.connections),
                _ => {
                    if let Some(p) = point.as_mut() {
                        p.element(e);
                    }
                }
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"pt" if point.is_none() => graph.points.push(PointParse::begin(e).finish()),
                b"p" => {
                    if let Some(p) = point.as_mut() {
                        p.paragraphs.push(String::new());
                    }
                }
                b"cxn" => push_connection(e, &mut graph.connections),
                _ => {
                    if let Some(p) = point.as_mut() {
                        p.element(e);
                    }
                }
            },
            Ok(Event::Text(ref e)) => {
                if let Some(p) = point.as_mut() {
                    if p.in_text {
                        if let Some(paragraph) = p.paragraphs.last_mut() {
                            paragraph.push_str(&e.unescape().unwrap_or_default());
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"pt" => graph.points.extend(point.take().map(PointParse::finish)),
                b"t" => {
                    if let Some(p) = point.as_mut() {
                        p.in_text = false;
                    }
                }
                b"p" => {
                    if let Some(p) = point.as_mut() {
                        p.in_paragraph = false;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Error parsing diagram data: {}", e))),
            _ => {}
        }
    }
    Ok(graph)
}

/// Layout display name from a diagram layout part (`dgm:title/@val`).
pub(crate) fn parse_layout_title(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"title" {
                    return attr(e, b"val");
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Parser state for one `pt` subtree.
struct PointParse {
    id: String,
    kind: String,
    assoc: Option<String>,
    icon_rel: Option<String>,
    icon_alt: Option<String>,
    paragraphs: Vec<String>,
    in_paragraph: bool,
    in_text: bool,
}

impl PointParse {
    fn begin(e: &BytesStart) -> Self {
        Self {
            id: attr(e, b"modelId").unwrap_or_default(),
            kind: attr(e, b"type").unwrap_or_else(|| "node".to_string()),
            assoc: None,
            icon_rel: None,
            icon_alt: None,
            paragraphs: Vec::new(),
            in_paragraph: false,
            in_text: false,
        }
    }

    fn element(&mut self, e: &BytesStart) {
        match local_name(e.name().as_ref()) {
            b"prSet" if self.assoc.is_none() => {
                self.assoc = attr(e, b"presAssocID").filter(|v| !v.is_empty());
            }
            b"cNvPr" if self.icon_alt.is_none() => {
                self.icon_alt = attr(e, b"descr")
                    .filter(|v| !v.is_empty())
                    .or_else(|| attr(e, b"title").filter(|v| !v.is_empty()));
            }
            b"blip" if self.icon_rel.is_none() => {
                self.icon_rel = attr(e, b"r:embed");
            }
            _ => {}
        }
    }

    fn finish(self) -> DiagramPoint {
        DiagramPoint {
            id: self.id,
            kind: self.kind,
            text: self.paragraphs.join("\n"),
            icon_rel: self.icon_rel,
            icon_alt: self.icon_alt,
            assoc: self.assoc,
        }
    }
}

fn push_connection(e: &BytesStart, out: &mut Vec<DiagramConnection>) {
    let src = attr(e, b"srcId").unwrap_or_default();
    let dest = attr(e, b"destId").unwrap_or_default();
    if src.is_empty() || dest.is_empty() {
        return;
    }
    out.push(DiagramConnection {
        src,
        dest,
        kind: CxnKind::from_attr(attr(e, b"type").as_deref()),
    });
}
