//! Static site output: one JSON document per deck plus an index page and
//! a viewer that renders the JSON client-side.

use anyhow::{Context, Result};
use deck_core::Presentation;
use std::fs;
use std::path::Path;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const VIEWER_TEMPLATE: &str = include_str!("templates/viewer.html");
const DECK_LIST_PLACEHOLDER: &str = "<!-- DECK_LIST -->";

/// Write `json/<id>.json` for every presentation, then the index and
/// viewer pages next to them.
pub fn generate(presentations: &[Presentation], output_dir: &Path) -> Result<()> {
    let json_dir = output_dir.join("json");
    fs::create_dir_all(&json_dir)
        .with_context(|| format!("Failed to create {}", json_dir.display()))?;

    let mut deck_list = String::new();
    for presentation in presentations {
        let filename = format!("{}.json", presentation.metadata.id);
        let path = json_dir.join(&filename);
        log::info!("Saving JSON to {}", path.display());

        let json = serde_json::to_string_pretty(presentation)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        let title = presentation
            .first_slide_title()
            .unwrap_or(&presentation.metadata.id);
        deck_list.push_str(&format!(
            "<li><a href=\"viewer.html?file=json/{}\">{} ({})</a></li>\n",
            filename,
            escape_html(title),
            escape_html(&presentation.metadata.id)
        ));
    }

    let index = INDEX_TEMPLATE.replace(DECK_LIST_PLACEHOLDER, &deck_list);
    fs::write(output_dir.join("index.html"), index)
        .with_context(|| "Failed to write index.html")?;
    fs::write(output_dir.join("viewer.html"), VIEWER_TEMPLATE)
        .with_context(|| "Failed to write viewer.html")?;

    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
