//! CLI driver: discover slide decks, extract each into normalized JSON
//! content, and emit a small static site around the results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deck_core::{Diagnostics, Presentation};
use deck_pptx::PptxExtractor;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

mod site;

/// Convert slide decks into normalized JSON content.
#[derive(Parser, Debug)]
#[command(name = "deck-convert")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input .pptx file OR a directory of .pptx files
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for JSON, media, and the index pages
    #[arg(short, long)]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let files = discover_inputs(&args.input)?;
    if files.is_empty() {
        bail!("no .pptx files found in {}", args.input.display());
    }

    std::fs::create_dir_all(&args.output).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output.display()
        )
    })?;

    // Files are independent of each other, so the batch runs in parallel;
    // collect keeps the discovery order.
    let presentations: Vec<Presentation> = files
        .par_iter()
        .filter_map(|path| match process_file(path, &args.output) {
            Ok(presentation) => Some(presentation),
            Err(e) => {
                log::error!("Failed to process {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    if presentations.is_empty() {
        bail!("none of the input files could be processed");
    }

    site::generate(&presentations, &args.output)?;
    log::info!(
        "Generated content for {} of {} presentations in {}",
        presentations.len(),
        files.len(),
        args.output.display()
    );

    Ok(())
}

/// Extract a single deck; any error here skips the file, not the batch.
fn process_file(path: &Path, output_dir: &Path) -> Result<Presentation> {
    let mut diags = Diagnostics::new();
    let presentation = PptxExtractor::new()
        .extract(path, output_dir, &mut diags)
        .with_context(|| format!("Failed to extract {}", path.display()))?;

    if !diags.is_empty() {
        log::debug!(
            "{}: {} recoverable degradations during extraction",
            path.display(),
            diags.len()
        );
    }

    Ok(presentation)
}

/// Collect the input files: one file, or every .pptx in a directory.
///
/// Directory listings are sorted so batch output order is deterministic.
fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if !is_pptx(input) {
            bail!("input file is not a .pptx file: {}", input.display());
        }
        return Ok(vec![input.to_path_buf()]);
    }
    if input.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(input)
            .with_context(|| format!("Failed to read directory: {}", input.display()))?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_pptx(path))
            .collect();
        files.sort();
        return Ok(files);
    }
    bail!("input path does not exist: {}", input.display());
}

fn is_pptx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pptx"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_sorts_directory_entries() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.pptx"), b"").unwrap();
        fs::write(tmp.path().join("a.pptx"), b"").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(tmp.path().join("sub.pptx")).unwrap();

        let files = discover_inputs(tmp.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pptx", "b.pptx"]);
    }

    #[test]
    fn test_discover_rejects_wrong_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deck.key");
        fs::write(&path, b"").unwrap();

        assert!(discover_inputs(&path).is_err());
        assert!(discover_inputs(&tmp.path().join("missing.pptx")).is_err());
    }

    #[test]
    fn test_discover_accepts_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Deck.PPTX");
        fs::write(&path, b"").unwrap();

        assert_eq!(discover_inputs(&path).unwrap(), vec![path]);
    }
}
