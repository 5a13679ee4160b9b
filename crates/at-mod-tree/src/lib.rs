//! Annotated directory trees: walk, describe, render, and embed.
pub mod annotate;
pub mod embed;
pub mod filter;
mod output;
pub mod render;
pub mod types;
mod walk;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use at_base::constants::DEFAULT_INITIALIZERS;
use at_base::{AnnotreeError, EmbedMarkers, Result, TreeOptions};

pub use annotate::Annotator;
pub use embed::{EmbedOutcome, MarkerSpan, embed_tree};
pub use filter::{IgnoreRuleset, IgnoreSource};
pub use output::write_tree;
pub use render::RenderedTree;
pub use types::PathEntry;
pub use walk::build_tree;

/// Everything needed to generate one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub root: PathBuf,
    /// Explicit ignore file; `None` = `.treeignore`, then `.gitignore`, then nothing
    pub ignore_file: Option<PathBuf>,
    pub options: TreeOptions,
    /// Package initializer names, tried in order
    pub initializers: Vec<String>,
}

impl GenerateRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_file: None,
            options: TreeOptions::default(),
            initializers: DEFAULT_INITIALIZERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn annotator(&self) -> Annotator {
        Annotator::new(self.initializers.clone(), self.options.max_description_width)
    }
}

/// Validate the request, resolve ignore rules, and render the tree.
pub fn generate_tree(request: &GenerateRequest) -> Result<RenderedTree> {
    request.options.validate()?;
    ensure_directory(&request.root)?;
    let ruleset = IgnoreRuleset::load(&request.root, request.ignore_file.as_deref())?;
    if let Some(origin) = ruleset.origin() {
        log::debug!("{} ignore patterns from {}", ruleset.len(), origin.display());
    }
    let tree = build_tree(&request.root, &request.options, &ruleset, &request.annotator())?;
    log::debug!(
        "rendered {} ({} directories, {} files, ignore source: {})",
        request.root.display(),
        tree.directories,
        tree.files,
        ruleset.source().name()
    );
    Ok(tree)
}

/// Generate a tree for `request` and splice it into `target` between `markers`.
///
/// Markers are checked before the walk starts, so a bad target costs nothing
/// and is never written.
pub fn embed_into(target: &Path, request: &GenerateRequest, markers: &EmbedMarkers) -> Result<EmbedOutcome> {
    markers.validate()?;
    let content = embed::read_target(target)?;
    let span = embed::locate_markers(&content, markers).map_err(|problem| AnnotreeError::marker(target, problem))?;
    let tree = generate_tree(request)?;
    let updated = embed::splice(&content, &span, &tree.to_text());
    embed::write_if_changed(target, &content, &updated)
}

fn ensure_directory(root: &Path) -> Result<()> {
    let meta = fs::metadata(root).map_err(|e| AnnotreeError::io(root, e))?;
    if !meta.is_dir() {
        return Err(AnnotreeError::io(root, io::Error::new(io::ErrorKind::NotADirectory, "not a directory")));
    }
    Ok(())
}
