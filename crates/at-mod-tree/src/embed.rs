//! Splicing a rendered tree into a host document between marker lines.

use std::fs;
use std::path::Path;

use at_base::constants::FENCE_LANG;
use at_base::{AnnotreeError, EmbedMarkers, MarkerProblem, Result};

use crate::output::write_all_or_nothing;

/// Byte offsets of a validated marker pair inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpan {
    /// Offset of the first byte of the start marker
    pub start: usize,
    /// First byte after the start marker
    pub content_start: usize,
    /// First byte of the end marker
    pub content_end: usize,
    /// First byte after the end marker
    pub end: usize,
}

/// What an embed did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedOutcome {
    Updated,
    /// Region already held this exact tree; the file was not touched
    Unchanged,
}

/// Find exactly one start marker followed by exactly one end marker.
pub fn locate_markers(content: &str, markers: &EmbedMarkers) -> std::result::Result<MarkerSpan, MarkerProblem> {
    let start = single_occurrence(content, &markers.start)?;
    let end = single_occurrence(content, &markers.end)?;
    let content_start = start + markers.start.len();
    if end < content_start {
        return Err(MarkerProblem::Misordered);
    }
    Ok(MarkerSpan { start, content_start, content_end: end, end: end + markers.end.len() })
}

fn single_occurrence(content: &str, marker: &str) -> std::result::Result<usize, MarkerProblem> {
    let hits: Vec<usize> = content.match_indices(marker).map(|(idx, _)| idx).collect();
    match hits.as_slice() {
        [] => Err(MarkerProblem::Missing(marker.to_string())),
        [idx] => Ok(*idx),
        _ => Err(MarkerProblem::Duplicate { marker: marker.to_string(), count: hits.len() }),
    }
}

/// Rebuild `content` with the region between the markers replaced by a fenced tree.
pub fn splice(content: &str, span: &MarkerSpan, tree_text: &str) -> String {
    let mut out = String::with_capacity(content.len() + tree_text.len() + 16);
    out.push_str(&content[..span.content_start]);
    out.push_str("\n```");
    out.push_str(FENCE_LANG);
    out.push('\n');
    out.push_str(tree_text.trim_end_matches('\n'));
    out.push_str("\n```\n");
    out.push_str(&content[span.content_end..]);
    out
}

/// Replace the marked region of `target` with `tree_text`.
///
/// The file is only rewritten when its content actually changes, so a second
/// run over an unchanged project is a no-op.
pub fn embed_tree(target: &Path, tree_text: &str, markers: &EmbedMarkers) -> Result<EmbedOutcome> {
    let content = read_target(target)?;
    let span = locate_markers(&content, markers).map_err(|problem| AnnotreeError::marker(target, problem))?;
    write_if_changed(target, &content, &splice(&content, &span, tree_text))
}

pub(crate) fn read_target(target: &Path) -> Result<String> {
    fs::read_to_string(target).map_err(|e| AnnotreeError::io(target, e))
}

pub(crate) fn write_if_changed(target: &Path, old: &str, new: &str) -> Result<EmbedOutcome> {
    if old == new {
        log::debug!("{} already up to date", target.display());
        return Ok(EmbedOutcome::Unchanged);
    }
    write_all_or_nothing(target, new)?;
    Ok(EmbedOutcome::Updated)
}
