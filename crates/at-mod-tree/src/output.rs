use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use at_base::{AnnotreeError, Result};

use crate::render::RenderedTree;

/// Write `tree` to `output`, or to stdout when no path is given.
/// Files always end with a newline.
pub fn write_tree(tree: &RenderedTree, output: Option<&Path>) -> Result<()> {
    let mut text = tree.to_text();
    text.push('\n');
    match output {
        Some(path) => write_all_or_nothing(path, &text),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| AnnotreeError::io(Path::new("<stdout>"), e))
        }
    }
}

/// Replace `path` with `content` in one step: write a sibling temp file, then rename it over.
///
/// A symlinked `path` is followed so the link itself survives, and an existing
/// target keeps its permissions.
pub(crate) fn write_all_or_nothing(path: &Path, content: &str) -> Result<()> {
    let target = resolve_target(path)?;
    let tmp = temp_sibling(&target);
    let existing = fs::metadata(&target).ok();
    let staged = fs::write(&tmp, content).and_then(|_| match &existing {
        Some(meta) => fs::set_permissions(&tmp, meta.permissions()),
        None => Ok(()),
    });
    if let Err(e) = staged.and_then(|_| fs::rename(&tmp, &target)) {
        let _ = fs::remove_file(&tmp);
        return Err(AnnotreeError::io(path, e));
    }
    Ok(())
}

fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).map_err(|e| AnnotreeError::io(path, e)),
        _ => Ok(path.to_path_buf()),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{}.annotree-tmp", name))
}
