use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::filter::IgnoreRuleset;

/// A filesystem node visited during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Path as reachable from the working directory
    pub path: PathBuf,
    /// Path relative to the walk root (empty for the root itself)
    pub relative: PathBuf,
    /// File name shown in the tree
    pub name: String,
    pub is_directory: bool,
    /// Symlinked directories are listed but never descended into
    pub is_symlink: bool,
    /// Directory levels below the root (root = 0)
    pub depth: usize,
}

impl PathEntry {
    pub fn root(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: path.to_path_buf(),
            relative: PathBuf::new(),
            name,
            is_directory: true,
            is_symlink: false,
            depth: 0,
        }
    }

    /// List this directory's children, drop ignored ones, and sort them for display.
    ///
    /// Entries that are neither a file nor a directory (sockets, dangling links)
    /// are skipped. Files are always empty.
    pub fn children(&self, ruleset: &IgnoreRuleset, directories_only: bool) -> io::Result<Vec<PathEntry>> {
        if !self.is_directory {
            return Ok(Vec::new());
        }

        let mut children = Vec::new();
        for dirent in fs::read_dir(&self.path)? {
            let Ok(dirent) = dirent else { continue };
            let Ok(file_type) = dirent.file_type() else { continue };
            let path = dirent.path();

            let is_symlink = file_type.is_symlink();
            let is_directory = if is_symlink { path.is_dir() } else { file_type.is_dir() };
            let is_file = if is_symlink { path.is_file() } else { file_type.is_file() };
            if !is_directory && !is_file {
                continue;
            }
            if directories_only && !is_directory {
                continue;
            }

            let relative = self.relative.join(dirent.file_name());
            if ruleset.is_ignored(&relative, is_directory) {
                log::debug!("ignored {}", relative.display());
                continue;
            }

            children.push(PathEntry {
                path,
                relative,
                name: dirent.file_name().to_string_lossy().into_owned(),
                is_directory,
                is_symlink,
                depth: self.depth + 1,
            });
        }

        children.sort_by(sibling_order);
        Ok(children)
    }
}

/// Directories first, then case-sensitive byte order of the name.
pub fn sibling_order(a: &PathEntry, b: &PathEntry) -> Ordering {
    match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    }
}
