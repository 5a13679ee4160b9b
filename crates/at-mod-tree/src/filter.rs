//! Ignore-file resolution and matching.
//!
//! The ignore source is picked from an ordered list of strategies
//! ([`IgnoreSource::resolution_order`]): an explicitly named file, then the
//! project's `.treeignore`, then its `.gitignore`, then nothing. Patterns use
//! gitignore grammar and are matched relative to the walk root.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use at_base::constants::{GITIGNORE_FILE, TREEIGNORE_FILE, VCS_DIRS};
use at_base::{AnnotreeError, Result};

/// One strategy for finding the ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreSource {
    /// File named by the caller; must be readable
    Explicit(PathBuf),
    /// `.treeignore` in the walk root
    ProjectDefault,
    /// `.gitignore` in the walk root
    VcsFallback,
    /// Nothing is ignored (apart from VCS metadata)
    Empty,
}

impl IgnoreSource {
    /// Strategies in the order they are tried.
    pub fn resolution_order(explicit: Option<&Path>) -> Vec<IgnoreSource> {
        let mut order = Vec::with_capacity(4);
        if let Some(path) = explicit {
            order.push(IgnoreSource::Explicit(path.to_path_buf()));
        }
        order.extend([IgnoreSource::ProjectDefault, IgnoreSource::VcsFallback, IgnoreSource::Empty]);
        order
    }

    pub fn name(&self) -> &'static str {
        match self {
            IgnoreSource::Explicit(_) => "explicit",
            IgnoreSource::ProjectDefault => TREEIGNORE_FILE,
            IgnoreSource::VcsFallback => GITIGNORE_FILE,
            IgnoreSource::Empty => "none",
        }
    }

    /// The file this strategy reads, if any.
    pub fn candidate(&self, root: &Path) -> Option<PathBuf> {
        match self {
            IgnoreSource::Explicit(path) => Some(path.clone()),
            IgnoreSource::ProjectDefault => Some(root.join(TREEIGNORE_FILE)),
            IgnoreSource::VcsFallback => Some(root.join(GITIGNORE_FILE)),
            IgnoreSource::Empty => None,
        }
    }

    /// Read this strategy's file. `Ok(None)` means "fall through to the next strategy".
    pub fn read(&self, root: &Path) -> Result<Option<(PathBuf, String)>> {
        let Some(path) = self.candidate(root) else { return Ok(None) };
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some((path, content))),
            Err(e) => match self {
                IgnoreSource::Explicit(_) => Err(AnnotreeError::config(format!(
                    "cannot read ignore file '{}': {}",
                    path.display(),
                    e
                ))),
                _ => {
                    log::debug!("no usable {} at {}: {}", self.name(), path.display(), e);
                    Ok(None)
                }
            },
        }
    }
}

/// Compiled ignore patterns for one walk.
#[derive(Debug)]
pub struct IgnoreRuleset {
    matcher: Option<Gitignore>,
    source: IgnoreSource,
    origin: Option<PathBuf>,
}

impl IgnoreRuleset {
    /// Ignores nothing but VCS metadata directories.
    pub fn empty() -> Self {
        Self { matcher: None, source: IgnoreSource::Empty, origin: None }
    }

    /// Resolve the ignore source for `root` and compile it.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        for source in IgnoreSource::resolution_order(explicit) {
            if source == IgnoreSource::Empty {
                break;
            }
            if let Some((path, content)) = source.read(root)? {
                log::debug!("using ignore rules from {} ({})", path.display(), source.name());
                return Ok(Self::from_patterns(root, source, Some(path), &content));
            }
        }
        log::debug!("no ignore file found for {}", root.display());
        Ok(Self::empty())
    }

    /// Compile gitignore-style `content`. Malformed lines are skipped with a warning.
    pub fn from_patterns(root: &Path, source: IgnoreSource, origin: Option<PathBuf>, content: &str) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Err(e) = builder.add_line(origin.clone(), line) {
                log::warn!("skipping ignore pattern '{}': {}", trimmed, e);
            }
        }
        let matcher = match builder.build() {
            Ok(gitignore) => Some(gitignore),
            Err(e) => {
                log::warn!("ignore rules from {} could not be compiled: {}", source.name(), e);
                None
            }
        };
        Self { matcher, source, origin }
    }

    /// Whether `relative` (a path relative to the walk root) is excluded.
    ///
    /// VCS metadata directories are excluded before any pattern is consulted,
    /// so a negation cannot bring them back.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if is_dir
            && let Some(name) = relative.file_name().and_then(|n| n.to_str())
            && VCS_DIRS.contains(&name)
        {
            return true;
        }
        match &self.matcher {
            Some(gitignore) => gitignore.matched(relative, is_dir).is_ignore(),
            None => false,
        }
    }

    pub fn source(&self) -> &IgnoreSource {
        &self.source
    }

    /// The ignore file the rules were read from.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Number of compiled patterns, negations included.
    pub fn len(&self) -> usize {
        self.matcher.as_ref().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ruleset(patterns: &str) -> IgnoreRuleset {
        IgnoreRuleset::from_patterns(Path::new("/project"), IgnoreSource::Empty, None, patterns)
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(
            IgnoreSource::resolution_order(None),
            vec![IgnoreSource::ProjectDefault, IgnoreSource::VcsFallback, IgnoreSource::Empty]
        );
        let order = IgnoreSource::resolution_order(Some(Path::new("custom.ignore")));
        assert_eq!(order[0], IgnoreSource::Explicit(PathBuf::from("custom.ignore")));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_glob_and_directory_patterns() {
        let rules = ruleset("*.pyc\nbuild/\n");
        assert!(rules.is_ignored(Path::new("pkg/mod.pyc"), false));
        assert!(rules.is_ignored(Path::new("build"), true));
        // Trailing slash only matches directories
        assert!(!rules.is_ignored(Path::new("build"), false));
        assert!(!rules.is_ignored(Path::new("src/main.py"), false));
    }

    #[test]
    fn test_negation_later_wins() {
        let rules = ruleset("*.log\n!keep.log\n");
        assert!(rules.is_ignored(Path::new("debug.log"), false));
        assert!(!rules.is_ignored(Path::new("keep.log"), false));
    }

    #[test]
    fn test_vcs_dirs_not_overridable() {
        let rules = ruleset("!.git/\n!.hg\n");
        assert!(rules.is_ignored(Path::new(".git"), true));
        assert!(rules.is_ignored(Path::new("vendor/.hg"), true));
        // A plain file called .git (worktrees, submodules) is not metadata dir
        assert!(!rules.is_ignored(Path::new(".git"), false));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let rules = ruleset("# a comment\n\n   \n*.tmp\n");
        assert_eq!(rules.len(), 1);
        assert!(rules.is_ignored(Path::new("x.tmp"), false));
    }

    #[test]
    fn test_load_prefers_treeignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".treeignore"), "*.a\n").unwrap();
        fs::write(dir.path().join(".gitignore"), "*.b\n").unwrap();

        let rules = IgnoreRuleset::load(dir.path(), None).unwrap();
        assert_eq!(rules.source(), &IgnoreSource::ProjectDefault);
        assert!(rules.is_ignored(Path::new("x.a"), false));
        assert!(!rules.is_ignored(Path::new("x.b"), false));
    }

    #[test]
    fn test_load_falls_back_to_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.b\n").unwrap();

        let rules = IgnoreRuleset::load(dir.path(), None).unwrap();
        assert_eq!(rules.source(), &IgnoreSource::VcsFallback);
        assert_eq!(rules.origin(), Some(dir.path().join(".gitignore").as_path()));
        assert!(rules.is_ignored(Path::new("x.b"), false));
    }

    #[test]
    fn test_load_without_any_file() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRuleset::load(dir.path(), None).unwrap();
        assert_eq!(rules.source(), &IgnoreSource::Empty);
        assert!(rules.is_empty());
        assert!(!rules.is_ignored(Path::new("anything"), false));
    }

    #[test]
    fn test_explicit_file_used_over_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".treeignore"), "*.a\n").unwrap();
        let custom = dir.path().join("custom.ignore");
        fs::write(&custom, "*.c\n").unwrap();

        let rules = IgnoreRuleset::load(dir.path(), Some(&custom)).unwrap();
        assert_eq!(rules.source(), &IgnoreSource::Explicit(custom.clone()));
        assert!(rules.is_ignored(Path::new("x.c"), false));
        assert!(!rules.is_ignored(Path::new("x.a"), false));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = IgnoreRuleset::load(dir.path(), Some(&dir.path().join("missing.ignore"))).unwrap_err();
        assert!(matches!(err, AnnotreeError::Config(_)));
    }
}
