//! YAML project configuration (`.annotree.yaml`).
pub mod constants;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AnnotreeError, Result};
use crate::options::{TreeOptions, depth_limit};

use self::constants::CONFIG_FILE;

/// Every key is optional; absent keys leave the built-in default in place.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub annotation_column: Option<usize>,
    pub max_depth: Option<i64>,
    pub directories_only: Option<bool>,
    pub annotate: Option<bool>,
    pub line_limit: Option<usize>,
    pub max_description_width: Option<usize>,
    pub ignore_file: Option<PathBuf>,
    pub initializers: Option<Vec<String>>,
    pub start_marker: Option<String>,
    pub end_marker: Option<String>,
}

impl ProjectConfig {
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load an explicitly named config file. A missing file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AnnotreeError::config(format!("cannot read config '{}': {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Load `.annotree.yaml` from the walk root, or fall back to defaults when it is absent.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        log::debug!("loading project config from {}", path.display());
        Self::load(&path)
    }

    /// Overlay the configured values onto `options`.
    pub fn apply(&self, options: &mut TreeOptions) -> Result<()> {
        if let Some(column) = self.annotation_column {
            options.annotation_column = column;
        }
        if self.max_depth.is_some() {
            options.max_depth = depth_limit(self.max_depth)?;
        }
        if let Some(v) = self.directories_only {
            options.directories_only = v;
        }
        if let Some(v) = self.annotate {
            options.annotate = v;
        }
        if let Some(limit) = self.line_limit {
            options.line_limit = Some(limit);
        }
        if let Some(width) = self.max_description_width {
            options.max_description_width = Some(width);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProjectConfig::parse("").unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_parse_and_apply() {
        let cfg = ProjectConfig::parse("annotation_column: 30\nmax_depth: 2\nannotate: false\n").unwrap();
        let mut opts = TreeOptions::default();
        cfg.apply(&mut opts).unwrap();
        assert_eq!(opts.annotation_column, 30);
        assert_eq!(opts.max_depth, Some(2));
        assert!(!opts.annotate);
        assert!(!opts.directories_only);
    }

    #[test]
    fn test_negative_depth_in_config() {
        let cfg = ProjectConfig::parse("max_depth: -1\n").unwrap();
        let mut opts = TreeOptions::default();
        assert!(matches!(cfg.apply(&mut opts), Err(AnnotreeError::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(ProjectConfig::parse("colour: red\n"), Err(AnnotreeError::Config(_))));
    }

    #[test]
    fn test_discover_missing_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ProjectConfig::discover(dir.path()).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_discover_reads_root_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "initializers: [__init__.py, mod.rs]\n").unwrap();
        let cfg = ProjectConfig::discover(dir.path()).unwrap();
        assert_eq!(cfg.initializers, Some(vec!["__init__.py".to_string(), "mod.rs".to_string()]));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, AnnotreeError::Config(_)));
    }
}
