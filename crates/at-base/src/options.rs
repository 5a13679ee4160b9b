//! Validated generation and embedding options shared by the tree module and the CLI.

use crate::config::constants::{DEFAULT_ANNOTATION_COLUMN, DEFAULT_LINE_LIMIT, END_TOKEN, START_TOKEN};
use crate::error::{AnnotreeError, Result};

/// How a tree is walked and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Deepest directory level rendered (root children are level 1). `None` = unlimited.
    pub max_depth: Option<usize>,
    /// Drop files from the listing
    pub directories_only: bool,
    /// Append `# <description>` to entries that have one
    pub annotate: bool,
    /// Display column the annotation marker is padded to
    pub annotation_column: usize,
    /// Maximum number of entry lines. `None` = unlimited.
    pub line_limit: Option<usize>,
    /// Descriptions wider than this are cut and end with an ellipsis
    pub max_description_width: Option<usize>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            directories_only: false,
            annotate: true,
            annotation_column: DEFAULT_ANNOTATION_COLUMN,
            line_limit: Some(DEFAULT_LINE_LIMIT),
            max_description_width: None,
        }
    }
}

impl TreeOptions {
    /// Reject combinations that cannot produce a meaningful tree.
    pub fn validate(&self) -> Result<()> {
        if self.line_limit == Some(0) {
            return Err(AnnotreeError::config("line limit must be at least 1"));
        }
        if self.max_description_width == Some(0) {
            return Err(AnnotreeError::config("maximum description width must be at least 1"));
        }
        Ok(())
    }
}

/// Convert a signed depth from the command line or config into a depth limit.
/// Negative values are rejected rather than treated as "unlimited".
pub fn depth_limit(level: Option<i64>) -> Result<Option<usize>> {
    match level {
        None => Ok(None),
        Some(n) if n < 0 => Err(AnnotreeError::config(format!("depth must not be negative (got {})", n))),
        Some(n) => usize::try_from(n)
            .map(Some)
            .map_err(|_| AnnotreeError::config(format!("depth {} is out of range", n))),
    }
}

/// The sentinel pair delimiting the auto-managed region of a host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedMarkers {
    pub start: String,
    pub end: String,
}

impl Default for EmbedMarkers {
    fn default() -> Self {
        Self::wrapped(START_TOKEN, END_TOKEN)
    }
}

impl EmbedMarkers {
    /// Wrap bare tokens in HTML comment syntax: `ANNOTREE:START` -> `<!-- ANNOTREE:START -->`.
    pub fn wrapped(start_token: &str, end_token: &str) -> Self {
        Self { start: format!("<!-- {} -->", start_token.trim()), end: format!("<!-- {} -->", end_token.trim()) }
    }

    pub fn validate(&self) -> Result<()> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(AnnotreeError::config("embed markers must not be empty"));
        }
        if self.start == self.end {
            return Err(AnnotreeError::config("start and end markers must differ"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        let opts = TreeOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.annotation_column, 42);
        assert_eq!(opts.line_limit, Some(1000));
        assert!(opts.annotate);
    }

    #[test]
    fn test_zero_line_limit_rejected() {
        let opts = TreeOptions { line_limit: Some(0), ..TreeOptions::default() };
        assert!(matches!(opts.validate(), Err(AnnotreeError::Config(_))));
    }

    #[test]
    fn test_depth_limit() {
        assert_eq!(depth_limit(None).unwrap(), None);
        assert_eq!(depth_limit(Some(0)).unwrap(), Some(0));
        assert_eq!(depth_limit(Some(3)).unwrap(), Some(3));
        assert!(matches!(depth_limit(Some(-1)), Err(AnnotreeError::Config(_))));
    }

    #[test]
    fn test_default_markers() {
        let markers = EmbedMarkers::default();
        assert_eq!(markers.start, "<!-- ANNOTREE:START -->");
        assert_eq!(markers.end, "<!-- ANNOTREE:END -->");
        assert!(markers.validate().is_ok());
    }

    #[test]
    fn test_identical_markers_rejected() {
        let markers = EmbedMarkers { start: "X".into(), end: "X".into() };
        assert!(markers.validate().is_err());
        let blank = EmbedMarkers { start: " ".into(), end: "END".into() };
        assert!(blank.validate().is_err());
    }
}
