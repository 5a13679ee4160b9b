// =============================================================================
// LAYOUT
// =============================================================================

/// Default column at which annotations start
pub const DEFAULT_ANNOTATION_COLUMN: usize = 42;

/// Default maximum number of entry lines in a rendered tree
pub const DEFAULT_LINE_LIMIT: usize = 1000;

/// Branch glyph for a sibling that is not the last one
pub const TEE: &str = "├─ ";

/// Branch glyph for the last sibling
pub const LAST: &str = "└─ ";

/// Prefix segment under a non-last ancestor
pub const BRANCH: &str = "│   ";

/// Prefix segment under a last ancestor
pub const SPACE: &str = "    ";

/// Separator written between the padding and an annotation
pub const ANNOTATION_MARKER: &str = "# ";

/// Appended to a description cut down to its maximum width
pub const ELLIPSIS: char = '…';

// =============================================================================
// ANNOTATION SCAN
// =============================================================================

/// Non-blank lines inspected at the top of a file before giving up
pub const SCAN_LINE_LIMIT: usize = 20;

/// Bytes read from the top of a file for annotation
pub const SCAN_BYTE_LIMIT: u64 = 8 * 1024;

/// Per-directory files whose leading docstring describes the directory
pub const DEFAULT_INITIALIZERS: &[&str] = &["__init__.py"];

// =============================================================================
// IGNORE FILES
// =============================================================================

/// Tool-specific ignore file, looked up in the walk root
pub const TREEIGNORE_FILE: &str = ".treeignore";

/// VCS ignore file used when no tool-specific one exists
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Version-control metadata directories that are never rendered
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", ".bzr"];

// =============================================================================
// EMBEDDING
// =============================================================================

/// Token of the default start marker
pub const START_TOKEN: &str = "ANNOTREE:START";

/// Token of the default end marker
pub const END_TOKEN: &str = "ANNOTREE:END";

/// Info string of the fence wrapped around an embedded tree
pub const FENCE_LANG: &str = "text";

// =============================================================================
// CONFIG
// =============================================================================

/// Project configuration file, looked up in the walk root
pub const CONFIG_FILE: &str = ".annotree.yaml";
